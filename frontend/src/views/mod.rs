//! Markup templates.
//!
//! Every function here is pure: it takes already-loaded data and returns
//! escaped [`maud::Markup`]. Interactive elements carry an
//! [`actions::Action`] rendered as an inline handler expression, which the
//! application shell parses back and dispatches.

pub mod actions;
pub mod admin;
pub mod catalogue;
pub mod components;
pub mod format;
pub mod forms;
pub mod member;
pub mod paging;
pub mod public;

pub use self::actions::{Action, ActionButton, ActionParseError, AdminSection, ButtonStyle};
pub use self::admin::{AdminView, admin_page};
pub use self::catalogue::{TrainingsView, subscriptions_page, trainings_page};
pub use self::components::{error_panel, layout, loading_page};
pub use self::member::{ProfileSection, my_bookings_page, my_trainings_page, profile_page};
pub use self::public::{LOGIN_FORM, REGISTER_FORM, home_page, login_page, not_found_page, register_page};

//! Small runtime helpers.

pub mod debounce;

pub use self::debounce::{Debouncer, SEARCH_DEBOUNCE};

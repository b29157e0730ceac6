//! Domain ports and supporting types for the hexagonal boundary.

mod backend_api;
mod history;
mod surface;

#[cfg(test)]
pub use backend_api::MockBackendApi;
pub use backend_api::BackendApi;
#[cfg(test)]
pub use history::MockHistory;
pub use history::History;
#[cfg(test)]
pub use surface::MockSurface;
pub use surface::{
    FormData, Modal, ModalButton, ModalResponse, NOTIFICATION_TTL, Notification,
    NotificationKind, Surface,
};

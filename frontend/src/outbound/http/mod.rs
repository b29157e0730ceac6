//! HTTP adapter for the club backend.

mod client;
mod response;

pub use client::ReqwestBackend;
pub use response::{UNKNOWN_ERROR, classify_response, map_error_response};

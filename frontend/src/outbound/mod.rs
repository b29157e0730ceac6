//! Outbound adapters implementing domain ports.
//!
//! - **http**: reqwest client for the club's REST backend.
//! - **memory**: in-process surface and history used headless and in tests.
//!
//! Adapters are thin translators between domain types and their
//! infrastructure. They contain no business logic.

pub mod http;
pub mod memory;

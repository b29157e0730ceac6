//! Shared doubles and builders for the integration suites.

pub mod backend;
pub mod clock;
pub mod harness;

pub use backend::StubBackend;
pub use clock::FixedClock;
pub use harness::Harness;

// src/lib.rs
// Public library surface for the server binary, the probe CLI and integration tests.

pub mod api;
pub mod keywords;
pub mod metrics;
pub mod news;
pub mod telemetry;

pub use crate::api::router;
pub use crate::news::aggregate;

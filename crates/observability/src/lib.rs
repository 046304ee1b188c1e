//! `bursar-observability` — logging/tracing setup for the workspace.

pub mod tracing;

pub use tracing::init;

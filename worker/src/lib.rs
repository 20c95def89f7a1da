//! # Tienda Worker
//!
//! Runs the account maintenance sweeps against MySQL until shutdown.

pub mod app;
pub mod telemetry;

pub use app::{run_until_shutdown, Worker};
pub use telemetry::init_tracing;

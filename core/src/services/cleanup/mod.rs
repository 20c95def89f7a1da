//! Background maintenance sweeps

mod service;

#[cfg(test)]
mod tests;

pub use service::{CleanupConfig, CleanupResult, CleanupService};

//! Shared building blocks for the site backend: logging setup, wire types
//! used by more than one crate, runtime directory checks and metrics.

pub mod types;
pub mod utils;
pub mod env;
pub mod metrics;

//! CLI command implementations.
//!
//! Commands write their results to the `out` writer they are given and log
//! everything else through `tracing` (stderr).

pub mod cart;
pub mod products;
pub mod token;

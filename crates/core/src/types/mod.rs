//! Core types for Blanja.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;
pub mod status;

pub use id::*;
pub use price::{Price, PriceOverflow, format_rupiah};
pub use status::LoadStatus;

//! Blanja Core - Shared types library.
//!
//! This crate provides common types used across all Blanja components:
//! - `storefront` - Storefront client library (REST services, cart page, components)
//! - `cli` - Command-line storefront client
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O and no
//! HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, Rupiah prices, and load statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;

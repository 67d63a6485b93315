//! Blanja storefront client library.
//!
//! Product browsing and search, the cart page and checkout, all against the
//! Blanja REST backend.
//!
//! - [`api`]: REST client and wire types
//! - [`cart`]: cart state, checkout quote, and the cart page controller
//! - [`components`]: Askama-rendered search bar, sections, and summary
//! - [`navigation`] / [`notify`]: seams the UI drives (history, alerts)
//! - [`config`] / [`credentials`]: environment and bearer-token sources

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod cart;
pub mod components;
pub mod config;
pub mod credentials;
pub mod error;
pub mod navigation;
pub mod notify;

pub use error::{AppError, Result};

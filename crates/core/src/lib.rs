//! Stockroom Core - Shared types library.
//!
//! This crate provides the domain types used across all Stockroom
//! components:
//! - `engine` - Inventory engine and HTTP client for the inventory service
//! - `cli` - Command-line dashboard
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no runtime. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Wire types for articles, products, and sales, plus
//!   type-safe ID newtypes
//! - [`availability`] - Pure derivation of sellable quantities from
//!   article stock

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod availability;
pub mod types;

pub use availability::*;
pub use types::*;

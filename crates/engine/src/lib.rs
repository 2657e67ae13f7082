//! Stockroom Engine - inventory derivation and sale registration.
//!
//! This crate is the core of the Stockroom system. It talks to the
//! external inventory service over HTTP and turns raw product and article
//! records into availability facts a presentation layer can render
//! directly.
//!
//! # Modules
//!
//! - [`api`] - Retrying HTTP client with typed operations per resource
//!   action, normalizing all transport failures into [`api::ApiError`]
//! - [`engine`] - Stateful orchestration: inventory refresh, sale
//!   registration, and the ordering guarantees between them
//! - [`config`] - Environment-driven configuration
//!
//! # Example
//!
//! ```rust,ignore
//! use stockroom_engine::{ApiClient, EngineConfig, InventoryEngine};
//!
//! let config = EngineConfig::from_env()?;
//! let engine = InventoryEngine::new(ApiClient::new(&config));
//!
//! // Initial load; the same call serves manual retry later.
//! engine.refresh_inventory().await?;
//!
//! let sale = engine.register_sale(&"p1".into(), 2).await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod engine;

pub use api::{ApiClient, ApiError, InventoryApi, RetryPolicy};
pub use config::{ConfigError, EngineConfig};
pub use engine::{EngineError, InventoryEngine, InventoryState, LoadPhase};

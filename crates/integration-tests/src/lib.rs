//! Integration tests for Stockroom.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the inventory service (reference default port 7000)
//! # then run the ignored tests against it:
//! cargo test -p stockroom-integration-tests -- --ignored
//! ```
//!
//! The service base URL is taken from `STOCKROOM_API_BASE_URL`
//! (default `http://localhost:7000`).
//!
//! # Test Categories
//!
//! - `inventory_service` - Live round trips through the engine and the
//!   API client: refresh, sale lifecycle, single-resource lookups
//!
//! The tests mutate service state (they create and delete sales and
//! decrement article stock), so point them at a disposable data set.

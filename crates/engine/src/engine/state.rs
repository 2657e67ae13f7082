//! Engine session state.

use stockroom_core::{Article, ProductWithStock};

use crate::api::ApiError;

/// Where the last inventory load stands.
///
/// A tagged union instead of separate `loading`/`error` fields, so the
/// invalid "loading with a pending error" combination cannot be
/// represented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadPhase {
    /// A refresh is in flight (or the engine has not loaded yet).
    Loading,
    /// The last refresh succeeded; data is current as of that fetch.
    Ready,
    /// The last refresh failed; data is from the previous success.
    Failed(ApiError),
}

impl LoadPhase {
    /// Whether a refresh is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// The error from the last refresh, if it failed.
    #[must_use]
    pub const fn error(&self) -> Option<&ApiError> {
        match self {
            Self::Failed(err) => Some(err),
            Self::Loading | Self::Ready => None,
        }
    }
}

/// The engine's session-scoped view of the warehouse.
///
/// Owned exclusively by the engine and replaced wholesale on every
/// successful refresh, so products, articles, and derived availability
/// are always mutually consistent with the last successful fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryState {
    /// Products enriched with derived availability.
    pub products: Vec<ProductWithStock>,
    /// Raw article stock levels from the same fetch.
    pub articles: Vec<Article>,
    /// Load status of the data above.
    pub phase: LoadPhase,
}

impl InventoryState {
    /// The state of a freshly constructed engine: nothing loaded yet.
    #[must_use]
    pub const fn detached() -> Self {
        Self {
            products: Vec::new(),
            articles: Vec::new(),
            phase: LoadPhase::Loading,
        }
    }
}

impl Default for InventoryState {
    fn default() -> Self {
        Self::detached()
    }
}

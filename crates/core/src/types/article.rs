//! Article types - stockable warehouse components.

use serde::{Deserialize, Serialize};

use super::id::ArticleId;

/// A stockable component ("article") held in the warehouse.
///
/// `amount_in_stock` is the sole source of truth for part availability.
/// It is owned and mutated only by the inventory service; clients never
/// change it locally except by re-fetching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// Service-assigned article identifier.
    pub id: ArticleId,
    /// Human-readable article name.
    pub name: String,
    /// Units currently in stock. Non-negative.
    pub amount_in_stock: u32,
}

/// A bill-of-materials line joined with the article it references.
///
/// Display-only: used for per-product article breakdowns, never for the
/// availability derivation itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleWithDetails {
    /// Referenced article identifier.
    pub id: ArticleId,
    /// Units of the article required per product.
    pub amount_required: u32,
    /// Article name, joined from the loaded article set.
    pub name: String,
    /// Current stock level, joined from the loaded article set.
    pub amount_in_stock: u32,
}

/// A partial article update (`PATCH /articles/{id}`).
///
/// Absent fields are left untouched by the service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticlePatch {
    /// New article name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Absolute stock level to set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_in_stock: Option<u32>,
}

/// One line of a bulk stock update request (`PATCH /articles`).
///
/// The service accepts either a relative decrement (`amount_to_subtract`)
/// or an absolute stock level (`amount_in_stock`) per line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleStockUpdate {
    /// Article to update.
    pub id: ArticleId,
    /// Units to subtract from the current stock level.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_to_subtract: Option<u32>,
    /// Absolute stock level to set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_in_stock: Option<u32>,
}

impl ArticleStockUpdate {
    /// A line subtracting `amount` units from the article's stock.
    #[must_use]
    pub const fn subtract(id: ArticleId, amount: u32) -> Self {
        Self {
            id,
            amount_to_subtract: Some(amount),
            amount_in_stock: None,
        }
    }

    /// A line setting the article's stock to an absolute level.
    #[must_use]
    pub const fn set_stock(id: ArticleId, amount: u32) -> Self {
        Self {
            id,
            amount_to_subtract: None,
            amount_in_stock: Some(amount),
        }
    }
}

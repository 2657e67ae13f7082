//! Product types - sellable items defined by a bill of materials.

use serde::{Deserialize, Serialize};

use super::id::{ArticleId, ProductId};

/// One bill-of-materials line: an article and how many units of it each
/// product consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductArticle {
    /// Referenced article identifier.
    pub id: ArticleId,
    /// Units of the article required per product. Positive.
    pub amount_required: u32,
}

/// A sellable item composed of required article quantities.
///
/// A product with an empty article list is never sellable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Service-assigned product identifier.
    pub id: ProductId,
    /// Human-readable product name.
    pub name: String,
    /// Bill of materials.
    pub articles: Vec<ProductArticle>,
}

/// A product enriched with derived availability facts.
///
/// Recomputed on every inventory refresh from the product's bill of
/// materials and the current article stock; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductWithStock {
    /// The underlying product record.
    #[serde(flatten)]
    pub product: Product,
    /// Largest quantity currently sellable given article stock.
    pub max_available_quantity: u32,
    /// Whether at least one unit is sellable.
    pub is_available: bool,
}

impl ProductWithStock {
    /// The product's identifier.
    #[must_use]
    pub const fn id(&self) -> &ProductId {
        &self.product.id
    }

    /// The product's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.product.name
    }
}

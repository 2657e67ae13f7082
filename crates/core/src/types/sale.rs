//! Sale types - immutable records of completed transactions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{ProductId, SaleId};
use super::product::Product;

/// An immutable record of one sale transaction.
///
/// Created and owned by the inventory service; clients never mutate a
/// sale in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    /// Service-assigned sale identifier.
    pub id: SaleId,
    /// When the sale was recorded.
    pub created_at: DateTime<Utc>,
    /// Product that was sold.
    pub product_id: ProductId,
    /// Quantity sold.
    pub amount_sold: u32,
}

/// A sale joined with the product it references.
///
/// The join happens client-side; the service only stores the product id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleWithProduct {
    /// The underlying sale record.
    #[serde(flatten)]
    pub sale: Sale,
    /// The resolved product.
    pub product: Product,
}

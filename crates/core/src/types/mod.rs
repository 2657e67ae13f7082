//! Core types for Stockroom.
//!
//! Wire types mirror the inventory service's JSON contract (camelCase
//! field names). Derived types (`ProductWithStock`, `ArticleWithDetails`,
//! `SaleWithProduct`) are computed client-side and never persisted.

pub mod article;
pub mod id;
pub mod product;
pub mod sale;

pub use article::{Article, ArticlePatch, ArticleStockUpdate, ArticleWithDetails};
pub use id::*;
pub use product::{Product, ProductArticle, ProductWithStock};
pub use sale::{Sale, SaleWithProduct};

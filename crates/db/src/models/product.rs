//! Product entity model, DTOs, and list-query types.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use stockroom_core::types::{DbId, Timestamp};

use crate::models::photo::Photo;

/// Default page size for product listings.
pub const DEFAULT_LIMIT: i64 = 30;
/// Hard page-size cap for product listings.
pub const MAX_LIMIT: i64 = 100;

/// A row from the `products` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Product {
    pub id: DbId,
    pub title: String,
    pub brand: String,
    pub size: String,
    pub condition: String,
    pub status: String,
    pub price_cents: i64,
    pub dim_a: Option<f64>,
    pub dim_b: Option<f64>,
    pub dim_c: Option<f64>,
    pub notes: Option<String>,
    pub sku: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A product together with its photos in canonical display order.
#[derive(Debug, Clone, Serialize)]
pub struct ProductWithPhotos {
    #[serde(flatten)]
    pub product: Product,
    pub photos: Vec<Photo>,
}

/// DTO for creating a new product.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProduct {
    pub title: String,
    pub brand: Option<String>,
    pub size: Option<String>,
    pub condition: Option<String>,
    pub status: Option<String>,
    pub price_cents: Option<i64>,
    pub dim_a: Option<f64>,
    pub dim_b: Option<f64>,
    pub dim_c: Option<f64>,
    pub notes: Option<String>,
    pub sku: Option<String>,
}

/// DTO for partial product updates.
///
/// Only the fields listed here are updatable; anything else in a request
/// body is rejected by serde. Omitted fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateProduct {
    pub title: Option<String>,
    pub brand: Option<String>,
    pub size: Option<String>,
    pub condition: Option<String>,
    pub status: Option<String>,
    pub price_cents: Option<i64>,
    pub dim_a: Option<f64>,
    pub dim_b: Option<f64>,
    pub dim_c: Option<f64>,
    pub notes: Option<String>,
    pub sku: Option<String>,
}

/// Sort keys accepted by list and export endpoints.
///
/// Price sorts tie-break by newest first so equal-priced items keep a
/// stable, useful order.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortKey {
    CreatedAsc,
    #[default]
    CreatedDesc,
    PriceAsc,
    PriceDesc,
}

impl SortKey {
    /// The ORDER BY clause body for this sort key.
    pub fn order_by_sql(self) -> &'static str {
        match self {
            SortKey::CreatedAsc => "created_at ASC",
            SortKey::CreatedDesc => "created_at DESC",
            SortKey::PriceAsc => "price_cents ASC, created_at DESC",
            SortKey::PriceDesc => "price_cents DESC, created_at DESC",
        }
    }
}

/// Raw query parameters of the product list/export endpoints.
///
/// `brands`/`sizes` are CSV multi-selects; `brand`/`size` are the older
/// single-value substring filters, only applied when the CSV parameter is
/// absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductSearchParams {
    pub query: Option<String>,
    pub brands: Option<String>,
    pub sizes: Option<String>,
    pub brand: Option<String>,
    pub size: Option<String>,
    pub condition: Option<String>,
    pub status: Option<String>,
    pub sku: Option<String>,
    pub sort: Option<SortKey>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl ProductSearchParams {
    /// Parse the raw parameters into a [`ProductFilter`].
    pub fn filter(&self) -> ProductFilter {
        ProductFilter {
            query: trimmed(&self.query),
            brands: split_csv(&self.brands),
            sizes: split_csv(&self.sizes),
            brand: trimmed(&self.brand),
            size: trimmed(&self.size),
            condition: trimmed(&self.condition),
            status: trimmed(&self.status),
            sku: trimmed(&self.sku),
        }
    }

    /// Resolved sort key (default: newest first).
    pub fn sort(&self) -> SortKey {
        self.sort.unwrap_or_default()
    }

    /// Clamped 1-indexed page and page size.
    pub fn pagination(&self) -> (i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let limit = self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        (page, limit)
    }
}

/// Parsed filter predicates, all optional and ANDed together.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub query: Option<String>,
    pub brands: Vec<String>,
    pub sizes: Vec<String>,
    pub brand: Option<String>,
    pub size: Option<String>,
    pub condition: Option<String>,
    pub status: Option<String>,
    pub sku: Option<String>,
}

/// Distinct-value lists used to populate filter controls.
#[derive(Debug, Clone, Serialize)]
pub struct Facets {
    pub brands: Vec<String>,
    pub sizes: Vec<String>,
    pub conditions: Vec<String>,
    pub statuses: Vec<String>,
}

/// One page of a product listing plus the current facets.
#[derive(Debug, Serialize)]
pub struct ProductPage {
    pub items: Vec<ProductWithPhotos>,
    pub total: i64,
    pub facets: Facets,
}

fn trimmed(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn split_csv(value: &Option<String>) -> Vec<String> {
    value
        .as_deref()
        .unwrap_or("")
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

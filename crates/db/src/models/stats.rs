//! Aggregate statistics rows.

use serde::Serialize;
use sqlx::FromRow;

/// Product count per brand (empty brands excluded).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BrandCount {
    pub brand: String,
    pub count: i64,
}

/// Product count per status.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}

/// Average price per brand (empty brands excluded).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BrandAvgPrice {
    pub brand: String,
    pub avg_price_cents: f64,
}

/// Payload of the stats endpoint.
#[derive(Debug, Serialize)]
pub struct StatsSummary {
    pub counts_by_brand: Vec<BrandCount>,
    pub counts_by_status: Vec<StatusCount>,
    pub avg_price_by_brand: Vec<BrandAvgPrice>,
    pub total_in_stock: i64,
}

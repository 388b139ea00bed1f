//! Aggregate statistics queries.

use sqlx::PgPool;
use stockroom_core::status;

use crate::models::stats::{BrandAvgPrice, BrandCount, StatsSummary, StatusCount};

/// Read-only aggregate queries over the products table.
pub struct StatsRepo;

impl StatsRepo {
    /// Product counts per brand, largest first. Products without a brand
    /// are excluded.
    pub async fn counts_by_brand(pool: &PgPool) -> Result<Vec<BrandCount>, sqlx::Error> {
        sqlx::query_as::<_, BrandCount>(
            "SELECT brand, COUNT(*) AS count FROM products
             WHERE brand <> ''
             GROUP BY brand
             ORDER BY count DESC, brand ASC",
        )
        .fetch_all(pool)
        .await
    }

    /// Product counts per status.
    pub async fn counts_by_status(pool: &PgPool) -> Result<Vec<StatusCount>, sqlx::Error> {
        sqlx::query_as::<_, StatusCount>(
            "SELECT status, COUNT(*) AS count FROM products
             GROUP BY status
             ORDER BY status ASC",
        )
        .fetch_all(pool)
        .await
    }

    /// Average price per brand. Products without a brand are excluded.
    pub async fn avg_price_by_brand(pool: &PgPool) -> Result<Vec<BrandAvgPrice>, sqlx::Error> {
        sqlx::query_as::<_, BrandAvgPrice>(
            "SELECT brand, AVG(price_cents)::float8 AS avg_price_cents FROM products
             WHERE brand <> ''
             GROUP BY brand
             ORDER BY brand ASC",
        )
        .fetch_all(pool)
        .await
    }

    /// Total number of in-stock products.
    pub async fn total_in_stock(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE status = $1")
            .bind(status::IN_STOCK)
            .fetch_one(pool)
            .await
    }

    /// Assemble the full stats payload.
    pub async fn summary(pool: &PgPool) -> Result<StatsSummary, sqlx::Error> {
        Ok(StatsSummary {
            counts_by_brand: Self::counts_by_brand(pool).await?,
            counts_by_status: Self::counts_by_status(pool).await?,
            avg_price_by_brand: Self::avg_price_by_brand(pool).await?,
            total_in_stock: Self::total_in_stock(pool).await?,
        })
    }
}

//! CSV export handler.

use axum::body::Body;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use stockroom_core::export::csv_line;
use stockroom_db::models::product::{ProductSearchParams, ProductWithPhotos};
use stockroom_db::repositories::ProductRepo;

use crate::error::AppResult;
use crate::state::AppState;

/// Fixed export column set.
const HEADER: [&str; 14] = [
    "id",
    "title",
    "brand",
    "size",
    "condition",
    "status",
    "price_cents",
    "dim_a",
    "dim_b",
    "dim_c",
    "sku",
    "created_at",
    "updated_at",
    "front_url",
];

/// GET /api/products/export
///
/// Streams the filtered product set as a CSV attachment. Same filter and
/// sort semantics as the list endpoint, unpaginated up to the configured
/// row cap; `page`/`limit` parameters are ignored.
pub async fn export_csv(
    State(state): State<AppState>,
    Query(params): Query<ProductSearchParams>,
) -> AppResult<impl IntoResponse> {
    let filter = params.filter();

    let products = ProductRepo::search(
        &state.pool,
        &filter,
        params.sort(),
        state.config.export_row_cap,
        0,
    )
    .await?;
    let items = ProductRepo::with_photos(&state.pool, products).await?;

    let mut output = csv_line(&HEADER);
    output.push('\n');
    for item in &items {
        output.push_str(&csv_line(&export_row(item)));
        output.push('\n');
    }

    tracing::info!(rows = items.len(), "Products exported");

    Ok(Response::builder()
        .status(200)
        .header("Content-Type", "text/csv; charset=utf-8")
        .header(
            "Content-Disposition",
            "attachment; filename=\"products_export.csv\"",
        )
        .body(Body::from(output))
        .unwrap()
        .into_response())
}

/// One export row. The front URL falls back to the first photo in
/// canonical order (which is the front whenever one exists), else empty.
fn export_row(item: &ProductWithPhotos) -> [String; 14] {
    let p = &item.product;
    let front_url = item
        .photos
        .first()
        .map(|photo| photo.url.clone())
        .unwrap_or_default();

    [
        p.id.to_string(),
        p.title.clone(),
        p.brand.clone(),
        p.size.clone(),
        p.condition.clone(),
        p.status.clone(),
        p.price_cents.to_string(),
        p.dim_a.map(|v| v.to_string()).unwrap_or_default(),
        p.dim_b.map(|v| v.to_string()).unwrap_or_default(),
        p.dim_c.map(|v| v.to_string()).unwrap_or_default(),
        p.sku.clone().unwrap_or_default(),
        p.created_at.to_rfc3339(),
        p.updated_at.to_rfc3339(),
        front_url,
    ]
}

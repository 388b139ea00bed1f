//! Route tree assembly.

pub mod health;
pub mod products;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /products                            list (filter/sort/page), create
/// /products/facets                     facet values for filter controls
/// /products/stats                      aggregate statistics
/// /products/export                     CSV export (attachment)
/// /products/{id}                       get, partial update, delete
/// /products/{id}/photos                list, upload (multipart)
/// /products/{id}/photos/order          reorder (PUT, JSON id list)
/// /products/{id}/photos/{photo_id}     role update (PATCH), delete
/// /products/{id}/photos/{photo_id}/front  set front photo (PUT)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/products", products::router())
}

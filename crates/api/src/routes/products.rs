//! Route definitions for products and their photo sub-resources.
//!
//! All routes are mounted under `/products`.

use axum::routing::{get, patch, put};
use axum::Router;

use crate::handlers::{export, photos, products, stats};
use crate::state::AppState;

/// Product routes mounted at `/products`.
///
/// ```text
/// GET    /                             -> list
/// POST   /                             -> create
/// GET    /facets                       -> facets
/// GET    /stats                        -> stats::summary
/// GET    /export                       -> export::export_csv
/// GET    /{id}                         -> get_by_id
/// PATCH  /{id}                         -> update
/// DELETE /{id}                         -> delete
/// GET    /{id}/photos                  -> photos::list
/// POST   /{id}/photos                  -> photos::upload
/// PUT    /{id}/photos/order            -> photos::reorder
/// PATCH  /{id}/photos/{photo_id}       -> photos::update
/// DELETE /{id}/photos/{photo_id}       -> photos::remove
/// PUT    /{id}/photos/{photo_id}/front -> photos::set_front
/// ```
pub fn router() -> Router<AppState> {
    let photo_routes = Router::new()
        .route("/", get(photos::list).post(photos::upload))
        .route("/order", put(photos::reorder))
        .route(
            "/{photo_id}",
            patch(photos::update).delete(photos::remove),
        )
        .route("/{photo_id}/front", put(photos::set_front));

    Router::new()
        .route("/", get(products::list).post(products::create))
        .route("/facets", get(products::facets))
        .route("/stats", get(stats::summary))
        .route("/export", get(export::export_csv))
        .route(
            "/{id}",
            get(products::get_by_id)
                .patch(products::update)
                .delete(products::delete),
        )
        .nest("/{id}/photos", photo_routes)
}

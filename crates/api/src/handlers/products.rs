//! Handlers for the `/products` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use stockroom_core::error::CoreError;
use stockroom_core::status;
use stockroom_core::types::DbId;
use stockroom_db::models::product::{
    CreateProduct, Facets, ProductPage, ProductSearchParams, ProductWithPhotos, UpdateProduct,
};
use stockroom_db::repositories::{PhotoRepo, ProductRepo};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/products
///
/// Filtered, sorted, paginated listing. Facets ride along with every
/// page so the filter UI never needs a second request.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ProductSearchParams>,
) -> AppResult<Json<DataResponse<ProductPage>>> {
    let filter = params.filter();
    let (page, limit) = params.pagination();
    let offset = (page - 1) * limit;

    let total = ProductRepo::count(&state.pool, &filter).await?;
    let products = ProductRepo::search(&state.pool, &filter, params.sort(), limit, offset).await?;
    let items = ProductRepo::with_photos(&state.pool, products).await?;
    let facets = ProductRepo::facets(&state.pool, state.config.facet_scope).await?;

    Ok(Json(DataResponse {
        data: ProductPage {
            items,
            total,
            facets,
        },
    }))
}

/// GET /api/products/facets
pub async fn facets(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Facets>>> {
    let facets = ProductRepo::facets(&state.pool, state.config.facet_scope).await?;
    Ok(Json(DataResponse { data: facets }))
}

/// POST /api/products
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateProduct>,
) -> AppResult<(StatusCode, Json<ProductWithPhotos>)> {
    validate_create(&input)?;

    let product = ProductRepo::create(&state.pool, &input).await?;
    tracing::info!(product_id = product.id, title = %product.title, "Product created");

    Ok((
        StatusCode::CREATED,
        Json(ProductWithPhotos {
            product,
            photos: Vec::new(),
        }),
    ))
}

/// GET /api/products/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ProductWithPhotos>> {
    let product = ProductRepo::find_with_photos(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id,
        }))?;
    Ok(Json(product))
}

/// PATCH /api/products/{id}
///
/// Partial update: only the fields present in the body are applied.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProduct>,
) -> AppResult<Json<ProductWithPhotos>> {
    validate_update(&input)?;

    let product = ProductRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id,
        }))?;

    let photos = PhotoRepo::list_by_product(&state.pool, id).await?;
    Ok(Json(ProductWithPhotos { product, photos }))
}

/// DELETE /api/products/{id}
///
/// Photos cascade with the product row; the backing assets are removed
/// best-effort afterwards.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let urls = ProductRepo::delete(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id,
        }))?;

    let photo_count = urls.len();
    for url in urls {
        state.store.delete_by_url(&url).await;
    }

    tracing::info!(product_id = id, photo_count, "Product deleted");
    Ok(StatusCode::NO_CONTENT)
}

fn validate_create(input: &CreateProduct) -> AppResult<()> {
    if input.title.trim().is_empty() {
        return Err(CoreError::Validation("title is required".into()).into());
    }
    validate_common(input.price_cents, input.status.as_deref())
}

fn validate_update(input: &UpdateProduct) -> AppResult<()> {
    if let Some(ref title) = input.title {
        if title.trim().is_empty() {
            return Err(CoreError::Validation("title must not be empty".into()).into());
        }
    }
    validate_common(input.price_cents, input.status.as_deref())
}

fn validate_common(price_cents: Option<i64>, status_value: Option<&str>) -> AppResult<()> {
    if let Some(price) = price_cents {
        if price < 0 {
            return Err(CoreError::Validation("price_cents must be non-negative".into()).into());
        }
    }
    if let Some(value) = status_value {
        status::validate_status(value)?;
    }
    Ok(())
}

//! Handlers for photo sub-resources of a product.
//!
//! Photos are nested under products:
//! `/products/{id}/photos[/order|/{photo_id}[/front]]`
//!
//! Every mutation here goes through `PhotoRepo`'s transactional protocol
//! so the single-front invariant holds at each response boundary.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use stockroom_core::error::CoreError;
use stockroom_core::reorder::validate_reorder;
use stockroom_core::roles;
use stockroom_core::types::DbId;
use stockroom_db::models::photo::{CreatePhoto, Photo, ReorderPhotos, UpdatePhoto};
use stockroom_db::models::product::ProductWithPhotos;
use stockroom_db::repositories::{PhotoRepo, ProductRepo};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Verify that a product exists, returning NotFound if it does not.
async fn ensure_product_exists(pool: &sqlx::PgPool, id: DbId) -> AppResult<()> {
    if ProductRepo::find_by_id(pool, id).await?.is_none() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id,
        }));
    }
    Ok(())
}

/// Fetch the product with its photos after a mutation, for the response.
async fn product_with_photos(
    pool: &sqlx::PgPool,
    product_id: DbId,
) -> AppResult<Json<ProductWithPhotos>> {
    ProductRepo::find_with_photos(pool, product_id)
        .await?
        .map(Json)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id: product_id,
        }))
}

/// GET /api/products/{id}/photos
///
/// Canonical display order: front first, then manual rank, then creation
/// time.
pub async fn list(
    State(state): State<AppState>,
    Path(product_id): Path<DbId>,
) -> AppResult<Json<Vec<Photo>>> {
    ensure_product_exists(&state.pool, product_id).await?;
    let photos = PhotoRepo::list_by_product(&state.pool, product_id).await?;
    Ok(Json(photos))
}

/// POST /api/products/{id}/photos
///
/// Multipart upload of one or more assets (`files` fields; `file` is
/// accepted for single-file clients). An optional `role` text field
/// overrides filename-based role inference for every file in the request.
///
/// Assets are written to the store before their rows are inserted; the
/// first photo of a product becomes its front.
pub async fn upload(
    State(state): State<AppState>,
    Path(product_id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<Vec<Photo>>)> {
    ensure_product_exists(&state.pool, product_id).await?;

    let mut files: Vec<(String, Vec<u8>)> = Vec::new();
    let mut role_override: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "files" | "file" => {
                let filename = field.file_name().unwrap_or("upload.bin").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                files.push((filename, data.to_vec()));
            }
            "role" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                role_override = Some(text);
            }
            _ => {} // ignore unknown fields
        }
    }

    if files.is_empty() {
        return Err(CoreError::Validation("No files in upload".into()).into());
    }
    if let Some((name, _)) = files.iter().find(|(_, data)| data.is_empty()) {
        return Err(CoreError::Validation(format!("File '{name}' is empty")).into());
    }

    let mut created = Vec::with_capacity(files.len());
    for (original_name, data) in &files {
        let url = state
            .store
            .save(original_name, data)
            .await
            .map_err(|e| AppError::InternalError(format!("Failed to store upload: {e}")))?;

        let role = role_override
            .clone()
            .unwrap_or_else(|| roles::infer_role(original_name).to_string());

        let photo = PhotoRepo::create(
            &state.pool,
            &CreatePhoto {
                product_id,
                url,
                role,
                size_bytes: data.len() as i64,
            },
        )
        .await?;
        created.push(photo);
    }

    tracing::info!(product_id, count = created.len(), "Photos uploaded");
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/products/{id}/photos/{photo_id}/front
///
/// Designates the photo as the product's front image, un-marking any
/// previous front in the same transaction. Re-fronting the current front
/// is a no-op success.
pub async fn set_front(
    State(state): State<AppState>,
    Path((product_id, photo_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<ProductWithPhotos>> {
    PhotoRepo::set_front(&state.pool, product_id, photo_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Photo",
            id: photo_id,
        }))?;

    tracing::info!(product_id, photo_id, "Front photo set");
    product_with_photos(&state.pool, product_id).await
}

/// PUT /api/products/{id}/photos/order
///
/// Applies a full manual reorder. The body must list exactly the
/// product's current photo ids; anything else is rejected without
/// touching any rank.
pub async fn reorder(
    State(state): State<AppState>,
    Path(product_id): Path<DbId>,
    Json(input): Json<ReorderPhotos>,
) -> AppResult<Json<ProductWithPhotos>> {
    ensure_product_exists(&state.pool, product_id).await?;

    let current: Vec<DbId> = PhotoRepo::list_by_product(&state.pool, product_id)
        .await?
        .iter()
        .map(|p| p.id)
        .collect();
    validate_reorder(&current, &input.photo_ids)?;

    // The repository re-checks the id set inside its transaction; a false
    // here means the photo set changed between validation and apply.
    let applied = PhotoRepo::reorder(&state.pool, product_id, &input.photo_ids).await?;
    if !applied {
        return Err(CoreError::Validation(
            "Photo set changed while reordering; reload and retry".into(),
        )
        .into());
    }

    tracing::info!(product_id, count = input.photo_ids.len(), "Photos reordered");
    product_with_photos(&state.pool, product_id).await
}

/// PATCH /api/products/{id}/photos/{photo_id}
///
/// Updates the photo's role tag. Front designation has its own endpoint.
pub async fn update(
    State(state): State<AppState>,
    Path((product_id, photo_id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdatePhoto>,
) -> AppResult<Json<Photo>> {
    let Some(role) = input.role else {
        return Err(CoreError::Validation("role is required".into()).into());
    };

    let photo = PhotoRepo::update_role(&state.pool, product_id, photo_id, &role)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Photo",
            id: photo_id,
        }))?;
    Ok(Json(photo))
}

/// DELETE /api/products/{id}/photos/{photo_id}
///
/// Removes the photo; if it was the front, the remaining photo with the
/// lowest rank is promoted in the same transaction. The backing asset is
/// deleted best-effort after the commit.
pub async fn remove(
    State(state): State<AppState>,
    Path((product_id, photo_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<ProductWithPhotos>> {
    let deleted = PhotoRepo::remove(&state.pool, product_id, photo_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Photo",
            id: photo_id,
        }))?;

    state.store.delete_by_url(&deleted.url).await;

    tracing::info!(product_id, photo_id, "Photo deleted");
    product_with_photos(&state.pool, product_id).await
}

//! Photo entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use stockroom_core::types::{DbId, Timestamp};

/// A row from the `photos` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Photo {
    pub id: DbId,
    pub product_id: DbId,
    /// Public URL path of the stored asset.
    pub url: String,
    /// Free-form tag: front/back/measure1/measure2/extra.
    pub role: String,
    pub is_front: bool,
    /// Manual display rank. The column is `ord` (`order` is a reserved
    /// word); the wire name stays `order` for API compatibility.
    #[serde(rename = "order")]
    pub ord: i32,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub size_bytes: i64,
    pub created_at: Timestamp,
}

/// DTO for inserting a freshly stored upload.
///
/// `is_front` and `ord` are not settable here: the repository assigns both
/// (first-photo-wins front, append-at-end order).
#[derive(Debug, Clone)]
pub struct CreatePhoto {
    pub product_id: DbId,
    pub url: String,
    pub role: String,
    pub size_bytes: i64,
}

/// DTO for updating a photo's role tag.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePhoto {
    pub role: Option<String>,
}

/// Body of the reorder action: the product's photo ids in their new
/// display order.
#[derive(Debug, Clone, Deserialize)]
pub struct ReorderPhotos {
    pub photo_ids: Vec<DbId>,
}

//! Repository for the `photos` table.
//!
//! Owns the front/order invariant protocol: after every successful
//! mutation, at most one photo per product has `is_front = true`, and a
//! front exists whenever the product still has photos and ever had a
//! front. Reorder normalizes `ord` to a dense 0-based sequence.

use sqlx::PgPool;
use stockroom_core::reorder::validate_reorder;
use stockroom_core::roles::ROLE_FRONT;
use stockroom_core::types::DbId;

use crate::models::photo::{CreatePhoto, Photo};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, product_id, url, role, is_front, ord, width, height, size_bytes, created_at";

/// Canonical display order: front first, then manual rank, then creation
/// time, then id for stability. Every read path uses this clause.
const CANONICAL_ORDER: &str = "is_front DESC, ord ASC, created_at ASC, id ASC";

/// Provides CRUD and invariant-preserving operations for photos.
pub struct PhotoRepo;

impl PhotoRepo {
    /// Insert a photo with append semantics.
    ///
    /// `ord` becomes one past the product's current maximum (0 for the
    /// first photo) and `is_front` is set only when no photo exists yet.
    /// Both subselects run inside the single INSERT statement, so two
    /// concurrent uploads cannot both claim the front slot.
    pub async fn create(pool: &PgPool, input: &CreatePhoto) -> Result<Photo, sqlx::Error> {
        let query = format!(
            "INSERT INTO photos (product_id, url, role, is_front, ord, size_bytes)
             VALUES (
                $1, $2, $3,
                NOT EXISTS (SELECT 1 FROM photos WHERE product_id = $1),
                (SELECT COALESCE(MAX(ord), -1) + 1 FROM photos WHERE product_id = $1),
                $4
             )
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Photo>(&query)
            .bind(input.product_id)
            .bind(&input.url)
            .bind(&input.role)
            .bind(input.size_bytes)
            .fetch_one(pool)
            .await
    }

    /// List a product's photos in canonical display order.
    pub async fn list_by_product(
        pool: &PgPool,
        product_id: DbId,
    ) -> Result<Vec<Photo>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM photos
             WHERE product_id = $1
             ORDER BY {CANONICAL_ORDER}"
        );
        sqlx::query_as::<_, Photo>(&query)
            .bind(product_id)
            .fetch_all(pool)
            .await
    }

    /// Batch variant of [`Self::list_by_product`] for assembling list
    /// pages without a query per product. Within each product the rows
    /// come back in canonical order.
    pub async fn list_by_products(
        pool: &PgPool,
        product_ids: &[DbId],
    ) -> Result<Vec<Photo>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM photos
             WHERE product_id = ANY($1)
             ORDER BY {CANONICAL_ORDER}"
        );
        sqlx::query_as::<_, Photo>(&query)
            .bind(product_ids.to_vec())
            .fetch_all(pool)
            .await
    }

    /// Designate `photo_id` as the product's front photo.
    ///
    /// Clears `is_front` on every other photo and sets it (plus
    /// `role = 'front'`) on the target, all in one transaction. If the
    /// target does not belong to the product the transaction is rolled
    /// back, leaving the previous front assignment intact, and `None` is
    /// returned. Re-fronting the current front is a no-op success.
    pub async fn set_front(
        pool: &PgPool,
        product_id: DbId,
        photo_id: DbId,
    ) -> Result<Option<Photo>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("UPDATE photos SET is_front = false WHERE product_id = $1 AND id <> $2")
            .bind(product_id)
            .bind(photo_id)
            .execute(&mut *tx)
            .await?;

        let query = format!(
            "UPDATE photos SET is_front = true, role = $3
             WHERE id = $2 AND product_id = $1
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Photo>(&query)
            .bind(product_id)
            .bind(photo_id)
            .bind(ROLE_FRONT)
            .fetch_optional(&mut *tx)
            .await?;

        match updated {
            Some(photo) => {
                tx.commit().await?;
                Ok(Some(photo))
            }
            None => {
                tx.rollback().await?;
                Ok(None)
            }
        }
    }

    /// Apply a full reorder: `ord = index` for each id at its 0-based
    /// position.
    ///
    /// The id set is re-validated against the current rows inside the
    /// transaction (with the rows locked), so a concurrent upload or
    /// delete cannot produce a half-applied ranking. Returns `false` --
    /// with every `ord` untouched -- when the list is not a permutation
    /// of the product's current photo ids.
    pub async fn reorder(
        pool: &PgPool,
        product_id: DbId,
        photo_ids: &[DbId],
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let current: Vec<DbId> =
            sqlx::query_scalar("SELECT id FROM photos WHERE product_id = $1 FOR UPDATE")
                .bind(product_id)
                .fetch_all(&mut *tx)
                .await?;

        if validate_reorder(&current, photo_ids).is_err() {
            tx.rollback().await?;
            return Ok(false);
        }

        for (index, &photo_id) in photo_ids.iter().enumerate() {
            sqlx::query("UPDATE photos SET ord = $1 WHERE id = $2 AND product_id = $3")
                .bind(index as i32)
                .bind(photo_id)
                .bind(product_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(true)
    }

    /// Delete a photo, promoting a successor to front if needed.
    ///
    /// When the removed photo was the front and photos remain, the
    /// remaining photo with the lowest `ord` (ties broken by earliest
    /// `created_at`, then id) becomes the new front -- deterministically,
    /// in the same transaction as the delete. Returns the deleted row so
    /// the caller can clean up the backing asset, or `None` if the photo
    /// does not belong to the product.
    pub async fn remove(
        pool: &PgPool,
        product_id: DbId,
        photo_id: DbId,
    ) -> Result<Option<Photo>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "DELETE FROM photos WHERE id = $1 AND product_id = $2 RETURNING {COLUMNS}"
        );
        let deleted = sqlx::query_as::<_, Photo>(&query)
            .bind(photo_id)
            .bind(product_id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(deleted) = deleted else {
            tx.rollback().await?;
            return Ok(None);
        };

        if deleted.is_front {
            // Affects zero rows when no photos remain.
            sqlx::query(
                "UPDATE photos SET is_front = true
                 WHERE id = (
                    SELECT id FROM photos WHERE product_id = $1
                    ORDER BY ord ASC, created_at ASC, id ASC
                    LIMIT 1
                 )",
            )
            .bind(product_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(Some(deleted))
    }

    /// Update a photo's role tag. Returns `None` if the photo does not
    /// belong to the product.
    pub async fn update_role(
        pool: &PgPool,
        product_id: DbId,
        photo_id: DbId,
        role: &str,
    ) -> Result<Option<Photo>, sqlx::Error> {
        let query = format!(
            "UPDATE photos SET role = $3
             WHERE id = $1 AND product_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Photo>(&query)
            .bind(photo_id)
            .bind(product_id)
            .bind(role)
            .fetch_optional(pool)
            .await
    }
}

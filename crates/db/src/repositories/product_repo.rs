//! Repository for the `products` table.

use std::collections::HashMap;

use sqlx::PgPool;
use stockroom_core::facets::FacetScope;
use stockroom_core::status;
use stockroom_core::types::DbId;

use crate::models::photo::Photo;
use crate::models::product::{
    CreateProduct, Facets, Product, ProductFilter, ProductWithPhotos, SortKey, UpdateProduct,
};
use crate::repositories::PhotoRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, brand, size, condition, status, price_cents, \
    dim_a, dim_b, dim_c, notes, sku, created_at, updated_at";

/// Provides CRUD, filtered search, and facet queries for products.
pub struct ProductRepo;

impl ProductRepo {
    /// Insert a new product, applying documented defaults for omitted
    /// fields (empty strings, in-stock status, zero price).
    pub async fn create(pool: &PgPool, input: &CreateProduct) -> Result<Product, sqlx::Error> {
        let query = format!(
            "INSERT INTO products
                (title, brand, size, condition, status, price_cents,
                 dim_a, dim_b, dim_c, notes, sku)
             VALUES (
                $1, COALESCE($2, ''), COALESCE($3, ''), COALESCE($4, ''),
                COALESCE($5, '{default_status}'), COALESCE($6, 0),
                $7, $8, $9, $10, $11
             )
             RETURNING {COLUMNS}",
            default_status = status::DEFAULT_STATUS,
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(&input.title)
            .bind(&input.brand)
            .bind(&input.size)
            .bind(&input.condition)
            .bind(&input.status)
            .bind(input.price_cents)
            .bind(input.dim_a)
            .bind(input.dim_b)
            .bind(input.dim_c)
            .bind(&input.notes)
            .bind(&input.sku)
            .fetch_one(pool)
            .await
    }

    /// Find a product by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE id = $1");
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a product and its photos in canonical display order.
    pub async fn find_with_photos(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ProductWithPhotos>, sqlx::Error> {
        let Some(product) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let photos = PhotoRepo::list_by_product(pool, id).await?;
        Ok(Some(ProductWithPhotos { product, photos }))
    }

    /// Update a product. Only non-`None` fields in `input` are applied;
    /// `updated_at` is bumped on every successful update.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProduct,
    ) -> Result<Option<Product>, sqlx::Error> {
        let query = format!(
            "UPDATE products SET
                title = COALESCE($2, title),
                brand = COALESCE($3, brand),
                size = COALESCE($4, size),
                condition = COALESCE($5, condition),
                status = COALESCE($6, status),
                price_cents = COALESCE($7, price_cents),
                dim_a = COALESCE($8, dim_a),
                dim_b = COALESCE($9, dim_b),
                dim_c = COALESCE($10, dim_c),
                notes = COALESCE($11, notes),
                sku = COALESCE($12, sku),
                updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.brand)
            .bind(&input.size)
            .bind(&input.condition)
            .bind(&input.status)
            .bind(input.price_cents)
            .bind(input.dim_a)
            .bind(input.dim_b)
            .bind(input.dim_c)
            .bind(&input.notes)
            .bind(&input.sku)
            .fetch_optional(pool)
            .await
    }

    /// Delete a product and (via cascade) all its photos.
    ///
    /// Returns the URLs of the photos that were attached, so the caller
    /// can best-effort delete the backing assets after the commit, or
    /// `None` if the product does not exist.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<Vec<String>>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let urls: Vec<String> = sqlx::query_scalar("SELECT url FROM photos WHERE product_id = $1")
            .bind(id)
            .fetch_all(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        tx.commit().await?;
        Ok(Some(urls))
    }

    /// Filtered, sorted, paginated product search.
    pub async fn search(
        pool: &PgPool,
        filter: &ProductFilter,
        sort: SortKey,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Product>, sqlx::Error> {
        let (where_clause, next_idx) = build_where(filter);

        let query = format!(
            "SELECT {COLUMNS} FROM products
             {where_clause}
             ORDER BY {order_by}
             LIMIT ${limit_idx} OFFSET ${offset_idx}",
            order_by = sort.order_by_sql(),
            limit_idx = next_idx,
            offset_idx = next_idx + 1,
        );

        let mut q = sqlx::query_as::<_, Product>(&query);

        // Bind dynamic parameters in the order build_where numbered them.
        if let Some(ref text) = filter.query {
            q = q.bind(format!("%{text}%"));
        }
        if !filter.brands.is_empty() {
            q = q.bind(filter.brands.clone());
        } else if let Some(ref brand) = filter.brand {
            q = q.bind(format!("%{brand}%"));
        }
        if !filter.sizes.is_empty() {
            q = q.bind(filter.sizes.clone());
        } else if let Some(ref size) = filter.size {
            q = q.bind(format!("%{size}%"));
        }
        if let Some(ref condition) = filter.condition {
            q = q.bind(format!("%{condition}%"));
        }
        if let Some(ref status) = filter.status {
            q = q.bind(status.clone());
        }
        if let Some(ref sku) = filter.sku {
            q = q.bind(format!("%{sku}%"));
        }

        q.bind(limit).bind(offset).fetch_all(pool).await
    }

    /// Count of products matching `filter`.
    pub async fn count(pool: &PgPool, filter: &ProductFilter) -> Result<i64, sqlx::Error> {
        let (where_clause, _) = build_where(filter);
        let query = format!("SELECT COUNT(*) FROM products {where_clause}");

        let mut q = sqlx::query_scalar::<_, i64>(&query);

        // Same bind order as search.
        if let Some(ref text) = filter.query {
            q = q.bind(format!("%{text}%"));
        }
        if !filter.brands.is_empty() {
            q = q.bind(filter.brands.clone());
        } else if let Some(ref brand) = filter.brand {
            q = q.bind(format!("%{brand}%"));
        }
        if !filter.sizes.is_empty() {
            q = q.bind(filter.sizes.clone());
        } else if let Some(ref size) = filter.size {
            q = q.bind(format!("%{size}%"));
        }
        if let Some(ref condition) = filter.condition {
            q = q.bind(format!("%{condition}%"));
        }
        if let Some(ref status) = filter.status {
            q = q.bind(status.clone());
        }
        if let Some(ref sku) = filter.sku {
            q = q.bind(format!("%{sku}%"));
        }

        q.fetch_one(pool).await
    }

    /// Attach photos (canonical order) to a page of products with a
    /// single batch query.
    pub async fn with_photos(
        pool: &PgPool,
        products: Vec<Product>,
    ) -> Result<Vec<ProductWithPhotos>, sqlx::Error> {
        let ids: Vec<DbId> = products.iter().map(|p| p.id).collect();
        let photos = PhotoRepo::list_by_products(pool, &ids).await?;

        let mut by_product: HashMap<DbId, Vec<Photo>> = HashMap::new();
        for photo in photos {
            by_product.entry(photo.product_id).or_default().push(photo);
        }

        Ok(products
            .into_iter()
            .map(|product| {
                let photos = by_product.remove(&product.id).unwrap_or_default();
                ProductWithPhotos { product, photos }
            })
            .collect())
    }

    /// Distinct non-empty facet values for filter dropdowns.
    ///
    /// Brand/size/condition facets honor the configured scope; statuses
    /// always reflect every product so historical statuses stay
    /// filterable.
    pub async fn facets(pool: &PgPool, scope: FacetScope) -> Result<Facets, sqlx::Error> {
        let scope_clause = match scope {
            FacetScope::InStockOnly => {
                format!("AND status = '{}'", status::IN_STOCK)
            }
            FacetScope::AllProducts => String::new(),
        };

        let brands = distinct_values(pool, "brand", &scope_clause).await?;
        let sizes = distinct_values(pool, "size", &scope_clause).await?;
        let conditions = distinct_values(pool, "condition", &scope_clause).await?;
        let statuses = distinct_values(pool, "status", "").await?;

        Ok(Facets {
            brands,
            sizes,
            conditions,
            statuses,
        })
    }
}

/// Sorted distinct non-empty values of one column.
async fn distinct_values(
    pool: &PgPool,
    column: &str,
    scope_clause: &str,
) -> Result<Vec<String>, sqlx::Error> {
    let query = format!(
        "SELECT DISTINCT {column} FROM products
         WHERE {column} <> '' {scope_clause}
         ORDER BY {column}"
    );
    sqlx::query_scalar(&query).fetch_all(pool).await
}

/// Build the WHERE clause for `filter`, returning it together with the
/// next free bind index (for LIMIT/OFFSET).
///
/// The bind chains in `search` and `count` must follow the same order.
fn build_where(filter: &ProductFilter) -> (String, u32) {
    let mut conditions = Vec::new();
    let mut bind_idx = 1u32;

    if filter.query.is_some() {
        // One bind referenced twice: title or SKU.
        conditions.push(format!("(title ILIKE ${bind_idx} OR sku ILIKE ${bind_idx})"));
        bind_idx += 1;
    }
    if !filter.brands.is_empty() {
        conditions.push(format!("brand = ANY(${bind_idx})"));
        bind_idx += 1;
    } else if filter.brand.is_some() {
        conditions.push(format!("brand ILIKE ${bind_idx}"));
        bind_idx += 1;
    }
    if !filter.sizes.is_empty() {
        conditions.push(format!("size = ANY(${bind_idx})"));
        bind_idx += 1;
    } else if filter.size.is_some() {
        conditions.push(format!("size ILIKE ${bind_idx}"));
        bind_idx += 1;
    }
    if filter.condition.is_some() {
        conditions.push(format!("condition ILIKE ${bind_idx}"));
        bind_idx += 1;
    }
    if filter.status.is_some() {
        conditions.push(format!("status = ${bind_idx}"));
        bind_idx += 1;
    }
    if filter.sku.is_some() {
        conditions.push(format!("sku ILIKE ${bind_idx}"));
        bind_idx += 1;
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    (where_clause, bind_idx)
}

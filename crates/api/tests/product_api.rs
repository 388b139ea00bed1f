//! HTTP-level integration tests for product CRUD, listing, and facets.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router
//! without an actual TCP listener.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_product, delete, get, patch_json, post_json, upload_photo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_product_applies_defaults(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/products",
        serde_json::json!({"title": "Wool coat"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["title"], "Wool coat");
    assert_eq!(json["status"], "IN_STOCK");
    assert_eq!(json["price_cents"], 0);
    assert_eq!(json["brand"], "");
    assert!(json["photos"].as_array().unwrap().is_empty());
    assert!(json["id"].is_number());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_product_requires_nonempty_title(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/products", serde_json::json!({"title": "  "})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_product_rejects_negative_price(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/products",
        serde_json::json!({"title": "Coat", "price_cents": -100}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_product_rejects_unknown_status(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/products",
        serde_json::json!({"title": "Coat", "status": "ON_LOAN"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_duplicate_sku_conflicts(pool: PgPool) {
    create_product(
        &pool,
        serde_json::json!({"title": "First", "sku": "SKU-001"}),
    )
    .await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/products",
        serde_json::json!({"title": "Second", "sku": "SKU-001"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
}

// ---------------------------------------------------------------------------
// Get / update / delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_get_product_by_id(pool: PgPool) {
    let id = create_product(&pool, serde_json::json!({"title": "Get Me"})).await;

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/products/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["title"], "Get Me");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_get_nonexistent_product_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/products/999999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_touches_only_supplied_fields(pool: PgPool) {
    let id = create_product(
        &pool,
        serde_json::json!({"title": "Original", "brand": "Zara", "price_cents": 4500}),
    )
    .await;

    let app = common::build_test_app(pool);
    let response = patch_json(
        app,
        &format!("/api/products/{id}"),
        serde_json::json!({"brand": "VERO MODA"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["brand"], "VERO MODA");
    // Omitted fields stay untouched.
    assert_eq!(json["title"], "Original");
    assert_eq!(json["price_cents"], 4500);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_rejects_unknown_fields(pool: PgPool) {
    let id = create_product(&pool, serde_json::json!({"title": "Strict"})).await;

    let app = common::build_test_app(pool);
    let response = patch_json(
        app,
        &format!("/api/products/{id}"),
        serde_json::json!({"is_admin": true}),
    )
    .await;

    // The update allow-list is closed: unknown fields are a client error.
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_nonexistent_product_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = patch_json(
        app,
        "/api/products/999999",
        serde_json::json!({"brand": "Nobody"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_product_returns_204(pool: PgPool) {
    let id = create_product(&pool, serde_json::json!({"title": "Delete Me"})).await;

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/api/products/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Subsequent GET should 404.
    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/products/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_product_cascades_photos(pool: PgPool) {
    let id = create_product(&pool, serde_json::json!({"title": "With Photos"})).await;
    upload_photo(&pool, id, "front.jpg").await;
    upload_photo(&pool, id, "back.jpg").await;

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/api/products/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // No orphaned photo rows remain.
    let orphans: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM photos WHERE product_id = $1")
        .bind(id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(orphans, 0);
}

// ---------------------------------------------------------------------------
// Listing, filtering, pagination
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_pagination(pool: PgPool) {
    for i in 1..=15 {
        create_product(&pool, serde_json::json!({"title": format!("Item {i}")})).await;
    }

    let app = common::build_test_app(pool.clone());
    let response = get(app, "/api/products?page=2&limit=10").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["total"], 15);
    assert_eq!(json["data"]["items"].as_array().unwrap().len(), 5);

    // Page 1 holds the first ten of the sorted result.
    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/products?page=1&limit=10").await).await;
    assert_eq!(json["data"]["items"].as_array().unwrap().len(), 10);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_default_sort_is_newest_first(pool: PgPool) {
    let first = create_product(&pool, serde_json::json!({"title": "Older"})).await;
    let second = create_product(&pool, serde_json::json!({"title": "Newer"})).await;

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/products").await).await;
    let items = json["data"]["items"].as_array().unwrap().clone();
    assert_eq!(items[0]["id"].as_i64().unwrap(), second);
    assert_eq!(items[1]["id"].as_i64().unwrap(), first);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_sort_by_price(pool: PgPool) {
    create_product(
        &pool,
        serde_json::json!({"title": "Cheap", "price_cents": 1000}),
    )
    .await;
    create_product(
        &pool,
        serde_json::json!({"title": "Dear", "price_cents": 9000}),
    )
    .await;

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/products?sort=PRICE_ASC").await).await;
    let items = json["data"]["items"].as_array().unwrap().clone();
    assert_eq!(items[0]["title"], "Cheap");
    assert_eq!(items[1]["title"], "Dear");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_filters_by_brand_set(pool: PgPool) {
    create_product(
        &pool,
        serde_json::json!({"title": "A", "brand": "Zara"}),
    )
    .await;
    create_product(
        &pool,
        serde_json::json!({"title": "B", "brand": "VERO MODA"}),
    )
    .await;
    create_product(
        &pool,
        serde_json::json!({"title": "C", "brand": "Mango"}),
    )
    .await;

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/products?brands=Zara,VERO%20MODA").await).await;
    assert_eq!(json["data"]["total"], 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_free_text_matches_title_and_sku(pool: PgPool) {
    create_product(
        &pool,
        serde_json::json!({"title": "Denim jacket", "sku": "JKT-17"}),
    )
    .await;
    create_product(&pool, serde_json::json!({"title": "Silk scarf"})).await;

    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app, "/api/products?query=denim").await).await;
    assert_eq!(json["data"]["total"], 1);

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/products?query=JKT").await).await;
    assert_eq!(json["data"]["total"], 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_filters_by_status(pool: PgPool) {
    create_product(&pool, serde_json::json!({"title": "Here"})).await;
    create_product(
        &pool,
        serde_json::json!({"title": "Gone", "status": "SOLD"}),
    )
    .await;

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/products?status=SOLD").await).await;
    assert_eq!(json["data"]["total"], 1);
    assert_eq!(json["data"]["items"][0]["title"], "Gone");
}

// ---------------------------------------------------------------------------
// Facets
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_facets_scope_to_in_stock(pool: PgPool) {
    create_product(
        &pool,
        serde_json::json!({"title": "A", "brand": "Zara", "size": "M"}),
    )
    .await;
    create_product(
        &pool,
        serde_json::json!({"title": "B", "brand": "Mango", "status": "SOLD"}),
    )
    .await;

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/products/facets").await).await;
    let facets = &json["data"];

    // Sold-out brands disappear from the brand facet under the default
    // in-stock scope, but their status is still listed.
    assert_eq!(facets["brands"], serde_json::json!(["Zara"]));
    assert_eq!(facets["sizes"], serde_json::json!(["M"]));
    let statuses = facets["statuses"].as_array().unwrap();
    assert!(statuses.contains(&serde_json::json!("IN_STOCK")));
    assert!(statuses.contains(&serde_json::json!("SOLD")));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_response_includes_facets(pool: PgPool) {
    create_product(
        &pool,
        serde_json::json!({"title": "A", "brand": "Zara"}),
    )
    .await;

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/products").await).await;
    assert_eq!(json["data"]["facets"]["brands"], serde_json::json!(["Zara"]));
}

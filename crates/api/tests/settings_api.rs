//! HTTP-level integration tests for the settings endpoints: admin CRUD
//! and sensitive-key filtering on the public surface.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_auth, get, get_auth, put_json_auth, register_tenant};
use serde_json::json;
use sqlx::PgPool;

/// Admin reads include sensitive keys; public reads never do.
#[sqlx::test(migrations = false)]
async fn test_sensitive_keys_filtered_on_public_reads_only(pool: PgPool) {
    let app = common::build_test_app(pool).await;
    let alice = register_tenant(app.clone(), "alice").await;
    let token = alice["access_token"].as_str().unwrap();

    let response = get_auth(app.clone(), "/api/admin/settings", token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let admin_view = body_json(response).await;
    assert!(admin_view.get("integrations").is_some());
    assert!(admin_view.get("hero").is_some());

    let response = get(app.clone(), "/api/u/alice/settings").await;
    assert_eq!(response.status(), StatusCode::OK);
    let public_view = body_json(response).await;
    assert!(public_view.get("hero").is_some());
    assert!(
        public_view.get("integrations").is_none(),
        "sensitive keys must never appear publicly"
    );

    // Single-key public read of a sensitive key 404s like a missing one.
    let response = get(app.clone(), "/api/u/alice/settings/integrations").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get(app, "/api/u/alice/settings/hero").await;
    assert_eq!(response.status(), StatusCode::OK);
}

/// PUT replaces the document wholesale, no merging.
#[sqlx::test(migrations = false)]
async fn test_put_replaces_document(pool: PgPool) {
    let app = common::build_test_app(pool).await;
    let alice = register_tenant(app.clone(), "alice").await;
    let token = alice["access_token"].as_str().unwrap();

    let response = put_json_auth(
        app.clone(),
        "/api/admin/settings/hero",
        token,
        json!({ "title": "replaced" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get_auth(app, "/api/admin/settings/hero", token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let value = body_json(response).await;
    assert_eq!(value, json!({ "title": "replaced" }), "seeded fields must not survive the replace");
}

/// Unknown keys round-trip untyped and are publicly visible.
#[sqlx::test(migrations = false)]
async fn test_unknown_keys_are_opaque_and_public(pool: PgPool) {
    let app = common::build_test_app(pool).await;
    let alice = register_tenant(app.clone(), "alice").await;
    let token = alice["access_token"].as_str().unwrap();

    let doc = json!({ "anything": ["goes", 42] });
    let response = put_json_auth(app.clone(), "/api/admin/settings/experimental", token, doc.clone()).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(app, "/api/u/alice/settings/experimental").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, doc);
}

/// Deleting a setting removes it; a second delete 404s.
#[sqlx::test(migrations = false)]
async fn test_delete_setting(pool: PgPool) {
    let app = common::build_test_app(pool).await;
    let alice = register_tenant(app.clone(), "alice").await;
    let token = alice["access_token"].as_str().unwrap();

    let response = delete_auth(app.clone(), "/api/admin/settings/hero", token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(app.clone(), "/api/admin/settings/hero", token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete_auth(app, "/api/admin/settings/hero", token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Writes require authentication.
#[sqlx::test(migrations = false)]
async fn test_settings_writes_require_auth(pool: PgPool) {
    let app = common::build_test_app(pool).await;
    register_tenant(app.clone(), "alice").await;

    let response = put_json_auth(app, "/api/admin/settings/hero", "bad-token", json!({})).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Settings are tenant-scoped end to end: each tenant sees their own
/// document under the same key.
#[sqlx::test(migrations = false)]
async fn test_settings_tenant_scoped(pool: PgPool) {
    let app = common::build_test_app(pool).await;
    let alice = register_tenant(app.clone(), "alice").await;
    let bob = register_tenant(app.clone(), "bob").await;
    let alice_token = alice["access_token"].as_str().unwrap();
    let bob_token = bob["access_token"].as_str().unwrap();

    put_json_auth(app.clone(), "/api/admin/settings/hero", alice_token, json!({ "who": "alice" })).await;
    put_json_auth(app.clone(), "/api/admin/settings/hero", bob_token, json!({ "who": "bob" })).await;

    let response = get(app.clone(), "/api/u/alice/settings/hero").await;
    assert_eq!(body_json(response).await, json!({ "who": "alice" }));

    let response = get(app, "/api/u/bob/settings/hero").await;
    assert_eq!(body_json(response).await, json!({ "who": "bob" }));
}

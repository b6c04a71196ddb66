//! HTTP-level integration tests for custom-domain claim/release and
//! domain resolution.
//!
//! No routing provider is configured in the test harness, so registrar
//! calls are no-ops; the live DNS status endpoint is exercised only for
//! the `not_set` case, which needs no lookups.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, get_auth, put_json_auth, register_tenant};
use serde_json::json;
use sqlx::PgPool;

/// Claiming a domain normalizes it, makes it resolvable, and is
/// idempotent for the owning tenant.
#[sqlx::test(migrations = false)]
async fn test_claim_and_resolve_domain(pool: PgPool) {
    let app = common::build_test_app(pool).await;
    let alice = register_tenant(app.clone(), "alice").await;
    let token = alice["access_token"].as_str().unwrap();

    let response = put_json_auth(
        app.clone(),
        "/api/admin/domain",
        token,
        json!({ "domain": " Alice.Example.COM. " }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["custom_domain"], "alice.example.com");

    // Resolution maps the domain back to the username.
    let response = get(app.clone(), "/api/resolve-domain?domain=alice.example.com").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["username"], "alice");

    // Re-claiming one's own domain succeeds without change.
    let response = put_json_auth(
        app,
        "/api/admin/domain",
        token,
        json!({ "domain": "alice.example.com" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

/// A domain held by another tenant conflicts.
#[sqlx::test(migrations = false)]
async fn test_domain_claimed_by_other_tenant_conflicts(pool: PgPool) {
    let app = common::build_test_app(pool).await;
    let alice = register_tenant(app.clone(), "alice").await;
    let bob = register_tenant(app.clone(), "bob").await;
    let alice_token = alice["access_token"].as_str().unwrap();
    let bob_token = bob["access_token"].as_str().unwrap();

    let response = put_json_auth(
        app.clone(),
        "/api/admin/domain",
        alice_token,
        json!({ "domain": "shared.example.com" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = put_json_auth(
        app,
        "/api/admin/domain",
        bob_token,
        json!({ "domain": "shared.example.com" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

/// Releasing the domain clears the mapping and resolution 404s again.
#[sqlx::test(migrations = false)]
async fn test_release_domain(pool: PgPool) {
    let app = common::build_test_app(pool).await;
    let alice = register_tenant(app.clone(), "alice").await;
    let token = alice["access_token"].as_str().unwrap();

    put_json_auth(
        app.clone(),
        "/api/admin/domain",
        token,
        json!({ "domain": "gone.example.com" }),
    )
    .await;

    let response = put_json_auth(app.clone(), "/api/admin/domain", token, json!({ "domain": null })).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_json(response).await["custom_domain"].is_null());

    let response = get(app, "/api/resolve-domain?domain=gone.example.com").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Malformed domains are rejected before anything is persisted.
#[sqlx::test(migrations = false)]
async fn test_invalid_domain_rejected(pool: PgPool) {
    let app = common::build_test_app(pool).await;
    let alice = register_tenant(app.clone(), "alice").await;
    let token = alice["access_token"].as_str().unwrap();

    for bad in ["nodots", "http://scheme.com", "double..dot.com", ""] {
        let response = put_json_auth(app.clone(), "/api/admin/domain", token, json!({ "domain": bad })).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "'{bad}' should be rejected");
    }

    let response = get_auth(app, "/api/auth/me", token).await;
    assert!(body_json(response).await["custom_domain"].is_null(), "nothing was persisted");
}

/// Without a domain, the status endpoint reports `not_set`.
#[sqlx::test(migrations = false)]
async fn test_domain_status_not_set(pool: PgPool) {
    let app = common::build_test_app(pool).await;
    let alice = register_tenant(app.clone(), "alice").await;
    let token = alice["access_token"].as_str().unwrap();

    let response = get_auth(app, "/api/admin/domain/status", token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "not_set");
    assert!(body["domain"].is_null());
}

//! HTTP-level integration tests for invite-gated registration and the
//! admin invite endpoints.

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{body_json, delete_auth, get_auth, post_json, post_json_auth};
use folio_api::auth::password::hash_password;
use folio_api::config::RegistrationMode;
use folio_db::models::user::CreateUser;
use folio_db::repositories::{InviteRepo, UserRepo};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Seed a tenant directly (registration is invite-gated in these tests)
/// and log them in through the API.
async fn seed_and_login(pool: &PgPool, app: axum::Router, username: &str) -> String {
    let hashed = hash_password("password123").expect("hashing should succeed");
    let mut conn = pool.acquire().await.expect("acquire should succeed");
    UserRepo::create(
        &mut conn,
        &CreateUser {
            username: username.to_string(),
            password_hash: hashed,
            email: None,
        },
    )
    .await
    .expect("user creation should succeed");
    drop(conn);

    let response = post_json(
        app,
        "/api/auth/login",
        json!({ "username": username, "password": "password123" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    body["access_token"].as_str().unwrap().to_string()
}

async fn mint_invite(app: axum::Router, token: &str) -> String {
    let response = post_json_auth(app, "/api/admin/invites", token, json!({})).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    body["token"].as_str().unwrap().to_string()
}

// ---------------------------------------------------------------------------
// Registration gating
// ---------------------------------------------------------------------------

/// Invite mode rejects registration without a token.
#[sqlx::test(migrations = false)]
async fn test_register_requires_invite(pool: PgPool) {
    let app = common::build_test_app_with_mode(pool, RegistrationMode::Invite).await;

    let response = post_json(
        app,
        "/api/auth/register",
        json!({ "username": "hopeful", "password": "password123" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// A valid invite admits exactly one registration; reuse fails.
#[sqlx::test(migrations = false)]
async fn test_invite_is_single_use(pool: PgPool) {
    let app = common::build_test_app_with_mode(pool.clone(), RegistrationMode::Invite).await;
    let admin_token = seed_and_login(&pool, app.clone(), "founder").await;
    let invite = mint_invite(app.clone(), &admin_token).await;

    let response = post_json(
        app.clone(),
        "/api/auth/register",
        json!({ "username": "invited", "password": "password123", "invite_token": invite }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json(
        app,
        "/api/auth/register",
        json!({ "username": "freeloader", "password": "password123", "invite_token": invite }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST, "a used invite must not admit anyone");
}

/// A rejected username never burns the invite: the same token still
/// works for a valid attempt afterwards.
#[sqlx::test(migrations = false)]
async fn test_invalid_username_does_not_burn_invite(pool: PgPool) {
    let app = common::build_test_app_with_mode(pool.clone(), RegistrationMode::Invite).await;
    let admin_token = seed_and_login(&pool, app.clone(), "founder").await;
    let invite = mint_invite(app.clone(), &admin_token).await;

    // Reserved username fails validation before the invite is touched.
    let response = post_json(
        app.clone(),
        "/api/auth/register",
        json!({ "username": "admin", "password": "password123", "invite_token": invite }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json(
        app,
        "/api/auth/register",
        json!({ "username": "legit", "password": "password123", "invite_token": invite }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED, "invite should still be usable");
}

/// Expired invites are rejected like invalid ones.
#[sqlx::test(migrations = false)]
async fn test_expired_invite_rejected(pool: PgPool) {
    let app = common::build_test_app_with_mode(pool.clone(), RegistrationMode::Invite).await;

    // System-issued invite (no creator) that lapsed an hour ago.
    let expired = InviteRepo::create(&pool, None, Some(Utc::now() - Duration::hours(1)))
        .await
        .expect("invite creation should succeed");

    let response = post_json(
        app,
        "/api/auth/register",
        json!({ "username": "latecomer", "password": "password123", "invite_token": expired.token }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Admin invite endpoints
// ---------------------------------------------------------------------------

/// Minting an invite requires authentication.
#[sqlx::test(migrations = false)]
async fn test_create_invite_requires_auth(pool: PgPool) {
    let app = common::build_test_app_with_mode(pool, RegistrationMode::Invite).await;

    let response = post_json(app, "/api/admin/invites", json!({})).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// `expires_in_days` must be positive.
#[sqlx::test(migrations = false)]
async fn test_invite_expiry_must_be_positive(pool: PgPool) {
    let app = common::build_test_app_with_mode(pool.clone(), RegistrationMode::Invite).await;
    let admin_token = seed_and_login(&pool, app.clone(), "founder").await;

    let response = post_json_auth(
        app,
        "/api/admin/invites",
        &admin_token,
        json!({ "expires_in_days": 0 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Listing shows the caller's invites; revocation removes one and a
/// repeated revocation 404s.
#[sqlx::test(migrations = false)]
async fn test_list_and_revoke(pool: PgPool) {
    let app = common::build_test_app_with_mode(pool.clone(), RegistrationMode::Invite).await;
    let admin_token = seed_and_login(&pool, app.clone(), "founder").await;

    mint_invite(app.clone(), &admin_token).await;
    mint_invite(app.clone(), &admin_token).await;

    let response = get_auth(app.clone(), "/api/admin/invites", &admin_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let listed = body_json(response).await;
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 2);
    let id = listed[0]["id"].as_i64().unwrap();

    let response = delete_auth(app.clone(), &format!("/api/admin/invites/{id}"), &admin_token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = delete_auth(app.clone(), &format!("/api/admin/invites/{id}"), &admin_token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get_auth(app, "/api/admin/invites", &admin_token).await;
    let remaining = body_json(response).await;
    assert_eq!(remaining.as_array().unwrap().len(), 1);
}

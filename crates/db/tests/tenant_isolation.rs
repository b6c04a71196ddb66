//! Integration tests for tenant isolation and list ordering on the
//! resource repositories.

use folio_db::models::design_work::CreateDesignWork;
use folio_db::models::project::{CreateProject, UpdateProject};
use folio_db::models::user::CreateUser;
use folio_db::repositories::{DesignWorkRepo, ProjectRepo, UserRepo};
use folio_db::schema::ensure_schema;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn setup(pool: &PgPool) {
    ensure_schema(pool).await.expect("schema should apply");
}

async fn create_tenant(pool: &PgPool, username: &str) -> i64 {
    let mut conn = pool.acquire().await.unwrap();
    UserRepo::create(
        &mut conn,
        &CreateUser {
            username: username.to_string(),
            password_hash: "$argon2id$test".to_string(),
            email: None,
        },
    )
    .await
    .unwrap()
    .id
}

fn new_project(title: &str, order: i32) -> CreateProject {
    CreateProject {
        title: title.to_string(),
        description: "A project".to_string(),
        tech_stack: vec!["Rust".to_string()],
        image_url: None,
        video_url: None,
        gallery: vec![],
        github_link: None,
        live_url: None,
        links: vec![],
        featured: false,
        display_order: order,
    }
}

fn new_design(title: &str, category: &str) -> CreateDesignWork {
    CreateDesignWork {
        title: title.to_string(),
        description: None,
        category: category.to_string(),
        images: vec!["a.png".to_string()],
        primary_image: 0,
        video_urls: vec![],
        client: None,
        year: Some(2024),
        featured: false,
        display_order: 0,
    }
}

// ---------------------------------------------------------------------------
// Isolation
// ---------------------------------------------------------------------------

/// A resource owned by tenant A is invisible to tenant B through get,
/// update, and delete -- indistinguishable from a missing id.
#[sqlx::test(migrations = false)]
async fn test_cross_tenant_access_is_not_found(pool: PgPool) {
    setup(&pool).await;
    let alice = create_tenant(&pool, "alice").await;
    let bob = create_tenant(&pool, "bob").await;

    let project = ProjectRepo::create(&pool, alice, &new_project("Mine", 0))
        .await
        .unwrap();

    // get
    let found = ProjectRepo::find_by_id(&pool, bob, project.id).await.unwrap();
    assert!(found.is_none());

    // update
    let updated = ProjectRepo::update(
        &pool,
        bob,
        project.id,
        &UpdateProject {
            title: Some("Stolen".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert!(updated.is_none());

    // delete
    let deleted = ProjectRepo::delete(&pool, bob, project.id).await.unwrap();
    assert!(!deleted);

    // The owner still sees the untouched row.
    let mine = ProjectRepo::find_by_id(&pool, alice, project.id)
        .await
        .unwrap()
        .expect("owner should still find the project");
    assert_eq!(mine.title, "Mine");
}

/// Listing only ever returns the calling tenant's rows.
#[sqlx::test(migrations = false)]
async fn test_list_is_tenant_scoped(pool: PgPool) {
    setup(&pool).await;
    let alice = create_tenant(&pool, "alice").await;
    let bob = create_tenant(&pool, "bob").await;

    ProjectRepo::create(&pool, alice, &new_project("A1", 0)).await.unwrap();
    ProjectRepo::create(&pool, alice, &new_project("A2", 1)).await.unwrap();
    ProjectRepo::create(&pool, bob, &new_project("B1", 0)).await.unwrap();

    let alices = ProjectRepo::list(&pool, alice, None).await.unwrap();
    assert_eq!(alices.len(), 2);
    assert!(alices.iter().all(|p| p.user_id == alice));

    let bobs = ProjectRepo::list(&pool, bob, None).await.unwrap();
    assert_eq!(bobs.len(), 1);
    assert_eq!(bobs[0].title, "B1");
}

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

/// Lists sort by display rank ascending, ties broken by descending id
/// (newest first among equal rank), regardless of insertion order.
#[sqlx::test(migrations = false)]
async fn test_list_ordering(pool: PgPool) {
    setup(&pool).await;
    let tenant = create_tenant(&pool, "orderer").await;

    let p_rank2 = ProjectRepo::create(&pool, tenant, &new_project("rank2", 2)).await.unwrap();
    let p_rank1_old = ProjectRepo::create(&pool, tenant, &new_project("rank1-old", 1)).await.unwrap();
    let p_rank1_new = ProjectRepo::create(&pool, tenant, &new_project("rank1-new", 1)).await.unwrap();
    let p_rank0 = ProjectRepo::create(&pool, tenant, &new_project("rank0", 0)).await.unwrap();

    let listed = ProjectRepo::list(&pool, tenant, None).await.unwrap();
    let ids: Vec<i64> = listed.iter().map(|p| p.id).collect();
    assert_eq!(
        ids,
        vec![p_rank0.id, p_rank1_new.id, p_rank1_old.id, p_rank2.id],
        "expected order ASC with id DESC tie-break"
    );
}

/// Featured filter narrows the list without changing the ordering rule.
#[sqlx::test(migrations = false)]
async fn test_list_featured_filter(pool: PgPool) {
    setup(&pool).await;
    let tenant = create_tenant(&pool, "curator").await;

    let mut featured = new_project("front", 0);
    featured.featured = true;
    ProjectRepo::create(&pool, tenant, &featured).await.unwrap();
    ProjectRepo::create(&pool, tenant, &new_project("back", 1)).await.unwrap();

    let only_featured = ProjectRepo::list(&pool, tenant, Some(true)).await.unwrap();
    assert_eq!(only_featured.len(), 1);
    assert_eq!(only_featured[0].title, "front");
}

// ---------------------------------------------------------------------------
// Partial update / design works
// ---------------------------------------------------------------------------

/// Only fields present in the update are mutated; absent fields keep
/// their stored values.
#[sqlx::test(migrations = false)]
async fn test_partial_update_leaves_absent_fields(pool: PgPool) {
    setup(&pool).await;
    let tenant = create_tenant(&pool, "editor").await;

    let mut input = new_project("Original", 3);
    input.github_link = Some("https://github.com/editor/original".to_string());
    let project = ProjectRepo::create(&pool, tenant, &input).await.unwrap();

    let updated = ProjectRepo::update(
        &pool,
        tenant,
        project.id,
        &UpdateProject {
            title: Some("Renamed".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .expect("update should find the row");

    assert_eq!(updated.title, "Renamed");
    assert_eq!(updated.description, "A project");
    assert_eq!(updated.display_order, 3);
    assert_eq!(
        updated.github_link.as_deref(),
        Some("https://github.com/editor/original")
    );
    assert!(updated.updated_at >= project.updated_at);
}

/// Design works share the isolation and ordering rules, plus a category filter.
#[sqlx::test(migrations = false)]
async fn test_design_work_scoping_and_category_filter(pool: PgPool) {
    setup(&pool).await;
    let alice = create_tenant(&pool, "alice").await;
    let bob = create_tenant(&pool, "bob").await;

    DesignWorkRepo::create(&pool, alice, &new_design("Logo A", "logo")).await.unwrap();
    DesignWorkRepo::create(&pool, alice, &new_design("UI A", "ui")).await.unwrap();
    let bobs = DesignWorkRepo::create(&pool, bob, &new_design("Logo B", "logo")).await.unwrap();

    let logos = DesignWorkRepo::list(&pool, alice, Some("logo"), None).await.unwrap();
    assert_eq!(logos.len(), 1);
    assert_eq!(logos[0].title, "Logo A");

    let stolen = DesignWorkRepo::find_by_id(&pool, alice, bobs.id).await.unwrap();
    assert!(stolen.is_none());
}

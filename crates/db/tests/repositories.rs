//! Integration tests for the repositories the CSV importer composes.
//!
//! - Users come with a personal organization
//! - Find-or-create is idempotent and race-safe
//! - Organization scoping on id lookups
//! - Custom field paging and search

use assert_matches::assert_matches;
use chrono::{TimeZone, Utc};
use sqlx::PgPool;
use shelf_core::pagination::PageRequest;
use shelf_core::tier::Tier;
use shelf_db::models::asset::CreateAsset;
use shelf_db::models::custom_field::CreateCustomField;
use shelf_db::models::location::CreateLocation;
use shelf_db::models::user::{CreateUser, User};
use shelf_db::repositories::{
    AssetRepo, CategoryRepo, CustomFieldRepo, LocationRepo, OrganizationRepo, TagRepo, UserRepo,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn new_user(pool: &PgPool, email: &str) -> (User, i64) {
    let user = UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            first_name: Some("Test".to_string()),
            last_name: None,
            tier: Tier::Tier2,
        },
    )
    .await
    .unwrap();
    let org = OrganizationRepo::find_personal_for_user(pool, user.id)
        .await
        .unwrap()
        .expect("personal organization");
    (user, org.id)
}

fn new_custom_field(org_id: i64, user_id: i64, name: &str) -> CreateCustomField {
    CreateCustomField {
        name: name.to_string(),
        help_text: None,
        field_type: "TEXT".to_string(),
        required: false,
        organization_id: org_id,
        created_by: user_id,
    }
}

// ---------------------------------------------------------------------------
// Users and organizations
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_user_gets_personal_organization(pool: PgPool) {
    let (user, org_id) = new_user(&pool, "owner@example.com").await;
    assert_eq!(user.tier(), Tier::Tier2);

    let org = OrganizationRepo::find_personal_for_user(&pool, user.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(org.id, org_id);
    assert_eq!(org.name, "Personal");
    assert_eq!(org.org_type, "PERSONAL");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_email_rejected(pool: PgPool) {
    new_user(&pool, "dup@example.com").await;
    let result = UserRepo::create(
        &pool,
        &CreateUser {
            email: "dup@example.com".to_string(),
            first_name: None,
            last_name: None,
            tier: Tier::Free,
        },
    )
    .await;
    assert_matches!(result, Err(sqlx::Error::Database(_)));
}

// ---------------------------------------------------------------------------
// Find-or-create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_category_find_or_create_is_idempotent(pool: PgPool) {
    let (user, org_id) = new_user(&pool, "cat@example.com").await;
    let mut conn = pool.acquire().await.unwrap();

    let first = CategoryRepo::find_or_create(&mut conn, org_id, user.id, "Electronics")
        .await
        .unwrap();
    let second = CategoryRepo::find_or_create(&mut conn, org_id, user.id, "Electronics")
        .await
        .unwrap();
    assert_eq!(first.id, second.id);
    assert!(first.color.starts_with('#'));

    // Matching is exact: a different case is a different category.
    let other = CategoryRepo::find_or_create(&mut conn, org_id, user.id, "electronics")
        .await
        .unwrap();
    assert_ne!(other.id, first.id);

    let all = CategoryRepo::list(&pool, org_id).await.unwrap();
    assert_eq!(all.len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_concurrent_find_or_create_yields_one_row(pool: PgPool) {
    let (user, org_id) = new_user(&pool, "race@example.com").await;
    let user_id = user.id;

    let create = |pool: PgPool| async move {
        let mut tx = pool.begin().await.unwrap();
        let category = CategoryRepo::find_or_create(&mut tx, org_id, user_id, "Tools")
            .await
            .unwrap();
        tx.commit().await.unwrap();
        category
    };

    let (a, b) = tokio::join!(create(pool.clone()), create(pool.clone()));
    assert_eq!(a.id, b.id);
    assert_eq!(CategoryRepo::list(&pool, org_id).await.unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_find_or_create_is_scoped_to_organization(pool: PgPool) {
    let (alice, alice_org) = new_user(&pool, "alice@example.com").await;
    let (bob, bob_org) = new_user(&pool, "bob@example.com").await;
    let mut conn = pool.acquire().await.unwrap();

    let a = LocationRepo::find_or_create(&mut conn, alice_org, alice.id, "HQ")
        .await
        .unwrap();
    let b = LocationRepo::find_or_create(&mut conn, bob_org, bob.id, "HQ")
        .await
        .unwrap();
    assert_ne!(a.id, b.id);

    assert!(LocationRepo::find_by_id(&mut conn, alice_org, b.id)
        .await
        .unwrap()
        .is_none());
    assert!(LocationRepo::find_by_id(&mut conn, bob_org, b.id)
        .await
        .unwrap()
        .is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_custom_field_find_or_create_defaults_to_text(pool: PgPool) {
    let (user, org_id) = new_user(&pool, "cf@example.com").await;
    let mut conn = pool.acquire().await.unwrap();

    let field = CustomFieldRepo::find_or_create(&mut conn, org_id, user.id, "Serial")
        .await
        .unwrap();
    assert_eq!(field.field_type, "TEXT");
    assert!(field.active);
    assert!(!field.required);
}

// ---------------------------------------------------------------------------
// Locations
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_location_name_rejected(pool: PgPool) {
    let (user, org_id) = new_user(&pool, "loc@example.com").await;
    let input = CreateLocation {
        name: "Warehouse".to_string(),
        description: Some("Main storage".to_string()),
        address: None,
        organization_id: org_id,
        created_by: user.id,
    };
    LocationRepo::create(&pool, &input).await.unwrap();
    let result = LocationRepo::create(&pool, &input).await;
    assert!(result.is_err(), "Duplicate location name should fail");
}

// ---------------------------------------------------------------------------
// Assets
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_asset_with_tags_and_values(pool: PgPool) {
    let (user, org_id) = new_user(&pool, "asset@example.com").await;
    let mut tx = pool.begin().await.unwrap();

    let created_at = Utc.with_ymd_and_hms(2023, 5, 1, 12, 0, 0).unwrap();
    let asset = AssetRepo::create(
        &mut tx,
        &CreateAsset {
            title: "Laptop".to_string(),
            description: None,
            status: "AVAILABLE".to_string(),
            valuation: Some(1200.0),
            category_id: None,
            location_id: None,
            organization_id: org_id,
            created_by: user.id,
            created_at: Some(created_at),
        },
    )
    .await
    .unwrap();
    assert_eq!(asset.created_at, created_at);

    let tag = TagRepo::find_or_create(&mut tx, org_id, user.id, "it").await.unwrap();
    AssetRepo::attach_tag(&mut tx, asset.id, tag.id).await.unwrap();
    AssetRepo::attach_tag(&mut tx, asset.id, tag.id).await.unwrap();

    let field = CustomFieldRepo::find_or_create(&mut tx, org_id, user.id, "Serial")
        .await
        .unwrap();
    AssetRepo::set_custom_field_value(&mut tx, asset.id, field.id, "SN-1")
        .await
        .unwrap();
    tx.commit().await.unwrap();

    let tags = AssetRepo::tag_names_for_org(&pool, org_id).await.unwrap();
    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0].name, "it");

    let values = AssetRepo::custom_values_for_org(&pool, org_id).await.unwrap();
    assert_eq!(values.len(), 1);
    assert_eq!(values[0].value, "SN-1");
    assert_eq!(AssetRepo::count_for_org(&pool, org_id).await.unwrap(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_rolled_back_row_leaves_nothing(pool: PgPool) {
    let (user, org_id) = new_user(&pool, "rollback@example.com").await;

    let mut tx = pool.begin().await.unwrap();
    CategoryRepo::find_or_create(&mut tx, org_id, user.id, "Furniture")
        .await
        .unwrap();
    tx.rollback().await.unwrap();

    assert!(CategoryRepo::list(&pool, org_id).await.unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Custom field listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_custom_field_paging_and_search(pool: PgPool) {
    let (user, org_id) = new_user(&pool, "page@example.com").await;
    for name in ["Serial", "Warranty", "Supplier", "Purchase date", "Colour"] {
        CustomFieldRepo::create(&pool, &new_custom_field(org_id, user.id, name))
            .await
            .unwrap();
    }

    let first = CustomFieldRepo::list(&pool, org_id, PageRequest::new(Some(1), Some(2)), None)
        .await
        .unwrap();
    assert_eq!(first.total, 5);
    assert_eq!(first.items.len(), 2);
    // Newest first.
    assert_eq!(first.items[0].name, "Colour");

    let last = CustomFieldRepo::list(&pool, org_id, PageRequest::new(Some(3), Some(2)), None)
        .await
        .unwrap();
    assert_eq!(last.items.len(), 1);
    assert_eq!(last.items[0].name, "Serial");

    let found = CustomFieldRepo::list(&pool, org_id, PageRequest::default(), Some("su"))
        .await
        .unwrap();
    assert_eq!(found.total, 1);
    assert_eq!(found.items[0].name, "Supplier");
}

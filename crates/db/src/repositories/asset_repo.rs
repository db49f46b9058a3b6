//! Repository for the `assets` table and its link tables.

use sqlx::{PgConnection, PgPool};
use shelf_core::pagination::{search_pattern, PageRequest};
use shelf_core::types::DbId;

use crate::models::asset::{Asset, AssetCustomFieldValue, AssetPage, AssetTagName, CreateAsset};

/// Column list for `assets` queries.
const COLUMNS: &str = "id, title, description, status, valuation, category_id, location_id, \
    organization_id, created_by, created_at, updated_at";

const VALUE_COLUMNS: &str = "id, asset_id, custom_field_id, value, created_at, updated_at";

/// Provides asset persistence and the queries behind listing and export.
pub struct AssetRepo;

impl AssetRepo {
    /// Insert an asset. A `None` creation time falls back to `NOW()`.
    pub async fn create(conn: &mut PgConnection, input: &CreateAsset) -> Result<Asset, sqlx::Error> {
        let query = format!(
            "INSERT INTO assets \
                (title, description, status, valuation, category_id, location_id, \
                 organization_id, created_by, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, COALESCE($9, NOW())) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Asset>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.status)
            .bind(input.valuation)
            .bind(input.category_id)
            .bind(input.location_id)
            .bind(input.organization_id)
            .bind(input.created_by)
            .bind(input.created_at)
            .fetch_one(conn)
            .await
    }

    /// Link a tag to an asset. Linking twice is a no-op.
    pub async fn attach_tag(
        conn: &mut PgConnection,
        asset_id: DbId,
        tag_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO asset_tags (asset_id, tag_id) VALUES ($1, $2) \
             ON CONFLICT DO NOTHING",
        )
        .bind(asset_id)
        .bind(tag_id)
        .execute(conn)
        .await?;
        Ok(())
    }

    /// Store the value of one custom field for an asset.
    pub async fn set_custom_field_value(
        conn: &mut PgConnection,
        asset_id: DbId,
        custom_field_id: DbId,
        value: &str,
    ) -> Result<AssetCustomFieldValue, sqlx::Error> {
        let query = format!(
            "INSERT INTO asset_custom_field_values (asset_id, custom_field_id, value) \
             VALUES ($1, $2, $3) \
             ON CONFLICT ON CONSTRAINT uq_asset_custom_field_values_asset_field \
             DO UPDATE SET value = EXCLUDED.value \
             RETURNING {VALUE_COLUMNS}"
        );
        sqlx::query_as::<_, AssetCustomFieldValue>(&query)
            .bind(asset_id)
            .bind(custom_field_id)
            .bind(value)
            .fetch_one(conn)
            .await
    }

    /// One page of an organization's assets, newest first, optionally
    /// filtered by a case-insensitive title search.
    pub async fn list(
        pool: &PgPool,
        organization_id: DbId,
        page: PageRequest,
        search: Option<&str>,
    ) -> Result<AssetPage, sqlx::Error> {
        let pattern = search_pattern(search);
        let mut tx = pool.begin().await?;

        let query = format!(
            "SELECT {COLUMNS} FROM assets \
             WHERE organization_id = $1 AND ($2::TEXT IS NULL OR title ILIKE $2) \
             ORDER BY created_at DESC, id DESC \
             LIMIT $3 OFFSET $4"
        );
        let items = sqlx::query_as::<_, Asset>(&query)
            .bind(organization_id)
            .bind(&pattern)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&mut *tx)
            .await?;

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM assets \
             WHERE organization_id = $1 AND ($2::TEXT IS NULL OR title ILIKE $2)",
        )
        .bind(organization_id)
        .bind(&pattern)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(AssetPage { items, total })
    }

    /// Every asset of an organization in creation order (export).
    pub async fn list_for_export(
        pool: &PgPool,
        organization_id: DbId,
    ) -> Result<Vec<Asset>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM assets WHERE organization_id = $1 ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, Asset>(&query)
            .bind(organization_id)
            .fetch_all(pool)
            .await
    }

    /// Tag names of every asset in an organization, alphabetical per asset.
    pub async fn tag_names_for_org(
        pool: &PgPool,
        organization_id: DbId,
    ) -> Result<Vec<AssetTagName>, sqlx::Error> {
        sqlx::query_as::<_, AssetTagName>(
            "SELECT at.asset_id, t.name FROM asset_tags at \
             JOIN tags t ON t.id = at.tag_id \
             JOIN assets a ON a.id = at.asset_id \
             WHERE a.organization_id = $1 \
             ORDER BY at.asset_id, t.name",
        )
        .bind(organization_id)
        .fetch_all(pool)
        .await
    }

    /// Custom field values of every asset in an organization.
    pub async fn custom_values_for_org(
        pool: &PgPool,
        organization_id: DbId,
    ) -> Result<Vec<AssetCustomFieldValue>, sqlx::Error> {
        sqlx::query_as::<_, AssetCustomFieldValue>(
            "SELECT v.id, v.asset_id, v.custom_field_id, v.value, v.created_at, v.updated_at \
             FROM asset_custom_field_values v \
             JOIN assets a ON a.id = v.asset_id \
             WHERE a.organization_id = $1 \
             ORDER BY v.asset_id, v.custom_field_id",
        )
        .bind(organization_id)
        .fetch_all(pool)
        .await
    }

    pub async fn count_for_org(pool: &PgPool, organization_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM assets WHERE organization_id = $1")
            .bind(organization_id)
            .fetch_one(pool)
            .await
    }
}

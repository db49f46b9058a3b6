//! Repository for the `custom_fields` table.

use sqlx::{PgConnection, PgPool};
use shelf_core::pagination::{search_pattern, PageRequest};
use shelf_core::types::DbId;

use super::FIND_OR_CREATE_ATTEMPTS;
use crate::models::custom_field::{CreateCustomField, CustomField, CustomFieldPage, DEFAULT_FIELD_TYPE};

/// Column list for `custom_fields` queries.
const COLUMNS: &str = "id, name, help_text, field_type, required, active, \
    organization_id, created_by, created_at, updated_at";

/// Provides CRUD operations for custom field definitions.
pub struct CustomFieldRepo;

impl CustomFieldRepo {
    /// Insert a custom field definition.
    pub async fn create(
        pool: &PgPool,
        input: &CreateCustomField,
    ) -> Result<CustomField, sqlx::Error> {
        let query = format!(
            "INSERT INTO custom_fields (name, help_text, field_type, required, organization_id, created_by) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CustomField>(&query)
            .bind(&input.name)
            .bind(&input.help_text)
            .bind(&input.field_type)
            .bind(input.required)
            .bind(input.organization_id)
            .bind(input.created_by)
            .fetch_one(pool)
            .await
    }

    /// Return the custom field called `name`, creating a `TEXT` field if needed.
    pub async fn find_or_create(
        conn: &mut PgConnection,
        organization_id: DbId,
        created_by: DbId,
        name: &str,
    ) -> Result<CustomField, sqlx::Error> {
        let insert = format!(
            "INSERT INTO custom_fields (name, field_type, organization_id, created_by) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT ON CONSTRAINT uq_custom_fields_org_name DO NOTHING \
             RETURNING {COLUMNS}"
        );
        let select = format!(
            "SELECT {COLUMNS} FROM custom_fields WHERE organization_id = $1 AND name = $2"
        );
        for _ in 0..FIND_OR_CREATE_ATTEMPTS {
            let created = sqlx::query_as::<_, CustomField>(&insert)
                .bind(name)
                .bind(DEFAULT_FIELD_TYPE)
                .bind(organization_id)
                .bind(created_by)
                .fetch_optional(&mut *conn)
                .await?;
            if let Some(field) = created {
                tracing::debug!(custom_field_id = field.id, organization_id, field = name, "Created custom field");
                return Ok(field);
            }
            let existing = sqlx::query_as::<_, CustomField>(&select)
                .bind(organization_id)
                .bind(name)
                .fetch_optional(&mut *conn)
                .await?;
            if let Some(field) = existing {
                return Ok(field);
            }
        }
        Err(sqlx::Error::RowNotFound)
    }

    /// Find a custom field by id, only if it belongs to `organization_id`.
    pub async fn find_by_id(
        conn: &mut PgConnection,
        organization_id: DbId,
        id: DbId,
    ) -> Result<Option<CustomField>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM custom_fields WHERE id = $1 AND organization_id = $2"
        );
        sqlx::query_as::<_, CustomField>(&query)
            .bind(id)
            .bind(organization_id)
            .fetch_optional(conn)
            .await
    }

    /// One page of an organization's custom fields, most recently updated first.
    ///
    /// `search` matches the name case-insensitively. The page and the total
    /// are read in one transaction so they agree with each other.
    pub async fn list(
        pool: &PgPool,
        organization_id: DbId,
        page: PageRequest,
        search: Option<&str>,
    ) -> Result<CustomFieldPage, sqlx::Error> {
        let pattern = search_pattern(search);
        let mut tx = pool.begin().await?;

        let query = format!(
            "SELECT {COLUMNS} FROM custom_fields \
             WHERE organization_id = $1 AND ($2::TEXT IS NULL OR name ILIKE $2) \
             ORDER BY updated_at DESC, id DESC \
             LIMIT $3 OFFSET $4"
        );
        let items = sqlx::query_as::<_, CustomField>(&query)
            .bind(organization_id)
            .bind(&pattern)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&mut *tx)
            .await?;

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM custom_fields \
             WHERE organization_id = $1 AND ($2::TEXT IS NULL OR name ILIKE $2)",
        )
        .bind(organization_id)
        .bind(&pattern)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(CustomFieldPage { items, total })
    }
}

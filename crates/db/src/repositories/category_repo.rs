//! Repository for the `categories` table.

use sqlx::{PgConnection, PgPool};
use shelf_core::colors::category_color;
use shelf_core::types::DbId;

use super::FIND_OR_CREATE_ATTEMPTS;
use crate::models::category::Category;

/// Column list for `categories` queries.
const COLUMNS: &str =
    "id, name, description, color, organization_id, created_by, created_at, updated_at";

/// Provides lookup and find-or-create for categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// Return the category called `name` in `organization_id`, creating it if
    /// it does not exist yet.
    ///
    /// Safe under concurrent callers: the insert yields to an existing row on
    /// `uq_categories_org_name` and the winner's row is re-read instead.
    pub async fn find_or_create(
        conn: &mut PgConnection,
        organization_id: DbId,
        created_by: DbId,
        name: &str,
    ) -> Result<Category, sqlx::Error> {
        let insert = format!(
            "INSERT INTO categories (name, color, organization_id, created_by) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT ON CONSTRAINT uq_categories_org_name DO NOTHING \
             RETURNING {COLUMNS}"
        );
        for _ in 0..FIND_OR_CREATE_ATTEMPTS {
            let created = sqlx::query_as::<_, Category>(&insert)
                .bind(name)
                .bind(category_color(name))
                .bind(organization_id)
                .bind(created_by)
                .fetch_optional(&mut *conn)
                .await?;
            if let Some(category) = created {
                tracing::debug!(category_id = category.id, organization_id, category = name, "Created category");
                return Ok(category);
            }
            if let Some(existing) = Self::find_by_name(&mut *conn, organization_id, name).await? {
                return Ok(existing);
            }
        }
        Err(sqlx::Error::RowNotFound)
    }

    /// Case-sensitive exact name lookup within an organization.
    pub async fn find_by_name(
        conn: &mut PgConnection,
        organization_id: DbId,
        name: &str,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM categories WHERE organization_id = $1 AND name = $2"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(organization_id)
            .bind(name)
            .fetch_optional(conn)
            .await
    }

    /// Find a category by id, only if it belongs to `organization_id`.
    pub async fn find_by_id(
        conn: &mut PgConnection,
        organization_id: DbId,
        id: DbId,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM categories WHERE id = $1 AND organization_id = $2"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .bind(organization_id)
            .fetch_optional(conn)
            .await
    }

    /// List all categories of an organization, alphabetically.
    pub async fn list(pool: &PgPool, organization_id: DbId) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM categories WHERE organization_id = $1 ORDER BY name ASC"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(organization_id)
            .fetch_all(pool)
            .await
    }
}

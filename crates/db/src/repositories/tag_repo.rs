//! Repository for the `tags` table.

use sqlx::PgConnection;
use shelf_core::types::DbId;

use super::FIND_OR_CREATE_ATTEMPTS;
use crate::models::tag::Tag;

const COLUMNS: &str = "id, name, organization_id, created_by, created_at, updated_at";

pub struct TagRepo;

impl TagRepo {
    /// Return the tag called `name`, creating it if needed.
    pub async fn find_or_create(
        conn: &mut PgConnection,
        organization_id: DbId,
        created_by: DbId,
        name: &str,
    ) -> Result<Tag, sqlx::Error> {
        let insert = format!(
            "INSERT INTO tags (name, organization_id, created_by) \
             VALUES ($1, $2, $3) \
             ON CONFLICT ON CONSTRAINT uq_tags_org_name DO NOTHING \
             RETURNING {COLUMNS}"
        );
        let select =
            format!("SELECT {COLUMNS} FROM tags WHERE organization_id = $1 AND name = $2");
        for _ in 0..FIND_OR_CREATE_ATTEMPTS {
            let created = sqlx::query_as::<_, Tag>(&insert)
                .bind(name)
                .bind(organization_id)
                .bind(created_by)
                .fetch_optional(&mut *conn)
                .await?;
            if let Some(tag) = created {
                return Ok(tag);
            }
            let existing = sqlx::query_as::<_, Tag>(&select)
                .bind(organization_id)
                .bind(name)
                .fetch_optional(&mut *conn)
                .await?;
            if let Some(tag) = existing {
                return Ok(tag);
            }
        }
        Err(sqlx::Error::RowNotFound)
    }
}

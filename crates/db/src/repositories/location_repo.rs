//! Repository for the `locations` table.

use sqlx::{PgConnection, PgPool};
use shelf_core::types::DbId;

use super::FIND_OR_CREATE_ATTEMPTS;
use crate::models::location::{CreateLocation, Location};

/// Column list for `locations` queries.
const COLUMNS: &str =
    "id, name, description, address, organization_id, created_by, created_at, updated_at";

/// Provides CRUD and find-or-create for locations.
pub struct LocationRepo;

impl LocationRepo {
    /// Insert a new location. A duplicate name in the same organization fails
    /// with a unique violation on `uq_locations_org_name`.
    pub async fn create(pool: &PgPool, input: &CreateLocation) -> Result<Location, sqlx::Error> {
        let query = format!(
            "INSERT INTO locations (name, description, address, organization_id, created_by) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Location>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.address)
            .bind(input.organization_id)
            .bind(input.created_by)
            .fetch_one(pool)
            .await
    }

    /// Return the location called `name`, creating it if needed.
    ///
    /// Same concurrency contract as
    /// [`CategoryRepo::find_or_create`](super::CategoryRepo::find_or_create).
    pub async fn find_or_create(
        conn: &mut PgConnection,
        organization_id: DbId,
        created_by: DbId,
        name: &str,
    ) -> Result<Location, sqlx::Error> {
        let insert = format!(
            "INSERT INTO locations (name, organization_id, created_by) \
             VALUES ($1, $2, $3) \
             ON CONFLICT ON CONSTRAINT uq_locations_org_name DO NOTHING \
             RETURNING {COLUMNS}"
        );
        for _ in 0..FIND_OR_CREATE_ATTEMPTS {
            let created = sqlx::query_as::<_, Location>(&insert)
                .bind(name)
                .bind(organization_id)
                .bind(created_by)
                .fetch_optional(&mut *conn)
                .await?;
            if let Some(location) = created {
                tracing::debug!(location_id = location.id, organization_id, location = name, "Created location");
                return Ok(location);
            }
            let query = format!(
                "SELECT {COLUMNS} FROM locations WHERE organization_id = $1 AND name = $2"
            );
            let existing = sqlx::query_as::<_, Location>(&query)
                .bind(organization_id)
                .bind(name)
                .fetch_optional(&mut *conn)
                .await?;
            if let Some(location) = existing {
                return Ok(location);
            }
        }
        Err(sqlx::Error::RowNotFound)
    }

    /// Find a location by id, only if it belongs to `organization_id`.
    pub async fn find_by_id(
        conn: &mut PgConnection,
        organization_id: DbId,
        id: DbId,
    ) -> Result<Option<Location>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM locations WHERE id = $1 AND organization_id = $2"
        );
        sqlx::query_as::<_, Location>(&query)
            .bind(id)
            .bind(organization_id)
            .fetch_optional(conn)
            .await
    }

    /// List all locations of an organization, alphabetically.
    pub async fn list(pool: &PgPool, organization_id: DbId) -> Result<Vec<Location>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM locations WHERE organization_id = $1 ORDER BY name ASC"
        );
        sqlx::query_as::<_, Location>(&query)
            .bind(organization_id)
            .fetch_all(pool)
            .await
    }
}

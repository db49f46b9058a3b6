//! Repository for the `users` table.

use sqlx::PgPool;
use shelf_core::organization::{ORG_TYPE_PERSONAL, PERSONAL_ORG_NAME};
use shelf_core::types::DbId;

use crate::models::user::{CreateUser, User};

/// Column list for `users` queries.
const COLUMNS: &str = "id, email, first_name, last_name, tier, created_at, updated_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Create a user together with their personal organization.
    ///
    /// Both inserts share one transaction; a user never exists without a
    /// workspace to import into.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO users (email, first_name, last_name, tier) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        let user = sqlx::query_as::<_, User>(&query)
            .bind(&input.email)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(input.tier.as_str())
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query("INSERT INTO organizations (name, org_type, owner_id) VALUES ($1, $2, $3)")
            .bind(PERSONAL_ORG_NAME)
            .bind(ORG_TYPE_PERSONAL)
            .bind(user.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(user)
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}

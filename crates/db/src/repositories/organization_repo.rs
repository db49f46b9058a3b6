//! Repository for the `organizations` table.

use sqlx::PgPool;
use shelf_core::organization::ORG_TYPE_PERSONAL;
use shelf_core::types::DbId;

use crate::models::organization::Organization;

const COLUMNS: &str = "id, name, org_type, owner_id, created_at, updated_at";

pub struct OrganizationRepo;

impl OrganizationRepo {
    /// The personal organization owned by `user_id`, if any.
    pub async fn find_personal_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<Organization>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM organizations WHERE owner_id = $1 AND org_type = $2"
        );
        sqlx::query_as::<_, Organization>(&query)
            .bind(user_id)
            .bind(ORG_TYPE_PERSONAL)
            .fetch_optional(pool)
            .await
    }
}

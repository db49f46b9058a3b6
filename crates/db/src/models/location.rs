use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use shelf_core::types::{DbId, Timestamp};

/// A row from the `locations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Location {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub address: Option<String>,
    pub organization_id: DbId,
    pub created_by: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a location.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateLocation {
    pub name: String,
    pub description: Option<String>,
    pub address: Option<String>,
    pub organization_id: DbId,
    pub created_by: DbId,
}

//! User models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use shelf_core::tier::Tier;
use shelf_core::types::{DbId, Timestamp};

/// A row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// Plan tier name; see [`shelf_core::tier::Tier`].
    pub tier: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl User {
    /// The user's plan tier. Unknown values are treated as `free`.
    pub fn tier(&self) -> Tier {
        Tier::from_str(&self.tier).unwrap_or(Tier::Free)
    }
}

/// DTO for creating a user. The personal organization is created alongside.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub tier: Tier,
}

//! Asset models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use shelf_core::types::{DbId, Timestamp};

/// A row from the `assets` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Asset {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub valuation: Option<f64>,
    pub category_id: Option<DbId>,
    pub location_id: Option<DbId>,
    pub organization_id: DbId,
    pub created_by: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting an asset.
///
/// `created_at` is only set by backup imports, which keep the original
/// creation time; everything else lets the database default it.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAsset {
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub valuation: Option<f64>,
    pub category_id: Option<DbId>,
    pub location_id: Option<DbId>,
    pub organization_id: DbId,
    pub created_by: DbId,
    pub created_at: Option<Timestamp>,
}

/// One page of assets plus the unpaged total.
#[derive(Debug, Clone, Serialize)]
pub struct AssetPage {
    pub items: Vec<Asset>,
    pub total: i64,
}

/// A tag name linked to an asset (export helper).
#[derive(Debug, Clone, FromRow)]
pub struct AssetTagName {
    pub asset_id: DbId,
    pub name: String,
}

/// A row from the `asset_custom_field_values` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AssetCustomFieldValue {
    pub id: DbId,
    pub asset_id: DbId,
    pub custom_field_id: DbId,
    pub value: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

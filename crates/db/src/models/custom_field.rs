//! Custom field definitions.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use shelf_core::types::{DbId, Timestamp};

/// Field type given to custom fields created implicitly by a content import.
pub const DEFAULT_FIELD_TYPE: &str = "TEXT";

/// Every accepted `custom_fields.field_type` value.
pub const FIELD_TYPES: &[&str] = &["TEXT", "MULTILINE_TEXT", "BOOLEAN", "DATE", "OPTION"];

/// A row from the `custom_fields` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CustomField {
    pub id: DbId,
    pub name: String,
    pub help_text: Option<String>,
    pub field_type: String,
    pub required: bool,
    pub active: bool,
    pub organization_id: DbId,
    pub created_by: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a custom field.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCustomField {
    pub name: String,
    pub help_text: Option<String>,
    pub field_type: String,
    pub required: bool,
    pub organization_id: DbId,
    pub created_by: DbId,
}

/// One page of custom fields plus the unpaged total.
#[derive(Debug, Clone, Serialize)]
pub struct CustomFieldPage {
    pub items: Vec<CustomField>,
    pub total: i64,
}

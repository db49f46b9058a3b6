//! Typed records produced by the extractors.

use serde::{Deserialize, Serialize};

use crate::asset_status::AssetStatus;
use crate::types::{DbId, Timestamp};

/// A record together with the CSV row it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedRow<R> {
    pub row_index: usize,
    pub record: R,
}

/// A custom field value addressed by field name (content imports).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedFieldValue {
    pub name: String,
    pub value: String,
}

/// One asset from a user-authored spreadsheet.
///
/// Related entities are given by name and resolved (or created) inside the
/// target organization at import time.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContentImportRecord {
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub tags: Vec<String>,
    pub valuation: Option<f64>,
    pub custom_fields: Vec<NamedFieldValue>,
}

/// A custom field value addressed by id, as written by the backup export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupFieldValue {
    pub id: DbId,
    pub value: String,
}

/// One asset from a backup file.
///
/// Mirrors the export layout exactly; related entities are referenced by id
/// and must already exist in the target organization.
#[derive(Debug, Clone, PartialEq)]
pub struct BackupImportRecord {
    /// Id of the asset in the system that produced the backup. Informational.
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub status: AssetStatus,
    pub valuation: Option<f64>,
    pub category_id: Option<DbId>,
    pub location_id: Option<DbId>,
    pub tags: Vec<String>,
    pub custom_fields: Vec<BackupFieldValue>,
    pub created_at: Timestamp,
}

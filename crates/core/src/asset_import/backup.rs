//! Backup format: the CSV written by the asset export and read back by the
//! `backup` import intent.
//!
//! The layout is fixed and versioned. Related entities are referenced by id,
//! lists are JSON arrays inside a single cell, timestamps are RFC 3339.

use chrono::{DateTime, SecondsFormat, Utc};

use super::error::{ImportError, RowError};
use super::extract::{non_blank, parse_valuation, RowExtractor};
use super::reader::RawRow;
use super::records::{BackupFieldValue, BackupImportRecord};
use crate::asset_status::AssetStatus;
use crate::types::DbId;

/// Version of [`BACKUP_HEADERS`]. Bump when the column list changes.
pub const BACKUP_FORMAT_VERSION: u32 = 1;

/// Exact header row of a version 1 backup file.
pub const BACKUP_HEADERS: &[&str] = &[
    "id",
    "title",
    "description",
    "status",
    "valuation",
    "categoryId",
    "locationId",
    "tags",
    "customFields",
    "createdAt",
];

const COL_ID: usize = 0;
const COL_TITLE: usize = 1;
const COL_DESCRIPTION: usize = 2;
const COL_STATUS: usize = 3;
const COL_VALUATION: usize = 4;
const COL_CATEGORY_ID: usize = 5;
const COL_LOCATION_ID: usize = 6;
const COL_TAGS: usize = 7;
const COL_CUSTOM_FIELDS: usize = 8;
const COL_CREATED_AT: usize = 9;

/// Extractor for the `backup` intent.
#[derive(Debug, Clone, Copy, Default)]
pub struct BackupExtractor;

impl RowExtractor for BackupExtractor {
    type Record = BackupImportRecord;
    type Layout = ();

    fn layout(&self, header: &RawRow) -> Result<(), ImportError> {
        let width = header.len().max(BACKUP_HEADERS.len());
        for position in 0..width {
            let found = header.cells.get(position).map(|c| c.trim());
            let expected = BACKUP_HEADERS.get(position).copied();
            match (expected, found) {
                (Some(e), Some(f)) if e == f => continue,
                (Some(e), Some(f)) => {
                    return Err(ImportError::SchemaMismatch {
                        column: f.to_string(),
                        reason: format!(
                            "expected '{e}' in position {} of backup format v{BACKUP_FORMAT_VERSION}",
                            position + 1
                        ),
                    })
                }
                (Some(e), None) => {
                    return Err(ImportError::SchemaMismatch {
                        column: e.to_string(),
                        reason: "required column is missing".to_string(),
                    })
                }
                (None, Some(f)) => {
                    return Err(ImportError::SchemaMismatch {
                        column: f.to_string(),
                        reason: format!(
                            "unexpected column; backup format v{BACKUP_FORMAT_VERSION} has {} columns",
                            BACKUP_HEADERS.len()
                        ),
                    })
                }
                (None, None) => unreachable!("position is below the wider of both lengths"),
            }
        }
        Ok(())
    }

    fn map_row(&self, _layout: &(), row: &RawRow) -> Result<BackupImportRecord, RowError> {
        if row.len() != BACKUP_HEADERS.len() {
            return Err(RowError::MalformedRow {
                expected: BACKUP_HEADERS.len(),
                found: row.len(),
            });
        }

        let id = parse_id(COL_ID, row.cell(COL_ID))?
            .ok_or(RowError::RequiredFieldMissing { field: "id" })?;
        let title = non_blank(row.cell(COL_TITLE))
            .ok_or(RowError::RequiredFieldMissing { field: "title" })?;

        let status = match non_blank(row.cell(COL_STATUS)) {
            None => AssetStatus::default(),
            Some(raw) => AssetStatus::from_str(&raw).ok_or_else(|| {
                RowError::invalid(
                    BACKUP_HEADERS[COL_STATUS],
                    &raw,
                    format!("expected one of {}", AssetStatus::ALL.join(", ")),
                )
            })?,
        };

        let created_at = non_blank(row.cell(COL_CREATED_AT))
            .ok_or(RowError::RequiredFieldMissing { field: "createdAt" })?;
        let created_at = DateTime::parse_from_rfc3339(&created_at)
            .map_err(|e| RowError::invalid(BACKUP_HEADERS[COL_CREATED_AT], &created_at, e.to_string()))?
            .with_timezone(&Utc);

        Ok(BackupImportRecord {
            id,
            title,
            description: non_blank(row.cell(COL_DESCRIPTION)),
            status,
            valuation: parse_valuation(BACKUP_HEADERS[COL_VALUATION], row.cell(COL_VALUATION))?,
            category_id: parse_id(COL_CATEGORY_ID, row.cell(COL_CATEGORY_ID))?,
            location_id: parse_id(COL_LOCATION_ID, row.cell(COL_LOCATION_ID))?,
            tags: parse_json_list(COL_TAGS, row.cell(COL_TAGS))?,
            custom_fields: parse_json_list(COL_CUSTOM_FIELDS, row.cell(COL_CUSTOM_FIELDS))?,
            created_at,
        })
    }
}

fn parse_id(column: usize, cell: &str) -> Result<Option<DbId>, RowError> {
    let Some(raw) = non_blank(cell) else {
        return Ok(None);
    };
    raw.parse::<DbId>()
        .map(Some)
        .map_err(|_| RowError::invalid(BACKUP_HEADERS[column], &raw, "not a valid id"))
}

fn parse_json_list<T: serde::de::DeserializeOwned>(
    column: usize,
    cell: &str,
) -> Result<Vec<T>, RowError> {
    let Some(raw) = non_blank(cell) else {
        return Ok(Vec::new());
    };
    serde_json::from_str(&raw)
        .map_err(|e| RowError::invalid(BACKUP_HEADERS[column], &raw, format!("not a JSON list ({e})")))
}

/// Write `records` as a backup CSV, header first.
pub fn write_backup_csv(records: &[BackupImportRecord]) -> Result<Vec<u8>, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(BACKUP_HEADERS)?;

    for record in records {
        let tags = serde_json::to_string(&record.tags).map_err(std::io::Error::other)?;
        let custom_fields =
            serde_json::to_string(&record.custom_fields).map_err(std::io::Error::other)?;
        writer.write_record([
            record.id.to_string(),
            record.title.clone(),
            record.description.clone().unwrap_or_default(),
            record.status.as_str().to_string(),
            record.valuation.map(|v| v.to_string()).unwrap_or_default(),
            record.category_id.map(|id| id.to_string()).unwrap_or_default(),
            record.location_id.map(|id| id.to_string()).unwrap_or_default(),
            tags,
            custom_fields,
            record.created_at.to_rfc3339_opts(SecondsFormat::Micros, true),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))
}

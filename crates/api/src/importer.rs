//! Persists extracted CSV records as assets.
//!
//! Each record is saved in its own transaction: the asset, any category,
//! location, tag or custom field it causes to be created, and its tag and
//! custom field links commit together or not at all. A row that fails is
//! rolled back and reported; rows saved before it stay saved.
//!
//! Tags and custom fields are resolved in name order so that concurrent
//! imports into one organization always take their uniqueness locks in the
//! same order. A row whose transaction still loses a deadlock or a
//! serialization conflict is retried from scratch.

use shelf_core::asset_import::error::RowError;
use shelf_core::asset_import::extract::Extraction;
use shelf_core::asset_import::outcome::{ImportOutcome, RowFailure};
use shelf_core::asset_import::records::{BackupImportRecord, ContentImportRecord, NamedFieldValue};
use shelf_core::asset_import::ImportScope;
use shelf_core::asset_status::AssetStatus;
use shelf_core::types::DbId;
use shelf_db::models::asset::CreateAsset;
use shelf_db::repositories::{AssetRepo, CategoryRepo, CustomFieldRepo, LocationRepo, TagRepo};
use sqlx::{PgConnection, PgPool};

/// Attempts per row before a deadlock or serialization failure is reported.
pub const ROW_ATTEMPTS: u32 = 3;

/// SQLSTATE codes that mean "run the transaction again".
const RETRYABLE_SQLSTATES: [&str; 2] = ["40P01", "40001"];

/// Why a single row could not be saved.
#[derive(Debug, thiserror::Error)]
enum SaveError {
    #[error(transparent)]
    Row(#[from] RowError),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Writes extracted records into one organization.
pub struct AssetImporter<'a> {
    pool: &'a PgPool,
}

impl SaveError {
    fn is_retryable(&self) -> bool {
        match self {
            SaveError::Database(err) => err
                .as_database_error()
                .and_then(|db_err| db_err.code())
                .is_some_and(|code| RETRYABLE_SQLSTATES.iter().any(|retryable| code == *retryable)),
            SaveError::Row(_) => false,
        }
    }
}

impl<'a> AssetImporter<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Save content records, resolving names to entities of the organization
    /// and creating the ones that do not exist yet.
    pub async fn import_content(
        &self,
        scope: ImportScope,
        extraction: Extraction<ContentImportRecord>,
    ) -> ImportOutcome {
        let Extraction {
            records,
            mut failures,
        } = extraction;
        let mut imported = 0;

        for row in records {
            let mut attempt = 1;
            let result = loop {
                match self.save_content(scope, &row.record).await {
                    Err(err) if err.is_retryable() && attempt < ROW_ATTEMPTS => {
                        log_retry(row.row_index, attempt, &err);
                        attempt += 1;
                    }
                    result => break result,
                }
            };
            match result {
                Ok(asset_id) => {
                    imported += 1;
                    tracing::debug!(row_index = row.row_index, asset_id, "Imported asset");
                }
                Err(err) => failures.push(row_failure(row.row_index, err)),
            }
        }

        ImportOutcome::new(imported, failures)
    }

    /// Save backup records. Referenced categories, locations and custom
    /// fields must already exist in the organization.
    pub async fn import_backup(
        &self,
        scope: ImportScope,
        extraction: Extraction<BackupImportRecord>,
    ) -> ImportOutcome {
        let Extraction {
            records,
            mut failures,
        } = extraction;
        let mut imported = 0;

        for row in records {
            let mut attempt = 1;
            let result = loop {
                match self.save_backup(scope, &row.record).await {
                    Err(err) if err.is_retryable() && attempt < ROW_ATTEMPTS => {
                        log_retry(row.row_index, attempt, &err);
                        attempt += 1;
                    }
                    result => break result,
                }
            };
            match result {
                Ok(asset_id) => {
                    imported += 1;
                    tracing::debug!(
                        row_index = row.row_index,
                        asset_id,
                        source_id = row.record.id,
                        "Restored asset"
                    );
                }
                Err(err) => failures.push(row_failure(row.row_index, err)),
            }
        }

        ImportOutcome::new(imported, failures)
    }

    async fn save_content(
        &self,
        scope: ImportScope,
        record: &ContentImportRecord,
    ) -> Result<DbId, SaveError> {
        let ImportScope {
            user_id,
            organization_id,
        } = scope;
        let mut tx = self.pool.begin().await?;

        let category_id = match &record.category {
            Some(name) => {
                Some(CategoryRepo::find_or_create(&mut *tx, organization_id, user_id, name).await?.id)
            }
            None => None,
        };
        let location_id = match &record.location {
            Some(name) => {
                Some(LocationRepo::find_or_create(&mut *tx, organization_id, user_id, name).await?.id)
            }
            None => None,
        };

        let input = CreateAsset {
            title: record.title.clone(),
            description: record.description.clone(),
            status: AssetStatus::default().as_str().to_string(),
            valuation: record.valuation,
            category_id,
            location_id,
            organization_id,
            created_by: user_id,
            created_at: None,
        };
        let asset = AssetRepo::create(&mut *tx, &input).await?;

        attach_tags(&mut *tx, scope, asset.id, &record.tags).await?;

        for field_value in in_name_order(&record.custom_fields) {
            let field =
                CustomFieldRepo::find_or_create(&mut *tx, organization_id, user_id, &field_value.name)
                    .await?;
            AssetRepo::set_custom_field_value(&mut *tx, asset.id, field.id, &field_value.value)
                .await?;
        }

        tx.commit().await?;
        Ok(asset.id)
    }

    async fn save_backup(
        &self,
        scope: ImportScope,
        record: &BackupImportRecord,
    ) -> Result<DbId, SaveError> {
        let ImportScope {
            user_id,
            organization_id,
        } = scope;
        let mut tx = self.pool.begin().await?;

        if let Some(id) = record.category_id {
            if CategoryRepo::find_by_id(&mut *tx, organization_id, id).await?.is_none() {
                return Err(RowError::DanglingReference {
                    entity: "Category",
                    id,
                }
                .into());
            }
        }
        if let Some(id) = record.location_id {
            if LocationRepo::find_by_id(&mut *tx, organization_id, id).await?.is_none() {
                return Err(RowError::DanglingReference {
                    entity: "Location",
                    id,
                }
                .into());
            }
        }
        for value in &record.custom_fields {
            if CustomFieldRepo::find_by_id(&mut *tx, organization_id, value.id).await?.is_none() {
                return Err(RowError::DanglingReference {
                    entity: "Custom field",
                    id: value.id,
                }
                .into());
            }
        }

        let input = CreateAsset {
            title: record.title.clone(),
            description: record.description.clone(),
            status: record.status.as_str().to_string(),
            valuation: record.valuation,
            category_id: record.category_id,
            location_id: record.location_id,
            organization_id,
            created_by: user_id,
            created_at: Some(record.created_at),
        };
        let asset = AssetRepo::create(&mut *tx, &input).await?;

        attach_tags(&mut *tx, scope, asset.id, &record.tags).await?;

        for value in &record.custom_fields {
            AssetRepo::set_custom_field_value(&mut *tx, asset.id, value.id, &value.value).await?;
        }

        tx.commit().await?;
        Ok(asset.id)
    }
}

/// Database errors are logged here and reported to the user generically.
fn row_failure(row_index: usize, err: SaveError) -> RowFailure {
    let row_error = match err {
        SaveError::Row(row_error) => row_error,
        SaveError::Database(db_err) => {
            tracing::error!(row_index, error = %db_err, "Failed to save import row");
            RowError::PersistenceFailed
        }
    };
    RowFailure::new(row_index, &row_error)
}

fn log_retry(row_index: usize, attempt: u32, err: &SaveError) {
    tracing::warn!(row_index, attempt, error = %err, "Retrying import row after lock conflict");
}

/// Custom field values sorted by field name; a repeated name keeps its last value.
fn in_name_order(values: &[NamedFieldValue]) -> Vec<&NamedFieldValue> {
    let mut sorted: Vec<&NamedFieldValue> = values.iter().rev().collect();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));
    sorted.dedup_by(|a, b| a.name == b.name);
    sorted
}

/// Find or create each tag by name, in name order, and link it to the asset.
async fn attach_tags(
    conn: &mut PgConnection,
    scope: ImportScope,
    asset_id: DbId,
    tags: &[String],
) -> Result<(), sqlx::Error> {
    let mut names: Vec<&String> = tags.iter().collect();
    names.sort();
    names.dedup();
    for name in names {
        let tag = TagRepo::find_or_create(&mut *conn, scope.organization_id, scope.user_id, name)
            .await?;
        AssetRepo::attach_tag(&mut *conn, asset_id, tag.id).await?;
    }
    Ok(())
}

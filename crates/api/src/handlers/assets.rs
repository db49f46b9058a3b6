//! Handlers for the `/assets` resource: listing and backup export.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::IntoResponse;
use axum::Json;
use shelf_core::asset_import::backup::write_backup_csv;
use shelf_core::asset_import::records::{BackupFieldValue, BackupImportRecord};
use shelf_core::asset_status::AssetStatus;
use shelf_core::error::CoreError;
use shelf_core::tier::can_export_assets;
use shelf_core::types::DbId;
use shelf_db::repositories::AssetRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::workspace::Workspace;
use crate::query::ListParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/assets?page=&per_page=&search=
///
/// Newest first; `search` matches titles case-insensitively.
pub async fn list_assets(
    workspace: Workspace,
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<impl IntoResponse> {
    let page = AssetRepo::list(
        &state.pool,
        workspace.organization.id,
        params.page_request(),
        params.search(),
    )
    .await?;

    Ok(Json(DataResponse { data: page }))
}

/// GET /api/v1/assets/export/{filename}
///
/// Download every asset of the workspace as a backup CSV. The file can be
/// fed back into the import with the `backup` intent.
pub async fn export_assets(
    workspace: Workspace,
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> AppResult<impl IntoResponse> {
    if !can_export_assets(workspace.user.tier()) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Exporting assets is not available on your current plan".into(),
        )));
    }
    if !is_csv_filename(&filename) {
        return Err(AppError::BadRequest(
            "Export file name must end in .csv".into(),
        ));
    }

    let organization_id = workspace.organization.id;
    let assets = AssetRepo::list_for_export(&state.pool, organization_id).await?;

    let mut tags: HashMap<DbId, Vec<String>> = HashMap::new();
    for row in AssetRepo::tag_names_for_org(&state.pool, organization_id).await? {
        tags.entry(row.asset_id).or_default().push(row.name);
    }
    let mut values: HashMap<DbId, Vec<BackupFieldValue>> = HashMap::new();
    for row in AssetRepo::custom_values_for_org(&state.pool, organization_id).await? {
        values.entry(row.asset_id).or_default().push(BackupFieldValue {
            id: row.custom_field_id,
            value: row.value,
        });
    }

    let records: Vec<BackupImportRecord> = assets
        .into_iter()
        .map(|asset| BackupImportRecord {
            id: asset.id,
            status: AssetStatus::from_str(&asset.status).unwrap_or_default(),
            tags: tags.remove(&asset.id).unwrap_or_default(),
            custom_fields: values.remove(&asset.id).unwrap_or_default(),
            title: asset.title,
            description: asset.description,
            valuation: asset.valuation,
            category_id: asset.category_id,
            location_id: asset.location_id,
            created_at: asset.created_at,
        })
        .collect();

    let body = write_backup_csv(&records)
        .map_err(|e| AppError::InternalError(format!("Failed to write backup CSV: {e}")))?;

    tracing::info!(
        organization_id,
        assets = records.len(),
        %filename,
        "Exported asset backup"
    );

    Ok((
        [
            (CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        body,
    ))
}

/// A plain `name.csv`: no quotes, no path separators, non-empty stem.
fn is_csv_filename(filename: &str) -> bool {
    let Some(stem) = filename.strip_suffix(".csv") else {
        return false;
    };
    !stem.is_empty() && !filename.contains(['"', '/', '\\'])
}

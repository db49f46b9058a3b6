//! Handlers for `/assets/import`.
//!
//! The import action walks the stages of [`ImportRun`] in order:
//! authorizing, reading the upload, extracting records, importing them and
//! reporting. Nothing of the request body is read until the actor is known
//! to be allowed to import into a workspace.

use axum::body::Bytes;
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;
use shelf_core::asset_import::backup::BackupExtractor;
use shelf_core::asset_import::content::ContentExtractor;
use shelf_core::asset_import::error::ImportError;
use shelf_core::asset_import::extract::RowExtractor;
use shelf_core::asset_import::intent::ImportIntent;
use shelf_core::asset_import::outcome::ImportOutcome;
use shelf_core::asset_import::reader::read_rows;
use shelf_core::asset_import::stage::{ImportRun, ImportStage};
use shelf_core::asset_import::ImportScope;
use shelf_core::error::CoreError;
use shelf_core::tier::can_import_assets;
use shelf_db::repositories::{OrganizationRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::importer::AssetImporter;
use crate::middleware::auth::AuthUser;
use crate::response::{DataResponse, ImportReport};
use crate::state::AppState;

/// Page title shown above the upload form.
const IMPORT_PAGE_TITLE: &str = "Import assets (beta)";

/// Shown when the user's plan does not include imports.
const IMPORT_NOT_PERMITTED_MESSAGE: &str =
    "Importing assets is not available on your current plan. Upgrade to import from CSV.";

/// What the upload form needs to render.
#[derive(Debug, Serialize)]
pub struct ImportPageInfo {
    pub title: &'static str,
    pub can_import: bool,
    pub intents: &'static [&'static str],
}

/// GET /api/v1/assets/import
pub async fn import_page(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<ImportPageInfo>>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| CoreError::Unauthorized("User no longer exists".into()))?;

    Ok(Json(DataResponse {
        data: ImportPageInfo {
            title: IMPORT_PAGE_TITLE,
            can_import: can_import_assets(user.tier()),
            intents: ImportIntent::ALL,
        },
    }))
}

/// POST /api/v1/assets/import
///
/// Multipart form with an `intent` field (`backup` or `content`) and a
/// `file` field holding the CSV. Answers 200 with the per-row outcome once
/// rows were processed, even if some of them failed.
pub async fn import_assets(
    State(state): State<AppState>,
    auth: Result<AuthUser, AppError>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ImportReport {
    let mut run = ImportRun::new();
    match run_import(&state, &mut run, auth, multipart).await {
        Ok(outcome) => {
            run.enter(ImportStage::Reporting);
            ImportReport::Completed(outcome)
        }
        Err(error) => ImportReport::Failed(run.fail(error)),
    }
}

async fn run_import(
    state: &AppState,
    run: &mut ImportRun,
    auth: Result<AuthUser, AppError>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<ImportOutcome, ImportError> {
    run.enter(ImportStage::Authorizing);
    let scope = authorize(state, auth).await?;

    run.enter(ImportStage::Reading);
    let upload = read_upload(multipart).await?;
    let intent = ImportIntent::parse(upload.intent.as_deref().unwrap_or_default())?;
    let file = upload.file.ok_or(ImportError::MissingFile)?;
    let rows = read_rows(&file)?;

    run.enter(ImportStage::Extracting);
    let importer = AssetImporter::new(&state.pool);
    let outcome = match intent {
        ImportIntent::Content => {
            let extraction = ContentExtractor.extract(&rows)?;
            run.enter(ImportStage::Importing);
            importer.import_content(scope, extraction).await
        }
        ImportIntent::Backup => {
            let extraction = BackupExtractor.extract(&rows)?;
            run.enter(ImportStage::Importing);
            importer.import_backup(scope, extraction).await
        }
    };

    tracing::info!(
        user_id = scope.user_id,
        organization_id = scope.organization_id,
        %intent,
        imported = outcome.imported,
        failed = outcome.failures.len(),
        total_rows = outcome.total_rows,
        partial = outcome.is_partial(),
        "CSV import finished"
    );
    Ok(outcome)
}

/// Check the token, the plan entitlement and the target organization, in
/// that order.
async fn authorize(
    state: &AppState,
    auth: Result<AuthUser, AppError>,
) -> Result<ImportScope, ImportError> {
    let auth = auth.map_err(|err| match err {
        AppError::Core(CoreError::Unauthorized(msg)) => ImportError::Unauthenticated(msg),
        other => ImportError::Unauthenticated(other.to_string()),
    })?;

    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await
        .map_err(internal)?
        .ok_or_else(|| ImportError::Unauthenticated("User no longer exists".into()))?;

    if !can_import_assets(user.tier()) {
        tracing::info!(user_id = user.id, tier = %user.tier, "Import refused for plan");
        return Err(ImportError::Authorization(
            IMPORT_NOT_PERMITTED_MESSAGE.to_string(),
        ));
    }

    let organization = OrganizationRepo::find_personal_for_user(&state.pool, user.id)
        .await
        .map_err(internal)?
        .ok_or(ImportError::NoOrganization)?;

    Ok(ImportScope {
        user_id: user.id,
        organization_id: organization.id,
    })
}

/// The two form fields the import understands.
#[derive(Debug, Default)]
struct Upload {
    intent: Option<String>,
    file: Option<Bytes>,
}

/// Read the multipart body once, keeping `intent` and `file`.
///
/// A body that is not multipart at all reads as an empty form. A file input
/// left empty by the browser (no file name, no content) counts as no file.
async fn read_upload(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Upload, ImportError> {
    let mut upload = Upload::default();
    let mut multipart = match multipart {
        Ok(multipart) => multipart,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Import request is not a multipart form");
            return Ok(upload);
        }
    };

    while let Some(field) = multipart.next_field().await.map_err(unreadable)? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "intent" => {
                upload.intent = Some(field.text().await.map_err(unreadable)?);
            }
            "file" => {
                let unnamed = field.file_name().is_none_or(str::is_empty);
                let data = field.bytes().await.map_err(unreadable)?;
                if !(unnamed && data.is_empty()) {
                    upload.file = Some(data);
                }
            }
            _ => {}
        }
    }

    Ok(upload)
}

fn unreadable(err: MultipartError) -> ImportError {
    ImportError::UnreadableFile(err.body_text())
}

fn internal(err: sqlx::Error) -> ImportError {
    ImportError::Internal(err.to_string())
}

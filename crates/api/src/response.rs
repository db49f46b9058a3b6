//! Response envelopes.
//!
//! Catalog endpoints answer with a `{ "data": ... }` envelope via
//! [`DataResponse`]. The import action uses its own shape, produced by
//! [`ImportReport`], which the upload form reads directly.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;
use shelf_core::asset_import::error::ImportError;
use shelf_core::asset_import::outcome::ImportOutcome;
use shelf_core::asset_import::stage::StageFailure;

/// Standard `{ "data": T }` response envelope.
///
/// ```ignore
/// Ok(Json(DataResponse { data: items }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Final answer of one import request.
#[derive(Debug)]
pub enum ImportReport {
    /// Rows were processed; some may have failed individually.
    Completed(ImportOutcome),
    /// The request was rejected before or while reading the file.
    Failed(StageFailure),
}

/// HTTP status for a fatal import error.
pub fn import_error_status(error: &ImportError) -> StatusCode {
    match error {
        ImportError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
        ImportError::Authorization(_) | ImportError::NoOrganization => StatusCode::FORBIDDEN,
        ImportError::InvalidIntent(_)
        | ImportError::MissingFile
        | ImportError::EmptyFile
        | ImportError::UnreadableFile(_)
        | ImportError::SchemaMismatch { .. } => StatusCode::BAD_REQUEST,
        ImportError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ImportReport {
    fn into_response(self) -> Response {
        match self {
            ImportReport::Completed(outcome) => {
                let body = json!({
                    "success": outcome.success,
                    "error": { "message": "", "details": { "code": null } },
                    "imported": outcome.imported,
                    "total_rows": outcome.total_rows,
                    "failures": outcome.failures,
                });
                (StatusCode::OK, Json(body)).into_response()
            }
            ImportReport::Failed(StageFailure { stage, error }) => {
                let status = import_error_status(&error);
                // Internal details stay in the log.
                let message = match &error {
                    ImportError::Internal(detail) => {
                        tracing::error!(%stage, error = %detail, "Import failed");
                        "Something went wrong while importing. Please try again.".to_string()
                    }
                    other => {
                        tracing::info!(%stage, code = other.code(), error = %other, "Import rejected");
                        other.to_string()
                    }
                };
                let body = json!({
                    "success": false,
                    "error": { "message": message, "details": { "code": error.code() } },
                });
                (status, Json(body)).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_problems_are_bad_requests() {
        for error in [
            ImportError::MissingFile,
            ImportError::EmptyFile,
            ImportError::UnreadableFile("bad quote".into()),
            ImportError::InvalidIntent("restore".into()),
        ] {
            assert_eq!(import_error_status(&error), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn entitlement_problems_are_forbidden() {
        assert_eq!(
            import_error_status(&ImportError::Authorization("no".into())),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            import_error_status(&ImportError::NoOrganization),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            import_error_status(&ImportError::Unauthenticated("x".into())),
            StatusCode::UNAUTHORIZED
        );
    }
}

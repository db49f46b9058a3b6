use crate::types::DbId;

/// Domain errors shared by every non-import surface of the service.
///
/// The CSV import pipeline has its own taxonomy in
/// [`crate::asset_import::error`], because its responses use a different
/// envelope.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// Input rejected by a DTO validator (e.g. a location name that is too short).
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// Missing, malformed or expired bearer token.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated, but the plan tier or workspace does not allow the action.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

//! Error taxonomy of the import pipeline.
//!
//! [`ImportError`] is fatal: the whole request is answered with it and no
//! rows are touched. [`RowError`] belongs to a single row; it is recorded in
//! the outcome and the batch moves on.

use crate::types::DbId;

/// Fatal import errors. Each maps to one response code.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ImportError {
    #[error("{0}")]
    Unauthenticated(String),

    /// The actor's plan does not include CSV import.
    #[error("{0}")]
    Authorization(String),

    #[error("No workspace was found for this user")]
    NoOrganization,

    #[error("Unknown import type '{0}'. Expected 'backup' or 'content'")]
    InvalidIntent(String),

    #[error("No CSV file was uploaded")]
    MissingFile,

    #[error("CSV file is empty")]
    EmptyFile,

    #[error("CSV file could not be read: {0}")]
    UnreadableFile(String),

    /// Header row does not fit the expected layout. `column` names the first
    /// offending header cell (or the first missing one).
    #[error("Invalid CSV header at column '{column}': {reason}")]
    SchemaMismatch { column: String, reason: String },

    #[error("{0}")]
    Internal(String),
}

impl ImportError {
    /// Stable machine-readable code reported in `error.details.code`.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unauthenticated(_) => "UNAUTHORIZED",
            Self::Authorization(_) => "IMPORT_NOT_PERMITTED",
            Self::NoOrganization => "NO_ORGANIZATION",
            Self::InvalidIntent(_) => "INVALID_INTENT",
            Self::MissingFile => "MISSING_FILE",
            Self::EmptyFile => "EMPTY_FILE",
            Self::UnreadableFile(_) => "UNREADABLE_FILE",
            Self::SchemaMismatch { .. } => "SCHEMA_MISMATCH",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

/// Errors confined to one data row.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RowError {
    #[error("Missing required field: {field}")]
    RequiredFieldMissing { field: &'static str },

    /// A backup row points at a category, location or custom field that does
    /// not exist in the target organization.
    #[error("{entity} with id {id} does not exist in this workspace")]
    DanglingReference { entity: &'static str, id: DbId },

    #[error("Invalid value '{value}' in column '{column}': {reason}")]
    InvalidValue {
        column: String,
        value: String,
        reason: String,
    },

    #[error("Expected {expected} cells but found {found}")]
    MalformedRow { expected: usize, found: usize },

    /// The database rejected the row. Details are logged, not returned.
    #[error("Could not save this row")]
    PersistenceFailed,
}

impl RowError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::RequiredFieldMissing { .. } => "REQUIRED_FIELD_MISSING",
            Self::DanglingReference { .. } => "DANGLING_REFERENCE",
            Self::InvalidValue { .. } => "INVALID_VALUE",
            Self::MalformedRow { .. } => "MALFORMED_ROW",
            Self::PersistenceFailed => "PERSISTENCE_FAILED",
        }
    }

    pub(crate) fn invalid(column: &str, value: &str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            column: column.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

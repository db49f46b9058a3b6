//! Aggregate result of an import run.

use serde::Serialize;

use super::error::RowError;

/// Why a single row was not imported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowFailure {
    /// Position of the row in the uploaded file (header = 0).
    pub row_index: usize,
    pub code: &'static str,
    pub message: String,
}

impl RowFailure {
    pub fn new(row_index: usize, error: &RowError) -> Self {
        Self {
            row_index,
            code: error.code(),
            message: error.to_string(),
        }
    }
}

/// What an import run did: how many assets were created and which rows
/// were skipped.
///
/// A run that reaches this point is a success even when every row failed;
/// callers must look at `failures` to tell "all imported" from "some rows
/// need fixing".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportOutcome {
    pub success: bool,
    pub imported: usize,
    pub total_rows: usize,
    pub failures: Vec<RowFailure>,
}

impl ImportOutcome {
    /// Combine the extraction failures with the importer's results.
    ///
    /// Failures are ordered by row index so they read top to bottom like the
    /// source file.
    pub fn new(imported: usize, mut failures: Vec<RowFailure>) -> Self {
        failures.sort_by_key(|f| f.row_index);
        Self {
            success: true,
            imported,
            total_rows: imported + failures.len(),
            failures,
        }
    }

    /// `true` when at least one row was skipped.
    pub fn is_partial(&self) -> bool {
        !self.failures.is_empty()
    }
}

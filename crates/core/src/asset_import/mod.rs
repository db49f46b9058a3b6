//! CSV asset import pipeline: pure stages.
//!
//! The pipeline runs `Reader -> Extractor -> Importer`. This module owns the
//! first two plus the shared result types; persistence lives in the API
//! crate, which drives the stages in order (see [`stage::ImportStage`]).
//!
//! - [`reader`] -- bytes to [`reader::RawRow`]s
//! - [`content`] / [`backup`] -- the two [`extract::RowExtractor`] variants
//! - [`outcome`] -- per-row failures and the aggregate [`outcome::ImportOutcome`]

pub mod backup;
pub mod content;
pub mod error;
pub mod extract;
pub mod intent;
pub mod outcome;
pub mod reader;
pub mod records;
pub mod stage;

use crate::types::DbId;

/// Who is importing, and into which organization.
///
/// Passed explicitly into every persistence call so nothing in the pipeline
/// reads session state on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportScope {
    pub user_id: DbId,
    pub organization_id: DbId,
}

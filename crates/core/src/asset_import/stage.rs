//! Stages of an import request.
//!
//! ```text
//! Idle -> Authorizing -> Reading -> Extracting -> Importing -> Reporting
//! ```
//!
//! Stages only move forward, one step at a time. A failure in any stage
//! jumps straight to `Reporting` with the error it produced.

use serde::Serialize;

use super::error::ImportError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportStage {
    Idle,
    Authorizing,
    Reading,
    Extracting,
    Importing,
    Reporting,
}

impl ImportStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Authorizing => "authorizing",
            Self::Reading => "reading",
            Self::Extracting => "extracting",
            Self::Importing => "importing",
            Self::Reporting => "reporting",
        }
    }

    /// The stage after this one. `Reporting` is terminal.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Idle => Some(Self::Authorizing),
            Self::Authorizing => Some(Self::Reading),
            Self::Reading => Some(Self::Extracting),
            Self::Extracting => Some(Self::Importing),
            Self::Importing => Some(Self::Reporting),
            Self::Reporting => None,
        }
    }
}

impl std::fmt::Display for ImportStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fatal error together with the stage that raised it.
#[derive(Debug, Clone, PartialEq)]
pub struct StageFailure {
    pub stage: ImportStage,
    pub error: ImportError,
}

/// Tracks the current stage of one import request.
#[derive(Debug)]
pub struct ImportRun {
    stage: ImportStage,
}

impl ImportRun {
    pub fn new() -> Self {
        Self {
            stage: ImportStage::Idle,
        }
    }

    pub fn stage(&self) -> ImportStage {
        self.stage
    }

    /// Move to `to`, which must be the immediate successor of the current
    /// stage.
    ///
    /// # Panics
    ///
    /// Panics on an out-of-order transition; the caller's control flow is
    /// wrong if that happens.
    pub fn enter(&mut self, to: ImportStage) {
        assert_eq!(
            self.stage.next(),
            Some(to),
            "import stage cannot move from {} to {}",
            self.stage,
            to
        );
        self.stage = to;
    }

    /// Record `error` against the current stage and jump to `Reporting`.
    pub fn fail(&mut self, error: ImportError) -> StageFailure {
        let failure = StageFailure {
            stage: self.stage,
            error,
        };
        self.stage = ImportStage::Reporting;
        failure
    }
}

impl Default for ImportRun {
    fn default() -> Self {
        Self::new()
    }
}

//! The `intent` form field selecting which extractor runs.

use serde::{Deserialize, Serialize};

use super::error::ImportError;

/// Import mode chosen in the UI tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportIntent {
    /// Re-import of a file produced by the backup export.
    Backup,
    /// User-authored spreadsheet with names instead of ids.
    Content,
}

impl ImportIntent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Backup => "backup",
            Self::Content => "content",
        }
    }

    /// Parse the raw form value, rejecting anything but the two known modes.
    pub fn parse(raw: &str) -> Result<Self, ImportError> {
        match raw.trim() {
            "backup" => Ok(Self::Backup),
            "content" => Ok(Self::Content),
            other => Err(ImportError::InvalidIntent(other.to_string())),
        }
    }

    /// Modes in the order the UI lists them.
    pub const ALL: &'static [&'static str] = &["content", "backup"];
}

impl std::fmt::Display for ImportIntent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

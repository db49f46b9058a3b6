//! Availability status of an asset.

use serde::{Deserialize, Serialize};

/// Status values stored in `assets.status`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetStatus {
    #[default]
    Available,
    InCustody,
    CheckedOut,
}

impl AssetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "AVAILABLE",
            Self::InCustody => "IN_CUSTODY",
            Self::CheckedOut => "CHECKED_OUT",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "AVAILABLE" => Some(Self::Available),
            "IN_CUSTODY" => Some(Self::InCustody),
            "CHECKED_OUT" => Some(Self::CheckedOut),
            _ => None,
        }
    }

    pub const ALL: &'static [&'static str] = &["AVAILABLE", "IN_CUSTODY", "CHECKED_OUT"];
}

impl std::fmt::Display for AssetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

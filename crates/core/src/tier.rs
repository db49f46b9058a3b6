//! Plan tiers and the entitlements they unlock.
//!
//! Billing itself happens elsewhere; the service only reads the tier stored
//! on the user row and asks these functions what it permits.

use serde::{Deserialize, Serialize};

/// Subscription tier of a user, as stored in `users.tier`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Free,
    #[serde(rename = "tier_1")]
    Tier1,
    #[serde(rename = "tier_2")]
    Tier2,
}

impl Tier {
    /// Return the tier name as stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Tier1 => "tier_1",
            Self::Tier2 => "tier_2",
        }
    }

    /// Parse a tier string. Returns `None` for unknown values.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "free" => Some(Self::Free),
            "tier_1" => Some(Self::Tier1),
            "tier_2" => Some(Self::Tier2),
            _ => None,
        }
    }

    /// All valid tier values.
    pub const ALL: &'static [&'static str] = &["free", "tier_1", "tier_2"];
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether users on `tier` may bulk-import assets from CSV.
pub fn can_import_assets(tier: Tier) -> bool {
    !matches!(tier, Tier::Free)
}

/// Whether users on `tier` may download the backup CSV export.
pub fn can_export_assets(tier: Tier) -> bool {
    !matches!(tier, Tier::Free)
}

//! Organization kinds.

/// Every user owns exactly one organization of this type, created with the user.
pub const ORG_TYPE_PERSONAL: &str = "PERSONAL";

/// Shared workspace owned by one user and joined by others.
pub const ORG_TYPE_TEAM: &str = "TEAM";

/// Name given to a freshly created personal organization.
pub const PERSONAL_ORG_NAME: &str = "Personal";

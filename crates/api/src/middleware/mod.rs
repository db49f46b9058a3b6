//! Request extractors for authentication and workspace scoping.
//!
//! - [`auth::AuthUser`] -- the user behind a JWT Bearer token.
//! - [`workspace::Workspace`] -- that user's row and personal organization.

pub mod auth;
pub mod workspace;

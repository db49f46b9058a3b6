//! Resolves the organization a request acts in.
//!
//! Every user owns exactly one personal organization, created together with
//! the user. All catalog reads and writes, and every import, are scoped to it.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use shelf_core::error::CoreError;
use shelf_core::types::DbId;
use shelf_db::models::organization::Organization;
use shelf_db::models::user::User;
use shelf_db::repositories::{OrganizationRepo, UserRepo};
use sqlx::PgPool;

use crate::error::AppError;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// The acting user together with their organization.
#[derive(Debug, Clone)]
pub struct Workspace {
    pub user: User,
    pub organization: Organization,
}

/// Why a workspace could not be resolved.
#[derive(Debug, thiserror::Error)]
pub enum WorkspaceError {
    /// The token names a user that does not exist (any more).
    #[error("User no longer exists")]
    UnknownUser,

    #[error("No workspace was found for this user")]
    NoOrganization,

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl Workspace {
    /// Look up the user and their personal organization.
    pub async fn resolve(pool: &PgPool, user_id: DbId) -> Result<Self, WorkspaceError> {
        let user = UserRepo::find_by_id(pool, user_id)
            .await?
            .ok_or(WorkspaceError::UnknownUser)?;
        let organization = OrganizationRepo::find_personal_for_user(pool, user.id)
            .await?
            .ok_or(WorkspaceError::NoOrganization)?;
        Ok(Self { user, organization })
    }
}

impl From<WorkspaceError> for AppError {
    fn from(err: WorkspaceError) -> Self {
        let message = err.to_string();
        match err {
            WorkspaceError::UnknownUser => AppError::Core(CoreError::Unauthorized(message)),
            WorkspaceError::NoOrganization => AppError::Core(CoreError::Forbidden(message)),
            WorkspaceError::Database(db) => AppError::Database(db),
        }
    }
}

impl FromRequestParts<AppState> for Workspace {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth = AuthUser::from_request_parts(parts, state).await?;
        Ok(Workspace::resolve(&state.pool, auth.user_id).await?)
    }
}

//! Handlers for the `/categories` resource.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use shelf_db::repositories::CategoryRepo;

use crate::error::AppResult;
use crate::middleware::workspace::Workspace;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/categories
///
/// All categories of the workspace, alphabetically.
pub async fn list_categories(
    workspace: Workspace,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let categories = CategoryRepo::list(&state.pool, workspace.organization.id).await?;
    Ok(Json(DataResponse { data: categories }))
}

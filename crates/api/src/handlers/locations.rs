//! Handlers for the `/locations` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use shelf_db::models::location::CreateLocation;
use shelf_db::repositories::LocationRepo;
use validator::Validate;

use crate::error::AppResult;
use crate::middleware::workspace::Workspace;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for creating a location.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLocationRequest {
    #[validate(length(min = 2, message = "Name is required"))]
    pub name: String,
    pub description: Option<String>,
    pub address: Option<String>,
}

/// GET /api/v1/locations
pub async fn list_locations(
    workspace: Workspace,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let locations = LocationRepo::list(&state.pool, workspace.organization.id).await?;
    Ok(Json(DataResponse { data: locations }))
}

/// POST /api/v1/locations
///
/// Names are unique per workspace; a duplicate answers 409.
pub async fn create_location(
    workspace: Workspace,
    State(state): State<AppState>,
    Json(mut body): Json<CreateLocationRequest>,
) -> AppResult<impl IntoResponse> {
    body.name = body.name.trim().to_string();
    body.validate()?;

    let input = CreateLocation {
        name: body.name,
        description: body.description.filter(|d| !d.trim().is_empty()),
        address: body.address.filter(|a| !a.trim().is_empty()),
        organization_id: workspace.organization.id,
        created_by: workspace.user.id,
    };
    let location = LocationRepo::create(&state.pool, &input).await?;

    tracing::info!(
        location_id = location.id,
        organization_id = location.organization_id,
        "Created location"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: location })))
}

//! Handlers for the `/custom-fields` resource.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use shelf_core::error::CoreError;
use shelf_db::models::custom_field::{CreateCustomField, DEFAULT_FIELD_TYPE, FIELD_TYPES};
use shelf_db::repositories::CustomFieldRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::workspace::Workspace;
use crate::query::ListParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for creating a custom field.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCustomFieldRequest {
    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub name: String,
    pub help_text: Option<String>,
    /// One of [`FIELD_TYPES`]; `TEXT` when omitted.
    pub field_type: Option<String>,
    #[serde(default)]
    pub required: bool,
}

/// GET /api/v1/custom-fields?page=&per_page=&search=
///
/// Most recently updated first. `per_page` defaults to 8.
pub async fn list_custom_fields(
    workspace: Workspace,
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<impl IntoResponse> {
    let page = CustomFieldRepo::list(
        &state.pool,
        workspace.organization.id,
        params.page_request(),
        params.search(),
    )
    .await?;

    Ok(Json(DataResponse { data: page }))
}

/// POST /api/v1/custom-fields
pub async fn create_custom_field(
    workspace: Workspace,
    State(state): State<AppState>,
    Json(mut body): Json<CreateCustomFieldRequest>,
) -> AppResult<impl IntoResponse> {
    body.name = body.name.trim().to_string();
    body.validate()?;

    let field_type = body
        .field_type
        .map(|t| t.trim().to_uppercase())
        .unwrap_or_else(|| DEFAULT_FIELD_TYPE.to_string());
    if !FIELD_TYPES.contains(&field_type.as_str()) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Unknown field type '{field_type}'. Expected one of: {}",
            FIELD_TYPES.join(", ")
        ))));
    }

    let input = CreateCustomField {
        name: body.name,
        help_text: body.help_text.filter(|h| !h.trim().is_empty()),
        field_type,
        required: body.required,
        organization_id: workspace.organization.id,
        created_by: workspace.user.id,
    };
    let field = CustomFieldRepo::create(&state.pool, &input).await?;

    tracing::info!(
        custom_field_id = field.id,
        organization_id = field.organization_id,
        field_type = %field.field_type,
        "Created custom field"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: field })))
}

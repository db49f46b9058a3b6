//! Route definitions for the entities assets refer to.

use axum::routing::get;
use axum::Router;

use crate::handlers::{categories, custom_fields, locations};
use crate::state::AppState;

/// ```text
/// GET    /categories            -> list_categories
/// GET    /locations             -> list_locations
/// POST   /locations             -> create_location
/// GET    /custom-fields         -> list_custom_fields
/// POST   /custom-fields         -> create_custom_field
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/categories", get(categories::list_categories))
        .route(
            "/locations",
            get(locations::list_locations).post(locations::create_location),
        )
        .route(
            "/custom-fields",
            get(custom_fields::list_custom_fields).post(custom_fields::create_custom_field),
        )
}

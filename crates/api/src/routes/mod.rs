pub mod assets;
pub mod catalog;
pub mod health;

use axum::Router;

use crate::config::ServerConfig;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /assets                                 list (paged, searchable)
/// /assets/import                          import page info (GET), import CSV (POST)
/// /assets/export/{filename}               backup CSV download
///
/// /categories                             list
/// /locations                              list, create
/// /custom-fields                          list (paged, searchable), create
/// ```
pub fn api_routes(config: &ServerConfig) -> Router<AppState> {
    Router::new()
        .nest("/assets", assets::router(config.import_max_bytes))
        .merge(catalog::router())
}

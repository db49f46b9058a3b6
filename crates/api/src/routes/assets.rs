//! Route definitions for the `/assets` resource.

use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;

use crate::handlers::{asset_import, assets};
use crate::state::AppState;

/// Asset routes mounted at `/assets`.
///
/// ```text
/// GET    /                      -> list_assets
/// GET    /import                -> import_page
/// POST   /import                -> import_assets (body capped at `import_max_bytes`)
/// GET    /export/{filename}     -> export_assets
/// ```
pub fn router(import_max_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/", get(assets::list_assets))
        .route(
            "/import",
            get(asset_import::import_page)
                .post(asset_import::import_assets)
                .layer(DefaultBodyLimit::max(import_max_bytes)),
        )
        .route("/export/{filename}", get(assets::export_assets))
}

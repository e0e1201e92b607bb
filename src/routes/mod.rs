//! HTTP Routes
//!
//! - `/` and `/upload` - landing page and upload form
//! - `/summarize`, `/notes`, `/create_notes`, `/evaluate` - study actions
//!   on an upload or a stored file
//! - `/summarize/{filename}`, `/notes/{filename}`, `/evaluate/{filename}` -
//!   re-run an action on a stored file

pub mod form;
pub mod study;
pub mod ui;

use axum::{extract::DefaultBodyLimit, Router};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::models::AppState;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    info!("Creating application router");

    let max_upload_bytes = state.config.storage.max_upload_bytes;

    Router::new()
        .merge(ui::router())
        .merge(study::router(state))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
}

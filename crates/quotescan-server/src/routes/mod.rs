//! Route definitions for the HTTP server.

mod columns;
mod health;
mod index;
mod search;
mod upload;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

/// Create the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Browser UI
        .route("/", get(index::index))
        // Health check
        .route("/health", get(health::health_check))
        // Schema
        .route("/columns", get(columns::list_columns))
        // Extraction and filtering
        .route("/upload", post(upload::upload_pdf))
        .route("/search", post(search::search_rows))
        // Attach state
        .with_state(state)
}

pub use columns::*;
pub use health::*;
pub use search::*;
pub use upload::*;

//! quotescan-server - upload-and-search web service for quote review PDFs.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use quotescan_core::extraction::pdftotext::PdftotextBboxSource;
//! use quotescan_server::{create_server, AppState};
//!
//! #[tokio::main]
//! async fn main() {
//!     let state = AppState::new(Arc::new(PdftotextBboxSource::default()), Default::default());
//!     let app = create_server(state, quotescan_server::config::DEFAULT_MAX_UPLOAD_BYTES);
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:5000").await.unwrap();
//!     axum::serve(listener, app).await.unwrap();
//! }
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{extract::DefaultBodyLimit, middleware as axum_middleware, Router};
use tower_http::trace::TraceLayer;

/// Create the server with all routes and middleware.
pub fn create_server(state: AppState, max_upload_bytes: usize) -> Router {
    routes::create_router(state)
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::cors_layer())
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
}

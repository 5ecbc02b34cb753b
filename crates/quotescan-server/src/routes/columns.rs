//! Column schema endpoint.

use axum::Json;
use quotescan_core::Column;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ColumnsResponse {
    pub columns: Vec<&'static str>,
}

/// List the searchable columns in report order.
/// GET /columns
pub async fn list_columns() -> Json<ColumnsResponse> {
    Json(ColumnsResponse {
        columns: Column::names(),
    })
}

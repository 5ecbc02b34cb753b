//! Search endpoint.

use axum::{extract::rejection::JsonRejection, Json};
use quotescan_core::model::Document;
use quotescan_core::Filter;
use serde::{Deserialize, Serialize};

use crate::error::ApiResult;

/// Request body for filtering previously extracted rows.
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    /// Rows as returned by /upload.
    #[serde(default)]
    pub rows: Document,
    /// Column to search; empty means no filter.
    #[serde(default)]
    pub column: String,
    /// Case-insensitive substring; empty means no filter.
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub results: Document,
}

/// Filter rows by a column value.
/// POST /search
pub async fn search_rows(
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> ApiResult<Json<SearchResponse>> {
    let Json(request) = payload?;

    // The column is checked even when the value is empty
    let filter = if request.column.trim().is_empty() {
        None
    } else {
        Some(Filter::new(&request.column, &request.value)?)
    };

    Ok(Json(SearchResponse {
        results: request.rows.filter(filter.as_ref()),
    }))
}

//! PDF upload endpoint.

use axum::{
    body::Bytes,
    extract::{Multipart, State},
    Json,
};
use quotescan_core::model::Document;
use quotescan_core::Column;
use serde::Serialize;
use tracing::{info, warn};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Response for an extracted upload.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub headers: Vec<&'static str>,
    pub rows: Document,
    pub total_rows: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Extract the quote table from an uploaded PDF.
/// POST /upload (multipart field `file`)
pub async fn upload_pdf(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<UploadResponse>> {
    let mut upload: Option<(String, Bytes)> = None;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let data = field.bytes().await?;
        upload = Some((filename, data));
        break;
    }

    let (filename, data) = upload.ok_or_else(|| ApiError::bad_request("No file provided"))?;

    if filename.is_empty() {
        return Err(ApiError::bad_request("No file selected"));
    }
    if !is_pdf_filename(&filename) {
        return Err(ApiError::bad_request("Only PDF files are allowed"));
    }

    let source = state.source.clone();
    let options = state.options.clone();
    let document = tokio::task::spawn_blocking(move || {
        quotescan_core::extract(&data, source.as_ref(), &options)
    })
    .await
    .map_err(|e| ApiError::internal(format!("extraction task failed: {}", e)))?
    .map_err(|e| {
        warn!(file = %filename, error = %e, "extraction failed");
        ApiError::from(e)
    })?;

    info!(file = %filename, records = document.len(), "upload extracted");

    let message = document
        .is_empty()
        .then(|| "no data extracted".to_string());

    Ok(Json(UploadResponse {
        success: true,
        headers: Column::names(),
        total_rows: document.len(),
        rows: document,
        message,
    }))
}

fn is_pdf_filename(filename: &str) -> bool {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_pdf_filename() {
        assert!(is_pdf_filename("daily_quote_review.pdf"));
        assert!(is_pdf_filename("REPORT.PDF"));
        assert!(!is_pdf_filename("report.pdf.txt"));
        assert!(!is_pdf_filename("pdf"));
        assert!(!is_pdf_filename("report.xlsx"));
    }
}

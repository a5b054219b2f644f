//! Upload routes — metadata generation and raw text extraction.

use std::sync::Arc;

use axum::extract::{Multipart, Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use docmeta_core::FileType;
use docmeta_ingest::{Document, ExtractionMethod};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ApiError;
use crate::state::AppState;

/// Multipart field holding the uploaded document.
const FILE_FIELD: &str = "file";

/// Characters of extracted text returned by the extract preview.
const PREVIEW_CHARS: usize = 3000;

const DOWNLOAD_DISPOSITION: &str = "attachment; filename=\"metadata.json\"";

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/metadata", post(generate_metadata))
        .route("/extract", post(extract_text))
}

#[derive(Debug, Default, Deserialize)]
pub struct MetadataQuery {
    #[serde(default)]
    pub download: bool,
}

/// Response of POST /api/extract.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractResponse {
    pub filename: String,
    pub file_type: FileType,
    pub method: ExtractionMethod,
    pub page_count: Option<usize>,
    pub character_count: usize,
    pub preview: String,
}

/// POST /api/metadata — generate the metadata record for an upload.
///
/// With `?download=true` the pretty-printed record is sent as a
/// `metadata.json` attachment.
async fn generate_metadata(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MetadataQuery>,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    let doc = read_upload(multipart).await?;
    info!("Generating metadata for {} ({})", doc.filename, doc.file_type);

    let ingester = state.ingester.clone();
    let record = tokio::task::spawn_blocking(move || ingester.ingest_document(&doc))
        .await
        .map_err(|e| ApiError::internal(format!("Metadata task failed: {}", e)))??;

    if query.download {
        let body = record.to_json_pretty()?;
        Ok((
            [
                (header::CONTENT_TYPE, "application/json"),
                (header::CONTENT_DISPOSITION, DOWNLOAD_DISPOSITION),
            ],
            body,
        )
            .into_response())
    } else {
        Ok(Json(record).into_response())
    }
}

/// POST /api/extract — extracted text preview without metadata.
async fn extract_text(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<ExtractResponse>, ApiError> {
    let doc = read_upload(multipart).await?;

    let ingester = state.ingester.clone();
    let (doc, extracted) = tokio::task::spawn_blocking(move || {
        let extracted = ingester.extract(&doc);
        (doc, extracted)
    })
    .await
    .map_err(|e| ApiError::internal(format!("Extraction task failed: {}", e)))?;
    let extracted = extracted?;

    Ok(Json(ExtractResponse {
        filename: doc.filename,
        file_type: doc.file_type,
        method: extracted.method,
        page_count: extracted.page_count,
        character_count: extracted.text.chars().count(),
        preview: extracted.text.chars().take(PREVIEW_CHARS).collect(),
    }))
}

/// Read the `file` field, resolving its type from the declared MIME type
/// or, failing that, the filename.
async fn read_upload(mut multipart: Multipart) -> Result<Document, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::new(e.status(), e.body_text()))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let filename = field.file_name().unwrap_or("upload").to_string();
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::new(e.status(), e.body_text()))?;

        return Ok(Document::from_upload(
            &filename,
            content_type.as_deref(),
            bytes.to_vec(),
        )?);
    }
    Err(ApiError::bad_request(format!(
        "Missing multipart field '{}'",
        FILE_FIELD
    )))
}

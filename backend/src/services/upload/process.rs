//! # Upload Handling
//!
//! ## Workflow
//!
//! 1.  **Multipart read**: `read_file_field` walks the multipart stream. The first `file`
//!     field is checked against the accepted text table types, then read chunk by chunk
//!     until the configured size limit. Other fields are drained and ignored.
//!
//! 2.  **Ingestion**: the buffered bytes and filename move into `tokio::task::spawn_blocking`,
//!     where `pipeline::ingest` parses the file, opens one database connection and inserts
//!     the rows in order.
//!
//! 3.  **Response**: the `UploadSummary` is returned as JSON. Rows that failed validation or
//!     insertion are part of that summary, not an error. Only input rejections, empty
//!     files, parse failures and unusable storage turn into error responses.

use actix_multipart::{Field, Multipart};
use actix_web::{web, HttpResponse};
use common::model::upload::UploadSummary;
use futures_util::StreamExt;
use log::info;
use mime_guess::Mime;

use crate::error::ApiError;
use crate::ingest::pipeline;
use crate::state::AppState;

const FILE_FIELD: &str = "file";
const ALLOWED_MIME_TYPES: [&str; 4] = [
    "text/csv",
    "text/tab-separated-values",
    "text/plain",
    "application/vnd.ms-excel",
];

/// The buffered `file` field of an upload request.
#[derive(Debug)]
pub(crate) struct UploadedFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Actix web handler for `POST /upload`.
///
/// # Arguments
/// * `state` - Shared application state: database handle and upload size limit.
/// * `payload` - The multipart request body; must contain a `file` field.
///
/// # Returns
/// - `200 OK` with the `UploadSummary`, including any per-row failures.
/// - `400 Bad Request` when no file is sent, its type is not accepted, or it holds no rows.
/// - `413 Payload Too Large` when the file exceeds the configured limit.
/// - `500 Internal Server Error` with `Failed to process file` and details otherwise.
pub(crate) async fn process(
    state: web::Data<AppState>,
    payload: Multipart,
) -> Result<HttpResponse, ApiError> {
    let summary = upload_file(state, payload).await?;
    Ok(HttpResponse::Ok().json(summary))
}

async fn upload_file(
    state: web::Data<AppState>,
    payload: Multipart,
) -> Result<UploadSummary, ApiError> {
    let file = read_file_field(payload, state.max_file_size).await?;
    info!("received {} ({} bytes)", file.filename, file.bytes.len());

    let db = state.db.clone();
    let summary = tokio::task::spawn_blocking(move || {
        pipeline::ingest(&file.bytes, &file.filename, &db)
    })
    .await
    .map_err(|e| ApiError::Blocking(e.to_string()))??;

    Ok(summary)
}

/// Accepts the file when either its declared type or the type its extension implies is a
/// text table format.
pub(crate) fn is_allowed(filename: &str, content_type: Option<&Mime>) -> bool {
    let allowed = |mime: &Mime| ALLOWED_MIME_TYPES.contains(&mime.essence_str());

    content_type.is_some_and(allowed) || mime_guess::from_path(filename).iter().any(|m| allowed(&m))
}

async fn read_file_field(mut payload: Multipart, limit: usize) -> Result<UploadedFile, ApiError> {
    let mut file: Option<UploadedFile> = None;

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| ApiError::Multipart(e.to_string()))?;
        let name = field
            .content_disposition()
            .and_then(|cd| cd.get_name().map(|n| n.to_string()));

        match name.as_deref() {
            Some(FILE_FIELD) if file.is_none() => {
                let filename = field
                    .content_disposition()
                    .and_then(|cd| cd.get_filename().map(|f| f.to_string()))
                    .unwrap_or_default();

                if !is_allowed(&filename, field.content_type()) {
                    return Err(ApiError::UnsupportedType { filename });
                }

                let bytes = read_limited(&mut field, limit).await?;
                file = Some(UploadedFile { filename, bytes });
            }
            _ => {
                // Drain fields we do not use so the stream can advance.
                while let Some(chunk) = field.next().await {
                    chunk.map_err(|e| ApiError::Multipart(e.to_string()))?;
                }
            }
        }
    }

    file.ok_or(ApiError::NoFile)
}

async fn read_limited(field: &mut Field, limit: usize) -> Result<Vec<u8>, ApiError> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.next().await {
        let chunk = chunk.map_err(|e| ApiError::Multipart(e.to_string()))?;
        if bytes.len() + chunk.len() > limit {
            return Err(ApiError::TooLarge { limit });
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use common::responses::ErrorResponse;
use log::error;
use thiserror::Error;

use crate::ingest::IngestError;

/// Failures surfaced by the HTTP handlers as a JSON [`ErrorResponse`].
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("No file uploaded")]
    NoFile,

    #[error("Only CSV, TSV and TXT files are allowed")]
    UnsupportedType { filename: String },

    #[error("File exceeds the {limit} byte limit")]
    TooLarge { limit: usize },

    #[error("Malformed multipart payload: {0}")]
    Multipart(String),

    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error("{context}: {source}")]
    Database {
        context: &'static str,
        #[source]
        source: rusqlite::Error,
    },

    #[error("background task failed: {0}")]
    Blocking(String),
}

impl ApiError {
    pub fn database(context: &'static str) -> impl FnOnce(rusqlite::Error) -> ApiError {
        move |source| ApiError::Database { context, source }
    }

    fn body(&self) -> ErrorResponse {
        let (error, details) = match self {
            ApiError::NoFile | ApiError::TooLarge { .. } => (self.to_string(), None),
            ApiError::UnsupportedType { filename } => (self.to_string(), Some(filename.clone())),
            ApiError::Multipart(detail) => ("Malformed multipart payload".to_string(), Some(detail.clone())),
            ApiError::Ingest(IngestError::Empty) => (self.to_string(), None),
            ApiError::Ingest(e) => ("Failed to process file".to_string(), Some(e.to_string())),
            ApiError::Database { context, source } => (context.to_string(), Some(source.to_string())),
            ApiError::Blocking(detail) => ("Failed to process file".to_string(), Some(detail.clone())),
        };
        ErrorResponse { error, details }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NoFile
            | ApiError::UnsupportedType { .. }
            | ApiError::Multipart(_)
            | ApiError::Ingest(IngestError::Empty) => StatusCode::BAD_REQUEST,
            ApiError::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Ingest(_) | ApiError::Database { .. } | ApiError::Blocking(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!("{}", self);
        }
        HttpResponse::build(status).json(self.body())
    }
}

//! `POST /upload`: loads a delimited text file into the `data` table.
//!
//! The request is multipart/form-data with one `file` field. The handler checks the declared
//! type and size while reading the field, then hands the buffered bytes to
//! [`crate::ingest::pipeline::ingest`] on the blocking pool. The response is an
//! [`UploadSummary`](common::model::upload::UploadSummary), which may report failed rows
//! alongside the stored ones.

use actix_web::web::{post, scope};
use actix_web::Scope;

mod process;

const API_PATH: &str = "/upload";

pub fn configure_routes() -> Scope {
    scope(API_PATH).route("", post().to(process::process))
}

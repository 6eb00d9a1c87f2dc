//! # Table Reset
//!
//! Backs `DELETE /data`: removes every stored row in one statement. There is no per-row
//! deletion and no soft delete. Running it on an empty table succeeds with `deleted: 0`.

use actix_web::{web, HttpResponse};
use common::responses::MessageResponse;
use log::info;

use crate::error::ApiError;
use crate::state::AppState;

/// Actix web handler for `DELETE /data`.
///
/// # Arguments
/// * `state` - Shared application state holding the database handle.
///
/// # Returns
/// - `200 OK` with a `MessageResponse` carrying the number of deleted rows.
/// - `500 Internal Server Error` with `Failed to clear data` if the table cannot be cleared.
pub(crate) async fn process(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let deleted = clear_data(&state)?;
    info!("cleared {} rows", deleted);
    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "All data cleared".to_string(),
        deleted,
    }))
}

fn clear_data(state: &AppState) -> Result<usize, ApiError> {
    const CONTEXT: &str = "Failed to clear data";

    let store = state.db.connect().map_err(ApiError::database(CONTEXT))?;
    store.clear().map_err(ApiError::database(CONTEXT))
}

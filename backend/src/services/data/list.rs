//! # Stored Rows Listing
//!
//! Backs `GET /data`. Opens a connection for the request, reads the whole `data` table in
//! ascending `id` order and returns it as a JSON array of `DataRecord`. The connection is
//! closed as soon as the rows have been collected.

use actix_web::{web, HttpResponse};
use common::model::record::DataRecord;

use crate::error::ApiError;
use crate::state::AppState;

/// Actix web handler for `GET /data`.
///
/// # Arguments
/// * `state` - Shared application state holding the database handle.
///
/// # Returns
/// - `200 OK` with every stored row, ascending by `id`.
/// - `500 Internal Server Error` with `Failed to fetch data` and the database message.
pub(crate) async fn process(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let rows = list_data(&state)?;
    Ok(HttpResponse::Ok().json(rows))
}

fn list_data(state: &AppState) -> Result<Vec<DataRecord>, ApiError> {
    const CONTEXT: &str = "Failed to fetch data";

    let store = state.db.connect().map_err(ApiError::database(CONTEXT))?;
    store.fetch_all().map_err(ApiError::database(CONTEXT))
}

//! # Row Count
//!
//! Backs `GET /stats`. Counts the rows of the `data` table on a fresh connection. When the
//! database cannot be opened or queried, the request fails as a whole and the database
//! message is passed back in `details`; no partial figure is returned.

use actix_web::web::{get, scope};
use actix_web::{web, HttpResponse, Scope};
use common::responses::StatsResponse;

use crate::error::ApiError;
use crate::state::AppState;

const API_PATH: &str = "/stats";
const CONTEXT: &str = "Failed to get stats";

/// Configures the `/stats` scope with its single `GET` route.
pub fn configure_routes() -> Scope {
    scope(API_PATH).route("", get().to(process))
}

/// Actix web handler for `GET /stats`.
///
/// # Arguments
/// * `state` - Shared application state holding the database handle.
///
/// # Returns
/// - `200 OK` with `{ "total": n }`.
/// - `500 Internal Server Error` with `Failed to get stats` and the database message.
async fn process(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let store = state.db.connect().map_err(ApiError::database(CONTEXT))?;
    let total = store.count().map_err(ApiError::database(CONTEXT))?;
    Ok(HttpResponse::Ok().json(StatsResponse { total }))
}

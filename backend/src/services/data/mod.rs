//! Read and reset the stored rows.
//!
//! - `GET /data`: every row of the `data` table, ascending by `id`.
//! - `DELETE /data`: removes all rows. Clearing an empty table is not an error.

use actix_web::web::{delete, get, scope};
use actix_web::Scope;

mod clear;
mod list;

const API_PATH: &str = "/data";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(list::process))
        .route("", delete().to(clear::process))
}

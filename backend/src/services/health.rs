//! Liveness endpoint. Never touches the database.

use actix_web::web::{get, scope};
use actix_web::{HttpResponse, Responder, Scope};
use common::responses::HealthResponse;

const API_PATH: &str = "/health";

pub fn configure_routes() -> Scope {
    scope(API_PATH).route("", get().to(process))
}

/// Actix web handler for `GET /health`.
///
/// # Returns
/// `200 OK` with `{ "status": "OK" }`.
async fn process() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "OK".to_string(),
    })
}

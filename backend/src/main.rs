mod config;
mod db;
mod error;
mod ingest;
mod services;
mod state;

use crate::config::AppConfig;
use crate::db::Database;
use crate::state::AppState;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use env_logger::Env;
use log::info;
use std::io;

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = AppConfig::load().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    let db = Database::new(&config.database.path);
    db.init_schema().map_err(io::Error::other)?;
    info!("Using database at {}", db.path().display());

    let state = AppState::new(db, config.upload.max_file_size);
    let json_limit = config.upload.max_file_size;
    let host = config.server.host.clone();
    let port = config.server.port;

    info!("Server running at http://{}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(web::JsonConfig::default().limit(json_limit))
            .app_data(web::Data::new(state.clone()))
            .configure(services::configure)
    })
    .bind((host, port))?
    .run()
    .await
}

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Upper bound on an uploaded file and on JSON bodies.
pub const DEFAULT_MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UploadConfig {
    pub max_file_size: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub upload: UploadConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("database.path", "data.sqlite")?
            .set_default("upload.max_file_size", DEFAULT_MAX_FILE_SIZE as u64)?
            .add_source(File::with_name("config/config").required(false))
            // Env vars such as DATALOAD__UPLOAD__MAX_FILE_SIZE take precedence over the file.
            .add_source(Environment::with_prefix("DATALOAD").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}

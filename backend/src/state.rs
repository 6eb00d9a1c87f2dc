use crate::db::Database;

/// Shared, read-only application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    /// Largest accepted upload, in bytes.
    pub max_file_size: usize,
}

impl AppState {
    pub fn new(db: Database, max_file_size: usize) -> Self {
        AppState { db, max_file_size }
    }
}

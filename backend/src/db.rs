//! SQLite access for the single `data` table.
//!
//! `Database` is the shared handle stored in the app state; it only knows where the file
//! lives. Every request calls [`Database::connect`] to get its own [`Store`], and the
//! underlying `rusqlite::Connection` is closed when that `Store` goes out of scope, whichever
//! way the request ends.

use common::model::record::DataRecord;
use rusqlite::{params, Connection};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::ingest::pipeline::RowSink;

const CREATE_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS data (
    postId INTEGER,
    id INTEGER PRIMARY KEY,
    name TEXT,
    email TEXT,
    body TEXT
)";
const SELECT_ALL_SQL: &str = "SELECT postId, id, name, email, body FROM data ORDER BY id ASC";
const INSERT_SQL: &str = "INSERT INTO data (postId, id, name, email, body) VALUES (?1, ?2, ?3, ?4, ?5)";
const DELETE_ALL_SQL: &str = "DELETE FROM data";
const COUNT_SQL: &str = "SELECT COUNT(*) AS total FROM data";

#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Database {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Opens a connection owned by the caller for the length of one request.
    pub fn connect(&self) -> rusqlite::Result<Store> {
        let conn = Connection::open(&self.path)?;
        conn.busy_timeout(Duration::from_secs(5))?;
        Ok(Store { conn })
    }

    /// Creates the `data` table when the file is new.
    pub fn init_schema(&self) -> rusqlite::Result<()> {
        let store = self.connect()?;
        store.conn.execute_batch(CREATE_TABLE_SQL)
    }
}

pub struct Store {
    conn: Connection,
}

impl Store {
    #[cfg(test)]
    pub fn in_memory() -> rusqlite::Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(CREATE_TABLE_SQL)?;
        Ok(Store { conn })
    }

    pub fn fetch_all(&self) -> rusqlite::Result<Vec<DataRecord>> {
        let mut stmt = self.conn.prepare(SELECT_ALL_SQL)?;
        let rows = stmt.query_map([], |row| {
            Ok(DataRecord {
                post_id: row.get(0)?,
                id: row.get(1)?,
                name: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                email: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
                body: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
            })
        })?;
        rows.collect()
    }

    /// Fails when the table cannot be written to at all, before any row is attempted.
    pub fn check_writable(&self) -> rusqlite::Result<()> {
        self.conn.prepare_cached(INSERT_SQL).map(|_| ())
    }

    pub fn insert(&self, record: &DataRecord) -> rusqlite::Result<()> {
        let mut stmt = self.conn.prepare_cached(INSERT_SQL)?;
        stmt.execute(params![
            record.post_id,
            record.id,
            record.name,
            record.email,
            record.body
        ])?;
        Ok(())
    }

    /// Removes every row and returns how many were deleted.
    pub fn clear(&self) -> rusqlite::Result<usize> {
        self.conn.execute(DELETE_ALL_SQL, [])
    }

    pub fn count(&self) -> rusqlite::Result<i64> {
        self.conn.query_row(COUNT_SQL, [], |row| row.get("total"))
    }
}

impl RowSink for Store {
    type Error = rusqlite::Error;

    fn insert_row(&mut self, record: &DataRecord) -> Result<(), Self::Error> {
        self.insert(record)
    }
}

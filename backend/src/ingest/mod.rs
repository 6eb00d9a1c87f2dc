//! Upload ingestion: bytes in, rows stored, one [`UploadSummary`] out.
//!
//! The stages run strictly in order, each one finishing before the next starts:
//!
//! 1. `detect`: decode the buffer as UTF-8, drop a leading byte-order mark and sniff the
//!    separator from the first line.
//! 2. `parse`: read the header and every non-empty line into [`UploadedRow`]s.
//! 3. `normalize`: clean up column names.
//! 4. `mapper`: resolve the five canonical fields through their aliases and reject rows
//!    without a usable `id`.
//! 5. `pipeline`: insert the valid rows one by one and fold the outcomes into a summary.
//!
//! [`UploadSummary`]: common::model::upload::UploadSummary

use indexmap::IndexMap;
use thiserror::Error;

pub mod detect;
pub mod mapper;
pub mod normalize;
pub mod parse;
pub mod pipeline;

/// A parsed line: column name to raw field value, in header order.
pub type UploadedRow = IndexMap<String, String>;

/// Failures that abort a whole upload. Problems with single rows are never reported here.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to parse file: {0}")]
    Parse(#[from] csv::Error),

    #[error("CSV file is empty or has no valid data")]
    Empty,

    #[error("storage unavailable: {0}")]
    Storage(#[from] rusqlite::Error),
}

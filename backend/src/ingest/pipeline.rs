use common::model::record::DataRecord;
use common::model::upload::{RowError, Separator, UploadSummary, MAX_ERROR_SAMPLES};
use log::{info, warn};
use std::fmt::Display;

use super::{detect, mapper, normalize, parse, IngestError, UploadedRow};
use crate::db::Database;

pub const SUCCESS_MESSAGE: &str = "File uploaded and processed successfully";

/// Destination for validated rows, one insert per call.
pub trait RowSink {
    type Error: Display;

    fn insert_row(&mut self, record: &DataRecord) -> Result<(), Self::Error>;
}

/// An upload that has been decoded and parsed and holds at least one row.
#[derive(Debug, Clone)]
pub struct PreparedUpload {
    pub filename: String,
    pub separator: Separator,
    pub columns: Vec<String>,
    pub rows: Vec<UploadedRow>,
}

/// Decode, sniff, parse and clean. Nothing here touches storage.
pub fn prepare(bytes: &[u8], filename: &str) -> Result<PreparedUpload, IngestError> {
    let text = detect::decode(bytes);
    let separator = detect::detect_separator(&text);
    let table = parse::parse_rows(&text, separator)?;

    if table.rows.is_empty() {
        return Err(IngestError::Empty);
    }

    let columns: Vec<String> = table
        .columns
        .iter()
        .map(|column| normalize::clean_key(column))
        .collect();
    let rows: Vec<UploadedRow> = table.rows.into_iter().map(normalize::clean_row).collect();

    info!(
        "{}: {} rows, separator {}, columns {:?}",
        filename,
        rows.len(),
        separator.label(),
        columns
    );

    Ok(PreparedUpload {
        filename: filename.to_string(),
        separator,
        columns,
        rows,
    })
}

/// Running outcome of the insert loop.
#[derive(Debug, Default)]
struct Tally {
    inserted: usize,
    failed: usize,
    errors: Vec<RowError>,
}

impl Tally {
    fn stored(mut self) -> Self {
        self.inserted += 1;
        self
    }

    fn rejected(mut self, row: usize, reason: String, data: &UploadedRow) -> Self {
        warn!("row {} rejected: {}", row, reason);
        self.failed += 1;
        if self.errors.len() < MAX_ERROR_SAMPLES {
            self.errors.push(RowError {
                row,
                reason,
                data: data.clone(),
            });
        }
        self
    }

    fn into_summary(self, upload: PreparedUpload) -> UploadSummary {
        UploadSummary {
            message: SUCCESS_MESSAGE.to_string(),
            rows_processed: upload.rows.len(),
            rows_inserted: self.inserted,
            rows_failed: self.failed,
            columns: upload.columns,
            separator: upload.separator,
            filename: upload.filename,
            errors: (!self.errors.is_empty()).then_some(self.errors),
        }
    }
}

/// Validates and inserts every row in file order. A bad row never stops the loop.
pub fn load<S: RowSink>(upload: PreparedUpload, sink: &mut S) -> UploadSummary {
    let tally = upload
        .rows
        .iter()
        .enumerate()
        .fold(Tally::default(), |tally, (idx, row)| {
            let row_number = idx + 1;
            match mapper::map_row(row) {
                Ok(record) => match sink.insert_row(&record) {
                    Ok(()) => tally.stored(),
                    Err(e) => tally.rejected(row_number, e.to_string(), row),
                },
                Err(rejection) => tally.rejected(row_number, rejection.to_string(), row),
            }
        });

    let summary = tally.into_summary(upload);
    info!(
        "{}: processed {}, inserted {}, failed {}",
        summary.filename, summary.rows_processed, summary.rows_inserted, summary.rows_failed
    );
    summary
}

/// Runs a whole upload against `db` on one connection, which is closed before returning.
pub fn ingest(bytes: &[u8], filename: &str, db: &Database) -> Result<UploadSummary, IngestError> {
    let upload = prepare(bytes, filename)?;

    let mut store = db.connect()?;
    store.check_writable()?;

    Ok(load(upload, &mut store))
}

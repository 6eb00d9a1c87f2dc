use common::model::upload::Separator;
use csv::{ReaderBuilder, StringRecord, StringRecordsIntoIter, Trim};
use log::debug;

use super::UploadedRow;

/// Header plus every data row, in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTable {
    pub columns: Vec<String>,
    pub rows: Vec<UploadedRow>,
}

/// Lazily yields one [`UploadedRow`] per non-empty line after the header.
pub struct RowReader<'a> {
    text: &'a str,
    columns: Vec<String>,
    records: StringRecordsIntoIter<&'a [u8]>,
}

impl<'a> RowReader<'a> {
    /// Reads the header line and positions the reader on the first data line.
    pub fn new(text: &'a str, separator: Separator) -> Result<Self, csv::Error> {
        let mut reader = ReaderBuilder::new()
            .delimiter(separator.as_byte())
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(text.as_bytes());

        let columns = reader.headers()?.iter().map(str::to_string).collect();
        Ok(RowReader {
            text,
            columns,
            records: reader.into_records(),
        })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Drains the reader; the first broken record fails the whole read.
    pub fn into_table(self) -> Result<ParsedTable, csv::Error> {
        let columns = self.columns().to_vec();
        let rows = self.collect::<Result<Vec<_>, _>>()?;
        debug!("parsed {} rows over {} columns", rows.len(), columns.len());
        Ok(ParsedTable { columns, rows })
    }

    /// Looks at the source line the record came from, since trimming erases the difference
    /// between a whitespace-only line and a line holding one empty quoted field.
    fn is_blank(&self, record: &StringRecord) -> bool {
        if record.iter().any(|field| !field.is_empty()) {
            return false;
        }
        // The recorded offset may sit on empty lines the reader skipped before this record.
        record
            .position()
            .and_then(|pos| usize::try_from(pos.byte()).ok())
            .and_then(|start| self.text.get(start..))
            .map(|rest| {
                rest.trim_start_matches(['\r', '\n'])
                    .split(['\r', '\n'])
                    .next()
                    .unwrap_or_default()
                    .trim()
                    .is_empty()
            })
            .unwrap_or(true)
    }

    fn to_row(&self, record: &StringRecord) -> UploadedRow {
        // Fields past the header have no name and are dropped; short lines just lack keys.
        self.columns
            .iter()
            .zip(record.iter())
            .map(|(column, value)| (column.clone(), value.to_string()))
            .collect()
    }
}

impl Iterator for RowReader<'_> {
    type Item = Result<UploadedRow, csv::Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let record = match self.records.next()? {
                Ok(record) => record,
                Err(e) => return Some(Err(e)),
            };
            if self.is_blank(&record) {
                continue;
            }
            return Some(Ok(self.to_row(&record)));
        }
    }
}

/// Parses the whole text. Equivalent to draining a [`RowReader`].
pub fn parse_rows(text: &str, separator: Separator) -> Result<ParsedTable, csv::Error> {
    RowReader::new(text, separator)?.into_table()
}

//! Maps loosely named rows onto the five columns of the `data` table.
//!
//! Each canonical field has an ordered list of accepted source column names. For a given row
//! the first alias that is present and non-empty (after cleanup) supplies the value; later
//! aliases are not consulted even if the chosen value turns out to be unusable.

use common::model::record::DataRecord;
use std::fmt;

use super::detect::BOM;
use super::UploadedRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanonicalField {
    PostId,
    Id,
    Name,
    Email,
    Body,
}

/// Accepted source column names per field, highest priority first.
const ALIASES: [(CanonicalField, &[&str]); 5] = [
    (CanonicalField::PostId, &["postId", "PostId", "post_id", "POSTID"]),
    (CanonicalField::Id, &["id", "Id", "ID"]),
    (CanonicalField::Name, &["name", "Name", "NAME"]),
    (CanonicalField::Email, &["email", "Email", "EMAIL"]),
    (CanonicalField::Body, &["body", "Body", "BODY"]),
];

impl CanonicalField {
    pub fn aliases(self) -> &'static [&'static str] {
        ALIASES
            .iter()
            .find(|(field, _)| *field == self)
            .map(|(_, aliases)| *aliases)
            .unwrap_or_default()
    }
}

/// Why a row never reached storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowRejection {
    InvalidId,
}

impl fmt::Display for RowRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowRejection::InvalidId => write!(f, "Invalid or missing id"),
        }
    }
}

fn clean_value(value: &str) -> &str {
    value.trim().trim_start_matches(BOM).trim()
}

/// Cleaned value of the first alias that is present and non-empty.
pub fn lookup(row: &UploadedRow, field: CanonicalField) -> Option<&str> {
    field
        .aliases()
        .iter()
        .filter_map(|alias| row.get(*alias))
        .map(|value| clean_value(value))
        .find(|value| !value.is_empty())
}

fn lookup_int(row: &UploadedRow, field: CanonicalField) -> Option<i64> {
    lookup(row, field).and_then(|value| value.parse::<i64>().ok())
}

fn lookup_text(row: &UploadedRow, field: CanonicalField) -> String {
    lookup(row, field).unwrap_or_default().to_string()
}

/// Builds the record for one row, or rejects it when `id` is missing or not an integer.
pub fn map_row(row: &UploadedRow) -> Result<DataRecord, RowRejection> {
    let id = lookup_int(row, CanonicalField::Id).ok_or(RowRejection::InvalidId)?;

    Ok(DataRecord {
        post_id: lookup_int(row, CanonicalField::PostId),
        id,
        name: lookup_text(row, CanonicalField::Name),
        email: lookup_text(row, CanonicalField::Email),
        body: lookup_text(row, CanonicalField::Body),
    })
}

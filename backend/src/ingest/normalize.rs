use super::detect::BOM;
use super::UploadedRow;

/// Trims a column name and drops any byte-order marks in front of it.
pub fn clean_key(key: &str) -> String {
    key.trim().trim_start_matches(BOM).trim().to_string()
}

/// Rebuilds a row with cleaned keys. Values are left as parsed.
pub fn clean_row(row: UploadedRow) -> UploadedRow {
    row.into_iter()
        .map(|(key, value)| (clean_key(&key), value))
        .collect()
}

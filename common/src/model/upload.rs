//! Response contract of `POST /upload`.
//!
//! An upload that reaches the storage stage always answers with an [`UploadSummary`], even
//! when some (or all) rows were rejected. Partial success is a normal outcome; only failures
//! of the whole pipeline are reported as errors.

use serde::{Deserialize, Serialize};
use indexmap::IndexMap;

/// Maximum number of [`RowError`] samples carried in a summary. Every failure is still counted.
pub const MAX_ERROR_SAMPLES: usize = 3;

/// Field separator picked by sniffing the first line of the upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Separator {
    Comma,
    Tab,
}

impl Separator {
    pub fn as_byte(self) -> u8 {
        match self {
            Separator::Comma => b',',
            Separator::Tab => b'\t',
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Separator::Comma => "comma",
            Separator::Tab => "tab",
        }
    }
}

/// A row that was not stored, with the reason and the row as it was read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowError {
    /// 1-based position among the emitted (non-empty) data rows.
    pub row: usize,
    pub reason: String,
    /// Column name to raw value, after key cleanup, in header order.
    pub data: IndexMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadSummary {
    pub message: String,
    pub rows_processed: usize,
    pub rows_inserted: usize,
    pub rows_failed: usize,
    pub columns: Vec<String>,
    pub separator: Separator,
    pub filename: String,
    /// Up to [`MAX_ERROR_SAMPLES`] failures; absent when every row was stored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<RowError>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_omits_errors_when_none() {
        let summary = UploadSummary {
            message: "File processed".to_string(),
            rows_processed: 1,
            rows_inserted: 1,
            rows_failed: 0,
            columns: vec!["id".to_string()],
            separator: Separator::Tab,
            filename: "rows.tsv".to_string(),
            errors: None,
        };

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["rowsProcessed"], 1);
        assert_eq!(json["separator"], "tab");
        assert!(json.get("errors").is_none());
    }
}

use serde::{Deserialize, Serialize};

/// One row of the `data` table.
///
/// The same shape is produced by the upload mapper (before insertion) and read back by
/// `GET /data`, so the JSON field names here are the ones clients see: `postId`, `id`,
/// `name`, `email`, `body`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataRecord {
    pub post_id: Option<i64>,
    pub id: i64,
    pub name: String,
    pub email: String,
    pub body: String,
}

use common::model::upload::Separator;

/// Unicode byte-order mark as it appears once the buffer is decoded.
pub const BOM: char = '\u{feff}';

/// Decodes the upload as UTF-8 and removes a single byte-order mark at the very start.
///
/// Invalid sequences are replaced rather than rejected, so this never fails.
pub fn decode(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    match text.strip_prefix(BOM) {
        Some(rest) => rest.to_string(),
        None => text.into_owned(),
    }
}

/// Tab when the first line holds a tab, comma otherwise. Later lines are never looked at.
pub fn detect_separator(text: &str) -> Separator {
    let first_line = text.split(['\n', '\r']).next().unwrap_or_default();
    if first_line.contains('\t') {
        Separator::Tab
    } else {
        Separator::Comma
    }
}

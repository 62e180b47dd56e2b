//! Samplesheet loader with encoding auto-detection.
//!
//! Decodes the raw bytes, then reads comma-separated records with the `csv`
//! crate into a [`Table`]. Column and row order are preserved exactly; empty
//! fields and the usual spreadsheet "not available" tokens become missing
//! cells.

use std::path::Path;

use tracing::debug;

use crate::error::{LoadError, LoadResult};
use crate::models::{Cell, Table};

/// Raw values read as missing, in addition to the empty string.
pub const MISSING_TOKENS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN", "<NA>",
    "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Detect the encoding of raw bytes.
///
/// Valid UTF-8 is always reported as `utf-8`; chardet only guesses for
/// bytes that are not.
pub fn detect_encoding(bytes: &[u8]) -> String {
    if std::str::from_utf8(bytes).is_ok() {
        return "utf-8".to_string();
    }
    let charset = chardet::detect(bytes).0;

    // Normalize charset names
    match charset.to_lowercase().as_str() {
        "" | "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        other => other.to_string(),
    }
}

/// Decode bytes to a string using the specified encoding.
///
/// Unknown encodings and invalid UTF-8 fall back to lossy UTF-8.
pub fn decode_content(bytes: &[u8], encoding: &str) -> String {
    match encoding {
        // latin-1 labels decode as windows-1252
        "iso-8859-1" | "windows-1252" => encoding_rs::WINDOWS_1252.decode(bytes).0.into_owned(),
        _ => String::from_utf8_lossy(bytes).into_owned(),
    }
}

/// Convert a raw field to a cell.
pub fn to_cell(raw: &str) -> Cell {
    if raw.is_empty() || MISSING_TOKENS.contains(&raw) {
        None
    } else {
        Some(raw.to_string())
    }
}

/// Parse comma-separated samplesheet text.
pub fn parse_str(content: &str) -> LoadResult<Table> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(content.as_bytes());

    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Err(LoadError::Empty);
    }
    for (i, name) in headers.iter().enumerate() {
        if headers.iter().take(i).any(|prev| prev == name) {
            return Err(LoadError::DuplicateColumn(name.to_string()));
        }
    }

    let mut table = Table::new(headers.iter());
    for record in reader.records() {
        let record = record?;
        table.push_row(record.iter().map(to_cell).collect());
    }

    Ok(table)
}

/// Parse samplesheet bytes, detecting their encoding first.
pub fn parse_samplesheet(bytes: &[u8]) -> LoadResult<Table> {
    if let Ok(text) = std::str::from_utf8(bytes) {
        return parse_str(text);
    }
    let encoding = detect_encoding(bytes);
    debug!(encoding = %encoding, "Detected samplesheet encoding");
    parse_str(&decode_content(bytes, &encoding))
}

/// Read and parse a samplesheet file.
pub fn load_samplesheet<P: AsRef<Path>>(path: P) -> LoadResult<Table> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_samplesheet(&bytes)
}

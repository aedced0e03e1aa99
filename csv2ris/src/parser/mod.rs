//! CSV reader producing [`InputRow`]s keyed by header name.
//!
//! Input is treated as UTF-8. A leading byte-order mark is stripped and
//! byte sequences that are not valid UTF-8 are dropped, so decoding never
//! fails. `\r\n` and lone `\r` line endings, including those inside quoted
//! cells, are read as `\n`. Parsing is delegated to the `csv` crate (RFC 4180 quoting, comma
//! delimiter, no trimming).
//!
//! Row shape rules:
//! - a header that appears more than once keeps the position of its first
//!   occurrence and the value of its last one;
//! - an empty header is an ordinary key (the empty string);
//! - cells missing at the end of a short row read as empty strings;
//! - cells beyond the header width are ignored.

use encoding_rs::{Encoding, UTF_8};
use std::io::Read;
use std::path::Path;

use crate::error::{CsvError, CsvResult};
use crate::models::InputRow;

/// Parsed CSV content.
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Header row, as written (duplicates included).
    pub headers: Vec<String>,
    /// Data rows, in file order.
    pub rows: Vec<InputRow>,
}

/// Decode raw bytes as UTF-8, stripping a BOM, dropping invalid bytes and
/// normalizing line endings to `\n`.
pub fn decode_content(bytes: &[u8]) -> String {
    let body = match Encoding::for_bom(bytes) {
        Some((encoding, bom_len)) if encoding == UTF_8 => &bytes[bom_len..],
        _ => bytes,
    };

    let mut content = String::with_capacity(body.len());
    for chunk in body.utf8_chunks() {
        content.push_str(chunk.valid());
    }

    if content.contains('\r') {
        content = content.replace("\r\n", "\n").replace('\r', "\n");
    }
    content
}

/// Parse a CSV file.
pub fn parse_csv_file<P: AsRef<Path>>(path: P) -> CsvResult<ParseResult> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| CsvError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_bytes(&bytes)
}

/// Parse CSV from any reader. The whole input is read before parsing.
pub fn parse_csv<R: Read>(mut reader: R) -> CsvResult<ParseResult> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| CsvError::parse(0, format!("Cannot read input: {}", e)))?;
    parse_bytes(&bytes)
}

/// Parse raw CSV bytes.
pub fn parse_bytes(bytes: &[u8]) -> CsvResult<ParseResult> {
    parse_str(&decode_content(bytes))
}

/// Parse already-decoded CSV text.
pub fn parse_str(content: &str) -> CsvResult<ParseResult> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    let mut reported_extra_cells = false;

    for (idx, result) in reader.records().enumerate() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        if record.len() > headers.len() && !reported_extra_cells {
            tracing::debug!(
                line,
                cells = record.len(),
                columns = headers.len(),
                "ignoring cells beyond the header row"
            );
            reported_extra_cells = true;
        }

        rows.push(InputRow::new(idx + 1, line, fold_fields(&headers, &record)));
    }

    tracing::debug!(columns = headers.len(), rows = rows.len(), "parsed csv");

    Ok(ParseResult { headers, rows })
}

/// Pair cells with headers. Later duplicates overwrite earlier values in place.
fn fold_fields(headers: &[String], record: &csv::StringRecord) -> Vec<(String, String)> {
    let mut fields: Vec<(String, String)> = Vec::with_capacity(headers.len());

    for (i, header) in headers.iter().enumerate() {
        let value = record.get(i).unwrap_or("").to_string();
        match fields.iter_mut().find(|(h, _)| h == header) {
            Some(slot) => slot.1 = value,
            None => fields.push((header.clone(), value)),
        }
    }

    fields
}

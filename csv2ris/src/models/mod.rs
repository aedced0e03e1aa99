//! Data model shared by the reader and the converter.
//!
//! - [`InputRow`] - one CSV data row, header/value pairs in column order
//! - [`RisLine`] - one `TAG  - value` line
//! - [`RisRecord`] - the lines produced for one row, closed by `ER  - `

use std::fmt;
use std::io::{self, Write};

use crate::validation::END_OF_RECORD_TAG;

// =============================================================================
// Input Row
// =============================================================================

/// One CSV data row.
///
/// Pairs are kept in column order. Header names are unique within a row
/// (see [`crate::parser`] for how duplicate headers are folded).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputRow {
    number: usize,
    line: u64,
    fields: Vec<(String, String)>,
}

impl InputRow {
    /// `number` is the 1-based data row index, `line` the source line.
    pub fn new(number: usize, line: u64, fields: Vec<(String, String)>) -> Self {
        Self {
            number,
            line,
            fields,
        }
    }

    pub fn number(&self) -> usize {
        self.number
    }

    pub fn line(&self) -> u64 {
        self.line
    }

    pub fn get(&self, header: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(h, _)| h == header)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, header: &str) -> bool {
        self.fields.iter().any(|(h, _)| h == header)
    }

    /// Header/value pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(h, v)| (h.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

// =============================================================================
// RIS Output
// =============================================================================

/// A single tagged line. The value is written verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RisLine {
    pub tag: String,
    pub value: String,
}

impl RisLine {
    pub fn new(tag: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for RisLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}  - {}", self.tag, self.value)
    }
}

/// All lines converted from one row. The `ER` terminator is implicit and
/// added when the record is written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RisRecord {
    lines: Vec<RisLine>,
}

impl RisRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: RisLine) {
        self.lines.push(line);
    }

    pub fn lines(&self) -> &[RisLine] {
        &self.lines
    }

    /// Write every line, then `ER  - ` and a blank line.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for line in &self.lines {
            writeln!(out, "{}", line)?;
        }
        writeln!(out, "{}  - ", END_OF_RECORD_TAG)?;
        writeln!(out)
    }
}

impl fmt::Display for RisRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        writeln!(f, "{}  - ", END_OF_RECORD_TAG)?;
        writeln!(f)
    }
}

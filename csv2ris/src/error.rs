//! Error types for the csv2ris conversion pipeline.
//!
//! - [`CsvError`] - reading or parsing the input CSV
//! - [`ConvertError`] - structural problems in a row (fatal for the run)
//! - [`OutputError`] - creating or writing the RIS file
//! - [`PipelineError`] - top-level errors returned by the pipeline
//!
//! Conversion between levels is done with `From`, so `?` works across
//! module boundaries.

use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// CSV Errors
// =============================================================================

/// Errors while reading the input CSV.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Failed to open or read the file.
    #[error("Cannot read '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed CSV at a given line.
    #[error("Line {line}: {message}")]
    Parse { line: u64, message: String },
}

impl CsvError {
    pub(crate) fn parse(line: u64, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}

impl From<csv::Error> for CsvError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line()).unwrap_or(0);
        CsvError::parse(line, err.to_string())
    }
}

// =============================================================================
// Conversion Errors
// =============================================================================

/// Structural validation failures. Any of these aborts the whole run.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The row has no `TY` column.
    #[error(
        "Row {row} (line {line}): your csv file must have a TY column. \
         See valid TY values at https://en.wikipedia.org/wiki/RIS_(file_format)"
    )]
    MissingTypeTag { row: usize, line: u64 },

    /// Writing a converted record failed.
    #[error("Failed to write record: {0}")]
    Write(#[from] std::io::Error),
}

// =============================================================================
// Output Errors
// =============================================================================

/// Errors while creating or finalizing the RIS file.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Cannot create '{}': {source}", .path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot write '{}': {source}", .path.display())]
    Flush {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level errors returned by [`crate::transform::pipeline`].
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),

    #[error("{0}")]
    Convert(#[from] ConvertError),

    #[error("Output error: {0}")]
    Output(#[from] OutputError),

    /// Serializing or writing the JSON report failed.
    #[error("Report error: {0}")]
    Report(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PipelineError {
    /// True when the run stopped because a row failed structural validation.
    pub fn is_validation_failure(&self) -> bool {
        matches!(
            self,
            PipelineError::Convert(ConvertError::MissingTypeTag { .. })
        )
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for CSV operations.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for row conversion.
pub type ConvertResult<T> = Result<T, ConvertError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

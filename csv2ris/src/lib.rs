//! # csv2ris - CSV to RIS citation converter
//!
//! Reads a CSV file whose column headers are RIS tags and writes one RIS
//! record per data row.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   CSV File  │────▶│   Parser    │────▶│  Converter  │────▶│  RIS File   │
//! │   (UTF-8)   │     │ (BOM, rows) │     │ (tag rules) │     │ (ER-closed) │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```
//! let csv = "TY,AU,TI\nJOUR,\"Smith, J.; Doe, A.\",A Study of Things\n";
//! let (ris, report) = csv2ris::convert_str(csv).unwrap();
//!
//! assert!(ris.starts_with("TY  - JOUR\nAU  - Smith, J.\nAU  - Doe, A.\n"));
//! assert_eq!(report.records, 1);
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`models`] - Input rows and RIS records
//! - [`parser`] - CSV reading and decoding
//! - [`validation`] - RIS tag allow-list and `TY` check
//! - [`transform`] - Row converter and pipeline
//! - [`logs`] - Console logging

// Core modules
pub mod error;
pub mod models;

// Parsing
pub mod parser;

// Validation
pub mod validation;

// Conversion
pub mod transform;

// Logging
pub mod logs;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{
    ConvertError, ConvertResult, CsvError, CsvResult, OutputError, PipelineError, PipelineResult,
};

pub use models::{InputRow, RisLine, RisRecord};

pub use parser::{decode_content, parse_bytes, parse_csv, parse_csv_file, parse_str, ParseResult};

pub use validation::{is_multi_value_tag, is_valid_tag, require_type_tag, VALID_TAGS};

pub use transform::{
    convert_file, convert_reader, convert_str, derive_output_path, ConversionReport,
    ConvertOptions, OutputNaming, RecordConverter,
};

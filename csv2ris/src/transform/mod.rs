//! Conversion module.
//!
//! - Converter: one CSV row to one RIS record
//! - Pipeline: file, reader and in-memory entry points

pub mod converter;
pub mod pipeline;

pub use converter::RecordConverter;
pub use pipeline::*;

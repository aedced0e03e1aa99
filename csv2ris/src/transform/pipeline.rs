//! High-level conversion API.
//!
//! # Example
//!
//! ```rust,no_run
//! use csv2ris::{convert_file, ConvertOptions};
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let report = convert_file(Path::new("library.csv"), &ConvertOptions::default())?;
//!     println!("{} records written to {}", report.records, report.output.display());
//!     Ok(())
//! }
//! ```

use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use super::converter::RecordConverter;
use crate::error::{OutputError, PipelineError, PipelineResult};
use crate::logs::{log_info, log_success};
use crate::parser::{parse_bytes, parse_csv_file, ParseResult};

/// How the output path is derived when none is given.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputNaming {
    /// Replace the final extension: `my.data.csv` → `my.data.ris`.
    #[default]
    ReplaceExtension,
    /// Keep the file name up to its first dot: `my.data.csv` → `my.ris`.
    TruncateAtFirstDot,
}

/// Options for [`convert_file`].
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Explicit output path. Overrides `naming`.
    pub output: Option<PathBuf>,
    pub naming: OutputNaming,
}

/// Summary of a finished conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionReport {
    pub input: Option<PathBuf>,
    pub output: PathBuf,
    pub headers: Vec<String>,
    pub records: usize,
    pub unrecognized_headers: Vec<String>,
}

impl ConversionReport {
    pub fn to_json(&self) -> PipelineResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| PipelineError::Report(e.to_string()))
    }

    /// Write the report as pretty JSON.
    pub fn save(&self, path: &Path) -> PipelineResult<()> {
        let json = self.to_json()?;
        std::fs::write(path, json)
            .map_err(|e| PipelineError::Report(format!("{}: {}", path.display(), e)))
    }
}

/// Output path for `input` when no explicit path is given.
///
/// Only the file name is rewritten; the directory part is kept as is.
pub fn derive_output_path(input: &Path, naming: OutputNaming) -> PathBuf {
    match naming {
        OutputNaming::ReplaceExtension => input.with_extension("ris"),
        OutputNaming::TruncateAtFirstDot => {
            let name = input
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let stem = name.split('.').next().unwrap_or_default();
            input.with_file_name(format!("{}.ris", stem))
        }
    }
}

/// Convert a CSV file and write the RIS document next to it (or to
/// `options.output`).
///
/// Records are written as they are converted. If a row fails validation the
/// error is returned and the records before it stay in the output file.
pub fn convert_file(input: &Path, options: &ConvertOptions) -> PipelineResult<ConversionReport> {
    let output = options
        .output
        .clone()
        .unwrap_or_else(|| derive_output_path(input, options.naming));

    log_info(format!("Reading {}", input.display()));
    let parsed = parse_csv_file(input)?;

    let file = File::create(&output).map_err(|source| OutputError::Create {
        path: output.clone(),
        source,
    })?;
    let mut writer = BufWriter::new(file);

    let mut converter = RecordConverter::new();
    let result = write_records(&parsed, &mut converter, &mut writer);
    let flushed = writer.flush().map_err(|source| OutputError::Flush {
        path: output.clone(),
        source,
    });
    result?;
    flushed?;

    log_success(format!(
        "Wrote {} records to {}",
        converter.records_converted(),
        output.display()
    ));

    Ok(ConversionReport {
        input: Some(input.to_path_buf()),
        output,
        headers: parsed.headers,
        records: converter.records_converted(),
        unrecognized_headers: converter.unrecognized_headers().to_vec(),
    })
}

/// Convert CSV from `reader` into RIS on `writer`.
///
/// The returned report has no input path and an empty output path.
pub fn convert_reader<R: Read, W: Write>(
    mut reader: R,
    writer: W,
) -> PipelineResult<ConversionReport> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    let parsed = parse_bytes(&bytes)?;

    let mut writer = BufWriter::new(writer);
    let mut converter = RecordConverter::new();
    write_records(&parsed, &mut converter, &mut writer)?;
    writer.flush()?;

    Ok(ConversionReport {
        headers: parsed.headers,
        records: converter.records_converted(),
        unrecognized_headers: converter.unrecognized_headers().to_vec(),
        ..Default::default()
    })
}

/// Convert CSV text held in memory.
pub fn convert_str(csv: &str) -> PipelineResult<(String, ConversionReport)> {
    let mut out = Vec::new();
    let report = convert_reader(csv.as_bytes(), &mut out)?;
    let ris = String::from_utf8_lossy(&out).into_owned();
    Ok((ris, report))
}

fn write_records<W: Write>(
    parsed: &ParseResult,
    converter: &mut RecordConverter,
    writer: &mut W,
) -> PipelineResult<()> {
    for row in &parsed.rows {
        converter.write_row(row, writer)?;
    }
    Ok(())
}

//! Row to RIS record conversion.
//!
//! ```text
//! TY,AU,TI                                   TY  - JOUR
//! JOUR,"Smith, J.; Doe, A.",A Study    →     AU  - Smith, J.
//!                                            AU  - Doe, A.
//!                                            TI  - A Study
//!                                            ER  -
//! ```
//!
//! `AU` and `KW` cells are split on `"; "` into one line per item. Items are
//! not trimmed and empty items are kept. Other allow-listed columns become a
//! single line with the cell value verbatim. Unknown columns are dropped and
//! reported once per converter.

use std::collections::HashSet;
use std::io::Write;

use crate::error::ConvertResult;
use crate::models::{InputRow, RisLine, RisRecord};
use crate::validation::{
    is_multi_value_tag, is_valid_tag, require_type_tag, MULTI_VALUE_DELIMITER, RIS_REFERENCE_URL,
};

/// Converts rows one at a time.
///
/// Holds the set of unknown headers already reported, so a fresh converter
/// should be used for each input document.
#[derive(Debug, Default)]
pub struct RecordConverter {
    warned: HashSet<String>,
    unrecognized: Vec<String>,
    records: usize,
}

impl RecordConverter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert one row. Fails if the row has no `TY` column.
    pub fn convert_row(&mut self, row: &InputRow) -> ConvertResult<RisRecord> {
        require_type_tag(row)?;

        let mut record = RisRecord::new();
        for (header, value) in row.iter() {
            if is_multi_value_tag(header) {
                for item in value.split(MULTI_VALUE_DELIMITER) {
                    record.push(RisLine::new(header, item));
                }
            } else if is_valid_tag(header) {
                record.push(RisLine::new(header, value));
            } else {
                self.warn_unrecognized(header);
            }
        }

        self.records += 1;
        Ok(record)
    }

    /// Convert one row and write it straight to `out`.
    pub fn write_row<W: Write>(&mut self, row: &InputRow, out: &mut W) -> ConvertResult<()> {
        let record = self.convert_row(row)?;
        record.write_to(out)?;
        Ok(())
    }

    /// Distinct unknown headers, in the order they were first seen.
    pub fn unrecognized_headers(&self) -> &[String] {
        &self.unrecognized
    }

    /// Number of rows converted so far.
    pub fn records_converted(&self) -> usize {
        self.records
    }

    fn warn_unrecognized(&mut self, header: &str) {
        if self.warned.insert(header.to_string()) {
            tracing::warn!(
                header,
                "Column {} contained within csv that is not a valid RIS tag. \
                 See valid RIS tags at {}",
                header,
                RIS_REFERENCE_URL
            );
            self.unrecognized.push(header.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConvertError;
    use std::sync::{Arc, Mutex};

    fn row(fields: &[(&str, &str)]) -> InputRow {
        InputRow::new(
            1,
            2,
            fields
                .iter()
                .map(|(h, v)| (h.to_string(), v.to_string()))
                .collect(),
        )
    }

    fn render(converter: &mut RecordConverter, fields: &[(&str, &str)]) -> String {
        converter.convert_row(&row(fields)).unwrap().to_string()
    }

    #[test]
    fn test_authors_split_per_line() {
        let mut converter = RecordConverter::new();
        let out = render(
            &mut converter,
            &[
                ("TY", "JOUR"),
                ("AU", "Smith, J.; Doe, A."),
                ("TI", "A Study of Things"),
            ],
        );

        assert_eq!(
            out,
            "TY  - JOUR\nAU  - Smith, J.\nAU  - Doe, A.\nTI  - A Study of Things\nER  - \n\n"
        );
    }

    #[test]
    fn test_keywords_three_items_in_order() {
        let mut converter = RecordConverter::new();
        let record = converter
            .convert_row(&row(&[("TY", "JOUR"), ("KW", "A; B; C")]))
            .unwrap();

        let kw: Vec<String> = record
            .lines()
            .iter()
            .filter(|l| l.tag == "KW")
            .map(|l| l.to_string())
            .collect();
        assert_eq!(kw, vec!["KW  - A", "KW  - B", "KW  - C"]);
    }

    #[test]
    fn test_split_keeps_empty_items() {
        let mut converter = RecordConverter::new();
        let out = render(&mut converter, &[("TY", "GEN"), ("AU", "A; ; B; ")]);

        assert_eq!(
            out,
            "TY  - GEN\nAU  - A\nAU  - \nAU  - B\nAU  - \nER  - \n\n"
        );
    }

    #[test]
    fn test_split_only_on_semicolon_space() {
        let mut converter = RecordConverter::new();
        let out = render(&mut converter, &[("TY", "GEN"), ("KW", "a;b;  c")]);
        assert_eq!(out, "TY  - GEN\nKW  - a;b\nKW  -  c\nER  - \n\n");
    }

    #[test]
    fn test_empty_author_cell_emits_one_empty_line() {
        let mut converter = RecordConverter::new();
        let out = render(&mut converter, &[("TY", "GEN"), ("AU", "")]);
        assert_eq!(out, "TY  - GEN\nAU  - \nER  - \n\n");
    }

    #[test]
    fn test_other_tags_are_not_split() {
        let mut converter = RecordConverter::new();
        let out = render(&mut converter, &[("TY", "GEN"), ("A1", "X; Y")]);
        assert_eq!(out, "TY  - GEN\nA1  - X; Y\nER  - \n\n");
    }

    #[test]
    fn test_column_order_preserved() {
        let mut converter = RecordConverter::new();
        let out = render(
            &mut converter,
            &[("PY", "2020"), ("TY", "JOUR"), ("TI", "T")],
        );
        assert_eq!(out, "PY  - 2020\nTY  - JOUR\nTI  - T\nER  - \n\n");
    }

    #[test]
    fn test_unknown_header_dropped_and_reported_once() {
        let mut converter = RecordConverter::new();
        let first = render(&mut converter, &[("TY", "JOUR"), ("Notes", "n1")]);
        let second = render(&mut converter, &[("TY", "BOOK"), ("Notes", "n2")]);

        assert!(!first.contains("Notes"));
        assert!(!second.contains("n2"));
        assert_eq!(converter.unrecognized_headers(), ["Notes"]);
    }

    #[test]
    fn test_unknown_headers_in_first_seen_order() {
        let mut converter = RecordConverter::new();
        render(
            &mut converter,
            &[("TY", "JOUR"), ("zeta", ""), ("alpha", ""), ("", "")],
        );
        render(&mut converter, &[("TY", "JOUR"), ("alpha", ""), ("beta", "")]);

        assert_eq!(
            converter.unrecognized_headers(),
            ["zeta", "alpha", "", "beta"]
        );
    }

    #[test]
    fn test_lowercase_tag_is_unknown() {
        let mut converter = RecordConverter::new();
        let out = render(&mut converter, &[("TY", "JOUR"), ("ti", "lower")]);
        assert_eq!(out, "TY  - JOUR\nER  - \n\n");
        assert_eq!(converter.unrecognized_headers(), ["ti"]);
    }

    #[test]
    fn test_er_column_is_emitted_verbatim() {
        let mut converter = RecordConverter::new();
        let out = render(&mut converter, &[("TY", "JOUR"), ("ER", "x")]);
        assert_eq!(out, "TY  - JOUR\nER  - x\nER  - \n\n");
    }

    #[test]
    fn test_missing_type_tag_is_fatal() {
        let mut converter = RecordConverter::new();
        let err = converter
            .convert_row(&row(&[("TI", "No type")]))
            .unwrap_err();

        assert!(matches!(err, ConvertError::MissingTypeTag { row: 1, .. }));
        assert_eq!(converter.records_converted(), 0);
    }

    #[test]
    fn test_missing_type_tag_checked_before_warnings() {
        let mut converter = RecordConverter::new();
        assert!(converter.convert_row(&row(&[("Notes", "x")])).is_err());
        assert!(converter.unrecognized_headers().is_empty());
    }

    #[test]
    fn test_write_row_streams_record() {
        let mut converter = RecordConverter::new();
        let mut out = Vec::new();
        converter
            .write_row(&row(&[("TY", "JOUR"), ("TI", "One")]), &mut out)
            .unwrap();
        converter
            .write_row(&row(&[("TY", "BOOK"), ("TI", "Two")]), &mut out)
            .unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "TY  - JOUR\nTI  - One\nER  - \n\nTY  - BOOK\nTI  - Two\nER  - \n\n"
        );
        assert_eq!(converter.records_converted(), 2);
    }

    #[derive(Clone, Default)]
    struct CapturedLog(Arc<Mutex<Vec<u8>>>);

    impl Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_unknown_header_warning_carries_header_field() {
        let log = CapturedLog::default();
        let writer = log.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .without_time()
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let mut converter = RecordConverter::new();
            render(&mut converter, &[("TY", "JOUR"), ("Notes", "a")]);
            render(&mut converter, &[("TY", "BOOK"), ("Notes", "b")]);
        });

        let output = String::from_utf8(log.0.lock().unwrap().clone()).unwrap();
        assert_eq!(output.matches("not a valid RIS tag").count(), 1);
        assert!(output.contains("WARN"));
        assert!(output.contains("header="));
        assert!(output.contains("Column Notes contained within csv"));
    }

    #[test]
    fn test_fresh_converter_warns_again() {
        let mut first = RecordConverter::new();
        render(&mut first, &[("TY", "JOUR"), ("Notes", "")]);

        let mut second = RecordConverter::new();
        render(&mut second, &[("TY", "JOUR"), ("Notes", "")]);
        assert_eq!(second.unrecognized_headers(), ["Notes"]);
    }
}

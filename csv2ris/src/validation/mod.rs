//! RIS tag allow-list and row validation.
//!
//! The RIS format identifies each field by a two-character tag. Only the 80
//! tags in [`VALID_TAGS`] are emitted; any other CSV column is dropped with a
//! warning. Every row must carry a `TY` (type of reference) column.
//!
//! # Example
//!
//! ```
//! use csv2ris::validation::{is_multi_value_tag, is_valid_tag};
//!
//! assert!(is_valid_tag("TI"));
//! assert!(!is_valid_tag("Notes"));
//! assert!(is_multi_value_tag("AU"));
//! ```

use once_cell::sync::Lazy;
use std::collections::HashSet;

use crate::error::{ConvertError, ConvertResult};
use crate::models::InputRow;

/// Where users are pointed for the list of valid tags and `TY` values.
pub const RIS_REFERENCE_URL: &str = "https://en.wikipedia.org/wiki/RIS_(file_format)";

/// Type of reference. Required in every row.
pub const TYPE_TAG: &str = "TY";

/// End of reference. Closes every record.
pub const END_OF_RECORD_TAG: &str = "ER";

/// Columns holding several values separated by [`MULTI_VALUE_DELIMITER`].
pub const MULTI_VALUE_TAGS: [&str; 2] = ["AU", "KW"];

/// Separator between authors or keywords inside one cell.
pub const MULTI_VALUE_DELIMITER: &str = "; ";

/// Every tag accepted in the output.
pub const VALID_TAGS: [&str; 80] = [
    "TY", "TI", "AB", "A1", "A2", "A3", "A4", "AD", "AN", "AU", "AV", "BT", "C1", "C2", "C3", "C4",
    "C5", "C6", "C7", "C8", "CA", "CN", "CP", "CT", "CY", "DA", "DB", "DO", "DP", "ED", "EP", "ET",
    "ID", "IS", "J1", "J2", "JA", "JF", "JO", "KW", "L1", "L2", "L3", "L4", "LA", "LB", "LK", "M1",
    "M2", "M3", "N1", "N2", "NV", "OP", "PB", "PP", "PY", "RI", "RN", "RP", "SE", "SN", "SP", "ST",
    "T1", "T2", "T3", "TA", "TT", "U1", "U2", "U3", "U4", "U5", "UR", "VL", "VO", "Y1", "Y2", "ER",
];

static VALID_TAG_SET: Lazy<HashSet<&'static str>> = Lazy::new(|| VALID_TAGS.into_iter().collect());

/// Exact, case-sensitive membership test against [`VALID_TAGS`].
pub fn is_valid_tag(header: &str) -> bool {
    VALID_TAG_SET.contains(header)
}

/// True for `AU` and `KW`.
pub fn is_multi_value_tag(header: &str) -> bool {
    MULTI_VALUE_TAGS.contains(&header)
}

/// Fail if the row has no `TY` column.
///
/// Only the absence of the column is an error; an empty `TY` cell passes.
pub fn require_type_tag(row: &InputRow) -> ConvertResult<()> {
    if row.contains(TYPE_TAG) {
        Ok(())
    } else {
        Err(ConvertError::MissingTypeTag {
            row: row.number(),
            line: row.line(),
        })
    }
}

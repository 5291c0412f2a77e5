//! Bibliographic helper utilities for MARC records.
//!
//! Small derived values that indexing code computes on top of the extraction
//! engine: OCLC control numbers, the local dissertation flag, and collapsing of
//! values that differ only by a trailing period.

use crate::config::ExtractionConfig;
use crate::extract::extract_str;
use crate::normalize::{safe_append, trim_dot};
use crate::record::Record;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref OCLC_PREFIX: Regex =
        Regex::new(r"\s*(ocm|ocn|on|\(OCoLC\))(\d+)").expect("valid regex");
}

/// Prefix of vendor numbers found in 001 that are not OCLC numbers.
const VENDOR_PREFIX: &str = "ssj";

/// Strip the OCLC prefix from a control number.
///
/// Values starting with the `ssj` vendor prefix are not OCLC numbers and
/// clean to an empty string.
///
/// # Examples
///
/// ```
/// use marcspec::bibliographic_helpers::clean_oclc_number;
///
/// assert_eq!(clean_oclc_number("ocm00123456"), "00123456");
/// assert_eq!(clean_oclc_number("(OCoLC)987654"), "987654");
/// assert_eq!(clean_oclc_number("ssj0001234"), "");
/// ```
#[must_use]
pub fn clean_oclc_number(value: &str) -> String {
    if value.starts_with(VENDOR_PREFIX) {
        return String::new();
    }
    OCLC_PREFIX.replace_all(value, "${2}").trim().to_string()
}

/// OCLC numbers for a record: the 001 first, then every 035$a and 035$z.
///
/// Duplicates and empty values are dropped.
#[must_use]
pub fn oclc_numbers(record: &Record) -> Vec<String> {
    let mut numbers = Vec::new();
    safe_append(&mut numbers, &clean_oclc_number(&record.control_value("001")));
    for value in extract_str(record, "035a:035z").to_array_raw() {
        safe_append(&mut numbers, &clean_oclc_number(&value));
    }
    numbers
}

/// Returns true if a 502 note names the local institution.
///
/// The configured marker is matched case-insensitively however it was set.
#[must_use]
pub fn is_dissertation(record: &Record, config: &ExtractionConfig) -> bool {
    let marker = config.dissertation_marker.to_lowercase();
    if marker.is_empty() {
        return false;
    }
    extract_str(record, "502ac")
        .to_array_raw()
        .iter()
        .any(|note| note.to_lowercase().contains(&marker))
}

/// Remove values that differ from an earlier one only by a trailing period.
///
/// The form with the period wins, and keeps the position of whichever form came
/// first.
///
/// # Examples
///
/// ```
/// use marcspec::bibliographic_helpers::dedup_trailing_period;
///
/// let values = vec!["Fiction".to_string(), "History".to_string(), "Fiction.".to_string()];
/// assert_eq!(dedup_trailing_period(&values), vec!["Fiction.", "History"]);
/// ```
#[must_use]
pub fn dedup_trailing_period<S: AsRef<str>>(values: &[S]) -> Vec<String> {
    let mut dedup: Vec<String> = Vec::with_capacity(values.len());
    for value in values {
        let value = value.as_ref().trim();
        let trimmed = trim_dot(value);
        if trimmed == value {
            let with_period = format!("{value}.");
            if dedup.contains(&with_period) {
                continue;
            }
        } else if let Some(existing) = dedup.iter_mut().find(|v| v.as_str() == trimmed) {
            *existing = value.to_string();
            continue;
        }
        safe_append(&mut dedup, value);
    }
    dedup
}

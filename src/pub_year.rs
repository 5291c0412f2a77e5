//! Publication-year inference.
//!
//! The 008 fixed field encodes a date type at position 6 and two four-character
//! dates at positions 7-10 and 11-14. Digits may be replaced by `u` when unknown
//! (`19uu`). [`infer_year`] turns that into a single best-effort year, following
//! the traject `marc_publication_date` rules.
//!
//! | type | rule |
//! |------|------|
//! | `n`  | dates unknown, no year |
//! | `q`  | questionable: midpoint of date1 and date2 when they are close enough |
//! | `p`  | oldest of the two dates, unless date2 is zero |
//! | `r`  | reissue: date2 when present, otherwise date1 |
//! | else | date1 |

use crate::config::ExtractionConfig;
use crate::record::Record;
use lazy_static::lazy_static;
use regex::Regex;

const MIN_008_LEN: usize = 11;

lazy_static! {
    static ref FOUR_DIGITS: Regex = Regex::new(r"(\d{4})").expect("valid regex");
}

fn to_int(text: &str) -> i32 {
    text.parse().unwrap_or(0)
}

/// Infer a publication year from an 008 value.
///
/// `tolerance` is the widest range of years that may be collapsed to its
/// midpoint. Returns `None` rather than a sentinel when no year can be inferred.
///
/// # Examples
///
/// ```
/// use marcspec::pub_year::infer_year;
///
/// assert_eq!(infer_year("760629c19749999ne tr pss o   0   a0eng  cas   ", 15), Some(1974));
/// assert_eq!(infer_year("061108c200u9999nyuar ss 0 0eng ccas a ", 15), Some(2005));
/// assert_eq!(infer_year("061108q19501980nyuar ss 0 0eng ccas a ", 15), None);
/// ```
#[must_use]
pub fn infer_year(field_008: &str, tolerance: i32) -> Option<i32> {
    if field_008.len() < MIN_008_LEN {
        return None;
    }

    let date_type = field_008.get(6..7)?;
    if date_type == "n" {
        return None;
    }

    let date1 = field_008.get(7..11)?;
    let date2 = field_008.get(11..15).unwrap_or(date1);

    if date_type == "q" {
        let low = to_int(&date1.replace('u', "0"));
        let high = to_int(&date2.replace('u', "9"));
        if high > low && high - low <= tolerance {
            return Some((low + high) / 2);
        }
        tracing::trace!(low, high, tolerance, "questionable date range too wide");
        return None;
    }

    let chosen = match date_type {
        "p" if date1 <= date2 || to_int(date2) == 0 => date1,
        "p" => date2,
        "r" if to_int(date2) != 0 => date2,
        _ => date1,
    };

    let unknown = chosen.matches('u').count();
    let date = to_int(&chosen.replace('u', "0"));
    if date == 0 {
        return None;
    }
    if unknown == 0 {
        return Some(date);
    }

    let delta = u32::try_from(unknown)
        .ok()
        .and_then(|exp| 10_i32.checked_pow(exp))?;
    if delta <= tolerance {
        Some(date + delta / 2)
    } else {
        None
    }
}

/// First four-digit run in the first trimmed 260$c value.
#[must_use]
pub fn year_from_260(record: &Record) -> Option<i32> {
    let values = crate::extract::extract_str(record, "260c").to_array_trim();
    let first = values.first()?;
    let year = FOUR_DIGITS.find(first)?;
    year.as_str().parse().ok()
}

/// Publication year for a record.
///
/// Infers the year from the 008 first and falls back to 260$c. The year is only
/// returned if it lies inside the range configured in `config`.
#[must_use]
pub fn publication_year(record: &Record, config: &ExtractionConfig) -> Option<i32> {
    let year = infer_year(&record.control_value("008"), config.year_tolerance)
        .or_else(|| year_from_260(record))?;
    if config.accepts_year(year) {
        Some(year)
    } else {
        tracing::debug!(year, "publication year outside accepted range");
        None
    }
}

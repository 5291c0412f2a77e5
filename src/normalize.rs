//! Text normalization for display and index values.
//!
//! Cataloging data carries ISBD punctuation (` /`, ` :`, ` ;`, trailing periods,
//! square brackets around supplied data) that is noise once a value leaves its
//! field. [`trim_punctuation`] strips the common trailing artifacts by applying
//! three substitutions in sequence, each on the result of the previous one.
//!
//! Never apply this to control-field values: their characters are positional.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Trailing separator: optional spaces, one of ` ,/;:`, optional spaces.
    static ref TRAILING_PUNCT: Regex = Regex::new(r" *[ ,/;:] *$").expect("valid regex");
    /// Trailing period preceded by at least three ASCII word characters.
    static ref TRAILING_PERIOD: Regex =
        Regex::new(r"( *[0-9A-Za-z_]{3})\. *$").expect("valid regex");
    /// One optional bracket at each end with no other brackets inside.
    static ref SQUARE_BRACKETS: Regex = Regex::new(r"^\[?([^\[\]]+)\]?$").expect("valid regex");
}

/// Remove trailing punctuation and enclosing square brackets.
///
/// # Examples
///
/// ```
/// use marcspec::normalize::trim_punctuation;
///
/// assert_eq!(trim_punctuation("one hundred/ "), "one hundred");
/// assert_eq!(trim_punctuation("one."), "one");
/// assert_eq!(trim_punctuation("ct."), "ct.");
/// assert_eq!(trim_punctuation("[hello]"), "hello");
/// assert_eq!(trim_punctuation("[hello [world]]"), "[hello [world]]");
/// ```
#[must_use]
pub fn trim_punctuation(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let clean = TRAILING_PUNCT.replace_all(text, "");
    let clean = TRAILING_PERIOD.replace_all(&clean, "$1");
    SQUARE_BRACKETS.replace_all(&clean, "$1").into_owned()
}

/// Append `value` unless it is empty or already present.
///
/// The value is whitespace-trimmed before the duplicate check and before it is
/// stored.
pub fn safe_append(values: &mut Vec<String>, value: &str) {
    if value.is_empty() {
        return;
    }
    let trimmed = value.trim();
    if !values.iter().any(|existing| existing == trimmed) {
        values.push(trimmed.to_string());
    }
}

/// [`safe_append`] every value in order.
pub fn append_all<I, S>(values: &mut Vec<String>, new_values: I)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for value in new_values {
        safe_append(values, value.as_ref());
    }
}

/// Strip one trailing period, if any.
#[must_use]
pub fn trim_dot(text: &str) -> &str {
    text.strip_suffix('.').unwrap_or(text)
}

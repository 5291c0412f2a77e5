//! Configuration options for value extraction.
//!
//! This module provides the [`ExtractionConfig`] struct which controls how
//! publication years are inferred and how extracted values are flattened.

use serde::{Deserialize, Serialize};

/// Widest ambiguity (in years) accepted when inferring a publication year.
pub const DEFAULT_YEAR_TOLERANCE: i32 = 15;

/// Earliest publication year considered plausible.
pub const DEFAULT_MIN_YEAR: i32 = 500;

/// Case-insensitive marker identifying local dissertations in 502 notes.
pub const DEFAULT_DISSERTATION_MARKER: &str = "brown univ";

/// Configuration for value extraction.
///
/// # Examples
///
/// ```
/// use marcspec::ExtractionConfig;
///
/// // Default configuration (tolerance of 15 years, trimmed values)
/// let config = ExtractionConfig::default();
/// assert_eq!(config.year_tolerance, 15);
///
/// // Stricter year inference, raw values
/// let config = ExtractionConfig::default()
///     .with_year_tolerance(5)
///     .with_max_year(2026)
///     .with_trim_values(false);
/// assert_eq!(config.max_year, Some(2026));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Largest date range (in years) collapsed to its midpoint when a date is
    /// partially unknown (`19uu`) or questionable.
    pub year_tolerance: i32,

    /// Years below this are rejected by [`crate::pub_year::publication_year`].
    pub min_year: i32,

    /// Years above this are rejected; `None` leaves the range open.
    pub max_year: Option<i32>,

    /// Whether [`crate::Extractor::values`] trims punctuation from the values.
    pub trim_values: bool,

    /// Lowercase text that marks a 502 dissertation note as local.
    pub dissertation_marker: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        ExtractionConfig {
            year_tolerance: DEFAULT_YEAR_TOLERANCE,
            min_year: DEFAULT_MIN_YEAR,
            max_year: None,
            trim_values: true,
            dissertation_marker: DEFAULT_DISSERTATION_MARKER.to_string(),
        }
    }
}

impl ExtractionConfig {
    /// Set the year tolerance
    #[must_use]
    pub fn with_year_tolerance(mut self, tolerance: i32) -> Self {
        self.year_tolerance = tolerance;
        self
    }

    /// Set the lowest accepted year
    #[must_use]
    pub fn with_min_year(mut self, year: i32) -> Self {
        self.min_year = year;
        self
    }

    /// Set the highest accepted year
    #[must_use]
    pub fn with_max_year(mut self, year: i32) -> Self {
        self.max_year = Some(year);
        self
    }

    /// Choose between trimmed and raw values
    #[must_use]
    pub fn with_trim_values(mut self, trim: bool) -> Self {
        self.trim_values = trim;
        self
    }

    /// Set the dissertation marker (matched case-insensitively)
    #[must_use]
    pub fn with_dissertation_marker(mut self, marker: &str) -> Self {
        self.dissertation_marker = marker.to_lowercase();
        self
    }

    /// Returns true if `year` lies inside the configured range
    #[must_use]
    pub fn accepts_year(&self, year: i32) -> bool {
        year >= self.min_year && self.max_year.map_or(true, |max| year <= max)
    }
}

//! Extracted values.
//!
//! The extraction engine produces one [`FieldValue`] per matching field
//! occurrence: either the occurrence's direct control value, or the subset of its
//! subfields that a spec asked for, still in data order. A [`FieldValues`] list
//! can then be flattened into plain strings in the four ways the indexer needs
//! (joined or per-subfield, punctuation-trimmed or raw).

use crate::field_spec::FieldSpec;
use crate::normalize::{safe_append, trim_punctuation};
use crate::record::{Field, FieldContent, Subfield};
use indexmap::IndexMap;
use smallvec::SmallVec;
use std::fmt;
use std::ops::Deref;

/// The value extracted from one field occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValue {
    /// MARC tag of the occurrence the value came from (`"880"` for vernacular values)
    pub tag: String,
    /// Direct value, or the selected subfields in data order
    pub content: FieldContent,
}

impl FieldValue {
    /// Wrap a direct control value.
    #[must_use]
    pub fn direct(tag: &str, value: &str) -> Self {
        FieldValue {
            tag: tag.to_string(),
            content: FieldContent::Control(value.to_string()),
        }
    }

    /// Select the subfields of `field` that `spec` wants.
    ///
    /// Walks the field's subfields in their own order (never the spec's order),
    /// keeping those whose code is wanted and whose value is non-empty. Returns
    /// `None` when nothing was selected so callers never emit blank values.
    #[must_use]
    pub fn select(field: &Field, spec: &FieldSpec) -> Option<Self> {
        let selected: SmallVec<[Subfield; 4]> = field
            .subfields()
            .iter()
            .filter(|sf| spec.wants(sf.code) && !sf.value.is_empty())
            .cloned()
            .collect();
        if selected.is_empty() {
            return None;
        }
        Some(FieldValue {
            tag: field.tag.clone(),
            content: FieldContent::Subfielded(selected),
        })
    }

    /// The individual values, in data order
    #[must_use]
    pub fn strings(&self) -> Vec<&str> {
        match &self.content {
            FieldContent::Control(value) => vec![value.as_str()],
            FieldContent::Subfielded(subfields) => {
                subfields.iter().map(|sf| sf.value.as_str()).collect()
            }
        }
    }

    /// All values joined with a single space
    #[must_use]
    pub fn value(&self) -> String {
        match &self.content {
            FieldContent::Control(value) => value.clone(),
            FieldContent::Subfielded(_) => self.strings().join(" "),
        }
    }

    /// Values for one subfield code, joined with a single space.
    ///
    /// Returns an empty string if the code was not selected.
    #[must_use]
    pub fn value_for(&self, code: char) -> String {
        self.values_for(code).collect::<Vec<_>>().join(" ")
    }

    /// Iterate over the values for one subfield code
    pub fn values_for(&self, code: char) -> impl Iterator<Item = &str> {
        self.subfields()
            .iter()
            .filter(move |sf| sf.code == code)
            .map(|sf| sf.value.as_str())
    }

    /// Values grouped by subfield code, codes in order of first appearance.
    #[must_use]
    pub fn by_code(&self) -> IndexMap<char, Vec<&str>> {
        let mut grouped: IndexMap<char, Vec<&str>> = IndexMap::new();
        for subfield in self.subfields() {
            grouped
                .entry(subfield.code)
                .or_default()
                .push(subfield.value.as_str());
        }
        grouped
    }

    /// Selected subfields; empty for direct values
    #[must_use]
    pub fn subfields(&self) -> &[Subfield] {
        match &self.content {
            FieldContent::Subfielded(subfields) => subfields.as_slice(),
            FieldContent::Control(_) => &[],
        }
    }

    /// Returns true when this value came from an alternate-script 880 field
    #[must_use]
    pub fn is_vernacular(&self) -> bool {
        self.tag == crate::field_linkage::VERNACULAR_TAG
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// Ordered list of extracted values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldValues(Vec<FieldValue>);

impl FieldValues {
    /// Create an empty list
    #[must_use]
    pub fn new() -> Self {
        FieldValues(Vec::new())
    }

    /// Append a value
    pub fn push(&mut self, value: FieldValue) {
        self.0.push(value);
    }

    /// Values joined per occurrence, punctuation-trimmed, de-duplicated.
    #[must_use]
    pub fn to_array(&self) -> Vec<String> {
        self.flatten(true, true)
    }

    /// Individual values, punctuation-trimmed, de-duplicated.
    #[must_use]
    pub fn to_array_trim(&self) -> Vec<String> {
        self.flatten(true, false)
    }

    /// Values joined per occurrence, untrimmed, de-duplicated.
    #[must_use]
    pub fn to_array_join(&self) -> Vec<String> {
        self.flatten(false, true)
    }

    /// Individual values, untrimmed, de-duplicated.
    #[must_use]
    pub fn to_array_raw(&self) -> Vec<String> {
        self.flatten(false, false)
    }

    /// Only the values that came from 880 fields
    pub fn vernacular(&self) -> impl Iterator<Item = &FieldValue> {
        self.0.iter().filter(|value| value.is_vernacular())
    }

    /// Consume the list
    #[must_use]
    pub fn into_vec(self) -> Vec<FieldValue> {
        self.0
    }

    fn flatten(&self, trim: bool, join: bool) -> Vec<String> {
        let mut array = Vec::new();
        let mut add = |value: &str| {
            if trim {
                safe_append(&mut array, &trim_punctuation(value));
            } else {
                safe_append(&mut array, value);
            }
        };
        for value in &self.0 {
            if join {
                add(&value.value());
            } else {
                for single in value.strings() {
                    add(single);
                }
            }
        }
        array
    }
}

impl Deref for FieldValues {
    type Target = [FieldValue];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromIterator<FieldValue> for FieldValues {
    fn from_iter<I: IntoIterator<Item = FieldValue>>(iter: I) -> Self {
        FieldValues(iter.into_iter().collect())
    }
}

impl Extend<FieldValue> for FieldValues {
    fn extend<I: IntoIterator<Item = FieldValue>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for FieldValues {
    type Item = FieldValue;
    type IntoIter = std::vec::IntoIter<FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a FieldValues {
    type Item = &'a FieldValue;
    type IntoIter = std::slice::Iter<'a, FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

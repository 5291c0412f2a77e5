//! Compact field specifications.
//!
//! A spec string lists the MARC fields and subfields to extract, e.g.
//! `"100tflnp:245abfgkn"`. Each colon-separated token starts with a three
//! character tag; every remaining character is one wanted subfield code. A token
//! with only a tag (`"008"`) asks for the field's direct control value.
//!
//! Tokens shorter than three characters are dropped without error so that
//! legacy or hand-edited specs degrade instead of failing.
//!
//! # Examples
//!
//! ```
//! use marcspec::field_spec::compile;
//!
//! let specs = compile("100tflnp:245ab:x:008");
//! assert_eq!(specs.len(), 3);
//! assert_eq!(specs[0].tag, "100");
//! assert!(specs[1].wants('b'));
//! assert!(specs[2].is_direct());
//! ```

use crate::error::{MarcError, Result};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

const TAG_WIDTH: usize = 3;

/// One compiled `(tag, wanted subfield codes)` rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldSpec {
    /// MARC tag to match (not validated to be numeric)
    pub tag: String,
    /// Wanted subfield codes in token order; empty means "direct value"
    pub codes: SmallVec<[char; 8]>,
}

impl FieldSpec {
    /// Create a spec for a tag and a set of codes
    #[must_use]
    pub fn new(tag: &str, codes: &[char]) -> Self {
        FieldSpec {
            tag: tag.to_string(),
            codes: codes.iter().copied().collect(),
        }
    }

    /// Parse a single token such as `"245abc"`.
    ///
    /// Returns `None` for tokens shorter than three characters.
    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        // Slice on a character boundary so a stray multi-byte character in the
        // tag position cannot split a code point.
        let split = match token.char_indices().nth(TAG_WIDTH) {
            Some((idx, _)) => idx,
            None if token.chars().count() == TAG_WIDTH => token.len(),
            None => return None,
        };
        let (tag, codes) = token.split_at(split);
        Some(FieldSpec {
            tag: tag.to_string(),
            codes: codes.chars().collect(),
        })
    }

    /// Returns true if the spec asks for the direct value rather than subfields
    #[must_use]
    pub fn is_direct(&self) -> bool {
        self.codes.is_empty()
    }

    /// Returns true if `code` is one of the wanted subfield codes
    #[must_use]
    pub fn wants(&self, code: char) -> bool {
        self.codes.contains(&code)
    }
}

impl fmt::Display for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag)?;
        for code in &self.codes {
            write!(f, "{code}")?;
        }
        Ok(())
    }
}

impl FromStr for FieldSpec {
    type Err = MarcError;

    fn from_str(s: &str) -> Result<Self> {
        FieldSpec::parse(s)
            .ok_or_else(|| MarcError::InvalidSpec(format!("'{s}' is shorter than a MARC tag")))
    }
}

/// Compile a colon-separated spec string into its rules, in token order.
///
/// # Examples
///
/// ```
/// use marcspec::field_spec::compile;
///
/// let specs = compile("300ac:456:567x");
/// let tags: Vec<_> = specs.iter().map(|s| s.tag.as_str()).collect();
/// assert_eq!(tags, vec!["300", "456", "567"]);
/// ```
#[must_use]
pub fn compile(spec: &str) -> Vec<FieldSpec> {
    spec.split(':')
        .filter_map(|token| {
            let parsed = FieldSpec::parse(token);
            if parsed.is_none() {
                tracing::debug!(token, spec, "dropping field spec token shorter than a tag");
            }
            parsed
        })
        .collect()
}

/// Compile a spec received as raw bytes.
///
/// # Errors
///
/// Returns [`MarcError::InvalidSpec`] if the bytes are not valid UTF-8.
pub fn compile_bytes(spec: &[u8]) -> Result<Vec<FieldSpec>> {
    let text = std::str::from_utf8(spec)
        .map_err(|e| MarcError::InvalidSpec(format!("spec is not valid UTF-8: {e}")))?;
    Ok(compile(text))
}

//! Alternate-script (vernacular) resolution through MARC 880 fields.
//!
//! Catalogers record a field in one script and, when available, its
//! alternate-script rendering in a repeatable 880 field. The two are linked
//! through **subfield 6**:
//! - origin side: `NNN-XX` naming the linked tag and an occurrence number,
//!   e.g. `700: $6 880-04 $a Murakami, Haruki`
//! - 880 side: `NNN-XX/script`, naming the origin tag back,
//!   e.g. `880: $6 700-04/$1 $a 村上春樹`
//!
//! # Coarse matching
//!
//! Occurrence numbers are unreliable in production data (often `00`, missing, or
//! pointing at the wrong pair), so an 880 is considered linked to a tag when any
//! of its `$6` values merely *starts with* that tag. `"700"` therefore matches
//! both `700-04/$1` and `700-05/$1`, and resolving one 700 returns the vernacular
//! values of every 700. The extraction engine guards against emitting the same
//! set twice. Do not tighten this to exact occurrence pairing without auditing
//! the source data first.

use crate::field_spec::FieldSpec;
use crate::field_values::{FieldValue, FieldValues};
use crate::record::{Field, Record, LINKAGE_CODE};

/// Tag of the alternate graphic representation field.
pub const VERNACULAR_TAG: &str = "880";

/// Information read from a MARC subfield 6 (Linkage) value.
///
/// Parsing is deliberately lenient: only the `-` separating the tag from the
/// rest is required. Nothing is validated to be numeric.
///
/// # Examples
///
/// ```
/// use marcspec::field_linkage::LinkageInfo;
///
/// let info = LinkageInfo::parse("700-04/$1").unwrap();
/// assert_eq!(info.tag(), "700");
/// assert_eq!(info.occurrence(), "04");
/// assert_eq!(info.script_id(), "$1");
/// assert!(!info.is_reverse());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkageInfo {
    /// The linked field tag (e.g. "880" on an origin field, "245" on an 880)
    pub tag: String,

    /// Occurrence number linking fields together, as written
    pub occurrence: String,

    /// Script identification code (e.g. "(2" Hebrew, "(3" Arabic, "$1" CJK)
    pub script_id: String,

    /// Whether the right-to-left orientation flag `/r` is present
    pub is_reverse: bool,
}

impl LinkageInfo {
    /// Parse a subfield 6 value.
    ///
    /// Returns `None` when the value has no `-` separator.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let (tag, rest) = value.split_once('-')?;
        let mut parts = rest.split('/');
        let occurrence = parts.next().unwrap_or_default().to_string();

        let mut script_id = String::new();
        let mut is_reverse = false;
        for part in parts {
            if part == "r" {
                is_reverse = true;
            } else if script_id.is_empty() {
                script_id = part.to_string();
            }
        }

        Some(LinkageInfo {
            tag: tag.to_string(),
            occurrence,
            script_id,
            is_reverse,
        })
    }

    /// Get the linked field tag
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Get the occurrence number as written
    #[must_use]
    pub fn occurrence(&self) -> &str {
        &self.occurrence
    }

    /// Get the script identification code
    #[must_use]
    pub fn script_id(&self) -> &str {
        &self.script_id
    }

    /// Check if the right-to-left flag is set
    #[must_use]
    pub fn is_reverse(&self) -> bool {
        self.is_reverse
    }
}

/// Returns true if `field` carries a `$6` starting with `origin_tag`.
///
/// This is the coarse, occurrence-insensitive link test described in the module
/// docs.
#[must_use]
pub fn is_vernacular_for(field: &Field, origin_tag: &str) -> bool {
    field
        .subfields_by_code(LINKAGE_CODE)
        .any(|linkage| linkage.starts_with(origin_tag))
}

/// Vernacular values for one origin occurrence.
///
/// Reads the occurrence's first `$6` (e.g. `880-04`), searches the fields with
/// the tag it names, and selects `spec`'s subfields from every candidate linked
/// back to the occurrence's own tag. Returns an empty list when the occurrence
/// has no `$6` or the `$6` cannot be read.
#[must_use]
pub fn resolve(record: &Record, field: &Field, spec: &FieldSpec) -> FieldValues {
    let Some(target) = field.linkage() else {
        return FieldValues::new();
    };
    let Some(link) = LinkageInfo::parse(target) else {
        tracing::debug!(tag = %field.tag, linkage = target, "unreadable linkage target");
        return FieldValues::new();
    };

    let values: FieldValues = record
        .fields_by_tag(link.tag())
        .filter(|candidate| is_vernacular_for(candidate, &field.tag))
        .filter_map(|candidate| FieldValue::select(candidate, spec))
        .collect();
    tracing::trace!(
        origin = %field.tag,
        linked = link.tag(),
        found = values.len(),
        "resolved vernacular values"
    );
    values
}

/// Values of every 880 linked to `spec`'s tag, whether or not the record holds
/// an occurrence of that tag.
///
/// Scans from the 880 side because origin fields do not always point at their
/// 880, while 880s always point back.
pub fn freestanding<'a>(
    record: &'a Record,
    spec: &'a FieldSpec,
) -> impl Iterator<Item = FieldValue> + 'a {
    record
        .fields_by_tag(VERNACULAR_TAG)
        .filter(move |candidate| is_vernacular_for(candidate, &spec.tag))
        .filter_map(move |candidate| FieldValue::select(candidate, spec))
}

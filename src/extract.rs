//! The extraction engine.
//!
//! [`extract`] applies compiled [`FieldSpec`]s to a [`Record`] and returns one
//! [`FieldValue`] per matching field occurrence, followed by any alternate-script
//! values linked to those occurrences through 880 fields.
//!
//! For each spec, in spec order:
//! 1. tag-only specs emit the direct value of every occurrence verbatim;
//! 2. otherwise every occurrence contributes the wanted subfields, in data
//!    order, skipping occurrences where none were found;
//! 3. the occurrences' 880 counterparts are then resolved; the first non-empty
//!    resolution for a tag is emitted and the tag is marked resolved, because a
//!    single resolution already covers every occurrence of that tag.
//!
//! A final pass picks up 880s linked to spec tags that were never resolved,
//! which covers records holding an 880 without its origin field.
//!
//! # Examples
//!
//! ```
//! use marcspec::{extract_str, Field, Record};
//!
//! let record = Record::builder()
//!     .field(
//!         Field::builder("700".to_string(), '1', ' ')
//!             .subfield_str('6', "880-04")
//!             .subfield_str('a', "Murakami, Haruki,")
//!             .subfield_str('d', "1949-")
//!             .build(),
//!     )
//!     .field(
//!         Field::builder("880".to_string(), '1', ' ')
//!             .subfield_str('6', "700-04/$1")
//!             .subfield_str('a', "村上春樹,")
//!             .build(),
//!     )
//!     .build();
//!
//! let values = extract_str(&record, "700ad");
//! assert_eq!(values.len(), 2);
//! assert_eq!(values[0].value(), "Murakami, Haruki, 1949-");
//! assert_eq!(values[1].value(), "村上春樹,");
//! ```

use crate::config::ExtractionConfig;
use crate::field_linkage;
use crate::field_spec::{compile, FieldSpec};
use crate::field_values::{FieldValue, FieldValues};
use crate::record::{Field, Record};
use std::collections::HashSet;

/// Extract the values `specs` select from `record`.
///
/// Never fails: missing fields and links simply contribute nothing.
#[must_use]
pub fn extract(record: &Record, specs: &[FieldSpec]) -> FieldValues {
    let mut values = FieldValues::new();
    // Tags whose vernacular values were already emitted during this call.
    let mut resolved: HashSet<&str> = HashSet::new();

    for spec in specs {
        if spec.is_direct() {
            values.extend(
                record
                    .fields_by_tag(&spec.tag)
                    .filter_map(Field::direct_value)
                    .filter(|value| !value.is_empty())
                    .map(|value| FieldValue::direct(&spec.tag, value)),
            );
            continue;
        }

        values.extend(
            record
                .fields_by_tag(&spec.tag)
                .filter_map(|field| FieldValue::select(field, spec)),
        );

        for field in record.fields_by_tag(&spec.tag) {
            if resolved.contains(spec.tag.as_str()) {
                break;
            }
            let vernacular = field_linkage::resolve(record, field, spec);
            if !vernacular.is_empty() {
                resolved.insert(spec.tag.as_str());
                values.extend(vernacular);
            }
        }
    }

    for spec in specs {
        if spec.is_direct() || resolved.contains(spec.tag.as_str()) {
            continue;
        }
        values.extend(field_linkage::freestanding(record, spec));
    }

    values
}

/// Compile `spec` and extract its values from `record`.
#[must_use]
pub fn extract_str(record: &Record, spec: &str) -> FieldValues {
    extract(record, &compile(spec))
}

/// Only the 880 values linked to each spec's tag, in spec order.
///
/// Unlike [`extract`], every linked 880 is returned for every spec, even when
/// two specs share a tag.
#[must_use]
pub fn vernacular_values(record: &Record, spec: &str) -> FieldValues {
    compile(spec)
        .iter()
        .flat_map(|spec| field_linkage::freestanding(record, spec).collect::<Vec<_>>())
        .collect()
}

/// Extract from many independent records in parallel.
///
/// Output order matches input order. Each record is processed by an
/// independent [`extract`] call, so no state is shared between workers.
#[must_use]
pub fn extract_batch(records: &[Record], specs: &[FieldSpec]) -> Vec<FieldValues> {
    use rayon::prelude::*;

    records
        .par_iter()
        .map(|record| extract(record, specs))
        .collect()
}

/// A compiled spec paired with an [`ExtractionConfig`].
///
/// # Examples
///
/// ```
/// use marcspec::{Extractor, Field, Record};
///
/// let extractor = Extractor::new("245ab");
/// let record = Record::builder()
///     .field(
///         Field::builder("245".to_string(), '1', '0')
///             .subfield_str('a', "Kitab al-hayah :")
///             .subfield_str('b', "a memoir /")
///             .build(),
///     )
///     .build();
///
/// assert_eq!(extractor.values(&record), vec!["Kitab al-hayah : a memoir"]);
/// ```
#[derive(Debug, Clone)]
pub struct Extractor {
    specs: Vec<FieldSpec>,
    config: ExtractionConfig,
}

impl Extractor {
    /// Compile `spec` with the default configuration
    #[must_use]
    pub fn new(spec: &str) -> Self {
        Extractor {
            specs: compile(spec),
            config: ExtractionConfig::default(),
        }
    }

    /// Replace the configuration
    #[must_use]
    pub fn with_config(mut self, config: ExtractionConfig) -> Self {
        self.config = config;
        self
    }

    /// The compiled specs
    #[must_use]
    pub fn specs(&self) -> &[FieldSpec] {
        &self.specs
    }

    /// The active configuration
    #[must_use]
    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Structured values for `record`
    #[must_use]
    pub fn extract(&self, record: &Record) -> FieldValues {
        extract(record, &self.specs)
    }

    /// Joined string values for `record`, trimmed when the configuration says so.
    #[must_use]
    pub fn values(&self, record: &Record) -> Vec<String> {
        let values = self.extract(record);
        if self.config.trim_values {
            values.to_array()
        } else {
            values.to_array_join()
        }
    }

    /// Structured values for many records, in parallel
    #[must_use]
    pub fn extract_batch(&self, records: &[Record]) -> Vec<FieldValues> {
        extract_batch(records, &self.specs)
    }
}

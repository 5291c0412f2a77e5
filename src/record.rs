//! MARC record structures as handed over by the ingester.
//!
//! This module provides the in-memory record types the extraction engine works on:
//! - [`Record`]: an ordered sequence of field occurrences
//! - [`Field`]: one occurrence of a (possibly repeating) MARC field
//! - [`FieldContent`]: either a direct control value or an ordered subfield list
//! - [`Subfield`]: a single-character-coded component of a field
//!
//! Field order and subfield order are kept exactly as decoded: the extraction
//! engine emits values in record order and joins subfields in the order they
//! appear in the data, not in the order they are requested.
//!
//! # Examples
//!
//! ```
//! use marcspec::{Field, Record};
//!
//! let record = Record::builder()
//!     .field(Field::control("008".to_string(), "760629c19749999ne".to_string()))
//!     .field(
//!         Field::builder("245".to_string(), '1', '0')
//!             .subfield_str('a', "Title")
//!             .subfield_str('c', "Author")
//!             .build(),
//!     )
//!     .build();
//!
//! assert_eq!(record.control_value("008"), "760629c19749999ne");
//! assert_eq!(record.fields_by_tag("245").count(), 1);
//! ```

use crate::error::{MarcError, Result};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Field tag used by the ILS for the synthetic leader entry.
pub const LEADER_FIELD_TAG: &str = "_";

/// Subfield code carrying 880 linkage.
pub const LINKAGE_CODE: char = '6';

/// A subfield within a field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subfield {
    /// Subfield code (single character)
    #[serde(rename = "tag")]
    pub code: char,
    /// Subfield value
    #[serde(rename = "content")]
    pub value: String,
}

impl Subfield {
    /// Create a subfield from a code and a string slice.
    #[must_use]
    pub fn new(code: char, value: &str) -> Self {
        Subfield {
            code,
            value: value.to_string(),
        }
    }
}

/// The payload of a field occurrence.
///
/// Control fields (001-009) and the leader carry a single direct value whose
/// characters are positionally significant; every other field carries an
/// ordered list of subfields. A field never has both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldContent {
    /// Direct value of a control field or leader entry
    Control(String),
    /// Ordered subfields of a data field
    Subfielded(SmallVec<[Subfield; 4]>),
}

/// One occurrence of a MARC field.
///
/// Deserializes from the ILS JSON shape
/// `{"fieldTag", "marcTag", "ind1", "ind2", "subfields": [{"tag", "content"}], "content"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawField", into = "RawField")]
pub struct Field {
    /// ILS-specific field tag (may be empty). `"_"` marks the leader.
    pub field_tag: String,
    /// MARC tag (3 characters, empty for entries that only carry an ILS field tag)
    pub tag: String,
    /// First indicator
    pub indicator1: char,
    /// Second indicator
    pub indicator2: char,
    /// Direct value or subfields
    pub content: FieldContent,
}

impl Field {
    /// Create a new data field with no subfields
    #[must_use]
    pub fn new(tag: String, indicator1: char, indicator2: char) -> Self {
        Field {
            field_tag: String::new(),
            tag,
            indicator1,
            indicator2,
            content: FieldContent::Subfielded(SmallVec::new()),
        }
    }

    /// Create a control field (001-009) holding a direct value
    #[must_use]
    pub fn control(tag: String, value: String) -> Self {
        Field {
            field_tag: String::new(),
            tag,
            indicator1: ' ',
            indicator2: ' ',
            content: FieldContent::Control(value),
        }
    }

    /// Create the synthetic leader entry the ILS sends along with MARC fields
    #[must_use]
    pub fn leader(value: String) -> Self {
        Field {
            field_tag: LEADER_FIELD_TAG.to_string(),
            tag: String::new(),
            indicator1: ' ',
            indicator2: ' ',
            content: FieldContent::Control(value),
        }
    }

    /// Build a field from its loose parts, validating the shape.
    ///
    /// # Errors
    ///
    /// Returns [`MarcError::Validation`] if the tag is neither empty nor exactly three
    /// characters long, or if both a non-empty direct value and subfields are given.
    pub fn from_parts(
        field_tag: String,
        tag: String,
        indicator1: char,
        indicator2: char,
        direct_value: Option<String>,
        subfields: Vec<Subfield>,
    ) -> Result<Self> {
        let width = tag.chars().count();
        if width != 0 && width != 3 {
            return Err(MarcError::Validation(format!(
                "MARC tag '{tag}' must be 3 characters, found {width}"
            )));
        }

        let direct_value = direct_value.filter(|value| !value.is_empty());
        let content = match direct_value {
            Some(value) if !subfields.is_empty() => {
                return Err(MarcError::Validation(format!(
                    "field {tag} carries both a direct value ({value:?}) and {} subfields",
                    subfields.len()
                )));
            }
            Some(value) => FieldContent::Control(value),
            None => FieldContent::Subfielded(subfields.into_iter().collect()),
        };

        Ok(Field {
            field_tag,
            tag,
            indicator1,
            indicator2,
            content,
        })
    }

    /// Create a builder for constructing data fields fluently
    ///
    /// # Examples
    ///
    /// ```
    /// use marcspec::Field;
    ///
    /// let field = Field::builder("700".to_string(), '1', ' ')
    ///     .subfield_str('6', "880-04")
    ///     .subfield_str('a', "Murakami, Haruki")
    ///     .build();
    /// assert_eq!(field.linkage(), Some("880-04"));
    /// ```
    #[must_use]
    pub fn builder(tag: String, indicator1: char, indicator2: char) -> FieldBuilder {
        FieldBuilder {
            field: Field::new(tag, indicator1, indicator2),
        }
    }

    /// Set the ILS field tag
    #[must_use]
    pub fn with_field_tag(mut self, field_tag: &str) -> Self {
        self.field_tag = field_tag.to_string();
        self
    }

    /// Add a subfield
    ///
    /// # Errors
    ///
    /// Returns [`MarcError::InvalidField`] when called on a control field.
    pub fn add_subfield(&mut self, code: char, value: String) -> Result<()> {
        match &mut self.content {
            FieldContent::Subfielded(subfields) => {
                subfields.push(Subfield { code, value });
                Ok(())
            }
            FieldContent::Control(_) => Err(MarcError::InvalidField(format!(
                "cannot add subfield ${code} to control field {}",
                self.tag
            ))),
        }
    }

    /// Returns true for control fields and leader entries
    #[must_use]
    pub fn is_control(&self) -> bool {
        matches!(self.content, FieldContent::Control(_))
    }

    /// Direct value of a control field, `None` for data fields
    #[must_use]
    pub fn direct_value(&self) -> Option<&str> {
        match &self.content {
            FieldContent::Control(value) => Some(value.as_str()),
            FieldContent::Subfielded(_) => None,
        }
    }

    /// Subfields in data order; empty for control fields
    #[must_use]
    pub fn subfields(&self) -> &[Subfield] {
        match &self.content {
            FieldContent::Subfielded(subfields) => subfields.as_slice(),
            FieldContent::Control(_) => &[],
        }
    }

    /// Get first value for a subfield code
    #[must_use]
    pub fn get_subfield(&self, code: char) -> Option<&str> {
        self.subfields_by_code(code).next()
    }

    /// Iterate over subfield values with a specific code
    pub fn subfields_by_code(&self, code: char) -> impl Iterator<Item = &str> {
        self.subfields()
            .iter()
            .filter(move |sf| sf.code == code)
            .map(|sf| sf.value.as_str())
    }

    /// The field's content as one string.
    ///
    /// Control fields return their direct value; data fields join all
    /// subfield values with a single space.
    #[must_use]
    pub fn value(&self) -> String {
        match &self.content {
            FieldContent::Control(value) => value.clone(),
            FieldContent::Subfielded(subfields) => subfields
                .iter()
                .map(|sf| sf.value.as_str())
                .collect::<Vec<_>>()
                .join(" "),
        }
    }

    /// First linkage (`$6`) value, e.g. `"880-04"` on an origin field.
    #[must_use]
    pub fn linkage(&self) -> Option<&str> {
        self.get_subfield(LINKAGE_CODE)
    }
}

/// Builder for fluently constructing data fields
#[derive(Debug)]
pub struct FieldBuilder {
    field: Field,
}

impl FieldBuilder {
    /// Add a subfield to the field being built
    #[must_use]
    pub fn subfield(mut self, code: char, value: String) -> Self {
        if let FieldContent::Subfielded(subfields) = &mut self.field.content {
            subfields.push(Subfield { code, value });
        }
        self
    }

    /// Add a subfield using a string slice
    #[must_use]
    pub fn subfield_str(self, code: char, value: &str) -> Self {
        self.subfield(code, value.to_string())
    }

    /// Set the ILS field tag
    #[must_use]
    pub fn field_tag(mut self, field_tag: &str) -> Self {
        self.field.field_tag = field_tag.to_string();
        self
    }

    /// Build the field
    #[must_use]
    pub fn build(self) -> Field {
        self.field
    }
}

/// A MARC record: field occurrences in the order the ingester decoded them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    /// Field occurrences in record order
    pub fields: Vec<Field>,
}

impl Record {
    /// Create an empty record
    #[must_use]
    pub fn new() -> Self {
        Record { fields: Vec::new() }
    }

    /// Create a builder for fluently constructing records
    #[must_use]
    pub fn builder() -> RecordBuilder {
        RecordBuilder {
            record: Record::new(),
        }
    }

    /// Decode a record from the ILS JSON field list.
    ///
    /// # Errors
    ///
    /// Returns [`MarcError::Json`] if the text is not a JSON array of fields, or
    /// [`MarcError::Validation`] (wrapped by `serde_json`) when a field has an
    /// impossible shape.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Append a field occurrence
    pub fn add_field(&mut self, field: Field) {
        self.fields.push(field);
    }

    /// Iterate over all field occurrences in record order
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter()
    }

    /// Iterate over occurrences with the given MARC tag, in record order
    pub fn fields_by_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Field> + 'a {
        self.fields.iter().filter(move |field| field.tag == tag)
    }

    /// Direct values for a control tag (001-009), as-is.
    pub fn control_values<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.fields_by_tag(tag).filter_map(Field::direct_value)
    }

    /// Direct values for a control tag joined with a space.
    ///
    /// Control fields rarely repeat; when they do, the values are joined.
    #[must_use]
    pub fn control_value(&self, tag: &str) -> String {
        self.control_values(tag).collect::<Vec<_>>().join(" ")
    }

    /// Direct value of the first occurrence carrying the given ILS field tag.
    ///
    /// The ILS uses field tags for records that only carry a minimal skeleton of
    /// data outside of MARC. Returns an empty string when nothing matches or the
    /// occurrence holds subfields.
    #[must_use]
    pub fn content_for_field_tag(&self, field_tag: &str) -> String {
        self.fields
            .iter()
            .find(|field| field.field_tag == field_tag)
            .and_then(Field::direct_value)
            .unwrap_or_default()
            .to_string()
    }

    /// Leader string, taken from the `"_"` field-tag entry.
    #[must_use]
    pub fn leader(&self) -> String {
        self.content_for_field_tag(LEADER_FIELD_TAG)
    }

    /// Returns true if at least one occurrence has a MARC tag
    #[must_use]
    pub fn has_marc(&self) -> bool {
        self.fields.iter().any(|field| !field.tag.is_empty())
    }

    /// Number of field occurrences
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the record has no field occurrences
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<Field> for Record {
    fn from_iter<I: IntoIterator<Item = Field>>(iter: I) -> Self {
        Record {
            fields: iter.into_iter().collect(),
        }
    }
}

/// Builder for fluently constructing records
#[derive(Debug)]
pub struct RecordBuilder {
    record: Record,
}

impl RecordBuilder {
    /// Add a control field to the record being built
    #[must_use]
    pub fn control_field_str(mut self, tag: &str, value: &str) -> Self {
        self.record
            .add_field(Field::control(tag.to_string(), value.to_string()));
        self
    }

    /// Add the leader entry
    #[must_use]
    pub fn leader_str(mut self, value: &str) -> Self {
        self.record.add_field(Field::leader(value.to_string()));
        self
    }

    /// Add a field to the record being built
    #[must_use]
    pub fn field(mut self, field: Field) -> Self {
        self.record.add_field(field);
        self
    }

    /// Build the record
    #[must_use]
    pub fn build(self) -> Record {
        self.record
    }
}

/// Wire shape of a field in the ILS JSON.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawField {
    #[serde(default)]
    field_tag: String,
    #[serde(default)]
    marc_tag: String,
    #[serde(default)]
    ind1: String,
    #[serde(default)]
    ind2: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    subfields: Option<Vec<Subfield>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    content: Option<String>,
}

fn indicator(raw: &str) -> char {
    raw.chars().next().unwrap_or(' ')
}

impl TryFrom<RawField> for Field {
    type Error = MarcError;

    fn try_from(raw: RawField) -> Result<Self> {
        let has_subfields = raw.subfields.is_some();
        let field = Field::from_parts(
            raw.field_tag,
            raw.marc_tag,
            indicator(&raw.ind1),
            indicator(&raw.ind2),
            raw.content.clone(),
            raw.subfields.unwrap_or_default(),
        )?;

        // A field with neither content nor a subfield list is a control field
        // whose value happens to be empty.
        if !has_subfields && !field.is_control() {
            return Ok(Field {
                content: FieldContent::Control(raw.content.unwrap_or_default()),
                ..field
            });
        }
        Ok(field)
    }
}

impl From<Field> for RawField {
    fn from(field: Field) -> Self {
        let (subfields, content) = match field.content {
            FieldContent::Control(value) => (None, Some(value)),
            FieldContent::Subfielded(subfields) => (Some(subfields.into_vec()), None),
        };
        RawField {
            field_tag: field.field_tag,
            marc_tag: field.tag,
            ind1: field.indicator1.to_string(),
            ind2: field.indicator2.to_string(),
            subfields,
            content,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn author(linkage: &str, name: &str) -> Field {
        Field::builder("700".to_string(), '1', ' ')
            .subfield_str('6', linkage)
            .subfield_str('a', name)
            .build()
    }

    #[test]
    fn test_fields_by_tag_preserves_record_order() {
        let record = Record::builder()
            .field(author("880-01", "first"))
            .field(Field::builder("245".to_string(), '1', '0').build())
            .field(author("880-02", "second"))
            .build();

        let names: Vec<_> = record
            .fields_by_tag("700")
            .filter_map(|f| f.get_subfield('a'))
            .collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[test]
    fn test_control_value_joins_repeats() {
        let record = Record::builder()
            .control_field_str("007", "vd cvaizq")
            .control_field_str("007", "cr unu")
            .build();
        assert_eq!(record.control_value("007"), "vd cvaizq cr unu");
        assert_eq!(record.control_value("008"), "");
    }

    #[test]
    fn test_leader_and_has_marc() {
        let record = Record::builder()
            .leader_str("00000nam a2200000 a 4500")
            .build();
        assert_eq!(record.leader(), "00000nam a2200000 a 4500");
        assert!(!record.has_marc());

        let record = Record::builder().control_field_str("001", "b1234").build();
        assert!(record.has_marc());
        assert_eq!(record.leader(), "");
    }

    #[test]
    fn test_content_for_field_tag_ignores_subfields() {
        let record = Record::builder()
            .field(
                Field::builder("245".to_string(), '1', '0')
                    .field_tag("t")
                    .subfield_str('a', "Moby Dick")
                    .build(),
            )
            .field(
                Field::control(String::new(), "Rockefeller stacks".to_string())
                    .with_field_tag("b"),
            )
            .build();
        assert_eq!(record.content_for_field_tag("t"), "");
        assert_eq!(record.content_for_field_tag("b"), "Rockefeller stacks");
        assert_eq!(record.content_for_field_tag("x"), "");
    }

    #[test]
    fn test_from_parts_rejects_dual_content() {
        let err = Field::from_parts(
            String::new(),
            "245".to_string(),
            '1',
            '0',
            Some("direct".to_string()),
            vec![Subfield::new('a', "sub")],
        )
        .unwrap_err();
        assert!(matches!(err, MarcError::Validation(_)));
    }

    #[test]
    fn test_from_parts_rejects_bad_tag_width() {
        let err =
            Field::from_parts(String::new(), "24".to_string(), ' ', ' ', None, vec![]).unwrap_err();
        assert!(err.to_string().contains("3 characters"));
    }

    #[test]
    fn test_from_parts_empty_direct_value_is_subfielded() {
        let field = Field::from_parts(
            String::new(),
            "245".to_string(),
            '1',
            '0',
            Some(String::new()),
            vec![Subfield::new('a', "Title")],
        )
        .unwrap();
        assert!(!field.is_control());
        assert_eq!(field.value(), "Title");
    }

    #[test]
    fn test_add_subfield_to_control_field_fails() {
        let mut field = Field::control("001".to_string(), "b1".to_string());
        assert!(field.add_subfield('a', "x".to_string()).is_err());

        let mut field = Field::new("500".to_string(), ' ', ' ');
        field.add_subfield('a', "note".to_string()).unwrap();
        assert_eq!(field.subfields().len(), 1);
    }

    #[test]
    fn test_from_json_field_list() {
        let json = r#"[
            {"fieldTag": "_", "content": "00000nam a2200000 a 4500"},
            {"fieldTag": "y", "marcTag": "008", "ind1": " ", "ind2": " ",
             "content": "760629c19749999ne tr pss o   0   a0eng  cas   "},
            {"fieldTag": "a", "marcTag": "100", "ind1": "1", "ind2": " ",
             "subfields": [{"tag": "a", "content": "Smith, John"}, {"tag": "d", "content": "1850-1925"}]}
        ]"#;
        let record = Record::from_json(json).unwrap();
        assert_eq!(record.len(), 3);
        assert_eq!(record.leader(), "00000nam a2200000 a 4500");
        assert!(record.control_value("008").starts_with("760629c1974"));

        let author = record.fields_by_tag("100").next().unwrap();
        assert_eq!(author.indicator1, '1');
        assert_eq!(author.value(), "Smith, John 1850-1925");
        assert_eq!(author.field_tag, "a");
    }

    #[test]
    fn test_from_json_rejects_dual_content() {
        let json = r#"[{"marcTag": "245", "content": "x", "subfields": [{"tag": "a", "content": "y"}]}]"#;
        let err = Record::from_json(json).unwrap_err();
        assert!(err.to_string().contains("both a direct value"));
    }

    #[test]
    fn test_json_round_trip_keeps_content_kind() {
        let record = Record::builder()
            .control_field_str("001", "ocm123")
            .field(author("880-01", "Smith"))
            .build();
        let json = serde_json::to_string(&record).unwrap();
        let decoded = Record::from_json(&json).unwrap();
        assert_eq!(decoded, record);
    }
}

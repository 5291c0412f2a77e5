#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

//! # marcspec: MARC field specs and value extraction
//!
//! Compile compact field specs like `"100abcd:700abcd"` and pull values out of
//! decoded MARC bibliographic records, including the alternate-script values
//! held in linked 880 fields.
//!
//! ## Quick Start
//!
//! ### Extracting values
//!
//! ```
//! use marcspec::{Extractor, Field, Record};
//!
//! let record = Record::builder()
//!     .control_field_str("001", "ocm00012345")
//!     .field(
//!         Field::builder("100".to_string(), '1', ' ')
//!             .subfield_str('a', "Fitzgerald, F. Scott")
//!             .subfield_str('d', "1896-1940.")
//!             .build(),
//!     )
//!     .build();
//!
//! let authors = Extractor::new("100abcd:110abcd");
//! assert_eq!(authors.values(&record), vec!["Fitzgerald, F. Scott 1896-1940"]);
//! ```
//!
//! ### Working with structured values
//!
//! ```
//! use marcspec::{extract_str, Field, Record};
//!
//! let record = Record::builder()
//!     .field(
//!         Field::builder("650".to_string(), ' ', '0')
//!             .subfield_str('a', "Whales")
//!             .subfield_str('v', "Fiction.")
//!             .build(),
//!     )
//!     .build();
//!
//! let subjects = extract_str(&record, "650av");
//! assert_eq!(subjects[0].value_for('a'), "Whales");
//! assert_eq!(subjects.to_array_trim(), vec!["Whales", "Fiction"]);
//! ```
//!
//! ### Publication year
//!
//! ```
//! use marcspec::{publication_year, ExtractionConfig, Record};
//!
//! let record = Record::builder()
//!     .control_field_str("008", "061108c200u9999nyuar ss 0 0eng ccas a ")
//!     .build();
//! assert_eq!(publication_year(&record, &ExtractionConfig::default()), Some(2005));
//! ```
//!
//! ## Modules
//!
//! - [`record`]: Decoded record model (`Record`, `Field`, `Subfield`)
//! - [`field_spec`]: Field spec compiler
//! - [`field_values`]: Extracted values and their flattening helpers
//! - [`extract`]: The extraction engine and [`Extractor`]
//! - [`field_linkage`]: 880 alternate-script resolution via subfield 6
//! - [`pub_year`]: Publication year inference from 008 and 260
//! - [`normalize`]: Punctuation trimming and duplicate-free appends
//! - [`format_codes`]: Format codes, format names and building names
//! - [`bibliographic_helpers`]: OCLC numbers, dissertation flag, period dedup
//! - [`config`]: Extraction configuration
//! - [`error`]: Error types

pub mod bibliographic_helpers;
pub mod config;
pub mod error;
pub mod extract;
pub mod field_linkage;
pub mod field_spec;
pub mod field_values;
pub mod format_codes;
pub mod normalize;
pub mod pub_year;
pub mod record;

pub use config::ExtractionConfig;
pub use error::{MarcError, Result};
pub use extract::{extract, extract_batch, extract_str, vernacular_values, Extractor};
pub use field_linkage::LinkageInfo;
pub use field_spec::{compile, FieldSpec};
pub use field_values::{FieldValue, FieldValues};
pub use normalize::trim_punctuation;
pub use pub_year::{infer_year, publication_year};
pub use record::{Field, FieldBuilder, FieldContent, Record, RecordBuilder, Subfield};

//! Common test helpers and utilities shared across test suite.

use marcspec::{Field, FieldValue, FieldValues, Record};

/// Routes library tracing events to the test output; `RUST_LOG` selects the level.
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Builds a data field with blank indicators from `(code, value)` pairs.
#[allow(dead_code)]
pub fn field(tag: &str, subfields: &[(char, &str)]) -> Field {
    subfields
        .iter()
        .fold(Field::builder(tag.to_string(), ' ', ' '), |b, (code, value)| {
            b.subfield_str(*code, value)
        })
        .build()
}

/// Joined value of every extracted occurrence, in output order.
#[allow(dead_code)]
pub fn joined(values: &FieldValues) -> Vec<String> {
    values.iter().map(FieldValue::value).collect()
}

/// Series statement with Japanese vernacular (catalog record b8060352).
///
/// The 490 and 830 each link to their own 880.
#[allow(dead_code)]
pub fn series_record() -> Record {
    Record::builder()
        .field(field(
            "490",
            &[
                ('6', "880-04"),
                ('a', "Rekishi bunka raiburarī ;"),
                ('v', "451"),
            ],
        ))
        .field(field(
            "830",
            &[
                ('6', "880-05/$1"),
                ('a', "Rekishi bunka raiburarī ;"),
                ('v', "451"),
            ],
        ))
        .field(field(
            "880",
            &[
                ('6', "490-04/$1"),
                ('a', "歴史文化ライブラリー ;"),
                ('v', "451"),
            ],
        ))
        .field(field(
            "880",
            &[
                ('6', "830-05/$1"),
                ('a', "歴史文化ライブラリー ;"),
                ('v', "451"),
            ],
        ))
        .build()
}

/// One 700 and three 880s whose occurrence numbers do not line up with it.
#[allow(dead_code)]
pub fn loosely_linked_record() -> Record {
    Record::builder()
        .field(field("700", &[('6', "880-01"), ('a', "XXX"), ('d', "xxx")]))
        .field(field("880", &[('6', "700-00/$1"), ('a', "AAA"), ('d', "aaa")]))
        .field(field("880", &[('6', "700-00/$1"), ('a', "BBB"), ('d', "bbb")]))
        .field(field("880", &[('6', "700-01/$1"), ('a', "CCC"), ('d', "ccc")]))
        .build()
}

/// A small book record with a leader, control fields, and a few data fields.
#[allow(dead_code)]
pub fn book_record() -> Record {
    Record::builder()
        .leader_str("00000nam a2200000 a 4500")
        .control_field_str("001", "ocm00012345")
        .control_field_str("008", "760629s1974    nyu           000 1 eng d")
        .field(field(
            "100",
            &[('a', "Fitzgerald, F. Scott"), ('d', "1896-1940.")],
        ))
        .field(field(
            "245",
            &[
                ('a', "The great Gatsby /"),
                ('c', "F. Scott Fitzgerald."),
            ],
        ))
        .field(field("260", &[('a', "New York :"), ('b', "Scribner,"), ('c', "1974.")]))
        .field(field("650", &[('a', "Rich people"), ('v', "Fiction.")]))
        .field(field("650", &[('a', "Long Island (N.Y.)"), ('v', "Fiction.")]))
        .build()
}

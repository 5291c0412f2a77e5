//! Integration tests for MARC 880 field linkage and vernacular resolution

mod common;

use common::{field, joined, loosely_linked_record, series_record};
use marcspec::field_linkage::{freestanding, is_vernacular_for, resolve};
use marcspec::{extract_str, vernacular_values, FieldSpec, LinkageInfo, Record};

/// Arabic title and author, romanized in the origin fields.
fn create_linked_record() -> Record {
    Record::builder()
        .field(field(
            "100",
            &[('6', "880-01"), ('a', "Sumayth, Jūn"), ('d', "1850-1925")],
        ))
        .field(field(
            "245",
            &[('6', "880-02"), ('a', "Kitāb al-ḥayāh /"), ('c', "Jūn Sumayth.")],
        ))
        .field(field(
            "880",
            &[('6', "100-01/(3/r"), ('a', "سميث، جون"), ('d', "1850-1925")],
        ))
        .field(field(
            "880",
            &[('6', "245-02/(3/r"), ('a', "كتاب الحياة /"), ('c', "جون سميث.")],
        ))
        .build()
}

#[test]
fn test_linkage_info_from_both_sides() {
    let record = create_linked_record();

    let origin = record.fields_by_tag("100").next().unwrap();
    let info = LinkageInfo::parse(origin.linkage().unwrap()).unwrap();
    assert_eq!(info.tag(), "880");
    assert_eq!(info.occurrence(), "01");

    let vernacular = record.fields_by_tag("880").next().unwrap();
    let info = LinkageInfo::parse(vernacular.linkage().unwrap()).unwrap();
    assert_eq!(info.tag(), "100");
    assert_eq!(info.occurrence(), "01");
    assert_eq!(info.script_id(), "(3");
    assert!(info.is_reverse());
}

#[test]
fn test_each_tag_gets_its_own_vernacular() {
    let record = create_linked_record();
    let values = extract_str(&record, "100ad:245a");
    assert_eq!(
        joined(&values),
        vec![
            "Sumayth, Jūn 1850-1925",
            "سميث، جون 1850-1925",
            "Kitāb al-ḥayāh /",
            "كتاب الحياة /",
        ]
    );
    assert_eq!(
        values.to_array(),
        vec![
            "Sumayth, Jūn 1850-1925",
            "سميث، جون 1850-1925",
            "Kitāb al-ḥayāh",
            "كتاب الحياة",
        ]
    );
}

#[test]
fn test_resolve_from_origin_occurrence() {
    let record = series_record();
    let f830 = record.fields_by_tag("830").next().unwrap();
    let spec = FieldSpec::parse("830av").unwrap();

    let values = resolve(&record, f830, &spec);
    assert_eq!(joined(&values), vec!["歴史文化ライブラリー ; 451"]);
}

#[test]
fn test_vernacular_values_with_loose_occurrence_numbers() {
    let record = loosely_linked_record();
    let values = vernacular_values(&record, "700abcd");
    assert_eq!(joined(&values), vec!["AAA aaa", "BBB bbb", "CCC ccc"]);
    assert!(values.iter().all(marcspec::FieldValue::is_vernacular));
}

#[test]
fn test_vernacular_values_without_origin_field() {
    let record = Record::builder()
        .field(field("880", &[('6', "700-04/$1"), ('a', "AAA"), ('b', "BBB")]))
        .build();

    assert_eq!(joined(&vernacular_values(&record, "700ab")), vec!["AAA BBB"]);
    assert_eq!(joined(&extract_str(&record, "700ab")), vec!["AAA BBB"]);
}

#[test]
fn test_vernacular_values_repeat_for_repeated_spec_tag() {
    let record = loosely_linked_record();
    let values = vernacular_values(&record, "700a:700d");
    assert_eq!(joined(&values), vec!["AAA", "BBB", "CCC", "aaa", "bbb", "ccc"]);
}

#[test]
fn test_unlinked_880_is_ignored() {
    common::init_tracing();
    let record = Record::builder()
        .field(field("245", &[('a', "Title")]))
        .field(field("880", &[('a', "no linkage")]))
        .build();

    let f880 = record.fields_by_tag("880").next().unwrap();
    assert!(!is_vernacular_for(f880, "245"));
    assert_eq!(joined(&extract_str(&record, "245a")), vec!["Title"]);
}

#[test]
fn test_freestanding_skips_880s_without_wanted_codes() {
    let record = Record::builder()
        .field(field("880", &[('6', "650-01/$1"), ('x', "only x")]))
        .field(field("880", &[('6', "650-02/$1"), ('a', "主題")]))
        .build();
    let spec = FieldSpec::parse("650a").unwrap();

    let values: Vec<_> = freestanding(&record, &spec).collect();
    assert_eq!(values.len(), 1);
    assert_eq!(values[0].value(), "主題");
}

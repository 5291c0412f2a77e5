//! Format and building lookups for index documents.
//!
//! The format code is derived from the leader's record type (position 6) and
//! bibliographic level (position 7), refined by the 007 physical description for
//! visual material. Labels and building names come from static tables built once
//! on first use.

use crate::bibliographic_helpers::is_dissertation;
use crate::config::ExtractionConfig;
use crate::record::Record;
use lazy_static::lazy_static;
use std::collections::HashMap;

/// Format code for local theses and dissertations.
pub const DISSERTATION: &str = "BTD";

/// Format code for records that match no rule.
pub const UNKNOWN: &str = "XX";

/// Label used when a code has no entry in the table.
pub const DEFAULT_FORMAT_NAME: &str = "Book";

lazy_static! {
    static ref FORMAT_NAMES: HashMap<&'static str, &'static str> = HashMap::from([
        ("AJ", "Journal"),
        ("AN", "Newspaper"),
        ("BI", "Biography"),
        ("BK", "Book"),
        ("CE", "Data File"),
        ("CR", "CDROM"),
        ("CS", "Software"),
        ("DI", "Dictionaries"),
        ("DR", "Directories"),
        ("EN", "Encyclopedias"),
        ("HT", "HathiTrust"),
        ("MN", "Maps-Atlas"),
        ("MP", "Map"),
        ("MS", "Musical Score"),
        ("MU", "Music"),
        ("MV", "Archive"),
        ("MW", "Manuscript"),
        ("MX", "Mixed Material"),
        ("PP", "Photographs & Pictorial Works"),
        ("RC", "Audio CD"),
        ("RL", "Audio LP"),
        ("RM", "Audio (music)"),
        ("RS", "Audio (spoken word)"),
        ("RU", "Audio"),
        ("SE", "Serial"),
        ("SX", "Serial"),
        ("VB", "Video (Blu-ray)"),
        ("VD", "Video (DVD)"),
        ("VG", "Video Games"),
        ("VH", "Video (VHS)"),
        ("VL", "Motion Picture"),
        ("VM", "Visual Material"),
        ("WM", "Microform"),
        ("XC", "Conference"),
        ("XS", "Statistics"),
        ("XX", "Unknown"),
        ("CF", "Computer File"),
        ("BAM", "Archives/Manuscripts"),
        ("BV", "Video"),
        ("BSR", "Sound Recording"),
        ("BP", "Periodical Title"),
        ("B3D", "3D object"),
        ("BTD", "Thesis/Dissertation"),
    ]);

    static ref BUILDINGS: HashMap<&'static str, &'static str> = HashMap::from([
        ("q", "Annex"),
        ("h", "Hay"),
        ("j", "John Carter Brown"),
        ("o", "Orwig"),
        ("r", "Rockefeller"),
        ("s", "Sciences"),
        ("a", "Hay"),
        ("cass", "Rockefeller"),
        ("chin", "Rockefeller"),
        ("chref", "Rockefeller"),
        ("cours", "Rockefeller"),
        ("eacg", "Rockefeller"),
        ("eacr", "Rockefeller"),
        ("eacs", "Rockefeller"),
        ("japan", "Rockefeller"),
        ("jaref", "Rockefeller"),
        ("jmap", "Rockefeller"),
        ("koref", "Rockefeller"),
        ("linc", "Hay"),
        ("linrf", "Hay"),
        ("lowc", "Hay"),
        ("mddvd", "Sciences"),
        ("mdvid", "Sciences"),
        ("stor", "Rockefeller"),
        ("vc", "John Carter Brown"),
        ("xdoc", "Rockefeller"),
        ("xfch", "Rockefeller"),
        ("xrom", "Rockefeller"),
        ("xxxxx", "Rockefeller"),
        ("zd", "Rockefeller"),
        ("gar", "Rockefeller"),
        ("zdcom", "Rockefeller"),
    ]);
}

const ALL_LEVELS: &[char] = &['a', 'b', 'c', 'd', 'i', 'm', 's'];

fn is_map(record_type: char, level: char) -> bool {
    matches!(record_type, 'e' | 'f') && ALL_LEVELS.contains(&level)
}

fn is_music(record_type: char, level: char) -> bool {
    matches!(record_type, 'c' | 'd' | 'i' | 'j') && ALL_LEVELS.contains(&level)
}

fn is_mixed_material(record_type: char, level: char) -> bool {
    matches!(record_type, 'b' | 'p') && matches!(level, 'a' | 'b' | 'c' | 'd' | 'm' | 's')
}

fn is_visual_material(record_type: char, level: char) -> bool {
    matches!(record_type, 'g' | 'k' | 'o' | 'r') && ALL_LEVELS.contains(&level)
}

fn is_serial(record_type: char, level: char) -> bool {
    (record_type == 'a' && matches!(level, 'b' | 's' | 'i')) || level == 'e'
}

fn is_book(record_type: char, level: char) -> bool {
    matches!(record_type, 'a' | 't') && matches!(level, 'a' | 'c' | 'd' | 'm')
}

/// Format code for a leader string.
///
/// Rules are checked in a fixed order; the first match wins. Leaders shorter
/// than eight characters fall through to [`UNKNOWN`].
///
/// # Examples
///
/// ```
/// use marcspec::format_codes::leader_format_code;
///
/// assert_eq!(leader_format_code("00000nam a2200000 a 4500"), "BK");
/// assert_eq!(leader_format_code("00000nas a2200445 i 4500"), "BP");
/// assert_eq!(leader_format_code("00000njm a2200000 a 4500"), "BSR");
/// ```
#[must_use]
pub fn leader_format_code(leader: &str) -> &'static str {
    let bytes = leader.as_bytes();
    let (record_type, level) = match (bytes.get(6), bytes.get(7)) {
        (Some(&t), Some(&l)) => (char::from(t), char::from(l)),
        _ => (' ', ' '),
    };

    match record_type {
        'm' => return "CF",
        't' | 'p' => return "BAM",
        'r' => return "B3D",
        _ => {}
    }

    if is_music(record_type, level) {
        return if record_type == 'c' { "MS" } else { "BSR" };
    }
    if is_visual_material(record_type, level) {
        return "VM";
    }
    if is_serial(record_type, level) {
        return "BP";
    }
    if is_map(record_type, level) {
        return "MP";
    }
    // Old-style codes on JCB items
    if record_type == 'a' && level == 'p' {
        return "BK";
    }
    if is_mixed_material(record_type, level) {
        return "MX";
    }
    if is_book(record_type, level) {
        return "BK";
    }
    UNKNOWN
}

/// Format code for a record.
///
/// Local dissertations win over everything else; visual material becomes video
/// (`BV`) when any 007 value mentions `v` or `m`.
#[must_use]
pub fn format_code(record: &Record, config: &ExtractionConfig) -> &'static str {
    if is_dissertation(record, config) {
        return DISSERTATION;
    }

    let code = leader_format_code(&record.leader());
    if code == "VM"
        && record
            .control_values("007")
            .any(|value| value.contains('v') || value.contains('m'))
    {
        return "BV";
    }
    code
}

/// Human-readable label for a format code.
///
/// # Examples
///
/// ```
/// use marcspec::format_codes::format_name;
///
/// assert_eq!(format_name("BSR"), "Sound Recording");
/// assert_eq!(format_name("??"), "Book");
/// ```
#[must_use]
pub fn format_name(code: &str) -> &'static str {
    FORMAT_NAMES
        .get(code)
        .copied()
        .unwrap_or(DEFAULT_FORMAT_NAME)
}

/// Building name for an item location code.
///
/// Matches case-insensitively, falling back to the code's first character.
/// Returns `None` for an empty or unknown code.
#[must_use]
pub fn building_name(location_code: &str) -> Option<&'static str> {
    let code = location_code.to_lowercase();
    let first = code.chars().next()?;
    BUILDINGS
        .get(code.as_str())
        .or_else(|| BUILDINGS.get(first.to_string().as_str()))
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Field;

    fn leader(record_type: char, level: char) -> String {
        format!("00000n{record_type}{level} a2200000 a 4500")
    }

    #[test]
    fn test_leader_rules() {
        assert_eq!(leader_format_code(&leader('m', 'm')), "CF");
        assert_eq!(leader_format_code(&leader('t', 'm')), "BAM");
        assert_eq!(leader_format_code(&leader('p', 'c')), "BAM");
        assert_eq!(leader_format_code(&leader('r', 'm')), "B3D");
        assert_eq!(leader_format_code(&leader('c', 'm')), "MS");
        assert_eq!(leader_format_code(&leader('j', 'm')), "BSR");
        assert_eq!(leader_format_code(&leader('g', 'm')), "VM");
        assert_eq!(leader_format_code(&leader('a', 's')), "BP");
        assert_eq!(leader_format_code(&leader('x', 'e')), "BP");
        assert_eq!(leader_format_code(&leader('e', 'm')), "MP");
        assert_eq!(leader_format_code(&leader('a', 'p')), "BK");
        assert_eq!(leader_format_code(&leader('b', 'm')), "MX");
        assert_eq!(leader_format_code(&leader('a', 'm')), "BK");
        assert_eq!(leader_format_code(&leader('z', 'z')), "XX");
        assert_eq!(leader_format_code("short"), "XX");
    }

    #[test]
    fn test_video_from_007() {
        let record = Record::builder()
            .leader_str(&leader('g', 'm'))
            .control_field_str("007", "vd cvaizq")
            .build();
        assert_eq!(format_code(&record, &ExtractionConfig::default()), "BV");

        let record = Record::builder().leader_str(&leader('g', 'm')).build();
        assert_eq!(format_code(&record, &ExtractionConfig::default()), "VM");
    }

    #[test]
    fn test_dissertation_wins() {
        let record = Record::builder()
            .leader_str(&leader('a', 'm'))
            .field(
                Field::builder("502".to_string(), ' ', ' ')
                    .subfield_str('a', "Thesis (Ph. D.)--Brown University, 1998.")
                    .build(),
            )
            .build();
        assert_eq!(format_code(&record, &ExtractionConfig::default()), "BTD");
        assert_eq!(format_name("BTD"), "Thesis/Dissertation");
    }

    #[test]
    fn test_building_name() {
        assert_eq!(building_name("ROCK"), Some("Rockefeller"));
        assert_eq!(building_name("jmap"), Some("Rockefeller"));
        assert_eq!(building_name("hxxx"), Some("Hay"));
        assert_eq!(building_name("9zz"), None);
        assert_eq!(building_name(""), None);
    }
}

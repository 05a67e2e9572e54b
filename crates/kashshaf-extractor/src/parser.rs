//! Parse the model's delimited reply into annotation records

use kashshaf_domain::AnnotationRecord;
use tracing::debug;

/// Separator between fields on one reply line
pub const FIELD_DELIMITER: char = '|';

/// Characters that end a reply line; `\r\n` counts as a single break
pub const LINE_BREAKS: &[char] = &[
    '\n', '\r', '\u{0b}', '\u{0c}', '\u{1c}', '\u{1d}', '\u{1e}', '\u{85}', '\u{2028}', '\u{2029}',
];

/// Records parsed from one reply, plus how many lines were dropped
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedResponse {
    /// One record per qualifying line, in reply order
    pub records: Vec<AnnotationRecord>,

    /// Non-blank lines with fewer than four fields
    pub skipped_lines: usize,
}

impl ParsedResponse {
    /// True if no line qualified
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Parse a reply into records, counting the lines that did not qualify
///
/// Lines end at any of [`LINE_BREAKS`]. Each line is split on `|` and every
/// segment is trimmed. Lines with at least four segments become a record
/// built from the first four; the rest are skipped. Category values are not checked against the taxonomy.
pub fn parse_response(response: &str) -> ParsedResponse {
    let mut parsed = ParsedResponse::default();

    for (idx, line) in reply_lines(response).enumerate() {
        let segments: Vec<&str> = line.split(FIELD_DELIMITER).map(str::trim).collect();

        match AnnotationRecord::from_segments(&segments) {
            Some(record) => parsed.records.push(record),
            None if line.trim().is_empty() => {}
            None => {
                debug!(
                    "Skipping reply line {}: {} field(s), need 4",
                    idx + 1,
                    segments.len()
                );
                parsed.skipped_lines += 1;
            }
        }
    }

    parsed
}

fn reply_lines(response: &str) -> impl Iterator<Item = &str> {
    response
        .split("\r\n")
        .flat_map(|chunk| chunk.split(LINE_BREAKS))
}

/// Parse a reply into records only
pub fn parse_records(response: &str) -> Vec<AnnotationRecord> {
    parse_response(response).records
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn field() -> impl Strategy<Value = String> {
        r"[^|\r\n\x0B\x0C\x1C-\x1E\x{85}\x{2028}\x{2029}]{0,12}"
    }

    proptest! {
        /// Property: every well-formed line yields exactly one record, in order
        #[test]
        fn test_well_formed_lines(
            rows in proptest::collection::vec(
                proptest::collection::vec(field(), 4..7),
                0..15,
            )
        ) {
            let response = rows
                .iter()
                .map(|fields| fields.join("|"))
                .collect::<Vec<_>>()
                .join("\n");
            let parsed = parse_response(&response);

            prop_assert_eq!(parsed.records.len(), rows.len());
            prop_assert_eq!(parsed.skipped_lines, 0);
            for (record, fields) in parsed.records.iter().zip(&rows) {
                prop_assert_eq!(record.locator.as_str(), fields[0].trim());
                prop_assert_eq!(record.category.as_str(), fields[1].trim());
                prop_assert_eq!(record.title.as_str(), fields[2].trim());
                prop_assert_eq!(record.rationale.as_str(), fields[3].trim());
            }
        }

        /// Property: lines with fewer than four fields never yield a record
        #[test]
        fn test_short_lines_never_emit(
            rows in proptest::collection::vec(
                proptest::collection::vec(field(), 1..4),
                0..15,
            )
        ) {
            let response = rows
                .iter()
                .map(|fields| fields.join("|"))
                .collect::<Vec<_>>()
                .join("\n");
            prop_assert!(parse_response(&response).records.is_empty());
        }
    }
}

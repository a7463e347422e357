//! The fixed-format table listing.
//!
//! One line per code:
//!
//! ```text
//! {code:02x} LOG{arity}[ topic{i}]*
//! ```
//!
//! Lowercase hex, indices ascending, single spaces, no trailing space. The
//! listing is the published form of the byte table (docs, fixtures, CLI
//! output), so it is treated as a wire format: the renderer is exact and
//! the parser is strict.

use std::fmt::Write as _;

use chaintrigger_core::{TopicSubset, TriggerCode, TriggerCodec, TriggerPattern};
use thiserror::Error;

/// Errors from parsing a table listing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListingError {
    #[error("malformed listing line: {reason}")]
    MalformedLine { reason: String },

    #[error("unknown token '{token}'")]
    UnknownToken { token: String },

    #[error("topic{index} repeats or breaks ascending order")]
    TopicOutOfOrder { index: u8 },

    #[error("topic{index} not below LOG{arity} arity")]
    TopicOutOfRange { index: u8, arity: u8 },

    #[error("line {line}: {source}")]
    AtLine {
        line: usize,
        #[source]
        source: Box<ListingError>,
    },
}

/// Render one listing line, e.g. `06 LOG2 topic0 topic1`.
pub fn format_line(code: TriggerCode, pattern: &TriggerPattern) -> String {
    let mut line = format!("{code} LOG{}", pattern.arity);
    for index in pattern.topics.indices() {
        let _ = write!(line, " topic{index}");
    }
    line
}

/// Render a whole table, one newline-terminated line per code.
pub fn format_table(codec: &TriggerCodec) -> String {
    let mut out = String::new();
    for (code, pattern) in codec.iter() {
        out.push_str(&format_line(code, &pattern));
        out.push('\n');
    }
    out
}

/// Parse one listing line back into its assignment.
///
/// Strict inverse of [`format_line`]: two lowercase hex digits, `LOG<d>`,
/// ascending `topic<i>` tokens with `i` below the arity, single spaces.
/// The claimed code is returned as written; checking it against a table is
/// the caller's decision.
pub fn parse_line(line: &str) -> Result<(TriggerCode, TriggerPattern), ListingError> {
    let mut tokens = line.split(' ');

    let code_token = match tokens.next() {
        Some(t) if !t.is_empty() => t,
        _ => {
            return Err(ListingError::MalformedLine {
                reason: "missing code token".into(),
            })
        }
    };
    let code = parse_code(code_token)?;

    let log_token = tokens.next().ok_or_else(|| ListingError::MalformedLine {
        reason: "missing LOG token".into(),
    })?;
    let arity = parse_arity(log_token)?;

    let mut topics = TopicSubset::EMPTY;
    let mut previous: Option<u8> = None;
    for token in tokens {
        let index = parse_topic(token)?;
        if previous.is_some_and(|p| index <= p) {
            return Err(ListingError::TopicOutOfOrder { index });
        }
        if index >= arity {
            return Err(ListingError::TopicOutOfRange { index, arity });
        }
        topics.insert(index);
        previous = Some(index);
    }

    Ok((code, TriggerPattern { arity, topics }))
}

/// Parse a full listing, one assignment per line.
///
/// Empty lines are skipped; errors carry the 1-based line number.
pub fn parse_table(text: &str) -> Result<Vec<(TriggerCode, TriggerPattern)>, ListingError> {
    let mut entries = Vec::new();
    for (number, line) in text.lines().enumerate() {
        if line.is_empty() {
            continue;
        }
        let entry = parse_line(line).map_err(|source| ListingError::AtLine {
            line: number + 1,
            source: Box::new(source),
        })?;
        entries.push(entry);
    }
    Ok(entries)
}

fn parse_code(token: &str) -> Result<TriggerCode, ListingError> {
    let bytes = token.as_bytes();
    let well_formed =
        bytes.len() == 2 && bytes.iter().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'));
    if !well_formed {
        return Err(ListingError::MalformedLine {
            reason: format!("code '{token}' is not two lowercase hex digits"),
        });
    }
    let value = u8::from_str_radix(token, 16).map_err(|_| ListingError::MalformedLine {
        reason: format!("code '{token}' is not two lowercase hex digits"),
    })?;
    Ok(TriggerCode::new(value))
}

fn parse_arity(token: &str) -> Result<u8, ListingError> {
    let malformed = || ListingError::MalformedLine {
        reason: format!("expected LOG<arity>, got '{token}'"),
    };
    let digits = token.strip_prefix("LOG").ok_or_else(malformed)?;
    if digits.len() != 1 {
        return Err(malformed());
    }
    let digit = digits.as_bytes()[0];
    // Single-byte tables stop at arity 7.
    if !(b'0'..=b'7').contains(&digit) {
        return Err(malformed());
    }
    Ok(digit - b'0')
}

fn parse_topic(token: &str) -> Result<u8, ListingError> {
    let unknown = || ListingError::UnknownToken {
        token: token.to_string(),
    };
    let digits = token.strip_prefix("topic").ok_or_else(unknown)?;
    if digits.len() != 1 {
        return Err(unknown());
    }
    let digit = digits.as_bytes()[0];
    if !digit.is_ascii_digit() {
        return Err(unknown());
    }
    Ok(digit - b'0')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::log_trigger_table;

    fn pattern(arity: u8, indices: &[u8]) -> TriggerPattern {
        TriggerPattern {
            arity,
            topics: TopicSubset::from_indices(indices.iter().copied()),
        }
    }

    #[test]
    fn format_known_lines() {
        assert_eq!(format_line(TriggerCode::new(0x00), &pattern(0, &[])), "00 LOG0");
        assert_eq!(format_line(TriggerCode::new(0x03), &pattern(2, &[])), "03 LOG2");
        assert_eq!(
            format_line(TriggerCode::new(0x06), &pattern(2, &[0, 1])),
            "06 LOG2 topic0 topic1"
        );
        assert_eq!(
            format_line(TriggerCode::new(0x18), &pattern(4, &[1, 3])),
            "18 LOG4 topic1 topic3"
        );
    }

    #[test]
    fn format_table_is_one_line_per_code() {
        let text = format_table(log_trigger_table());
        assert_eq!(text.lines().count(), 31);
        assert!(text.ends_with('\n'));
        assert!(!text.contains(" \n"), "no trailing spaces");
    }

    #[test]
    fn parse_inverts_format() {
        for (code, pat) in log_trigger_table().iter() {
            let line = format_line(code, &pat);
            let (parsed_code, parsed_pattern) = parse_line(&line).unwrap();
            assert_eq!(parsed_code, code);
            assert_eq!(parsed_pattern, pat);
        }
    }

    #[test]
    fn parse_line_known_assignments() {
        let (code, pat) = parse_line("0e LOG3 topic0 topic1 topic2").unwrap();
        assert_eq!(code.value(), 0x0e);
        assert_eq!(pat, pattern(3, &[0, 1, 2]));

        let (code, pat) = parse_line("01 LOG1").unwrap();
        assert_eq!(code.value(), 0x01);
        assert_eq!(pat, pattern(1, &[]));
    }

    #[test]
    fn parse_rejects_uppercase_hex() {
        assert!(matches!(
            parse_line("0A LOG3"),
            Err(ListingError::MalformedLine { .. })
        ));
    }

    #[test]
    fn parse_rejects_bad_code_width() {
        assert!(parse_line("6 LOG2").is_err());
        assert!(parse_line("006 LOG2").is_err());
    }

    #[test]
    fn parse_rejects_double_and_trailing_spaces() {
        assert!(parse_line("06  LOG2").is_err());
        assert!(parse_line("00 LOG0 ").is_err());
    }

    #[test]
    fn parse_rejects_bad_log_token() {
        assert!(parse_line("00 LOG").is_err());
        assert!(parse_line("00 LOG8").is_err());
        assert!(parse_line("00 LOGX").is_err());
        assert!(parse_line("00 log0").is_err());
    }

    #[test]
    fn parse_rejects_unknown_tokens() {
        assert!(matches!(
            parse_line("02 LOG1 slot0"),
            Err(ListingError::UnknownToken { .. })
        ));
        assert!(parse_line("02 LOG1 topicx").is_err());
        assert!(parse_line("02 LOG1 topic10").is_err());
    }

    #[test]
    fn parse_rejects_unordered_or_repeated_topics() {
        assert!(matches!(
            parse_line("06 LOG2 topic1 topic0"),
            Err(ListingError::TopicOutOfOrder { index: 0 })
        ));
        assert!(matches!(
            parse_line("06 LOG2 topic0 topic0"),
            Err(ListingError::TopicOutOfOrder { index: 0 })
        ));
    }

    #[test]
    fn parse_rejects_topic_at_or_above_arity() {
        assert!(matches!(
            parse_line("02 LOG1 topic1"),
            Err(ListingError::TopicOutOfRange { index: 1, arity: 1 })
        ));
        assert!(parse_line("00 LOG0 topic0").is_err());
    }

    #[test]
    fn parse_table_skips_empty_lines_and_numbers_errors() {
        let entries = parse_table("00 LOG0\n\n01 LOG1\n").unwrap();
        assert_eq!(entries.len(), 2);

        let err = parse_table("00 LOG0\n01 LOG1\nbogus\n").unwrap_err();
        match err {
            ListingError::AtLine { line, .. } => assert_eq!(line, 3),
            other => panic!("expected AtLine, got {other:?}"),
        }
    }

    #[test]
    fn parse_table_round_trips_the_log_table() {
        let table = log_trigger_table();
        let entries = parse_table(&format_table(table)).unwrap();
        assert_eq!(entries.len(), table.len());
        for (code, pat) in entries {
            assert_eq!(table.decode(code).unwrap(), pat);
        }
    }
}

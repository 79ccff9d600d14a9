//! Adversarial: malformed or hostile clause text is rejected with a precise
//! position, and never panics.

use proptest::prelude::*;
use qext_parser::{parse_extensions, ClauseParser, ParseErrorKind, ParserConfig};

#[test]
fn out_of_order_clauses_are_not_reordered() {
    let err = parse_extensions("USAGE LIMIT 5 CONSUME AFTER 1 USE").unwrap_err();
    assert_eq!(
        err.kind,
        ParseErrorKind::OutOfOrder {
            clause: "CONSUME AFTER".into()
        }
    );
    assert_eq!(err.position, 14);
}

#[test]
fn repeated_clause_is_rejected() {
    let err = parse_extensions("USAGE LIMIT 5 USAGE LIMIT 6").unwrap_err();
    assert!(matches!(err.kind, ParseErrorKind::OutOfOrder { .. }));
}

#[test]
fn truncated_clause_reports_end_of_input() {
    let err = parse_extensions("CONSUME AFTER").unwrap_err();
    assert_eq!(err.position, 13);
    assert!(err.is_unexpected_eof());
}

#[test]
fn garbage_after_clauses_is_trailing_input() {
    let err = parse_extensions("USAGE LIMIT 5 ; DROP TABLE users").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::TrailingInput("`;`".into()));
    assert_eq!(err.position, 14);
}

#[test]
fn unterminated_parameter_string() {
    let err = parse_extensions(r#"PROOF ATTACHED T(k="open"#).unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::UnterminatedString);
    assert_eq!(err.position, 19);
}

#[test]
fn overflowing_count_is_rejected() {
    let err = parse_extensions("CONSUME AFTER 18446744073709551616 USE").unwrap_err();
    assert!(matches!(err.kind, ParseErrorKind::IntegerOutOfRange(_)));
    assert_eq!(err.position, 14);
    assert!(parse_extensions("CONSUME AFTER 18446744073709551615 USE").is_ok());
}

#[test]
fn negative_count_is_a_syntax_error() {
    let err = parse_extensions("USAGE LIMIT -1").unwrap_err();
    assert_eq!(err.position, 12);
}

#[test]
fn missing_separator_in_effects() {
    let err = parse_extensions("EFFECTS { Read Write }").unwrap_err();
    assert_eq!(err.position, 15);
    assert_eq!(err.message(), "expected ',' or '}', found `Write`");
}

#[test]
fn oversized_input_is_refused_before_parsing() {
    let parser = ClauseParser::with_config(ParserConfig::default().with_max_input_bytes(16));
    let err = parser.parse("CONSUME AFTER 1 USE").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::InputTooLong { len: 19, max: 16 });
    assert_eq!(err.position, 0);
    assert!(parser.parse("USAGE LIMIT 1").is_ok());
}

#[test]
fn identifiers_must_not_start_with_digit() {
    assert!(parse_extensions("WITH SESSION 1Protocol").is_err());
    assert!(parse_extensions("IN TRANSACTION").is_err());
}

proptest! {
    #[test]
    fn arbitrary_text_never_panics(text in "\\PC{0,64}") {
        if let Err(err) = parse_extensions(&text) {
            prop_assert!(err.position <= text.len());
            prop_assert!(!err.message().is_empty());
        }
    }

    #[test]
    fn keyword_soup_never_panics(
        words in prop::collection::vec(
            prop::sample::select(vec![
                "CONSUME", "AFTER", "USE", "WITH", "SESSION", "EFFECTS", "{", "}", ",",
                "IN", "TRANSACTION", "PROOF", "ATTACHED", "(", ")", "=", "\"v\"", "USAGE",
                "LIMIT", "7", "Read", "Active",
            ]),
            0..16,
        )
    ) {
        let text = words.join(" ");
        if let Err(err) = parse_extensions(&text) {
            prop_assert!(err.position <= text.len());
        }
    }

    #[test]
    fn parsing_is_deterministic(text in "[A-Z {}(),=\"0-9a-z]{0,48}") {
        prop_assert_eq!(parse_extensions(&text), parse_extensions(&text));
    }
}

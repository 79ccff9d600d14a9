//! E2E: reference clause suffixes through parse and validate.

use qext_checker::{parse_and_validate, validate, CheckError, Violation, ViolationKind};
use qext_parser::parse_extensions;
use qext_types::{EffectLabel, ExtensionAnnotations, SessionProtocol, TransactionState};

const MAXIMAL: &str = "CONSUME AFTER 1 USE WITH SESSION ReadOnlyProtocol EFFECTS { Read, Cite } \
                       IN TRANSACTION Committed PROOF ATTACHED IntegrityTheorem USAGE LIMIT 100";

#[test]
fn empty_input_is_empty_annotations() {
    let parsed = parse_extensions("").unwrap();
    assert_eq!(parsed, ExtensionAnnotations::EMPTY);
    assert!(validate(parsed).is_ok());
    assert_eq!(parse_extensions("  \n\t ").unwrap(), ExtensionAnnotations::EMPTY);
}

#[test]
fn consume_after_one_use() {
    let parsed = parse_and_validate("CONSUME AFTER 1 USE").unwrap();
    assert_eq!(parsed.consume_after.map(|s| s.count), Some(1));
    assert_eq!(parsed.clause_count(), 1);
}

#[test]
fn limit_below_consume_count_is_usage_violation() {
    let err = parse_and_validate("CONSUME AFTER 10 USE USAGE LIMIT 5").unwrap_err();
    match err {
        CheckError::Violation(v) => {
            assert_eq!(v.kind, ViolationKind::Usage);
            assert!(v.message.contains("10"));
            assert!(v.message.contains('5'));
        }
        other => panic!("expected usage violation, got {}", other),
    }
}

#[test]
fn all_builtin_effects_declared() {
    let parsed =
        parse_and_validate("EFFECTS { Read, Write, Cite, Audit, Transform, Federate }").unwrap();
    let effects = parsed.effects.unwrap();
    assert_eq!(effects.len(), 6);
    for label in EffectLabel::BUILTIN {
        assert!(effects.contains(&label));
    }
}

#[test]
fn bogus_state_parses_as_custom_then_fails() {
    let parsed = parse_extensions("IN TRANSACTION Bogus").unwrap();
    assert_eq!(
        parsed.modal.as_ref().map(|m| &m.state),
        Some(&TransactionState::Custom("Bogus".into()))
    );
    assert_eq!(
        parse_and_validate("IN TRANSACTION Bogus").unwrap_err(),
        CheckError::Violation(Violation::modal("Unknown transaction state: Bogus"))
    );
}

#[test]
fn maximal_input_populates_every_field() {
    let parsed = parse_and_validate(MAXIMAL).unwrap();
    assert_eq!(parsed.clause_count(), 6);
    assert_eq!(parsed.consume_after.map(|s| s.count), Some(1));
    assert_eq!(parsed.session, Some(SessionProtocol::ReadOnly));
    assert_eq!(parsed.effects.as_ref().map(|e| e.len()), Some(2));
    assert_eq!(
        parsed.modal.as_ref().map(|m| m.state.clone()),
        Some(TransactionState::Committed)
    );
    assert_eq!(
        parsed.proof.as_ref().map(|p| p.name.as_str()),
        Some("IntegrityTheorem")
    );
    assert_eq!(parsed.usage_limit.map(|l| l.limit), Some(100));
}

#[test]
fn maximal_input_renders_canonically() {
    let parsed = parse_extensions(MAXIMAL).unwrap();
    let canonical = "CONSUME AFTER 1 USE WITH SESSION ReadOnlyProtocol EFFECTS { Read, Cite } \
                     IN TRANSACTION Committed PROOF ATTACHED IntegrityTheorem USAGE LIMIT 100";
    assert_eq!(parsed.to_string(), canonical);
}

#[test]
fn subset_of_clauses_in_order() {
    let parsed =
        parse_and_validate("WITH SESSION BatchProtocol PROOF ATTACHED Audit(by=\"ops\")").unwrap();
    assert_eq!(parsed.session, Some(SessionProtocol::Batch));
    assert!(parsed.consume_after.is_none());
    assert!(parsed.effects.is_none());
    assert_eq!(parsed.proof.unwrap().param("by"), Some("ops"));
}

#[test]
fn unknown_protocol_is_session_violation() {
    let err = parse_and_validate("WITH SESSION GossipProtocol").unwrap_err();
    assert_eq!(
        err,
        CheckError::Violation(Violation::session("Unknown protocol: GossipProtocol"))
    );
}

#[test]
fn empty_effects_parse_but_fail_validation() {
    let parsed = parse_extensions("EFFECTS { }").unwrap();
    assert_eq!(parsed.effects.as_ref().map(|e| e.is_empty()), Some(true));
    let err = parse_and_validate("EFFECTS {}").unwrap_err();
    assert_eq!(err.violation_kind(), Some(ViolationKind::Effect));
    assert!(err.to_string().contains("use no clause instead of an empty one"));
}

#[test]
fn zero_consume_count_is_linearity_violation() {
    let err = parse_and_validate("CONSUME AFTER 0 USE").unwrap_err();
    assert_eq!(err.violation_kind(), Some(ViolationKind::Linearity));
}

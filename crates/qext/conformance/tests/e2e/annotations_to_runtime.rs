//! E2E: validated annotations drive the runtime entities an execution engine
//! would thread through a query plan.

use chrono::{Duration, Utc};
use qext_checker::parse_and_validate;
use qext_semantics::{
    attach_proof, integrity_hash, verify_freshness_at, verify_integrity, AuthToken,
    BoundedResource, EffectLog, GuardedSession, LinConn, QueryKind, Scope, SessionState, Theorem,
    TheoremKind,
};
use qext_types::EffectLabel;

#[test]
fn usage_annotations_become_budgets() {
    let annotations = parse_and_validate("CONSUME AFTER 2 USE USAGE LIMIT 5").unwrap();
    let spec = annotations.consume_after.unwrap();
    let limit = annotations.usage_limit.unwrap();

    let pool = BoundedResource::from_limit(&limit, "db");
    let (for_conn, rest) = pool.split(spec.count).unwrap();
    assert_eq!(rest.remaining(), 3);

    let conn = LinConn::from(for_conn);
    let (_, conn) = conn.use_conn(|_| ()).unwrap();
    let (_, conn) = conn.use_conn(|_| ()).unwrap();
    assert_eq!(conn.close_conn().unwrap(), "db");
}

#[test]
fn session_clause_guards_the_session() {
    let annotations = parse_and_validate("WITH SESSION ReadOnlyProtocol").unwrap();
    let protocol = annotations.session.unwrap();

    let session = GuardedSession::new(protocol.clone())
        .auth(AuthToken::new("reader"))
        .unwrap()
        .begin_tx()
        .unwrap();
    let (rows, session) = session.query(QueryKind::Read, |_| vec![1, 2, 3]).unwrap();
    assert_eq!(rows.len(), 3);
    let session = session.commit().unwrap().close().unwrap();
    assert_eq!(session.state(), SessionState::Closed);

    let writer = GuardedSession::new(protocol)
        .auth(AuthToken::new("writer"))
        .unwrap()
        .begin_tx()
        .unwrap();
    let rejected = writer.query(QueryKind::Write, |_| ()).unwrap_err();
    assert!(rejected.to_string().contains("ReadOnlyProtocol"));
    assert!(rejected.to_string().contains("write query"));
    let writer = rejected.into_handle().rollback().unwrap().close().unwrap();
    assert_eq!(writer.state(), SessionState::Closed);
}

#[test]
fn effect_clause_checks_performed_effects() {
    let annotations = parse_and_validate("EFFECTS { Read, Cite }").unwrap();
    let declared = annotations.effects.unwrap();

    let mut log = EffectLog::new();
    log.record(EffectLabel::Read);
    log.record(EffectLabel::Cite);
    assert!(log.verify(&declared).is_ok());

    log.record(EffectLabel::Write);
    assert!(log.verify(&declared).is_err());
}

#[test]
fn modal_clause_opens_a_scope() {
    let annotations = parse_and_validate("IN TRANSACTION ReadSnapshot").unwrap();
    let scope = Scope::from_decl(&annotations.modal.unwrap());
    let mut row = scope.bind(String::from("alice"));
    assert_eq!(scope.read(&row, |r| r.len()).unwrap(), 5);
    assert!(scope.write(&mut row, |r| r.push('!')).is_err());
    assert_eq!(row.extract(scope.evidence()).unwrap(), "alice");
}

#[test]
fn proof_clause_resolves_and_verifies() {
    let body = b"result-set";
    let hash = integrity_hash(body);
    let text = format!("PROOF ATTACHED IntegrityTheorem(hash=\"{}\")", hash);
    let annotations = parse_and_validate(&text).unwrap();

    let theorem = Theorem::from_ref(&annotations.proof.unwrap()).unwrap();
    let proved = attach_proof(body.to_vec(), theorem);
    assert!(verify_integrity(&hash, proved.theorem()).is_ok());

    let freshness = parse_and_validate("PROOF ATTACHED FreshnessTheorem(max_age=\"60\")").unwrap();
    let theorem = Theorem::from_ref(&freshness.proof.unwrap()).unwrap();
    let multi = proved.attach(theorem);
    let now = Utc::now();
    let freshness = multi.find(TheoremKind::Freshness).unwrap();
    assert!(verify_freshness_at(now - Duration::seconds(59), now, freshness).is_ok());
    assert!(verify_freshness_at(now - Duration::seconds(61), now, freshness).is_err());
}

#[test]
fn bare_integrity_clause_resolves_against_the_result() {
    let annotations = parse_and_validate(
        "CONSUME AFTER 1 USE WITH SESSION ReadOnlyProtocol EFFECTS { Read, Cite } \
         IN TRANSACTION Committed PROOF ATTACHED IntegrityTheorem USAGE LIMIT 100",
    )
    .unwrap();
    let reference = annotations.proof.unwrap();
    assert!(Theorem::from_ref(&reference).is_err());

    let body = b"result-set";
    let theorem = Theorem::from_ref_for_content(&reference, body).unwrap();
    let proved = attach_proof(body.to_vec(), theorem);
    assert!(verify_integrity(&integrity_hash(proved.value()), proved.theorem()).is_ok());
    assert!(verify_integrity(&integrity_hash(b"tampered"), proved.theorem()).is_err());
}

//! Property tests: the session machine's legal paths always close, and its
//! illegal transitions are always rejected.

use proptest::prelude::*;
use qext_conformance::arb_known_protocol;
use qext_semantics::{
    protocol_permits, AuthToken, GuardedSession, QueryKind, Rejected, Session, SessionError,
    SessionImpl, SessionOp, SessionState,
};

fn arb_op() -> impl Strategy<Value = SessionOp> {
    prop_oneof![
        Just(SessionOp::Auth),
        Just(SessionOp::BeginTx),
        Just(SessionOp::Query(QueryKind::Read)),
        Just(SessionOp::Query(QueryKind::Write)),
        Just(SessionOp::Commit),
        Just(SessionOp::Rollback),
        Just(SessionOp::Close),
    ]
}

fn apply(
    session: SessionImpl,
    op: SessionOp,
) -> Result<SessionImpl, Rejected<SessionError, SessionImpl>> {
    match op {
        SessionOp::Auth => session.auth(AuthToken::new("t")),
        SessionOp::BeginTx => session.begin_tx(),
        SessionOp::Query(kind) => session.query(kind, |_| ()).map(|(_, s)| s),
        SessionOp::Commit => session.commit(),
        SessionOp::Rollback => session.rollback(),
        SessionOp::Close => session.close(),
    }
}

proptest! {
    #[test]
    fn happy_path_always_reaches_closed(queries in 0usize..20) {
        let mut session = SessionImpl::new()
            .auth(AuthToken::new("token"))
            .unwrap()
            .begin_tx()
            .unwrap();
        for i in 0..queries {
            let (seen, next) = session.query(QueryKind::Read, |_| i).unwrap();
            prop_assert_eq!(seen, i);
            session = next;
        }
        let session = session.commit().unwrap().close().unwrap();
        prop_assert_eq!(session.state(), SessionState::Closed);
    }

    #[test]
    fn typestate_happy_path_matches_runtime_machine(queries in 0usize..20) {
        let mut session = Session::new().auth(AuthToken::new("token")).begin_tx();
        for _ in 0..queries {
            let ((), next) = session.query(|_| ());
            session = next;
        }
        let closed: SessionImpl = session.commit().close().into();
        prop_assert!(closed.is_closed());
    }

    #[test]
    fn close_in_transaction_is_always_rejected(queries in 0usize..10) {
        let mut session = SessionImpl::new()
            .auth(AuthToken::new("token"))
            .unwrap()
            .begin_tx()
            .unwrap();
        for _ in 0..queries {
            session = session.query(QueryKind::Write, |_| ()).unwrap().1;
        }
        prop_assert!(!session.can(SessionOp::Close));
        prop_assert!(session.close().is_err());
    }

    /// Random op sequences: the machine accepts an op exactly when `can` says so.
    #[test]
    fn can_predicts_every_transition(ops in prop::collection::vec(arb_op(), 0..30)) {
        let mut session = SessionImpl::new();
        for op in ops {
            let allowed = session.can(op);
            let before = session.state();
            match apply(session, op) {
                Ok(next) => {
                    prop_assert!(allowed, "{} accepted in {}", op, before);
                    session = next;
                }
                Err(rejected) => {
                    prop_assert!(!allowed, "{} rejected in {}", op, before);
                    prop_assert_eq!(
                        &rejected.error,
                        &SessionError::IllegalTransition { state: before, operation: op }
                    );
                    // a refused transition leaves the session where it was
                    session = rejected.into_handle();
                    prop_assert_eq!(session.state(), before);
                }
            }
        }
    }

    #[test]
    fn guarded_writes_follow_protocol_table(protocol in arb_known_protocol()) {
        let session = GuardedSession::new(protocol.clone())
            .auth(AuthToken::new("token"))
            .unwrap()
            .begin_tx()
            .unwrap();
        let writes = protocol_permits(&protocol, SessionOp::Query(QueryKind::Write));
        let result = session.query(QueryKind::Write, |_| ());
        prop_assert_eq!(result.is_ok(), writes);
        if let Err(rejected) = result {
            prop_assert!(rejected.error.is_protocol_violation());
            let session = rejected.into_handle();
            prop_assert_eq!(session.state(), SessionState::InTransaction);
            prop_assert!(session.commit().is_ok());
        }
    }
}

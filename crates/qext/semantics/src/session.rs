//! Session protocol state machine.
//!
//! ```text
//! Fresh --auth--> Authenticated --begin_tx--> InTransaction --commit--> Committed
//!   |                  |                        |   ^  |                  |
//!   |                  |                        query  +--rollback--> RolledBack
//!   +------------------+-------------close--------------------------------+--> Closed
//! ```
//!
//! Two renditions share the same transitions:
//! - [`SessionImpl`], a tagged union whose transitions check the current state
//!   at runtime and return [`SessionError::IllegalTransition`];
//! - [`Session<S>`], one handle type per state, where an illegal call (such as
//!   `close` while in a transaction) does not exist and fails to compile.
//!
//! Protocol compliance is layered on top by [`GuardedSession`].

use std::fmt;

use qext_types::SessionProtocol;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{Rejected, SessionError};

/// Opaque credential presented at `auth`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Identifier assigned when a transaction begins.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionId(Uuid);

impl TransactionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tx:{}", self.0)
    }
}

/// State tag of a session, without payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionState {
    Fresh,
    Authenticated,
    InTransaction,
    Committed,
    RolledBack,
    Closed,
}

impl SessionState {
    /// Does the base machine define `op` from this state?
    pub fn permits(&self, op: SessionOp) -> bool {
        match op {
            SessionOp::Auth => *self == SessionState::Fresh,
            SessionOp::BeginTx => *self == SessionState::Authenticated,
            SessionOp::Query(_) | SessionOp::Commit | SessionOp::Rollback => {
                *self == SessionState::InTransaction
            }
            SessionOp::Close => matches!(
                self,
                SessionState::Fresh
                    | SessionState::Authenticated
                    | SessionState::Committed
                    | SessionState::RolledBack
            ),
        }
    }

    pub fn is_terminal(&self) -> bool {
        *self == SessionState::Closed
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Fresh => "Fresh",
            SessionState::Authenticated => "Authenticated",
            SessionState::InTransaction => "InTransaction",
            SessionState::Committed => "Committed",
            SessionState::RolledBack => "RolledBack",
            SessionState::Closed => "Closed",
        };
        write!(f, "{}", name)
    }
}

/// Whether a query reads or writes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QueryKind {
    Read,
    Write,
}

/// A transition of the session machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionOp {
    Auth,
    BeginTx,
    Query(QueryKind),
    Commit,
    Rollback,
    Close,
}

impl fmt::Display for SessionOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionOp::Auth => write!(f, "auth"),
            SessionOp::BeginTx => write!(f, "begin_tx"),
            SessionOp::Query(QueryKind::Read) => write!(f, "read query"),
            SessionOp::Query(QueryKind::Write) => write!(f, "write query"),
            SessionOp::Commit => write!(f, "commit"),
            SessionOp::Rollback => write!(f, "rollback"),
            SessionOp::Close => write!(f, "close"),
        }
    }
}

/// Runtime-guarded session. Created `Fresh`; `Closed` is terminal.
#[derive(Debug, Default, PartialEq, Eq)]
pub enum SessionImpl {
    #[default]
    Fresh,
    Authenticated {
        token: AuthToken,
    },
    InTransaction {
        token: AuthToken,
        tx: TransactionId,
        queries: u64,
    },
    Committed {
        token: AuthToken,
        tx: TransactionId,
    },
    RolledBack {
        token: AuthToken,
        tx: TransactionId,
    },
    Closed,
}

impl SessionImpl {
    pub fn new() -> Self {
        SessionImpl::Fresh
    }

    pub fn state(&self) -> SessionState {
        match self {
            SessionImpl::Fresh => SessionState::Fresh,
            SessionImpl::Authenticated { .. } => SessionState::Authenticated,
            SessionImpl::InTransaction { .. } => SessionState::InTransaction,
            SessionImpl::Committed { .. } => SessionState::Committed,
            SessionImpl::RolledBack { .. } => SessionState::RolledBack,
            SessionImpl::Closed => SessionState::Closed,
        }
    }

    /// Would `op` be accepted from the current state?
    pub fn can(&self, op: SessionOp) -> bool {
        self.state().permits(op)
    }

    pub fn is_closed(&self) -> bool {
        self.state().is_terminal()
    }

    pub fn token(&self) -> Option<&AuthToken> {
        match self {
            SessionImpl::Authenticated { token }
            | SessionImpl::InTransaction { token, .. }
            | SessionImpl::Committed { token, .. }
            | SessionImpl::RolledBack { token, .. } => Some(token),
            SessionImpl::Fresh | SessionImpl::Closed => None,
        }
    }

    pub fn transaction(&self) -> Option<TransactionId> {
        match self {
            SessionImpl::InTransaction { tx, .. }
            | SessionImpl::Committed { tx, .. }
            | SessionImpl::RolledBack { tx, .. } => Some(*tx),
            _ => None,
        }
    }

    fn illegal(self, operation: SessionOp) -> Rejected<SessionError, Self> {
        warn!(state = %self.state(), %operation, "Illegal session transition");
        let error = SessionError::IllegalTransition {
            state: self.state(),
            operation,
        };
        Rejected::new(error, self)
    }

    /// `Fresh -> Authenticated`
    pub fn auth(self, token: AuthToken) -> Result<Self, Rejected<SessionError, Self>> {
        match self {
            SessionImpl::Fresh => {
                debug!("Session authenticated");
                Ok(SessionImpl::Authenticated { token })
            }
            other => Err(other.illegal(SessionOp::Auth)),
        }
    }

    /// `Authenticated -> InTransaction`
    pub fn begin_tx(self) -> Result<Self, Rejected<SessionError, Self>> {
        match self {
            SessionImpl::Authenticated { token } => {
                let tx = TransactionId::generate();
                debug!(tx = %tx, "Transaction begun");
                Ok(SessionImpl::InTransaction {
                    token,
                    tx,
                    queries: 0,
                })
            }
            other => Err(other.illegal(SessionOp::BeginTx)),
        }
    }

    /// `InTransaction -> InTransaction`, returning the query's result.
    pub fn query<R>(
        self,
        kind: QueryKind,
        f: impl FnOnce(&TransactionId) -> R,
    ) -> Result<(R, Self), Rejected<SessionError, Self>> {
        match self {
            SessionImpl::InTransaction { token, tx, queries } => {
                let result = f(&tx);
                Ok((
                    result,
                    SessionImpl::InTransaction {
                        token,
                        tx,
                        queries: queries + 1,
                    },
                ))
            }
            other => Err(other.illegal(SessionOp::Query(kind))),
        }
    }

    /// `InTransaction -> Committed`
    pub fn commit(self) -> Result<Self, Rejected<SessionError, Self>> {
        match self {
            SessionImpl::InTransaction { token, tx, queries } => {
                debug!(tx = %tx, queries, "Transaction committed");
                Ok(SessionImpl::Committed { token, tx })
            }
            other => Err(other.illegal(SessionOp::Commit)),
        }
    }

    /// `InTransaction -> RolledBack`
    pub fn rollback(self) -> Result<Self, Rejected<SessionError, Self>> {
        match self {
            SessionImpl::InTransaction { token, tx, queries } => {
                debug!(tx = %tx, queries, "Transaction rolled back");
                Ok(SessionImpl::RolledBack { token, tx })
            }
            other => Err(other.illegal(SessionOp::Rollback)),
        }
    }

    /// `{Fresh, Authenticated, Committed, RolledBack} -> Closed`
    pub fn close(self) -> Result<Self, Rejected<SessionError, Self>> {
        if !self.can(SessionOp::Close) {
            return Err(self.illegal(SessionOp::Close));
        }
        debug!(from = %self.state(), "Session closed");
        Ok(SessionImpl::Closed)
    }
}

/// Does the declared protocol allow `op`?
///
/// | protocol | write queries | rollback |
/// |----------|---------------|----------|
/// | ReadOnly | no            | yes      |
/// | Mutation | yes           | yes      |
/// | Stream   | no            | no       |
/// | Batch    | yes           | no       |
///
/// A custom spelling of a built-in name is treated as that built-in. Other
/// custom protocols permit nothing.
pub fn protocol_permits(protocol: &SessionProtocol, op: SessionOp) -> bool {
    match protocol.canonical() {
        SessionProtocol::Custom(_) => false,
        SessionProtocol::Mutation => true,
        SessionProtocol::ReadOnly => op != SessionOp::Query(QueryKind::Write),
        SessionProtocol::Stream => {
            !matches!(op, SessionOp::Query(QueryKind::Write) | SessionOp::Rollback)
        }
        SessionProtocol::Batch => op != SessionOp::Rollback,
    }
}

/// A session bound to a declared protocol. Each transition first checks
/// [`protocol_permits`], then the base machine.
#[derive(Debug)]
pub struct GuardedSession {
    protocol: SessionProtocol,
    session: SessionImpl,
}

impl GuardedSession {
    pub fn new(protocol: SessionProtocol) -> Self {
        Self {
            protocol: protocol.canonical(),
            session: SessionImpl::new(),
        }
    }

    pub fn protocol(&self) -> &SessionProtocol {
        &self.protocol
    }

    pub fn session(&self) -> &SessionImpl {
        &self.session
    }

    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    pub fn into_inner(self) -> SessionImpl {
        self.session
    }

    fn guard(self, op: SessionOp) -> Result<Self, Rejected<SessionError, Self>> {
        if protocol_permits(&self.protocol, op) {
            return Ok(self);
        }
        warn!(protocol = %self.protocol, operation = %op, "Protocol violation");
        let error = SessionError::ProtocolViolation {
            protocol: self.protocol.name().to_string(),
            operation: op,
        };
        Err(Rejected::new(error, self))
    }

    fn step(
        self,
        op: SessionOp,
        transition: impl FnOnce(
            SessionImpl,
        ) -> Result<SessionImpl, Rejected<SessionError, SessionImpl>>,
    ) -> Result<Self, Rejected<SessionError, Self>> {
        let Self { protocol, session } = self.guard(op)?;
        match transition(session) {
            Ok(session) => Ok(Self { protocol, session }),
            Err(rejected) => Err(rejected.map_handle(|session| Self { protocol, session })),
        }
    }

    pub fn auth(self, token: AuthToken) -> Result<Self, Rejected<SessionError, Self>> {
        self.step(SessionOp::Auth, |s| s.auth(token))
    }

    pub fn begin_tx(self) -> Result<Self, Rejected<SessionError, Self>> {
        self.step(SessionOp::BeginTx, SessionImpl::begin_tx)
    }

    pub fn query<R>(
        self,
        kind: QueryKind,
        f: impl FnOnce(&TransactionId) -> R,
    ) -> Result<(R, Self), Rejected<SessionError, Self>> {
        let Self { protocol, session } = self.guard(SessionOp::Query(kind))?;
        match session.query(kind, f) {
            Ok((result, session)) => Ok((result, Self { protocol, session })),
            Err(rejected) => Err(rejected.map_handle(|session| Self { protocol, session })),
        }
    }

    pub fn commit(self) -> Result<Self, Rejected<SessionError, Self>> {
        self.step(SessionOp::Commit, SessionImpl::commit)
    }

    pub fn rollback(self) -> Result<Self, Rejected<SessionError, Self>> {
        self.step(SessionOp::Rollback, SessionImpl::rollback)
    }

    pub fn close(self) -> Result<Self, Rejected<SessionError, Self>> {
        self.step(SessionOp::Close, SessionImpl::close)
    }
}

/// State markers for [`Session`].
pub mod typestate {
    use super::{AuthToken, TransactionId};

    #[derive(Debug)]
    pub struct Fresh;

    #[derive(Debug)]
    pub struct Authenticated {
        pub(crate) token: AuthToken,
    }

    #[derive(Debug)]
    pub struct InTransaction {
        pub(crate) token: AuthToken,
        pub(crate) tx: TransactionId,
        pub(crate) queries: u64,
    }

    #[derive(Debug)]
    pub struct Committed {
        pub(crate) token: AuthToken,
        pub(crate) tx: TransactionId,
    }

    #[derive(Debug)]
    pub struct RolledBack {
        pub(crate) token: AuthToken,
        pub(crate) tx: TransactionId,
    }

    #[derive(Debug)]
    pub struct Closed;
}

use typestate::{Authenticated, Closed, Committed, Fresh, InTransaction, RolledBack};

/// Session handle whose type is its state. Only legal transitions exist as
/// methods.
#[derive(Debug)]
pub struct Session<S> {
    state: S,
}

impl Session<Fresh> {
    pub fn new() -> Self {
        Self { state: Fresh }
    }

    pub fn auth(self, token: AuthToken) -> Session<Authenticated> {
        Session {
            state: Authenticated { token },
        }
    }

    pub fn close(self) -> Session<Closed> {
        Session { state: Closed }
    }
}

impl Default for Session<Fresh> {
    fn default() -> Self {
        Self::new()
    }
}

impl Session<Authenticated> {
    pub fn token(&self) -> &AuthToken {
        &self.state.token
    }

    pub fn begin_tx(self) -> Session<InTransaction> {
        Session {
            state: InTransaction {
                token: self.state.token,
                tx: TransactionId::generate(),
                queries: 0,
            },
        }
    }

    pub fn close(self) -> Session<Closed> {
        Session { state: Closed }
    }
}

impl Session<InTransaction> {
    pub fn transaction(&self) -> TransactionId {
        self.state.tx
    }

    pub fn query<R>(mut self, f: impl FnOnce(&TransactionId) -> R) -> (R, Self) {
        let result = f(&self.state.tx);
        self.state.queries += 1;
        (result, self)
    }

    pub fn commit(self) -> Session<Committed> {
        Session {
            state: Committed {
                token: self.state.token,
                tx: self.state.tx,
            },
        }
    }

    pub fn rollback(self) -> Session<RolledBack> {
        Session {
            state: RolledBack {
                token: self.state.token,
                tx: self.state.tx,
            },
        }
    }
}

impl Session<Committed> {
    pub fn close(self) -> Session<Closed> {
        Session { state: Closed }
    }
}

impl Session<RolledBack> {
    pub fn close(self) -> Session<Closed> {
        Session { state: Closed }
    }
}

impl From<Session<Fresh>> for SessionImpl {
    fn from(_: Session<Fresh>) -> Self {
        SessionImpl::Fresh
    }
}

impl From<Session<Authenticated>> for SessionImpl {
    fn from(s: Session<Authenticated>) -> Self {
        SessionImpl::Authenticated {
            token: s.state.token,
        }
    }
}

impl From<Session<InTransaction>> for SessionImpl {
    fn from(s: Session<InTransaction>) -> Self {
        SessionImpl::InTransaction {
            token: s.state.token,
            tx: s.state.tx,
            queries: s.state.queries,
        }
    }
}

impl From<Session<Committed>> for SessionImpl {
    fn from(s: Session<Committed>) -> Self {
        SessionImpl::Committed {
            token: s.state.token,
            tx: s.state.tx,
        }
    }
}

impl From<Session<RolledBack>> for SessionImpl {
    fn from(s: Session<RolledBack>) -> Self {
        SessionImpl::RolledBack {
            token: s.state.token,
            tx: s.state.tx,
        }
    }
}

impl From<Session<Closed>> for SessionImpl {
    fn from(_: Session<Closed>) -> Self {
        SessionImpl::Closed
    }
}

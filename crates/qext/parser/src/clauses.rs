use qext_types::{
    EffectDecl, EffectLabel, ExtensionAnnotations, ModalDecl, SessionProtocol, TheoremRef,
    TransactionState, UsageLimit, UsageSpec,
};
use tracing::{debug, trace};

use crate::config::ParserConfig;
use crate::cursor::Cursor;
use crate::error::{ParseError, ParseErrorKind};

/// Leading keywords of each clause, in canonical order.
const CLAUSE_LEADS: [&str; 6] = [
    "CONSUME AFTER",
    "WITH SESSION",
    "EFFECTS",
    "IN TRANSACTION",
    "PROOF ATTACHED",
    "USAGE LIMIT",
];

/// Parses a query's clause suffix into [`ExtensionAnnotations`].
///
/// Pure: the same input always yields the same result, and a failed parse
/// returns nothing partial.
#[derive(Clone, Debug, Default)]
pub struct ClauseParser {
    config: ParserConfig,
}

impl ClauseParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn parse(&self, text: &str) -> Result<ExtensionAnnotations, ParseError> {
        if let Some(max) = self.config.max_input_bytes {
            if text.len() > max {
                return Err(ParseError::new(
                    ParseErrorKind::InputTooLong {
                        len: text.len(),
                        max,
                    },
                    0,
                ));
            }
        }

        let mut cursor = Cursor::new(text);
        match parse_clauses(&mut cursor) {
            Ok(annotations) => {
                debug!(clauses = annotations.clause_count(), "Parsed extension clauses");
                Ok(annotations)
            }
            Err(err) => {
                debug!(position = err.position, error = %err.kind, "Clause parse failed");
                Err(err)
            }
        }
    }
}

fn parse_clauses(cursor: &mut Cursor<'_>) -> Result<ExtensionAnnotations, ParseError> {
    let annotations = ExtensionAnnotations {
        consume_after: optional_clause(cursor, CLAUSE_LEADS[0], consume_clause)?,
        session: optional_clause(cursor, CLAUSE_LEADS[1], session_clause)?,
        effects: optional_clause(cursor, CLAUSE_LEADS[2], effects_clause)?,
        modal: optional_clause(cursor, CLAUSE_LEADS[3], modal_clause)?,
        proof: optional_clause(cursor, CLAUSE_LEADS[4], proof_clause)?,
        usage_limit: optional_clause(cursor, CLAUSE_LEADS[5], usage_clause)?,
    };

    if !cursor.at_end() {
        return Err(trailing_input(cursor));
    }
    Ok(annotations)
}

/// Match every keyword of `lead` on a copy of the cursor. A one-word lead
/// must also end on a word boundary, so `EFFECTS` does not match `effectsive`.
fn match_lead<'a>(cursor: &Cursor<'a>, lead: &str) -> Option<Cursor<'a>> {
    let mut ahead = cursor.clone();
    if !lead.split_whitespace().all(|kw| ahead.eat_keyword(kw)) {
        return None;
    }
    if !lead.contains(' ') && !ahead.at_word_boundary() {
        return None;
    }
    Some(ahead)
}

/// Run `body` if the clause's full lead is next. Once the lead matches the
/// clause is committed: any later failure is an error, not an absence.
fn optional_clause<T>(
    cursor: &mut Cursor<'_>,
    lead: &str,
    body: fn(&mut Cursor<'_>) -> Result<T, ParseError>,
) -> Result<Option<T>, ParseError> {
    let Some(ahead) = match_lead(cursor, lead) else {
        return Ok(None);
    };
    *cursor = ahead;
    trace!(clause = lead, position = cursor.position(), "Recognized clause");
    body(cursor).map(Some)
}

fn trailing_input(cursor: &Cursor<'_>) -> ParseError {
    let position = cursor.position();
    if let Some(clause) = CLAUSE_LEADS
        .into_iter()
        .find(|lead| match_lead(cursor, lead).is_some())
    {
        return ParseError::new(
            ParseErrorKind::OutOfOrder {
                clause: clause.to_string(),
            },
            position,
        );
    }
    // A lead's first keyword standing as a whole word: blame the word after it.
    for clause in CLAUSE_LEADS {
        let mut words = clause.split_whitespace();
        let (Some(first), Some(second)) = (words.next(), words.next()) else {
            continue;
        };
        let mut ahead = cursor.clone();
        if ahead.eat_keyword(first) && ahead.at_word_boundary() {
            if let Err(err) = ahead.keyword(second) {
                return err;
            }
        }
    }
    ParseError::new(ParseErrorKind::TrailingInput(cursor.found()), position)
}

// CONSUME AFTER n USE
fn consume_clause(cursor: &mut Cursor<'_>) -> Result<UsageSpec, ParseError> {
    let count = cursor.integer()?;
    cursor.keyword("USE")?;
    Ok(UsageSpec::new(count))
}

// WITH SESSION <protocol>
fn session_clause(cursor: &mut Cursor<'_>) -> Result<SessionProtocol, ParseError> {
    let name = cursor.identifier("session protocol name")?;
    Ok(SessionProtocol::from_name(&name))
}

// EFFECTS { e1, e2, ... }
fn effects_clause(cursor: &mut Cursor<'_>) -> Result<EffectDecl, ParseError> {
    cursor.symbol('{')?;
    let mut labels = Vec::new();
    if cursor.peek_symbol('}') {
        cursor.symbol('}')?;
        return Ok(EffectDecl::new(labels));
    }
    loop {
        let name = cursor.identifier("effect label")?;
        labels.push(EffectLabel::from_name(&name));
        if cursor.peek_symbol(',') {
            cursor.symbol(',')?;
            continue;
        }
        if cursor.peek_symbol('}') {
            cursor.symbol('}')?;
            return Ok(EffectDecl::new(labels));
        }
        return Err(cursor.expected("',' or '}'"));
    }
}

// IN TRANSACTION <state>
fn modal_clause(cursor: &mut Cursor<'_>) -> Result<ModalDecl, ParseError> {
    let name = cursor.identifier("transaction state")?;
    Ok(ModalDecl::new(TransactionState::from_name(&name)))
}

// PROOF ATTACHED <name>[(k="v", ...)]
fn proof_clause(cursor: &mut Cursor<'_>) -> Result<TheoremRef, ParseError> {
    let name = cursor.identifier("theorem name")?;
    let params = if cursor.peek_symbol('(') {
        Some(theorem_params(cursor)?)
    } else {
        None
    };
    Ok(TheoremRef { name, params })
}

fn theorem_params(cursor: &mut Cursor<'_>) -> Result<Vec<(String, String)>, ParseError> {
    cursor.symbol('(')?;
    let mut params = Vec::new();
    if cursor.peek_symbol(')') {
        cursor.symbol(')')?;
        return Ok(params);
    }
    loop {
        let key = cursor.identifier("parameter name")?;
        cursor.symbol('=')?;
        let value = cursor.string_literal()?;
        params.push((key, value));
        if cursor.peek_symbol(',') {
            cursor.symbol(',')?;
            continue;
        }
        if cursor.peek_symbol(')') {
            cursor.symbol(')')?;
            return Ok(params);
        }
        return Err(cursor.expected("',' or ')'"));
    }
}

// USAGE LIMIT n
fn usage_clause(cursor: &mut Cursor<'_>) -> Result<UsageLimit, ParseError> {
    Ok(UsageLimit::new(cursor.integer()?))
}

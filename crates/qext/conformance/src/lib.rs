//! # qext-conformance
//!
//! `proptest` strategies for annotation values, shared by the law suite under
//! `tests/`:
//!
//! - `property/`: subsumption laws, budget conservation, exact linear usage,
//!   session lifecycle, clause round-trip
//! - `e2e/`: text to validated annotations to runtime entities
//! - `adversarial/`: malformed and hostile clause text

#![deny(unsafe_code)]

use proptest::prelude::*;
use qext_types::{
    EffectDecl, EffectLabel, ExtensionAnnotations, ModalDecl, SessionProtocol, TheoremRef,
    TransactionState, UsageLimit, UsageSpec,
};

/// A well-formed identifier.
pub fn arb_identifier() -> impl Strategy<Value = String> {
    "[A-Za-z_][A-Za-z0-9_]{0,15}"
}

pub fn arb_effect_label() -> impl Strategy<Value = EffectLabel> {
    prop_oneof![
        4 => prop::sample::select(EffectLabel::BUILTIN.to_vec()),
        1 => arb_identifier().prop_map(|name| EffectLabel::from_name(&name)),
    ]
}

/// Effect labels as a list; may contain duplicates.
pub fn arb_effect_list() -> impl Strategy<Value = Vec<EffectLabel>> {
    prop::collection::vec(arb_effect_label(), 0..8)
}

pub fn arb_effect_decl() -> impl Strategy<Value = EffectDecl> {
    arb_effect_list().prop_map(EffectDecl::new)
}

pub fn arb_known_protocol() -> impl Strategy<Value = SessionProtocol> {
    prop::sample::select(SessionProtocol::KNOWN_NAMES.to_vec()).prop_map(SessionProtocol::from_name)
}

pub fn arb_session_protocol() -> impl Strategy<Value = SessionProtocol> {
    prop_oneof![
        3 => arb_known_protocol(),
        1 => arb_identifier().prop_map(|name| SessionProtocol::from_name(&name)),
    ]
}

pub fn arb_known_state() -> impl Strategy<Value = TransactionState> {
    prop::sample::select(TransactionState::KNOWN_NAMES.to_vec())
        .prop_map(TransactionState::from_name)
}

pub fn arb_transaction_state() -> impl Strategy<Value = TransactionState> {
    prop_oneof![
        3 => arb_known_state(),
        1 => arb_identifier().prop_map(|name| TransactionState::from_name(&name)),
    ]
}

/// Parameter values range over printable ASCII, quotes and backslashes included.
pub fn arb_theorem_ref() -> impl Strategy<Value = TheoremRef> {
    let params = prop::option::of(prop::collection::vec(
        (arb_identifier(), "[ -~]{0,10}"),
        0..4,
    ));
    (arb_identifier(), params).prop_map(|(name, params)| TheoremRef { name, params })
}

/// Any annotation value the parser can produce.
pub fn arb_annotations() -> impl Strategy<Value = ExtensionAnnotations> {
    (
        prop::option::of(any::<u64>().prop_map(UsageSpec::new)),
        prop::option::of(arb_session_protocol()),
        prop::option::of(arb_effect_decl()),
        prop::option::of(arb_transaction_state().prop_map(ModalDecl::new)),
        prop::option::of(arb_theorem_ref()),
        prop::option::of(any::<u64>().prop_map(UsageLimit::new)),
    )
        .prop_map(
            |(consume_after, session, effects, modal, proof, usage_limit)| ExtensionAnnotations {
                consume_after,
                session,
                effects,
                modal,
                proof,
                usage_limit,
            },
        )
}

/// Annotation values the checker accepts: known names, non-empty effects,
/// positive counts and a usage limit at least the consume count.
pub fn arb_valid_annotations() -> impl Strategy<Value = ExtensionAnnotations> {
    let counts = (1u64..1_000, 0u64..1_000).prop_map(|(n, extra)| (n, n + extra));
    (
        prop::option::of(counts),
        any::<bool>(),
        prop::option::of(arb_known_protocol()),
        prop::option::of(prop::collection::vec(arb_effect_label(), 1..6)),
        prop::option::of(arb_known_state()),
        prop::option::of(arb_theorem_ref()),
    )
        .prop_map(|(counts, with_consume, session, effects, state, proof)| {
            let mut annotations = ExtensionAnnotations {
                session,
                effects: effects.map(EffectDecl::new),
                modal: state.map(ModalDecl::new),
                proof,
                ..ExtensionAnnotations::default()
            };
            if let Some((consume, limit)) = counts {
                if with_consume {
                    annotations = annotations.with_consume_after(consume);
                }
                annotations = annotations.with_usage_limit(limit);
            }
            annotations
        })
}

//! Property tests: subsumption is reflexive, transitive, monotone in the
//! declared set and closed under union of the actual side.

use proptest::prelude::*;
use qext_conformance::{arb_effect_decl, arb_effect_label, arb_effect_list};
use qext_semantics::{check_effects, subsumes, union, widen};
use qext_types::{EffectDecl, EffectLabel};

/// A declared list with two lists drawn from it, so both are covered by
/// construction.
fn arb_declared_with_two_subsets(
) -> impl Strategy<Value = (Vec<EffectLabel>, Vec<EffectLabel>, Vec<EffectLabel>)> {
    arb_effect_list().prop_flat_map(|declared| {
        let len = declared.len();
        (
            Just(declared.clone()),
            prop::sample::subsequence(declared.clone(), 0..=len),
            prop::sample::subsequence(declared, 0..=len),
        )
    })
}

proptest! {
    #[test]
    fn subsumption_is_reflexive(set in arb_effect_list()) {
        prop_assert!(subsumes(&set, &set));
    }

    /// Build z ⊇ y ⊇ x by taking subsequences, then check z covers x.
    #[test]
    fn subsumption_is_transitive(
        (z, y, x) in arb_effect_list()
            .prop_flat_map(|z| {
                let len = z.len();
                (Just(z.clone()), prop::sample::subsequence(z, 0..=len))
            })
            .prop_flat_map(|(z, y)| {
                let len = y.len();
                (Just(z), Just(y.clone()), prop::sample::subsequence(y, 0..=len))
            })
    ) {
        prop_assert!(subsumes(&z, &y));
        prop_assert!(subsumes(&y, &x));
        prop_assert!(subsumes(&z, &x));
    }

    #[test]
    fn widening_never_breaks_subsumption(
        (declared, actual, _) in arb_declared_with_two_subsets(),
        extra in arb_effect_label(),
    ) {
        let declared = EffectDecl::new(declared);
        let actual = EffectDecl::new(actual);
        prop_assert!(subsumes(declared.iter(), actual.iter()));
        let widened = widen(&declared, extra.clone());
        prop_assert!(subsumes(widened.iter(), actual.iter()));
        prop_assert!(widened.contains(&extra));
    }

    /// If D covers A1 and D covers A2, then D covers A1 ∪ A2.
    #[test]
    fn subsumption_is_closed_under_union(
        (declared, first, second) in arb_declared_with_two_subsets()
    ) {
        prop_assert!(subsumes(&declared, &first));
        prop_assert!(subsumes(&declared, &second));

        let both = union(&EffectDecl::new(first), &EffectDecl::new(second));
        prop_assert!(subsumes(&declared, both.iter()));
        prop_assert!(EffectDecl::new(declared.clone()).subsumes(&both));
        prop_assert!(check_effects(&EffectDecl::new(declared), both.iter()).is_ok());
    }

    /// One side outside D is enough to break coverage of the union.
    #[test]
    fn union_with_undeclared_side_is_not_covered(
        (declared, first, _) in arb_declared_with_two_subsets(),
        stranger in arb_effect_label(),
    ) {
        let declared = EffectDecl::new(declared);
        prop_assume!(!declared.contains(&stranger));
        let both = union(&EffectDecl::new(first), &EffectDecl::new([stranger]));
        prop_assert!(!declared.subsumes(&both));
    }

    #[test]
    fn union_covers_both_sides(left in arb_effect_decl(), right in arb_effect_decl()) {
        let merged = union(&left, &right);
        prop_assert!(merged.subsumes(&left));
        prop_assert!(merged.subsumes(&right));
        prop_assert!(merged.len() <= left.len() + right.len());
    }

    #[test]
    fn check_effects_agrees_with_subsumes(declared in arb_effect_decl(), actual in arb_effect_list()) {
        prop_assert_eq!(
            check_effects(&declared, &actual).is_ok(),
            subsumes(declared.iter(), &actual)
        );
    }

    #[test]
    fn method_and_function_forms_agree(declared in arb_effect_decl(), actual in arb_effect_decl()) {
        prop_assert_eq!(
            declared.subsumes(&actual),
            subsumes(declared.iter(), actual.iter())
        );
    }

    #[test]
    fn empty_actual_is_always_covered(declared in arb_effect_decl()) {
        prop_assert!(declared.subsumes(&EffectDecl::default()));
    }
}

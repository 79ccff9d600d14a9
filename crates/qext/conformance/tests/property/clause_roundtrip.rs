//! Property tests: canonical rendering parses back to the same annotations,
//! and the checker accepts exactly what it should.

use proptest::prelude::*;
use qext_checker::{parse_and_validate, validate, ViolationKind};
use qext_conformance::{arb_annotations, arb_valid_annotations};
use qext_parser::parse_extensions;

proptest! {
    #[test]
    fn rendering_round_trips(annotations in arb_annotations()) {
        let text = annotations.to_string();
        prop_assert_eq!(parse_extensions(&text).unwrap(), annotations);
    }

    #[test]
    fn consume_after_positive_validates(n in 1u64..=u64::MAX) {
        let parsed = parse_and_validate(&format!("CONSUME AFTER {} USE", n)).unwrap();
        prop_assert_eq!(parsed.consume_after.map(|s| s.count), Some(n));
    }

    #[test]
    fn valid_annotations_pass_unchanged(annotations in arb_valid_annotations()) {
        prop_assert_eq!(validate(annotations.clone()).unwrap(), annotations);
    }

    #[test]
    fn inconsistent_limits_are_usage_violations(n in 2u64..10_000, shortfall in 1u64..10_000) {
        let limit = n.saturating_sub(shortfall).max(1);
        prop_assume!(limit < n);
        let text = format!("CONSUME AFTER {} USE USAGE LIMIT {}", n, limit);
        let err = parse_and_validate(&text).unwrap_err();
        prop_assert_eq!(err.violation_kind(), Some(ViolationKind::Usage));
        let message = err.to_string();
        prop_assert!(message.contains(&n.to_string()));
        prop_assert!(message.contains(&limit.to_string()));
    }

    #[test]
    fn keyword_case_is_irrelevant(annotations in arb_annotations()) {
        let lowered = annotations
            .to_string()
            .replace("CONSUME AFTER", "consume after")
            .replace("USAGE LIMIT", "Usage Limit");
        prop_assert_eq!(parse_extensions(&lowered).unwrap(), annotations);
    }
}

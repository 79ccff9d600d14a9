//! Property tests: a linear connection closes only after exactly `n` uses.

use proptest::prelude::*;
use qext_semantics::{LinConn, LinearError};
use qext_types::UsageSpec;

fn use_times(mut conn: LinConn<Vec<u64>>, times: u64) -> Result<LinConn<Vec<u64>>, LinearError> {
    for i in 0..times {
        let (_, next) = conn.use_conn(|log| log.push(i))?;
        conn = next;
    }
    Ok(conn)
}

proptest! {
    #[test]
    fn exact_usage_closes(n in 1u64..100) {
        let conn = LinConn::from_usage(&UsageSpec::new(n), Vec::new());
        let conn = use_times(conn, n).unwrap();
        let log = conn.close_conn().unwrap();
        prop_assert_eq!(log.len() as u64, n);
    }

    #[test]
    fn early_close_reports_remaining(n in 2u64..100, used_frac in 0.0f64..1.0) {
        let used = ((n - 1) as f64 * used_frac) as u64;
        let conn = use_times(LinConn::new(n, Vec::new()), used).unwrap();
        prop_assert!(conn.has_uses());
        let rejected = conn.close_conn().unwrap_err();
        prop_assert_eq!(&rejected.error, &LinearError::UsesRemaining(n - used));

        // the refused close leaves the connection usable for its remaining uses
        let conn = use_times(rejected.into_handle(), n - used).unwrap();
        prop_assert_eq!(conn.close_conn().unwrap().len() as u64, n);
    }

    #[test]
    fn overuse_is_rejected(n in 0u64..50) {
        let conn = use_times(LinConn::new(n, Vec::new()), n).unwrap();
        let rejected = conn.use_conn(|_| ()).unwrap_err();
        prop_assert_eq!(&rejected.error, &LinearError::AlreadyDepleted);
        prop_assert_eq!(rejected.into_handle().close_conn().unwrap().len() as u64, n);
    }
}

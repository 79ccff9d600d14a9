use qext_types::ExtensionAnnotations;

use crate::error::Violation;
use crate::traits::CheckStage;

/// Stage 7: cross-extension rules. A usage budget must cover the per-connection
/// use count.
#[derive(Debug, Default)]
pub struct ConsistencyStage;

impl CheckStage for ConsistencyStage {
    fn stage_name(&self) -> &str {
        "Consistency"
    }

    fn stage_number(&self) -> u8 {
        7
    }

    fn check(&self, annotations: &ExtensionAnnotations) -> Result<(), Violation> {
        match (&annotations.consume_after, &annotations.usage_limit) {
            (Some(spec), Some(limit)) if !limit.dominates(spec) => {
                Err(Violation::usage(format!(
                    "USAGE LIMIT ({}) must be >= CONSUME AFTER ({})",
                    limit.limit, spec.count
                )))
            }
            _ => Ok(()),
        }
    }
}

use qext_types::ExtensionAnnotations;

use crate::error::Violation;
use crate::traits::CheckStage;

/// Stage 6: `USAGE LIMIT` must be positive. The relation to `CONSUME AFTER`
/// is left to [`ConsistencyStage`](super::ConsistencyStage).
#[derive(Debug, Default)]
pub struct UsageStage {
    max: Option<u64>,
}

impl UsageStage {
    pub fn new(max: Option<u64>) -> Self {
        Self { max }
    }
}

impl CheckStage for UsageStage {
    fn stage_name(&self) -> &str {
        "Usage"
    }

    fn stage_number(&self) -> u8 {
        6
    }

    fn check(&self, annotations: &ExtensionAnnotations) -> Result<(), Violation> {
        let Some(limit) = &annotations.usage_limit else {
            return Ok(());
        };
        if limit.limit == 0 {
            return Err(Violation::usage("USAGE LIMIT must be at least 1"));
        }
        match self.max {
            Some(max) if limit.limit > max => Err(Violation::usage(format!(
                "USAGE LIMIT ({}) exceeds configured maximum ({})",
                limit.limit, max
            ))),
            _ => Ok(()),
        }
    }
}

use qext_types::ExtensionAnnotations;

use crate::error::Violation;
use crate::traits::CheckStage;

/// Stage 1: `CONSUME AFTER n USE` must allow at least one use.
#[derive(Debug, Default)]
pub struct ConsumeStage {
    max: Option<u64>,
}

impl ConsumeStage {
    pub fn new(max: Option<u64>) -> Self {
        Self { max }
    }
}

impl CheckStage for ConsumeStage {
    fn stage_name(&self) -> &str {
        "Consume"
    }

    fn stage_number(&self) -> u8 {
        1
    }

    fn check(&self, annotations: &ExtensionAnnotations) -> Result<(), Violation> {
        let Some(spec) = &annotations.consume_after else {
            return Ok(());
        };
        if spec.count == 0 {
            return Err(Violation::linearity(
                "CONSUME AFTER count must be at least 1",
            ));
        }
        match self.max {
            Some(max) if spec.count > max => Err(Violation::linearity(format!(
                "CONSUME AFTER ({}) exceeds configured maximum ({})",
                spec.count, max
            ))),
            _ => Ok(()),
        }
    }
}

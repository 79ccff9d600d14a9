use qext_types::ExtensionAnnotations;

use crate::error::Violation;
use crate::traits::CheckStage;

/// Stage 5: an attached proof must name its theorem.
#[derive(Debug, Default)]
pub struct ProofStage;

impl CheckStage for ProofStage {
    fn stage_name(&self) -> &str {
        "Proof"
    }

    fn stage_number(&self) -> u8 {
        5
    }

    fn check(&self, annotations: &ExtensionAnnotations) -> Result<(), Violation> {
        match &annotations.proof {
            Some(theorem) if theorem.name.is_empty() => {
                Err(Violation::proof("PROOF ATTACHED requires a theorem name"))
            }
            _ => Ok(()),
        }
    }
}

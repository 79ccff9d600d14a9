use qext_types::ExtensionAnnotations;

use crate::error::Violation;
use crate::traits::CheckStage;

/// Stage 3: a written `EFFECTS` clause must name something.
#[derive(Debug, Default)]
pub struct EffectsStage;

impl CheckStage for EffectsStage {
    fn stage_name(&self) -> &str {
        "Effects"
    }

    fn stage_number(&self) -> u8 {
        3
    }

    fn check(&self, annotations: &ExtensionAnnotations) -> Result<(), Violation> {
        match &annotations.effects {
            Some(decl) if decl.is_empty() => Err(Violation::effect(
                "EFFECTS declares no effects; use no clause instead of an empty one",
            )),
            _ => Ok(()),
        }
    }
}

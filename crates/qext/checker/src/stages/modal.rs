use qext_types::ExtensionAnnotations;

use crate::error::Violation;
use crate::traits::CheckStage;

/// Stage 4: the transaction state must be one of the closed set.
#[derive(Debug, Default)]
pub struct ModalStage;

impl CheckStage for ModalStage {
    fn stage_name(&self) -> &str {
        "Modal"
    }

    fn stage_number(&self) -> u8 {
        4
    }

    fn check(&self, annotations: &ExtensionAnnotations) -> Result<(), Violation> {
        match &annotations.modal {
            Some(decl) if !decl.state.is_known() => Err(Violation::modal(format!(
                "Unknown transaction state: {}",
                decl.state.name()
            ))),
            _ => Ok(()),
        }
    }
}

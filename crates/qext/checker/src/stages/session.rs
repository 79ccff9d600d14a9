use qext_types::ExtensionAnnotations;

use crate::error::Violation;
use crate::traits::CheckStage;

/// Stage 2: the protocol must be one of the closed set.
#[derive(Debug, Default)]
pub struct SessionStage;

impl CheckStage for SessionStage {
    fn stage_name(&self) -> &str {
        "Session"
    }

    fn stage_number(&self) -> u8 {
        2
    }

    fn check(&self, annotations: &ExtensionAnnotations) -> Result<(), Violation> {
        match &annotations.session {
            Some(protocol) if !protocol.is_known() => Err(Violation::session(format!(
                "Unknown protocol: {}",
                protocol.name()
            ))),
            _ => Ok(()),
        }
    }
}

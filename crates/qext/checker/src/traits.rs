use qext_types::ExtensionAnnotations;

use crate::error::Violation;

/// One step of the checking pipeline.
///
/// Stages are pure: they inspect the annotations and either pass or name the
/// violation. They never modify the input.
pub trait CheckStage: Send + Sync {
    fn stage_name(&self) -> &str;

    /// Position in the canonical order (1 through 7).
    fn stage_number(&self) -> u8;

    fn check(&self, annotations: &ExtensionAnnotations) -> Result<(), Violation>;
}

use qext_types::ExtensionAnnotations;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::CheckerConfig;
use crate::error::Violation;
use crate::stages::{
    ConsistencyStage, ConsumeStage, EffectsStage, ModalStage, ProofStage, SessionStage, UsageStage,
};
use crate::traits::CheckStage;

/// Outcome of one evaluated stage.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageOutcome {
    pub stage: String,
    pub number: u8,
    pub violation: Option<Violation>,
}

impl StageOutcome {
    pub fn is_pass(&self) -> bool {
        self.violation.is_none()
    }
}

/// Stage-by-stage record of a check. Stops at the first violation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckReport {
    pub stages: Vec<StageOutcome>,
}

impl CheckReport {
    pub fn is_valid(&self) -> bool {
        self.stages.iter().all(StageOutcome::is_pass)
    }

    /// The violation that stopped the pipeline, if any.
    pub fn violation(&self) -> Option<&Violation> {
        self.stages.iter().find_map(|s| s.violation.as_ref())
    }

    pub fn evaluated(&self) -> usize {
        self.stages.len()
    }
}

/// The unified checker: seven stages in canonical order.
///
/// ```text
/// 1 Consume -> 2 Session -> 3 Effects -> 4 Modal -> 5 Proof -> 6 Usage -> 7 Consistency
/// ```
///
/// The first violation wins; later stages are not evaluated. Checking is a
/// pure function of the annotations, so one checker can be shared freely
/// across threads.
pub struct AnnotationChecker {
    stages: Vec<Box<dyn CheckStage>>,
    config: CheckerConfig,
}

impl AnnotationChecker {
    pub fn new() -> Self {
        Self::with_config(CheckerConfig::default())
    }

    pub fn with_config(config: CheckerConfig) -> Self {
        let stages: Vec<Box<dyn CheckStage>> = vec![
            Box::new(ConsumeStage::new(config.max_consume_after)),
            Box::new(SessionStage),
            Box::new(EffectsStage),
            Box::new(ModalStage),
            Box::new(ProofStage),
            Box::new(UsageStage::new(config.max_usage_limit)),
            Box::new(ConsistencyStage),
        ];
        Self { stages, config }
    }

    pub fn config(&self) -> &CheckerConfig {
        &self.config
    }

    /// Stage names in evaluation order.
    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(|s| s.stage_name()).collect()
    }

    /// Validate, returning the annotations unchanged on success.
    pub fn validate(
        &self,
        annotations: ExtensionAnnotations,
    ) -> Result<ExtensionAnnotations, Violation> {
        for stage in &self.stages {
            debug!(
                stage = stage.stage_name(),
                number = stage.stage_number(),
                "Evaluating stage"
            );
            if let Err(violation) = stage.check(&annotations) {
                warn!(
                    stage = stage.stage_name(),
                    kind = %violation.kind,
                    message = %violation.message,
                    "Annotations rejected"
                );
                return Err(violation);
            }
        }
        debug!(clauses = annotations.clause_count(), "Annotations accepted");
        Ok(annotations)
    }

    /// Same pipeline as [`validate`](Self::validate), recording every
    /// evaluated stage.
    pub fn report(&self, annotations: &ExtensionAnnotations) -> CheckReport {
        let mut report = CheckReport::default();
        for stage in &self.stages {
            let violation = stage.check(annotations).err();
            let stop = violation.is_some();
            report.stages.push(StageOutcome {
                stage: stage.stage_name().to_string(),
                number: stage.stage_number(),
                violation,
            });
            if stop {
                break;
            }
        }
        report
    }
}

impl Default for AnnotationChecker {
    fn default() -> Self {
        Self::new()
    }
}

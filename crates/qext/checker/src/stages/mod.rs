pub mod consistency;
pub mod consume;
pub mod effects;
pub mod modal;
pub mod proof;
pub mod session;
pub mod usage;

pub use consistency::ConsistencyStage;
pub use consume::ConsumeStage;
pub use effects::EffectsStage;
pub use modal::ModalStage;
pub use proof::ProofStage;
pub use session::SessionStage;
pub use usage::UsageStage;

pub mod correction_flow;
pub mod liveness;
pub mod submission_ctx;

pub use correction_flow::{CorrectionFlow, FlowState, SubmitOutcome};
pub use liveness::Liveness;
pub use submission_ctx::SubmissionCtx;

pub mod result;
pub mod session;
pub mod submission;

pub use result::{GradedResult, ResultSet, ResultStatus, UNKNOWN_ANSWER};
pub use session::GradingSession;
pub use submission::{
    AnswerKeyEntry, GradingResponse, SubmissionDocument, SubmissionItem, SubmissionMeta,
};

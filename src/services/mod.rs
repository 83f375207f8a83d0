pub mod edit_session;
pub mod matcher;
pub mod validator;

pub use edit_session::{EditSession, EditState};
pub use matcher::grade_submission;
pub use validator::{validate_session, ValidateOutcome};

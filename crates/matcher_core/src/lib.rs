//! Matcher core: submission validation, result model and the pure session state machine.
mod effect;
mod error;
mod msg;
mod result;
mod state;
mod submission;
mod update;
mod validate;
mod view_model;

pub use effect::Effect;
pub use error::{AnalysisError, SessionError, GENERIC_FAILURE_MESSAGE};
pub use msg::Msg;
pub use result::{
    normalize, AnalysisResult, Importance, KeywordSuggestion, MatchSummary, MissingSkill,
    ResumeImprovement, ScoreBand, MISSING_SECTION_SENTINEL,
};
pub use state::{FailurePolicy, Phase, RequestId, Session, SessionState};
pub use submission::{DocumentFormat, ResumeFile, Submission, UnsupportedFormat};
pub use update::update;
pub use validate::{validate, ValidationError, MIN_JOB_DESCRIPTION_CHARS};
pub use view_model::{KeywordGroupView, SessionView, KEYWORDS_SHOWN_PER_GROUP};

use crate::{AnalysisResult, Phase};

/// Keywords listed per ATS category before collapsing into "+N more".
pub const KEYWORDS_SHOWN_PER_GROUP: usize = 10;

/// Read-only snapshot a renderer needs to draw the session.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionView {
    pub phase: Phase,
    pub file_name: Option<String>,
    pub job_description_chars: usize,
    pub can_analyze: bool,
    pub can_reset: bool,
    pub is_busy: bool,
    pub error_message: Option<String>,
    pub result: Option<AnalysisResult>,
    /// Enhanced minus original score; may be negative.
    pub score_gain: Option<f64>,
    pub keyword_groups: Vec<KeywordGroupView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordGroupView {
    pub label: String,
    pub shown: Vec<String>,
    pub hidden_count: usize,
}

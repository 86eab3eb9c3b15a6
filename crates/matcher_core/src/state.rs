use std::fmt;

use crate::view_model::{KeywordGroupView, SessionView, KEYWORDS_SHOWN_PER_GROUP};
use crate::{
    validate, AnalysisError, AnalysisResult, ResumeFile, SessionError, Submission,
    ValidationError,
};

/// Sequence number of an analysis request; strictly increasing per session.
pub type RequestId = u64;

/// What happens to the last good result when a later request fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Keep showing the previous result next to the error.
    #[default]
    KeepLastResult,
    /// Drop the previous result.
    Replace,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    /// Inputs incomplete.
    #[default]
    Idle,
    /// Both inputs present; not necessarily valid.
    Ready,
    /// A request is in flight. `prior` is restored if it gets cancelled.
    Submitting {
        request_id: RequestId,
        prior: Box<SessionState>,
    },
    Succeeded(AnalysisResult),
    Failed {
        error: AnalysisError,
        last_result: Option<AnalysisResult>,
    },
}

impl SessionState {
    pub fn phase(&self) -> Phase {
        match self {
            SessionState::Idle => Phase::Idle,
            SessionState::Ready => Phase::Ready,
            SessionState::Submitting { .. } => Phase::Submitting,
            SessionState::Succeeded(_) => Phase::Succeeded,
            SessionState::Failed { .. } => Phase::Failed,
        }
    }

    /// The result a renderer should show for this state, if any.
    pub fn visible_result(&self) -> Option<&AnalysisResult> {
        match self {
            SessionState::Succeeded(result) => Some(result),
            SessionState::Failed { last_result, .. } => last_result.as_ref(),
            SessionState::Submitting { prior, .. } => prior.visible_result(),
            SessionState::Idle | SessionState::Ready => None,
        }
    }

    pub(crate) fn into_visible_result(self) -> Option<AnalysisResult> {
        match self {
            SessionState::Succeeded(result) => Some(result),
            SessionState::Failed { last_result, .. } => last_result,
            SessionState::Submitting { prior, .. } => prior.into_visible_result(),
            SessionState::Idle | SessionState::Ready => None,
        }
    }
}

/// Payload-free view of [`SessionState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Ready,
    Submitting,
    Succeeded,
    Failed,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Phase::Idle => "Idle",
            Phase::Ready => "Ready",
            Phase::Submitting => "Analyzing",
            Phase::Succeeded => "Done",
            Phase::Failed => "Failed",
        };
        f.write_str(label)
    }
}

/// Everything the orchestrator owns: inputs, the state machine, and the
/// validation notice surfaced by the last rejected request.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Session {
    submission: Submission,
    state: SessionState,
    notice: Option<ValidationError>,
    last_request_id: RequestId,
    failure_policy: FailurePolicy,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_failure_policy(failure_policy: FailurePolicy) -> Self {
        Self {
            failure_policy,
            ..Self::default()
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn submission(&self) -> &Submission {
        &self.submission
    }

    pub fn failure_policy(&self) -> FailurePolicy {
        self.failure_policy
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.state.visible_result()
    }

    pub fn validation_error(&self) -> Option<ValidationError> {
        self.notice
    }

    /// The error to surface: a pending validation notice, else the failure of
    /// the last request.
    pub fn error(&self) -> Option<SessionError> {
        if let Some(notice) = self.notice {
            return Some(notice.into());
        }
        match &self.state {
            SessionState::Failed { error, .. } => Some(error.clone().into()),
            _ => None,
        }
    }

    pub fn in_flight(&self) -> Option<RequestId> {
        match self.state {
            SessionState::Submitting { request_id, .. } => Some(request_id),
            _ => None,
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight().is_some()
    }

    pub fn view(&self) -> SessionView {
        let result = self.result().cloned();
        let keyword_groups: Vec<KeywordGroupView> = result
            .as_ref()
            .map(|result| {
                result
                    .keyword_categories()
                    .map(|(category, keywords)| KeywordGroupView {
                        label: category.replace('_', " "),
                        shown: keywords
                            .iter()
                            .take(KEYWORDS_SHOWN_PER_GROUP)
                            .cloned()
                            .collect(),
                        hidden_count: keywords.len().saturating_sub(KEYWORDS_SHOWN_PER_GROUP),
                    })
                    .collect()
            })
            .unwrap_or_default();
        let is_busy = self.is_submitting();

        SessionView {
            phase: self.phase(),
            file_name: self
                .submission
                .resume
                .as_ref()
                .map(|file| file.name().to_string()),
            job_description_chars: self.submission.job_description.trim().chars().count(),
            can_analyze: !is_busy && self.submission.is_filled(),
            can_reset: !is_busy,
            is_busy,
            error_message: self.error().map(|err| err.display_message()),
            score_gain: result.as_ref().and_then(AnalysisResult::score_gain),
            keyword_groups,
            result,
        }
    }

    pub(crate) fn set_resume(&mut self, resume: ResumeFile) {
        self.submission.resume = Some(resume);
        self.input_changed();
    }

    pub(crate) fn set_job_description(&mut self, text: String) {
        self.submission.job_description = text;
        self.input_changed();
    }

    /// Edits clear any surfaced error. A failed request's last good result
    /// stays visible without the failure annotation.
    fn input_changed(&mut self) {
        self.notice = None;
        let input_state = if self.submission.is_filled() {
            SessionState::Ready
        } else {
            SessionState::Idle
        };
        match std::mem::take(&mut self.state) {
            SessionState::Idle | SessionState::Ready => self.state = input_state,
            SessionState::Failed {
                last_result: Some(result),
                ..
            } => self.state = SessionState::Succeeded(result),
            SessionState::Failed {
                last_result: None, ..
            } => self.state = input_state,
            other => self.state = other,
        }
    }

    pub(crate) fn reject(&mut self, notice: ValidationError) {
        self.notice = Some(notice);
    }

    /// Validated copy of the inputs, ready to hand to the transport.
    pub(crate) fn checked_payload(&self) -> Result<(ResumeFile, String), ValidationError> {
        validate(&self.submission)?;
        let resume = self
            .submission
            .resume
            .clone()
            .ok_or(ValidationError::MissingFile)?;
        Ok((resume, self.submission.job_description.clone()))
    }

    pub(crate) fn begin_request(&mut self) -> RequestId {
        self.last_request_id += 1;
        let request_id = self.last_request_id;
        let prior = std::mem::take(&mut self.state);
        self.state = SessionState::Submitting {
            request_id,
            prior: Box::new(prior),
        };
        self.notice = None;
        request_id
    }

    /// Leaves `Submitting` and returns what preceded it, if `request_id` is
    /// the request in flight.
    pub(crate) fn finish_request(&mut self, request_id: RequestId) -> Option<SessionState> {
        match &mut self.state {
            SessionState::Submitting {
                request_id: in_flight,
                prior,
            } if *in_flight == request_id => {
                Some(std::mem::take(prior.as_mut()))
            }
            _ => None,
        }
    }

    pub(crate) fn settle(&mut self, state: SessionState) {
        self.state = state;
    }

    /// Clears inputs, result and errors. The request counter keeps counting so
    /// completions from before the reset stay stale.
    pub(crate) fn clear(&mut self) {
        *self = Self {
            last_request_id: self.last_request_id,
            failure_policy: self.failure_policy,
            ..Self::default()
        };
    }
}

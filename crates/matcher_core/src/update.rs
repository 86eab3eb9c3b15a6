use matcher_logging::{matcher_debug, matcher_info, matcher_warn};

use crate::{normalize, Effect, FailurePolicy, Msg, Session, SessionState};

/// Pure update function: applies a message to the session and returns any effects.
pub fn update(mut session: Session, msg: Msg) -> (Session, Vec<Effect>) {
    let effects = match msg {
        Msg::FileSelected(file) => {
            if session.is_submitting() {
                matcher_debug!("Ignoring file change while a request is in flight");
            } else {
                matcher_debug!("Resume attached: {} ({} bytes)", file.name(), file.len());
                session.set_resume(file);
            }
            Vec::new()
        }
        Msg::JobDescriptionChanged(text) => {
            if session.is_submitting() {
                matcher_debug!("Ignoring job description edit while a request is in flight");
            } else {
                session.set_job_description(text);
            }
            Vec::new()
        }
        Msg::AnalyzeRequested => {
            if let Some(request_id) = session.in_flight() {
                matcher_debug!("Analyze ignored; request {} still in flight", request_id);
                return (session, Vec::new());
            }
            match session.checked_payload() {
                Ok((resume, job_description)) => {
                    let request_id = session.begin_request();
                    matcher_info!(
                        "Submitting request {} for {} ({} bytes)",
                        request_id,
                        resume.name(),
                        resume.len()
                    );
                    vec![Effect::SubmitAnalysis {
                        request_id,
                        resume,
                        job_description,
                    }]
                }
                Err(notice) => {
                    matcher_debug!("Analyze rejected: {}", notice);
                    session.reject(notice);
                    Vec::new()
                }
            }
        }
        Msg::CancelRequested => match session.in_flight() {
            Some(request_id) => {
                if let Some(prior) = session.finish_request(request_id) {
                    session.settle(prior);
                }
                matcher_info!("Request {} cancelled", request_id);
                vec![Effect::CancelAnalysis { request_id }]
            }
            None => Vec::new(),
        },
        Msg::ResetRequested => {
            let in_flight = session.in_flight();
            session.clear();
            in_flight
                .map(|request_id| Effect::CancelAnalysis { request_id })
                .into_iter()
                .collect()
        }
        Msg::AnalysisCompleted {
            request_id,
            outcome,
        } => {
            let Some(prior) = session.finish_request(request_id) else {
                matcher_warn!("Discarding stale response for request {}", request_id);
                return (session, Vec::new());
            };
            let next = match outcome.and_then(|raw| normalize(&raw)) {
                Ok(result) => {
                    matcher_info!(
                        "Request {} succeeded with ATS score {:.1}",
                        request_id,
                        result.ats_score
                    );
                    SessionState::Succeeded(result)
                }
                Err(error) => {
                    matcher_warn!("Request {} failed: {:?}", request_id, error);
                    let last_result = match session.failure_policy() {
                        FailurePolicy::KeepLastResult => prior.into_visible_result(),
                        FailurePolicy::Replace => None,
                    };
                    SessionState::Failed { error, last_result }
                }
            };
            session.settle(next);
            Vec::new()
        }
    };

    (session, effects)
}

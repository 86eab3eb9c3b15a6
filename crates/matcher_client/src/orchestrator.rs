use std::collections::HashMap;
use std::sync::Arc;

use matcher_core::{
    update, AnalysisError, Effect, Msg, RequestId, ResumeFile, Session, SessionState,
    SessionView,
};
use matcher_logging::{matcher_debug, matcher_trace, matcher_warn};
use serde_json::Value;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::{AnalysisTransport, HealthStatus, OrchestratorSettings, TransportError};

struct Completion {
    request_id: RequestId,
    outcome: Result<Value, AnalysisError>,
}

/// Drives a [`Session`]: feeds user actions through [`update`], runs the
/// resulting effects on tokio and applies transport completions.
///
/// Methods that may start a request must be called from within a tokio runtime.
pub struct Orchestrator<T: AnalysisTransport + 'static> {
    transport: Arc<T>,
    settings: OrchestratorSettings,
    session: Session,
    tasks: HashMap<RequestId, JoinHandle<()>>,
    completion_tx: mpsc::UnboundedSender<Completion>,
    completion_rx: mpsc::UnboundedReceiver<Completion>,
}

impl<T: AnalysisTransport + 'static> Orchestrator<T> {
    pub fn new(transport: T, settings: OrchestratorSettings) -> Self {
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();
        Self {
            transport: Arc::new(transport),
            session: Session::with_failure_policy(settings.failure_policy),
            settings,
            tasks: HashMap::new(),
            completion_tx,
            completion_rx,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn state(&self) -> &SessionState {
        self.session.state()
    }

    pub fn view(&self) -> SessionView {
        self.session.view()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn set_file(&mut self, resume: ResumeFile) {
        self.dispatch(Msg::FileSelected(resume));
    }

    pub fn set_job_description(&mut self, text: impl Into<String>) {
        self.dispatch(Msg::JobDescriptionChanged(text.into()));
    }

    /// Starts an analysis unless one is already running or the inputs do not
    /// validate. Returns without waiting for the service.
    pub fn request_analysis(&mut self) {
        self.dispatch(Msg::AnalyzeRequested);
    }

    pub fn cancel(&mut self) {
        self.dispatch(Msg::CancelRequested);
    }

    pub fn reset(&mut self) {
        self.dispatch(Msg::ResetRequested);
    }

    /// Requests an analysis and waits for it to settle.
    pub async fn analyze(&mut self) -> &SessionState {
        self.request_analysis();
        self.wait_until_settled().await
    }

    /// Applies completions until no request is in flight.
    pub async fn wait_until_settled(&mut self) -> &SessionState {
        while self.session.is_submitting() {
            // The sender lives in `self`, so the channel never closes here.
            let Some(completion) = self.completion_rx.recv().await else {
                break;
            };
            self.apply(completion);
        }
        self.session.state()
    }

    /// Applies completions that already arrived without waiting. Returns how
    /// many were applied, stale ones included.
    pub fn poll_completions(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(completion) = self.completion_rx.try_recv() {
            self.apply(completion);
            applied += 1;
        }
        applied
    }

    pub async fn check_health(&self) -> Result<HealthStatus, TransportError> {
        self.transport.check_health().await
    }

    pub fn dispatch(&mut self, msg: Msg) {
        let session = std::mem::take(&mut self.session);
        let (session, effects) = update(session, msg);
        matcher_trace!("Session now {} with {} effect(s)", session.phase(), effects.len());
        self.session = session;
        for effect in effects {
            self.run_effect(effect);
        }
    }

    fn apply(&mut self, completion: Completion) {
        self.tasks.remove(&completion.request_id);
        self.dispatch(Msg::AnalysisCompleted {
            request_id: completion.request_id,
            outcome: completion.outcome,
        });
    }

    fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::SubmitAnalysis {
                request_id,
                resume,
                job_description,
            } => {
                let transport = Arc::clone(&self.transport);
                let completion_tx = self.completion_tx.clone();
                let deadline = self.settings.deadline;
                let handle = tokio::spawn(async move {
                    let call = transport.submit_analysis(&resume, &job_description);
                    let outcome = match deadline {
                        Some(limit) => match tokio::time::timeout(limit, call).await {
                            Ok(outcome) => outcome,
                            Err(_) => Err(TransportError::Unreachable(format!(
                                "no response within {limit:?}"
                            ))),
                        },
                        None => call.await,
                    };
                    if let Err(err) = &outcome {
                        matcher_warn!("Request {} transport failure: {}", request_id, err);
                    }
                    let _ = completion_tx.send(Completion {
                        request_id,
                        outcome: outcome.map_err(AnalysisError::from),
                    });
                });
                self.tasks.insert(request_id, handle);
            }
            Effect::CancelAnalysis { request_id } => {
                if let Some(handle) = self.tasks.remove(&request_id) {
                    matcher_debug!("Aborting transport task for request {}", request_id);
                    handle.abort();
                }
            }
        }
    }
}

impl<T: AnalysisTransport + 'static> Drop for Orchestrator<T> {
    fn drop(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }
}

use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User picked a resume document.
    FileSelected(crate::ResumeFile),
    /// User edited the job description text.
    JobDescriptionChanged(String),
    /// User clicked Analyze (or Retry / Re-analyze).
    AnalyzeRequested,
    /// User abandoned the request in flight.
    CancelRequested,
    /// User clicked Reset.
    ResetRequested,
    /// Transport finished a request, successfully or not. The body is the
    /// raw service payload; normalization happens in `update`.
    AnalysisCompleted {
        request_id: crate::RequestId,
        outcome: Result<Value, crate::AnalysisError>,
    },
}

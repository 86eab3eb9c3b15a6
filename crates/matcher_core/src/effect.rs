#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    SubmitAnalysis {
        request_id: crate::RequestId,
        resume: crate::ResumeFile,
        job_description: String,
    },
    CancelAnalysis {
        request_id: crate::RequestId,
    },
}

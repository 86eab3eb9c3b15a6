use crate::Submission;

/// Minimum trimmed length of a job description, in characters.
pub const MIN_JOB_DESCRIPTION_CHARS: usize = 50;

#[derive(Debug, Clone, Copy, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please upload a resume file")]
    MissingFile,
    #[error("Please provide a detailed job description (at least 50 characters)")]
    JobDescriptionTooShort,
}

/// Checks whether a submission may be sent. Pure; the missing file is reported first.
pub fn validate(submission: &Submission) -> Result<(), ValidationError> {
    if submission.resume.is_none() {
        return Err(ValidationError::MissingFile);
    }
    if submission.job_description.trim().chars().count() < MIN_JOB_DESCRIPTION_CHARS {
        return Err(ValidationError::JobDescriptionTooShort);
    }
    Ok(())
}

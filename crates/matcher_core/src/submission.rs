use std::fmt;

use bytes::Bytes;

/// Document formats the analysis service accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
}

impl DocumentFormat {
    pub const ALL: [DocumentFormat; 2] = [DocumentFormat::Pdf, DocumentFormat::Docx];

    /// Detects the format from the file extension, ignoring case.
    pub fn from_file_name(name: &str) -> Option<Self> {
        let (_, ext) = name.rsplit_once('.')?;
        Self::ALL
            .into_iter()
            .find(|format| format.extension().eq_ignore_ascii_case(ext))
    }

    pub fn extension(self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Docx => "docx",
        }
    }

    pub fn media_type(self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "application/pdf",
            DocumentFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ".{}", self.extension())
    }
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[error("unsupported file format for {file_name:?}; allowed formats: .pdf, .docx")]
pub struct UnsupportedFormat {
    pub file_name: String,
}

/// Resume document attached by the user. Lives only in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeFile {
    name: String,
    format: DocumentFormat,
    content: Bytes,
}

impl ResumeFile {
    pub fn new(
        name: impl Into<String>,
        content: impl Into<Bytes>,
    ) -> Result<Self, UnsupportedFormat> {
        let name = name.into();
        let Some(format) = DocumentFormat::from_file_name(&name) else {
            return Err(UnsupportedFormat { file_name: name });
        };
        Ok(Self {
            name,
            format,
            content: content.into(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn format(&self) -> DocumentFormat {
        self.format
    }

    pub fn media_type(&self) -> &'static str {
        self.format.media_type()
    }

    /// Cheap to clone; the bytes are reference counted.
    pub fn content(&self) -> &Bytes {
        &self.content
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// The (resume, job description) pair being edited by the user.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Submission {
    pub resume: Option<ResumeFile>,
    pub job_description: String,
}

impl Submission {
    /// Both inputs present, regardless of whether they would validate.
    pub fn is_filled(&self) -> bool {
        self.resume.is_some() && !self.job_description.is_empty()
    }
}

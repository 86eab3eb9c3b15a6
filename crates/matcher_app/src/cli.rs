use std::path::PathBuf;

use clap::{ArgGroup, Parser, ValueHint};

use crate::logging::LogDestination;

/// Match a resume against a job description using the ATS analysis service.
#[derive(Debug, Clone, Parser)]
#[command(name = "ats-match", version)]
#[command(group(ArgGroup::new("job").args(["job_description", "job_file"])))]
pub struct Cli {
    /// Resume document (.pdf or .docx)
    #[arg(value_hint = ValueHint::FilePath, required_unless_present = "health")]
    pub resume: Option<PathBuf>,

    /// Job description text
    #[arg(long, short = 'j')]
    pub job_description: Option<String>,

    /// Read the job description from a file
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub job_file: Option<PathBuf>,

    /// Base address of the analysis service
    #[arg(long, env = "ATS_MATCHER_API_URL")]
    pub api_url: Option<String>,

    /// Give up on the analysis after this many seconds
    #[arg(long)]
    pub deadline_secs: Option<u64>,

    /// RON config file
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Write the enhanced resume here when the service produced one
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub out: Option<PathBuf>,

    /// Only check that the service is reachable
    #[arg(long)]
    pub health: bool,

    #[arg(long, value_enum, default_value_t = LogDestination::Terminal)]
    pub log: LogDestination,

    #[arg(long, short = 'v')]
    pub verbose: bool,
}

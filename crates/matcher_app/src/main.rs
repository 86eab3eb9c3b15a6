mod cli;
mod config;
mod logging;
mod render;

use std::fs;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{bail, Context};
use clap::Parser;
use matcher_client::{Orchestrator, ReqwestTransport};
use matcher_core::{ResumeFile, SessionState};
use matcher_logging::{matcher_error, matcher_info};

use crate::cli::Cli;
use crate::config::{load_file_config, AppConfig, FileConfig};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    logging::initialize(cli.log, cli.verbose);

    let file_config = match &cli.config {
        Some(path) => load_file_config(path)?,
        None => FileConfig::default(),
    };
    let config = AppConfig::resolve(file_config, cli.api_url.clone(), cli.deadline_secs);
    let transport = ReqwestTransport::new(config.client_settings()?)?;
    matcher_info!("Using analysis service at {}", config.api_url);

    let mut orchestrator = Orchestrator::new(transport, config.orchestrator_settings());

    if cli.health {
        return match orchestrator.check_health().await {
            Ok(health) => {
                println!("Service reachable: {} {}", health.status, health.message);
                Ok(ExitCode::SUCCESS)
            }
            Err(err) => {
                matcher_error!("Health check failed: {}", err);
                println!("Backend server is not responding");
                Ok(ExitCode::FAILURE)
            }
        };
    }

    let Some(resume_path) = &cli.resume else {
        bail!("a resume file is required");
    };
    orchestrator.set_file(read_resume(resume_path)?);
    orchestrator.set_job_description(read_job_description(&cli)?);

    let succeeded = matches!(orchestrator.analyze().await, SessionState::Succeeded(_));
    let view = orchestrator.view();
    print!("{}", render::render(&view));

    if let (Some(out), Some(enhanced)) = (
        &cli.out,
        view.result.as_ref().and_then(|r| r.enhanced_resume.as_ref()),
    ) {
        fs::write(out, enhanced)
            .with_context(|| format!("failed to write enhanced resume to {out:?}"))?;
        matcher_info!("Enhanced resume written to {:?}", out);
    }

    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn read_resume(path: &Path) -> anyhow::Result<ResumeFile> {
    let content = fs::read(path).with_context(|| format!("failed to read resume {path:?}"))?;
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(ResumeFile::new(name, content)?)
}

fn read_job_description(cli: &Cli) -> anyhow::Result<String> {
    match (&cli.job_description, &cli.job_file) {
        (Some(text), _) => Ok(text.clone()),
        (None, Some(path)) => fs::read_to_string(path)
            .with_context(|| format!("failed to read job description {path:?}")),
        (None, None) => Ok(String::new()),
    }
}

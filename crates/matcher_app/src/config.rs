use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use matcher_client::{ClientSettings, OrchestratorSettings, TransportError, DEFAULT_BASE_URL};
use matcher_core::FailurePolicy;
use matcher_logging::matcher_info;
use serde::{Deserialize, Serialize};

/// Optional settings read from a RON file, e.g.
///
/// ```ron
/// (api_url: Some("http://matcher.internal:8000"), deadline_secs: Some(120))
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub api_url: Option<String>,
    pub deadline_secs: Option<u64>,
    pub connect_timeout_secs: Option<u64>,
    pub replace_result_on_failure: Option<bool>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
    #[error(transparent)]
    InvalidUrl(#[from] TransportError),
}

pub fn load_file_config(path: &Path) -> Result<FileConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config = ron::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    matcher_info!("Loaded config from {:?}", path);
    Ok(config)
}

/// Effective settings: flags override the file, the file overrides defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_url: String,
    pub deadline: Option<Duration>,
    pub connect_timeout: Option<Duration>,
    pub failure_policy: FailurePolicy,
}

impl AppConfig {
    pub fn resolve(file: FileConfig, api_url: Option<String>, deadline_secs: Option<u64>) -> Self {
        let failure_policy = match file.replace_result_on_failure {
            Some(true) => FailurePolicy::Replace,
            _ => FailurePolicy::KeepLastResult,
        };
        Self {
            api_url: api_url
                .or(file.api_url)
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            deadline: deadline_secs
                .or(file.deadline_secs)
                .map(Duration::from_secs),
            connect_timeout: file.connect_timeout_secs.map(Duration::from_secs),
            failure_policy,
        }
    }

    pub fn client_settings(&self) -> Result<ClientSettings, ConfigError> {
        Ok(ClientSettings {
            connect_timeout: self.connect_timeout,
            ..ClientSettings::with_base_url(&self.api_url)?
        })
    }

    pub fn orchestrator_settings(&self) -> OrchestratorSettings {
        OrchestratorSettings {
            deadline: self.deadline,
            failure_policy: self.failure_policy,
        }
    }
}

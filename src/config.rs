use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use reqwest::Url;
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_URL: &str = "http://localhost:5000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Parser, Debug, Default)]
#[command(name = "evlog", about = "Terminal viewer for a remote event log API")]
pub struct Cli {
    /// Base URL of the events backend; events are read from <url>/api/events
    #[arg(long, env = "EVLOG_URL")]
    pub url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "EVLOG_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Refresh automatically every N seconds (0 disables polling)
    #[arg(long, env = "EVLOG_POLL_INTERVAL")]
    pub poll_interval: Option<u64>,

    /// Log file path
    #[arg(long, env = "EVLOG_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Welcome message passed in by the backend; only logged
    #[arg(long, env = "EVLOG_WELCOME")]
    pub welcome: Option<String>,

    /// Config file to use instead of the default location
    #[arg(long, env = "EVLOG_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("invalid setting: {0}")]
    Invalid(String),
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Deserialize, Default, PartialEq)]
pub struct ConfigFile {
    pub url: Option<String>,
    pub timeout: Option<u64>,
    pub poll_interval: Option<u64>,
    pub log_file: Option<PathBuf>,
    pub welcome: Option<String>,
}

impl ConfigFile {
    pub fn default_path() -> Option<PathBuf> {
        Some(dirs::config_dir()?.join("evlog").join("config.toml"))
    }

    /// Load the file at `explicit`, or the default location. A missing
    /// default file is not an error; a missing explicit one is.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::from_path(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_path(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Effective settings: CLI/env first, then the config file, then defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub base_url: Url,
    pub timeout: Duration,
    pub poll_interval: Duration,
    pub log_file: Option<PathBuf>,
    pub welcome: Option<String>,
}

impl Settings {
    pub fn resolve(cli: &Cli, file: ConfigFile) -> Result<Self, ConfigError> {
        let url = cli
            .url
            .clone()
            .or(file.url)
            .unwrap_or_else(|| DEFAULT_URL.to_string());
        let base_url = parse_base_url(&url)?;

        let timeout = cli.timeout.or(file.timeout).unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout == 0 {
            return Err(ConfigError::Invalid(
                "timeout must be at least 1 second".to_string(),
            ));
        }

        Ok(Self {
            base_url,
            timeout: Duration::from_secs(timeout),
            poll_interval: Duration::from_secs(cli.poll_interval.or(file.poll_interval).unwrap_or(0)),
            log_file: cli.log_file.clone().or(file.log_file),
            welcome: cli.welcome.clone().or(file.welcome),
        })
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidUrl {
        url: raw.to_string(),
        reason,
    };

    let url = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(invalid(format!("unsupported scheme {}", other))),
    }
}

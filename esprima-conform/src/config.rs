use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

use crate::process::ParserCommand;

const DEFAULT_TIMEOUT_SECS: u64 = 40;

/// Settings for running the parser under test.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunnerConfig {
    /// Parser binary; usually supplied on the command line instead.
    #[serde(default)]
    pub hermes: Option<PathBuf>,
    /// Flags that make the parser dump its tree as JSON.
    #[serde(default = "default_parser_args")]
    pub parser_args: Vec<String>,
    /// Seconds allowed per parser invocation.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            hermes: None,
            parser_args: default_parser_args(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Errors returned when loading or applying a runner config.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
    #[error("no parser binary configured; pass --hermes or set `hermes` in the config file")]
    MissingBinary,
    #[error("timeout must be at least one second")]
    ZeroTimeout,
}

impl RunnerConfig {
    /// Build the parser invocation, letting command-line values win over the file.
    pub fn parser_command(
        &self,
        hermes: Option<&Path>,
        timeout_secs: Option<u64>,
    ) -> Result<ParserCommand, ConfigError> {
        let binary = hermes
            .map(Path::to_path_buf)
            .or_else(|| self.hermes.clone())
            .ok_or(ConfigError::MissingBinary)?;
        let timeout_secs = timeout_secs.unwrap_or(self.timeout_secs);
        if timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        Ok(ParserCommand {
            binary,
            args: self.parser_args.clone(),
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

/// Load a runner config from a TOML file.
pub fn load_config(path: &Path) -> Result<RunnerConfig, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_config(&raw, path.display().to_string())
}

/// Built-in config shipped with the crate.
pub fn default_config() -> RunnerConfig {
    let embedded = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config/default.toml"));
    match parse_config(embedded, "embedded config".to_string()) {
        Ok(config) => config,
        Err(err) => {
            warn!(%err, "embedded config is invalid; using built-in defaults");
            RunnerConfig::default()
        }
    }
}

fn parse_config(raw: &str, path: String) -> Result<RunnerConfig, ConfigError> {
    toml::from_str(raw).map_err(|source| ConfigError::Parse { path, source })
}

fn default_parser_args() -> Vec<String> {
    vec!["-hermes-parser".to_string(), "-dump-ast".to_string()]
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

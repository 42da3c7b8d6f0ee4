// ABOUTME: Client configuration for podwrap.
// ABOUTME: Loads from YAML and overlays PODWRAP_* environment variables.

use crate::error::{Error, Result};
use crate::log_level::LogLevel;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_BINARY: &str = "podman";

pub const ENV_BINARY: &str = "PODWRAP_BINARY";
pub const ENV_LOG_LEVEL: &str = "PODWRAP_LOG_LEVEL";
pub const ENV_COMMAND_TIMEOUT: &str = "PODWRAP_COMMAND_TIMEOUT";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    /// Program to run, looked up on PATH unless it contains a slash.
    #[serde(default = "default_binary")]
    pub binary: String,

    /// Initial value of the `--log-level` flag.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Upper bound for a single invocation. None waits indefinitely.
    #[serde(default, with = "humantime_serde")]
    pub command_timeout: Option<Duration>,
}

fn default_binary() -> String {
    DEFAULT_BINARY.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            binary: default_binary(),
            log_level: LogLevel::default(),
            command_timeout: None,
        }
    }
}

impl ClientConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Override fields from `PODWRAP_BINARY`, `PODWRAP_LOG_LEVEL` and
    /// `PODWRAP_COMMAND_TIMEOUT`. Empty variables are ignored.
    pub fn apply_env(mut self) -> Result<Self> {
        if let Some(binary) = env_var(ENV_BINARY) {
            self.binary = binary;
        }

        if let Some(level) = env_var(ENV_LOG_LEVEL) {
            self.log_level = level
                .parse::<LogLevel>()
                .map_err(|e| Error::InvalidConfig(format!("{ENV_LOG_LEVEL}: {e}")))?;
        }

        if let Some(timeout) = env_var(ENV_COMMAND_TIMEOUT) {
            let timeout = humantime_serde::re::humantime::parse_duration(&timeout)
                .map_err(|e| Error::InvalidConfig(format!("{ENV_COMMAND_TIMEOUT}: {e}")))?;
            self.command_timeout = Some(timeout);
        }

        self.validate()?;
        Ok(self)
    }

    pub fn binary(mut self, binary: impl Into<String>) -> Self {
        self.binary = binary.into();
        self
    }

    pub fn log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }

    pub fn command_timeout(mut self, timeout: Duration) -> Self {
        self.command_timeout = Some(timeout);
        self
    }

    fn validate(&self) -> Result<()> {
        if self.binary.trim().is_empty() {
            return Err(Error::InvalidConfig("binary cannot be empty".to_string()));
        }
        if self.command_timeout == Some(Duration::ZERO) {
            return Err(Error::InvalidConfig(
                "command_timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

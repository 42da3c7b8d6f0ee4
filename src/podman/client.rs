// ABOUTME: Podman client that shells out to the podman binary.
// ABOUTME: Builds argument lists, runs them and decodes the JSON output.

use super::error::{Error, Result};
use super::runner::{CommandRunner, SystemRunner};
use super::types::InspectKind;
use crate::config::ClientConfig;
use crate::log_level::LogLevel;
use crate::record::{FieldError, Record, RecordExt, kind_of};
use crate::version;
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

/// Client for the podman command line.
///
/// Every invocation starts with `--log-level <level>`, using the level set
/// at the moment the command line is built. The level can be changed
/// through a shared reference.
pub struct Podman<R = SystemRunner> {
    binary: String,
    command_timeout: Option<Duration>,
    log_level: RwLock<LogLevel>,
    runner: R,
}

impl<R> std::fmt::Debug for Podman<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Podman")
            .field("binary", &self.binary)
            .field("command_timeout", &self.command_timeout)
            .field("log_level", &*self.log_level.read())
            .finish()
    }
}

impl Podman<SystemRunner> {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_runner(config, SystemRunner)
    }
}

impl Default for Podman<SystemRunner> {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}

impl<R: CommandRunner> Podman<R> {
    /// Create a client that launches processes through `runner`.
    pub fn with_runner(config: ClientConfig, runner: R) -> Self {
        Self {
            binary: config.binary,
            command_timeout: config.command_timeout,
            log_level: RwLock::new(config.log_level),
            runner,
        }
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn log_level(&self) -> LogLevel {
        *self.log_level.read()
    }

    /// Change the level passed to subsequent invocations.
    pub fn set_log_level(&self, level: LogLevel) {
        *self.log_level.write() = level;
    }

    /// Full argument list for `subcommand`, prefixed with the log level flag.
    pub fn command_line<I, S>(&self, subcommand: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut args = vec!["--log-level".to_string(), self.log_level().to_string()];
        args.extend(subcommand.into_iter().map(Into::into));
        args
    }

    /// Wrapper around `podman ps --format json`.
    ///
    /// `extra_args` are appended verbatim, e.g. `["--all", "--filter", "label=com.example"]`.
    pub async fn list_containers<I, S>(&self, extra_args: I) -> Result<Vec<Record>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.list("ps", extra_args).await
    }

    /// Wrapper around `podman images --format json`.
    pub async fn list_images<I, S>(&self, extra_args: I) -> Result<Vec<Record>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.list("images", extra_args).await
    }

    async fn list<I, S>(&self, subcommand: &str, extra_args: I) -> Result<Vec<Record>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut subcommand = vec![
            subcommand.to_string(),
            "--format".to_string(),
            "json".to_string(),
        ];
        subcommand.extend(extra_args.into_iter().map(Into::into));
        self.run_json(self.command_line(subcommand)).await
    }

    /// Client version reported by `podman version --format json`.
    ///
    /// Newer podman nests the version under `Client`; older releases put it
    /// at the top level.
    pub async fn version(&self) -> Result<String> {
        let document: Record = self
            .run_json(self.command_line(["version", "--format", "json"]))
            .await?;

        let path: &[&str] = match document.get("Client") {
            None | Some(Value::Null) => &["Version"],
            Some(_) => &["Client", "Version"],
        };
        let value = document.get_path(path)?;
        let version = value.as_str().ok_or_else(|| FieldError::WrongType {
            field: path.join("."),
            expected: "a string",
            found: kind_of(value),
        })?;

        Ok(version.to_string())
    }

    /// Whether the installed podman is at least `required`.
    ///
    /// Never fails. If the version cannot be determined, podman is treated
    /// as older than any requirement.
    pub async fn check_version(&self, required: &str) -> bool {
        let current = match self.version().await {
            Ok(current) => current,
            Err(e) => {
                tracing::warn!("Unable to determine podman version: {}", e);
                String::new()
            }
        };
        version::satisfies(&current, required)
    }

    /// Wrapper around `podman inspect --format json --type <kind> <target>`.
    ///
    /// Returns the first inspected object.
    pub async fn inspect(&self, kind: InspectKind, target: &str) -> Result<Record> {
        let args = self.command_line([
            "inspect",
            "--format",
            "json",
            "--type",
            kind.as_str(),
            target,
        ]);
        let records: Vec<Record> = self.run_json(args).await?;

        records
            .into_iter()
            .next()
            .ok_or_else(|| Error::EmptyInspect {
                kind,
                target: target.to_string(),
            })
    }

    /// Run `podman system migrate`, switching OCI runtime when
    /// `new_runtime` is given and non-empty.
    pub async fn system_migrate(&self, new_runtime: Option<&str>) -> Result<()> {
        let mut subcommand = vec!["system", "migrate"];
        if let Some(runtime) = new_runtime.filter(|r| !r.is_empty()) {
            subcommand.extend(["--new-runtime", runtime]);
        }
        self.run(&self.command_line(subcommand)).await.map(|_| ())
    }

    async fn run_json<T: DeserializeOwned>(&self, args: Vec<String>) -> Result<T> {
        let stdout = self.run(&args).await?;
        serde_json::from_slice(&stdout).map_err(|source| Error::Decode {
            command: self.describe(&args),
            source,
        })
    }

    /// Run the binary and return stdout if it exited successfully.
    async fn run(&self, args: &[String]) -> Result<Vec<u8>> {
        let pending = self.runner.run(&self.binary, args);
        let result = match self.command_timeout {
            Some(timeout) => tokio::time::timeout(timeout, pending)
                .await
                .map_err(|_| Error::Timeout {
                    command: self.describe(args),
                    timeout,
                })?,
            None => pending.await,
        };

        let output = result.map_err(|source| match source.kind() {
            std::io::ErrorKind::NotFound => Error::NotFound {
                program: self.binary.clone(),
            },
            _ => Error::Launch {
                program: self.binary.clone(),
                source,
            },
        })?;

        if !output.success() {
            tracing::debug!(
                "{} failed with exit code {:?}: {}",
                self.binary,
                output.exit_code,
                output.stderr.trim()
            );
            return Err(Error::Exited {
                command: self.describe(args),
                exit_code: output.exit_code,
                stderr: output.stderr,
            });
        }

        Ok(output.stdout)
    }

    fn describe(&self, args: &[String]) -> String {
        format!("{} {}", self.binary, args.join(" "))
    }
}

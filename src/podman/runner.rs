// ABOUTME: Process execution seam for podman invocations.
// ABOUTME: SystemRunner spawns the binary with tokio and captures its output.

use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;

/// Captured result of one process invocation.
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    /// Exit code, or None when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    /// Raw standard output.
    pub stdout: Vec<u8>,
    /// Standard error, lossily decoded.
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Runs an external program to completion.
///
/// Launch failures are returned as `io::Error`; a non-zero exit is not an
/// error at this level and is reported through `CommandOutput::exit_code`.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, program: &str, args: &[String]) -> std::io::Result<CommandOutput>;
}

/// Runs programs as child processes of the current process.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(&self, program: &str, args: &[String]) -> std::io::Result<CommandOutput> {
        tracing::debug!("Running {} {}", program, args.join(" "));

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await?;

        Ok(CommandOutput {
            exit_code: output.status.code(),
            stdout: output.stdout,
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

// ABOUTME: Test support utilities.
// ABOUTME: Provides a scripted command runner and fake podman executables.

use async_trait::async_trait;
use parking_lot::Mutex;
use podwrap::podman::{CommandOutput, CommandRunner};
use std::collections::VecDeque;
use std::io;
use std::sync::Once;
use std::time::Duration;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for tests. Safe to call multiple times.
#[allow(dead_code)]
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::EnvFilter;
        let filter = EnvFilter::from_default_env().add_directive("podwrap=debug".parse().unwrap());
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

#[allow(dead_code)]
enum Response {
    Output(CommandOutput),
    LaunchError(io::ErrorKind),
    Hang(Duration),
}

/// Command runner that replays canned responses and records every call.
#[allow(dead_code)]
#[derive(Default)]
pub struct ScriptedRunner {
    responses: Mutex<VecDeque<Response>>,
    calls: Mutex<Vec<(String, Vec<String>)>>,
}

#[allow(dead_code)]
impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful invocation printing `stdout`.
    pub fn stdout(self, stdout: &str) -> Self {
        self.push(Response::Output(CommandOutput {
            exit_code: Some(0),
            stdout: stdout.as_bytes().to_vec(),
            stderr: String::new(),
        }))
    }

    /// Queue an invocation exiting with `code`.
    pub fn exit(self, code: i32, stderr: &str) -> Self {
        self.push(Response::Output(CommandOutput {
            exit_code: Some(code),
            stdout: Vec::new(),
            stderr: stderr.to_string(),
        }))
    }

    /// Queue a failure to launch the program.
    pub fn launch_error(self, kind: io::ErrorKind) -> Self {
        self.push(Response::LaunchError(kind))
    }

    /// Queue an invocation that does not finish within `duration`.
    pub fn hang(self, duration: Duration) -> Self {
        self.push(Response::Hang(duration))
    }

    fn push(self, response: Response) -> Self {
        self.responses.lock().push_back(response);
        self
    }

    /// Programs and argument lists of all invocations so far.
    pub fn calls(&self) -> Vec<(String, Vec<String>)> {
        self.calls.lock().clone()
    }

    /// Argument list of the most recent invocation.
    pub fn last_args(&self) -> Vec<String> {
        self.calls
            .lock()
            .last()
            .map(|(_, args)| args.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run(&self, program: &str, args: &[String]) -> io::Result<CommandOutput> {
        self.calls
            .lock()
            .push((program.to_string(), args.to_vec()));

        let response = self.responses.lock().pop_front();
        match response {
            Some(Response::Output(output)) => Ok(output),
            Some(Response::LaunchError(kind)) => Err(io::Error::from(kind)),
            Some(Response::Hang(duration)) => {
                tokio::time::sleep(duration).await;
                Ok(CommandOutput::default())
            }
            None => Err(io::Error::other("no scripted response left")),
        }
    }
}

static SCRIPT_LOCK: Mutex<()> = Mutex::new(());

/// Serialises tests that write and execute scripts. Executing a file while
/// another thread holds it open for writing fails with ETXTBSY.
#[allow(dead_code)]
pub fn script_lock() -> parking_lot::MutexGuard<'static, ()> {
    SCRIPT_LOCK.lock()
}

/// Write an executable `podman` stand-in running `body` under /bin/sh.
#[cfg(unix)]
#[allow(dead_code)]
pub fn fake_podman(dir: &std::path::Path, body: &str) -> std::path::PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("podman");
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

// ABOUTME: Errors returned by podman client operations.
// ABOUTME: Groups variants into process, decode, field and index kinds.

use super::InspectKind;
use crate::record::FieldError;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{program}(1) not found")]
    NotFound { program: String },

    #[error("failed to invoke {program}(1): {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` {}: {}", describe_exit(.exit_code), .stderr.trim())]
    Exited {
        command: String,
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("`{command}` timed out after {timeout:?}")]
    Timeout { command: String, timeout: Duration },

    #[error("failed to decode output of `{command}`: {source}")]
    Decode {
        command: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unexpected podman output: {0}")]
    Field(#[from] FieldError),

    #[error("inspect returned no {kind} matching '{target}'")]
    EmptyInspect { kind: InspectKind, target: String },
}

fn describe_exit(exit_code: &Option<i32>) -> String {
    match exit_code {
        Some(code) => format!("exited with status {code}"),
        None => "was terminated by a signal".to_string(),
    }
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The binary could not be launched, exited non-zero or timed out.
    Process,
    /// Standard output was not the expected JSON shape.
    Decode,
    /// A field was missing or had the wrong type.
    Field,
    /// Inspect matched nothing.
    Index,
}

impl Error {
    /// Returns the error kind for programmatic handling.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NotFound { .. }
            | Error::Launch { .. }
            | Error::Exited { .. }
            | Error::Timeout { .. } => ErrorKind::Process,
            Error::Decode { .. } => ErrorKind::Decode,
            Error::Field(_) => ErrorKind::Field,
            Error::EmptyInspect { .. } => ErrorKind::Index,
        }
    }

    /// Returns captured stderr if the process exited unsuccessfully.
    pub fn stderr(&self) -> Option<&str> {
        match self {
            Error::Exited { stderr, .. } => Some(stderr),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

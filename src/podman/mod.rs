// ABOUTME: Client for the podman command line.
// ABOUTME: Lists containers and images, inspects objects, checks versions, migrates storage.

mod client;
mod error;
mod runner;
mod types;

pub use client::Podman;
pub use error::{Error, ErrorKind, Result};
pub use runner::{CommandOutput, CommandRunner, SystemRunner};
pub use types::{InspectKind, ParseInspectKindError};

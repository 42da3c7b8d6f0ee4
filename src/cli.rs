// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines all subcommands and their arguments.

use clap::{Parser, Subcommand};
use podwrap::log_level::LogLevel;
use podwrap::podman::InspectKind;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "podwrap")]
#[command(about = "Query podman and decode its JSON output")]
#[command(version)]
pub struct Cli {
    /// YAML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level passed to podman (panic, fatal, error, warning, info, debug, trace)
    #[arg(long, global = true)]
    pub log_level: Option<LogLevel>,

    /// Print one compact JSON document per line
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List containers
    Ps {
        /// Extra arguments forwarded to `podman ps`
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// List images
    Images {
        /// Extra arguments forwarded to `podman images`
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Print the podman client version
    Version,

    /// Exit successfully if podman is at least the given version
    CheckVersion {
        /// Minimum required version, e.g. 1.6.0
        required: String,
    },

    /// Inspect a container or image
    Inspect {
        /// Object kind (container or image)
        #[arg(long = "type", value_name = "KIND")]
        kind: InspectKind,

        /// Name or ID of the object
        target: String,
    },

    /// Migrate containers to the current podman version
    Migrate {
        /// Switch containers to this OCI runtime
        #[arg(long)]
        new_runtime: Option<String>,
    },
}

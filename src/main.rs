// ABOUTME: Entry point for the podwrap CLI application.
// ABOUTME: Parses arguments and dispatches to the podman client.

mod cli;
mod output;

use clap::Parser;
use cli::{Cli, Commands};
use output::{Output, OutputMode};
use podwrap::config::ClientConfig;
use podwrap::error::Result;
use podwrap::podman::Podman;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing subscriber based on verbose flag
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let output = Output::new(if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Normal
    });

    match run(cli, &output).await {
        Ok(code) => code,
        Err(e) => {
            output.error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, output: &Output) -> Result<ExitCode> {
    let podman = Podman::new(load_config(&cli)?);

    match cli.command {
        Commands::Ps { args } => output.records(&podman.list_containers(args).await?),
        Commands::Images { args } => output.records(&podman.list_images(args).await?),
        Commands::Version => output.message("version", &podman.version().await?),
        Commands::CheckVersion { required } => {
            if !podman.check_version(&required).await {
                output.message(
                    "unsatisfied",
                    &format!("podman is older than {required}"),
                );
                return Ok(ExitCode::FAILURE);
            }
            output.message("satisfied", &format!("podman is at least {required}"));
        }
        Commands::Inspect { kind, target } => {
            output.record(&podman.inspect(kind, &target).await?);
        }
        Commands::Migrate { new_runtime } => {
            podman.system_migrate(new_runtime.as_deref()).await?;
            output.message("migrated", "Migration complete");
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Defaults, then the config file, then PODWRAP_* variables, then flags.
fn load_config(cli: &Cli) -> Result<ClientConfig> {
    let config = match &cli.config {
        Some(path) => ClientConfig::load(path)?,
        None => ClientConfig::default(),
    }
    .apply_env()?;

    Ok(match cli.log_level {
        Some(level) => config.log_level(level),
        None => config,
    })
}

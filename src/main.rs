//! Admin console
//!
//! Command-line front end for the admin backend: renders the schema-driven
//! settings form and the persona list, applies edits and persists them
//! through the backend's JSON API.

mod api;
mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod persona;
mod settings;
mod ui;
mod version;

use clap::Parser;
use tracing::{debug, info};

use crate::cli::{Cli, Commands, ConfigSubcommand};
use crate::commands::Outcome;
use crate::config::ConsoleConfig;
use crate::error::Error;

fn main() {
    // Parse CLI arguments first (before logging, so we know verbosity)
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        match e.downcast_ref::<Error>() {
            Some(err) => {
                eprint!("{}", err.format_for_terminal());
                std::process::exit(err.exit_code());
            }
            None => {
                eprintln!("\x1b[31mError\x1b[0m: {:#}", e);
                std::process::exit(1);
            }
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Version => {
            version::print_version();
            return Ok(());
        }
        Commands::Config {
            subcommand: ConfigSubcommand::Init { path, force },
        } => {
            let created = config::init_config(path.as_deref(), *force)?;
            println!("Created {}", created.display());
            return Ok(());
        }
        _ => {}
    }

    let mut config = ConsoleConfig::load(cli.config.as_deref())?;
    if let Some(ref server) = cli.server {
        config.override_server(server)?;
    }

    // The guards must be kept alive for the lifetime of the program
    let _log_guards = logging::init_logging(&config.logging, cli.verbose, cli.quiet)?;

    let build = version::BuildInfo::current();
    debug!(
        version = %build.full_version(),
        server = %config.server.base_url,
        "Starting admin console"
    );

    let outcome = match cli.command {
        Commands::Config { subcommand } => return handle_config_command(&config, subcommand),
        Commands::Settings { subcommand } => {
            block_on(commands::run_settings(&config, subcommand))?
        }
        Commands::Persona { subcommand } => {
            block_on(commands::run_persona(&config, subcommand))?
        }
        Commands::Version => unreachable!(),
    };

    report(outcome, cli.quiet)
}

/// Controllers serialize their own work; one thread is all they need
fn block_on<T, F>(future: F) -> anyhow::Result<T>
where
    F: std::future::Future<Output = anyhow::Result<T>>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| Error::Internal(format!("Failed to create runtime: {}", e)))?;
    runtime.block_on(future)
}

/// Print the toast left on screen; a failed action exits non-zero
fn report(outcome: Outcome, quiet: bool) -> anyhow::Result<()> {
    if let Some(toast) = &outcome.toast {
        if !quiet || !outcome.ok {
            eprintln!("{}", toast);
        }
    }
    if !outcome.ok {
        info!("Command did not complete");
        std::process::exit(1);
    }
    Ok(())
}

fn handle_config_command(config: &ConsoleConfig, subcommand: ConfigSubcommand) -> anyhow::Result<()> {
    match subcommand {
        ConfigSubcommand::Show => {
            println!("{}", toml::to_string_pretty(config).map_err(Error::from)?);
        }
        ConfigSubcommand::Validate => {
            // Loading already validated it
            println!("Configuration is valid.");
        }
        ConfigSubcommand::Init { .. } => unreachable!(),
    }
    Ok(())
}

mod cli;
mod commands;
mod config;
mod error;
mod output;

use std::io::IsTerminal;

use clap::{CommandFactory, Parser};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use bwan_core::EdgeService;

use crate::cli::Cli;
use crate::commands::util::TerminalConfirmer;
use crate::error::CliError;

/// Crates whose events are shown at the chosen verbosity.
const LOG_TARGETS: &[&str] = &["bwan_edges", "bwan_core", "bwan_api", "bwan_config"];

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Bare invocation shows usage instead of doing nothing
    if std::env::args_os().len() <= 1 {
        let _ = Cli::command().print_help();
        return;
    }

    let cli = Cli::parse();
    init_tracing(cli.global.verbose, cli.global.quiet);

    let cancel = CancellationToken::new();
    spawn_interrupt_handler(cancel.clone());

    // Dispatch and handle errors with proper exit codes
    if let Err(err) = run(cli, cancel).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8, quiet: bool) {
    let level = match (quiet, verbosity) {
        (true, _) => "warn",
        (false, 0) => "info",
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    let directives = std::iter::once("warn".to_owned())
        .chain(LOG_TARGETS.iter().map(|t| format!("{t}={level}")))
        .collect::<Vec<_>>()
        .join(",");

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives)),
        )
        .with_target(false)
        .with_ansi(std::io::stdout().is_terminal())
        .with_writer(std::io::stdout)
        .init();
}

/// Cancel `token` on the first Ctrl-C.
fn spawn_interrupt_handler(token: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, stopping");
            token.cancel();
        }
    });
}

async fn run(cli: Cli, cancel: CancellationToken) -> Result<(), CliError> {
    if let Some(shell) = cli.actions.completions {
        let mut cmd = Cli::command();
        clap_complete::generate(shell, &mut cmd, "bwan-edges", &mut std::io::stdout());
        return Ok(());
    }

    let service_config = config::resolve_service_config(&cli.global)?;
    info!("Working with tenant: {}", service_config.tenant_url);

    if !cli.actions.any() {
        warn!("No action requested, use --list_clients, --dump_clients, or --remove_client");
        return Ok(());
    }

    let service = EdgeService::new(&service_config, cancel.clone())?;
    let mut confirmer = TerminalConfirmer::new(cli.global.yes, cancel);

    debug!(actions = ?cli.actions, "dispatching");
    commands::dispatch(&service, &cli.actions, &cli.global, &mut confirmer).await
}

use anyhow::Result;
use clap::Parser;
use tokio::signal;
use tracing_subscriber::EnvFilter;

use viarag::cli::commands::{
    handle_chunk, handle_config, handle_docs, handle_health, handle_match, handle_query,
};
use viarag::cli::{Cli, Commands, ConnectionArgs};
use viarag::models::{Config, OutputFormat};

/// Log to stderr; `RUST_LOG` wins over the `--verbose` default.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "viarag=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load().unwrap_or_default();
    let format = cli.format.unwrap_or(config.output.default_format);
    let verbose = cli.verbose;

    tokio::select! {
        result = run_command(cli.command, &cli.connection, format, verbose) => {
            result?;
        }
        _ = shutdown_signal() => {
            eprintln!("\nInterrupted, request cancelled.");
        }
    }

    Ok(())
}

async fn run_command(
    command: Commands,
    connection: &ConnectionArgs,
    format: OutputFormat,
    verbose: bool,
) -> Result<()> {
    match command {
        Commands::Health => {
            handle_health(connection, format, verbose).await?;
        }
        Commands::Query(args) => {
            handle_query(args, connection, format, verbose).await?;
        }
        Commands::Match(args) => {
            handle_match(args, connection, format, verbose).await?;
        }
        Commands::Chunk(args) => {
            handle_chunk(args, connection, format, verbose).await?;
        }
        Commands::Docs(cmd) => {
            handle_docs(cmd, connection, format, verbose).await?;
        }
        Commands::Config(cmd) => {
            handle_config(cmd, format, verbose).await?;
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

//! Scatch CLI application entry point
//!
//! This is the main executable for scatch. It opens the infinite-scroll
//! gallery by default and offers scriptable commands for searching, the
//! image proxy, search history and the local library.
//!
//! # Usage
//!
//! ```bash
//! # Open the gallery on curated photos (default command)
//! scatch
//! scatch browse "northern lights" -o landscape
//!
//! # Print two pages of search results
//! scatch search owls --pages 2
//!
//! # Forward a proxy query and print the JSON answer
//! scatch proxy -e search -Q owls -p 2
//!
//! # Keep photos locally
//! scatch album save birds 1181292
//! scatch fav add 1181292
//!
//! # Quiet mode (only output results)
//! scatch -q search owls
//! ```
//!
//! # Configuration
//!
//! On first run, scatch prompts for the API endpoint and key. Configuration
//! is stored in the user's config directory (`~/.config/scatch/config.toml`
//! on Linux) and can be overridden with `SCATCH_*` environment variables.
//!
//! # Logging
//!
//! Logs go to daily files under the data directory
//! (`~/.local/share/scatch/logs` on Linux) so they never draw over the
//! gallery. `RUST_LOG` overrides the default filter.

use scatch::{
    ImageRecord, ScatchError,
    api::ProxyQuery,
    cli::{Cli, Commands, HistoryCommands},
    commands,
    config::ScatchConfig,
};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{error, info};

type Result<T> = std::result::Result<T, ScatchError>;

/// Initialize file logging. Returns a guard that must be held for the app lifetime.
fn init_logging(data_dir: &Path) -> tracing_appender::non_blocking::WorkerGuard {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let logs_dir = data_dir.join("logs");
    std::fs::create_dir_all(&logs_dir).ok();

    let file_appender = tracing_appender::rolling::daily(&logs_dir, "scatch.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,scatch=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .init();

    guard
}

fn run(cli: &Cli) -> Result<()> {
    let command = cli.get_command();

    // Completions never need configuration
    if let Commands::Completions { shell } = &command {
        commands::completions(*shell, &mut io::stdout());
        return Ok(());
    }

    let config = ScatchConfig::load_or_setup()?;
    let quiet = cli.quiet || config.quiet;

    match &command {
        Commands::Browse { .. } => {
            let feed = command
                .feed_query()
                .ok_or_else(|| ScatchError::InvalidInput("Nothing to browse".into()))?;
            commands::browse(&config, feed)?;
        }
        Commands::Search { pages, .. } | Commands::Curated { pages, .. } => {
            let feed = command
                .feed_query()
                .ok_or_else(|| ScatchError::InvalidInput("Search query must not be empty".into()))?;
            commands::search(&config, feed, *pages, quiet)?;
        }
        Commands::Show { id, open } => {
            commands::show(&config, *id, *open, quiet)?;
        }
        Commands::Proxy {
            endpoint,
            page,
            query,
            orientation,
        } => {
            let query = ProxyQuery {
                e: endpoint.clone(),
                p: page.clone(),
                q: query.clone(),
                o: orientation.clone(),
            };
            commands::proxy(&config, query, quiet)?;
        }
        Commands::History { command } => {
            let store = commands::history_store(&config)?;
            commands::history(&store, command.unwrap_or(HistoryCommands::List), quiet)?;
        }
        Commands::Album { command } => {
            let library = commands::open_library(&config)?;
            let lookup = |id: u64| -> Result<ImageRecord> {
                commands::album::remote_lookup(&commands::remote_source(&config)?, id)
            };
            commands::album(&library, command, lookup, quiet)?;
        }
        Commands::Favorite { command } => {
            let library = commands::open_library(&config)?;
            let lookup = |id: u64| -> Result<ImageRecord> {
                commands::album::remote_lookup(&commands::remote_source(&config)?, id)
            };
            commands::favorite(&library, command, lookup, quiet)?;
        }
        Commands::Layout {
            width,
            count,
            min_column_width,
        } => {
            let min = min_column_width.unwrap_or(config.min_column_width);
            commands::layout(*width, *count, min, quiet)?;
        }
        Commands::Config { command } => {
            commands::config(config, command, quiet)?;
        }
        Commands::Completions { .. } => {}
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse_args();

    let data_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("scatch");
    let log_guard = init_logging(&data_dir);
    info!(version = env!("CARGO_PKG_VERSION"), "scatch starting");

    if let Err(e) = run(&cli) {
        error!(error = %e, "command failed");
        eprintln!("Error: {e}");
        drop(log_guard);
        std::process::exit(1);
    }
}

//! Terminal front-end and entry point.
//!
//! Reads one command per line from stdin, posts it to the runtime through a
//! [`CommandSender`], and lets [`TerminalSink`] print whatever the runtime
//! reports.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────┐
//! │  stdin task              │  ← parse_command
//! │          │ CommandSender │
//! │          ▼               │
//! │  ┌────────────────────┐  │
//! │  │ Runtime (loop)     │  │  ← AppState, spawned fetches
//! │  └────────────────────┘  │
//! │          │               │
//! │          ▼               │
//! │  TerminalSink → stdout   │
//! └──────────────────────────┘
//! ```
//!
//! Everything runs on a single-threaded tokio runtime. `export` is the one
//! command that bypasses the loop: it downloads the CSV and writes the file
//! directly, since it touches no session state.

#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use petscout::app::{CommandSender, FavoritesCommands, SearchCommands};
use petscout::cli::{parse_command, CliArgs, Command, HELP};
use petscout::favorites::{FavoritesBackend, HttpFavorites};
use petscout::fetch::HttpPageFetcher;
use petscout::infrastructure::build_client;
use petscout::observability::init_tracing;
use petscout::ui::TerminalSink;
use petscout::{initialize, Result, Runtime};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = CliArgs::parse();
    match run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("petscout: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &CliArgs) -> Result<()> {
    let config = args.load_config()?;
    init_tracing(&config)?;

    let client = build_client(config.request_timeout())?;
    let fetcher = Arc::new(HttpPageFetcher::with_client(&config, client.clone())?);
    let favorites = Arc::new(HttpFavorites::with_client(&config, client)?);

    tracing::info!(
        search_url = %fetcher.url(),
        timeout_secs = config.request_timeout_secs,
        "petscout starting"
    );

    let mut runtime = Runtime::new(
        initialize(&config),
        fetcher,
        Arc::clone(&favorites) as Arc<dyn FavoritesBackend>,
        TerminalSink::stdout(),
    );
    let commands = runtime.commands();

    println!("{HELP}");
    if !args.no_initial_search {
        commands.initialize()?;
    }

    let input = tokio::spawn(read_commands(commands, favorites));
    runtime.run().await?;
    input.abort();
    Ok(())
}

/// Feeds stdin lines to the runtime until `quit` or end of input.
async fn read_commands(commands: CommandSender, favorites: Arc<HttpFavorites>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read stdin");
                break;
            }
        };

        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                eprintln!("{e}");
                continue;
            }
        };

        let sent = match command {
            Command::Search(filters) => commands.on_submit(filters),
            Command::Category(category) => commands.on_category_select(category),
            Command::More => commands.on_load_more(),
            Command::Save(index) => commands.on_save_result(index),
            Command::Favorites => commands.on_refresh_favorites(),
            Command::Filter(filter) => commands.on_filter_favorites(filter),
            Command::Remove(id) => commands.on_remove_favorite(id),
            Command::Export(path) => {
                export(favorites.as_ref(), &path).await;
                Ok(())
            }
            Command::Help => {
                println!("{HELP}");
                Ok(())
            }
            Command::Quit => break,
        };

        if let Err(e) = sent {
            tracing::debug!(error = %e, "runtime gone, stopping input");
            return;
        }
    }

    if let Err(e) = commands.shutdown() {
        tracing::debug!(error = %e, "runtime already stopped");
    }
}

async fn export(favorites: &dyn FavoritesBackend, path: &Path) {
    let csv = match favorites.export_csv().await {
        Ok(csv) => csv,
        Err(e) => {
            eprintln!("Could not export favorites: {e}");
            return;
        }
    };
    match tokio::fs::write(path, &csv).await {
        Ok(()) => println!("Exported {} bytes to {}", csv.len(), path.display()),
        Err(e) => eprintln!("Could not write {}: {e}", path.display()),
    }
}

//! LeafDB REPL Binary
//!
//! Opens a database file and runs the command loop on stdin/stdout.
//! Logs go to stderr so they never mix with prompt output.

use std::io;
use std::path::PathBuf;

use clap::Parser;
use leafdb::repl::Dispatcher;
use leafdb::{Config, FlushPolicy, Table};
use tracing_subscriber::{fmt, EnvFilter};

/// LeafDB command prompt
#[derive(Parser, Debug)]
#[command(name = "leafdb")]
#[command(about = "Single-table paged database with a sqlite-style prompt")]
#[command(version)]
struct Args {
    /// Database file (created if missing)
    db_path: PathBuf,

    /// Maximum number of pages the pager may address
    #[arg(long, default_value = "100")]
    max_pages: u32,

    /// Write dirty pages back after every insert
    #[arg(long)]
    write_through: bool,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    tracing::info!("LeafDB v{}", leafdb::VERSION);
    tracing::info!("Database file: {}", args.db_path.display());

    let flush_policy = if args.write_through {
        FlushPolicy::EveryInsert
    } else {
        FlushPolicy::OnClose
    };

    // Build config from args
    let config = Config::builder()
        .db_path(&args.db_path)
        .max_pages(args.max_pages)
        .flush_policy(flush_policy)
        .build();

    // Open table
    let mut table = match Table::open(config) {
        Ok(t) => t,
        Err(e) => {
            tracing::error!("Failed to open table: {}", e);
            std::process::exit(1);
        }
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut dispatcher = Dispatcher::new(stdin.lock(), stdout.lock());

    let exit = match dispatcher.run(&mut table) {
        Ok(exit) => exit,
        Err(e) => {
            tracing::error!("Fatal error: {}", e);
            std::process::exit(1);
        }
    };
    tracing::info!(?exit, "command loop finished");

    if let Err(e) = table.close() {
        tracing::error!("Failed to close table: {}", e);
        std::process::exit(1);
    }
}

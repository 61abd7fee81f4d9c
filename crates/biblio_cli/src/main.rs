//! Biblio command-line entry point.
//!
//! # Responsibility
//! - Parse process arguments and start file logging.
//! - Build the catalog from persisted settings and the store chain.
//! - Run the interactive menu, or one scripted command and exit.

mod console;
mod input;
mod menu;
mod render;

use biblio_core::{
    default_log_level, init_logging, CatalogService, Settings, SnapshotChain, SETTINGS_FILE_NAME,
};
use clap::{Parser, Subcommand};
use console::Console;
use log::info;
use menu::{Catalog, Menu};
use std::error::Error;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

const DEFAULT_DATA_DIR: &str = "biblio-data";
const LOG_DIR_NAME: &str = "logs";

/// Biblio - personal library catalog manager
#[derive(Parser, Debug)]
#[command(name = "biblio", author, version, about, long_about = None)]
struct Args {
    /// Directory holding settings, catalog snapshots and logs
    #[arg(long, env = "BIBLIO_DATA_DIR", default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    /// Log level: trace, debug, info, warn or error
    #[arg(long, env = "BIBLIO_LOG_LEVEL")]
    log_level: Option<String>,

    /// SQLite document database to use ahead of the JSON file.
    /// Overrides `database_path` from the settings file for this run.
    #[arg(long, env = "BIBLIO_DATABASE")]
    database: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every item
    List,
    /// Print items matching a query, e.g. `auteur:tolkien annee:19%`
    Search {
        /// Query tokens; joined with spaces
        query: Vec<String>,
    },
    /// Print items of one type, optionally filtered by a query
    Kind {
        /// book, comic_book or periodical
        kind: String,
        /// Query tokens; joined with spaces
        query: Vec<String>,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let data_dir = std::path::absolute(&args.data_dir)?;
    std::fs::create_dir_all(&data_dir)?;

    let level = args.log_level.as_deref().unwrap_or(default_log_level());
    init_logging(level, &data_dir.join(LOG_DIR_NAME))?;
    info!(
        "event=app_start module=cli status=ok version={}",
        env!("CARGO_PKG_VERSION")
    );

    let settings_path = data_dir.join(SETTINGS_FILE_NAME);
    let settings = Settings::load_or_default(&settings_path);

    // Why: `--database` applies to this run only; settings.json keeps the saved choice.
    let mut store_settings = settings.clone();
    if let Some(database) = args.database {
        store_settings.database_path = Some(database);
    }
    let chain = SnapshotChain::from_settings(&store_settings, &data_dir);

    match args.command {
        Some(command) => run_command(command, &CatalogService::open(chain)),
        None => {
            let catalog = if settings.load_on_startup {
                CatalogService::open(chain)
            } else {
                CatalogService::empty(chain)
            };
            let console = Console::new(io::stdin().lock(), io::stdout());
            Menu::new(console, catalog, settings, settings_path).run()?;
            Ok(())
        }
    }
}

fn run_command(command: Command, catalog: &Catalog) -> Result<(), Box<dyn Error>> {
    let listing = match command {
        Command::List => render::render_items(catalog.list_items()),
        Command::Search { query } => render::render_items(catalog.search(&query.join(" "))?),
        Command::Kind { kind, query } => {
            let kind = input::parse_kind(&kind)?;
            render::render_items(catalog.search_kind(kind, &query.join(" "))?)
        }
    };
    print!("{listing}");
    Ok(())
}

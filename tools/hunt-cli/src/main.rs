use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod output;

use commands::App;

#[derive(Parser, Debug)]
#[command(
    name = "hunt",
    author,
    version,
    about = "Play, inspect and author scavenger hunts",
    long_about = "Loads hunts from a directory of JSON files and keeps each player's \
                  progress in a local SQLite database.\n\n\
                  A location check takes the position on the command line, the way a \
                  device would report it: latitude, longitude and an accuracy radius \
                  in meters."
)]
struct Args {
    /// Directory of hunt JSON files (falls back to the sample hunts)
    #[arg(long, default_value = "hunts")]
    hunts: PathBuf,

    /// Progress database
    #[arg(long, default_value = "hunt-progress.sqlite3")]
    db: PathBuf,

    /// Engine configuration JSON
    #[arg(long)]
    config: Option<PathBuf>,

    /// Verbose output (show debug messages)
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List available hunts with their progress
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a hunt and its clues, and make it the selected hunt
    Show {
        /// Hunt id (defaults to the selected hunt)
        hunt: Option<String>,
    },

    /// Check in at a clue's location
    Check {
        /// Clue number, starting at 1
        clue: usize,

        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        /// Reported accuracy radius in meters
        #[arg(long, default_value = "10")]
        accuracy: f64,

        /// Hunt id (defaults to the selected hunt)
        #[arg(long)]
        hunt: Option<String>,
    },

    /// Forget progress
    Reset {
        /// Hunt id (defaults to the selected hunt)
        #[arg(long, conflicts_with = "all")]
        hunt: Option<String>,

        /// Forget progress for every hunt
        #[arg(long)]
        all: bool,
    },

    /// Validate a hunt file before publishing it
    Validate {
        file: PathBuf,

        /// Print the hunt as it would be published
        #[arg(long)]
        print: bool,
    },

    /// Great-circle distance between two points
    Distance {
        #[arg(allow_hyphen_values = true)]
        from_lat: f64,
        #[arg(allow_hyphen_values = true)]
        from_lon: f64,
        #[arg(allow_hyphen_values = true)]
        to_lat: f64,
        #[arg(allow_hyphen_values = true)]
        to_lon: f64,
    },

    /// Show or change player settings
    Settings {
        /// Turn map reveal on or off
        #[arg(long)]
        map_reveal: Option<bool>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if args.verbose { "debug" } else { "info" }));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().without_time().with_writer(std::io::stderr))
        .with(filter)
        .init();

    // These don't touch the catalog or the database.
    match &args.command {
        Command::Validate { file, print } => return commands::validate(file, *print),
        Command::Distance {
            from_lat,
            from_lon,
            to_lat,
            to_lon,
        } => return commands::distance(*from_lat, *from_lon, *to_lat, *to_lon),
        _ => {}
    }

    let app = App::open(&args.hunts, &args.db, args.config.as_deref())
        .context("Failed to start")?;

    match args.command {
        Command::List { json } => app.list(json).await,
        Command::Show { hunt } => app.show(hunt).await,
        Command::Check {
            clue,
            lat,
            lon,
            accuracy,
            hunt,
        } => app.check(hunt, clue, lat, lon, accuracy).await,
        Command::Reset { hunt, all } => app.reset(hunt, all).await,
        Command::Settings { map_reveal } => app.settings(map_reveal).await,
        Command::Validate { .. } | Command::Distance { .. } => Ok(()),
    }
}

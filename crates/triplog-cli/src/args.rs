use clap::{Parser, Subcommand, ValueEnum};

/// CLI arguments for triplog
#[derive(Debug, Parser)]
#[command(
    name = "triplog",
    version,
    about = "CLI for planning trips: ordered place visits, typed routes, search, export"
)]
pub struct CliArgs {
    /// Path to the trip store file (use a .json.gz suffix for gzip)
    #[arg(short = 's', long = "store", global = true, default_value = "triplog.json")]
    pub store: String,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short = 'v', long = "verbose", global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new trip
    New {
        /// Trip name
        name: String,
        /// Optional trip description
        #[arg(short, long, default_value = "")]
        description: String,
    },

    /// List all trips, newest first
    List,

    /// Show a trip: visits, notes, and resolved routes
    Show {
        /// Trip id
        trip: u64,
    },

    /// Delete a trip and everything in it
    Delete {
        /// Trip id
        trip: u64,
    },

    /// Append a place to a trip
    AddCity {
        /// Trip id
        trip: u64,
        /// Place name (e.g. Tokyo)
        name: String,
        /// Country (e.g. Japan)
        country: String,
        /// Latitude in degrees
        lat: f64,
        /// Longitude in degrees
        lng: f64,
        /// State / province / prefecture
        #[arg(long)]
        state: Option<String>,
    },

    /// Remove the visit at a position
    RemoveCity {
        /// Trip id
        trip: u64,
        /// Zero-based position
        index: usize,
    },

    /// Move a visit one position up or down
    MoveCity {
        /// Trip id
        trip: u64,
        /// Zero-based position
        index: usize,
        /// Direction to move
        #[arg(value_enum)]
        direction: Direction,
    },

    /// Classify the route arriving at a position
    Route {
        /// Trip id
        trip: u64,
        /// Zero-based position (must be > 0)
        index: usize,
        /// normal, airplane, car, or walking
        kind: String,
        /// Line color; only rendered for normal routes
        #[arg(long, default_value = "#3b82f6")]
        color: String,
    },

    /// Set the notes on a visit
    Notes {
        /// Trip id
        trip: u64,
        /// Zero-based position
        index: usize,
        /// Note text
        text: String,
    },

    /// Export a trip to a JSON file
    Export {
        /// Trip id
        trip: u64,
        /// Output path (use a .json.gz suffix for gzip)
        output: String,
    },

    /// Import a trip from a JSON export file
    Import {
        /// Path to the export file
        file: String,
    },

    /// Search for places by free text (requires the 'client' feature)
    Search {
        /// Query, e.g. "Springfield"
        query: String,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Direction {
    Up,
    Down,
}

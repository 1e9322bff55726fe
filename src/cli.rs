use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "torrentmate")]
#[command(author, version, about = "Release metadata, NFO, BBCode and torrent generator")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Process release folders and write their NFO, BBCode and torrent files
    Process {
        /// Release folders to process
        #[arg(required = true)]
        folders: Vec<PathBuf>,

        /// Directory receiving the generated files
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Tracker announce URL
        #[arg(short, long)]
        tracker: Option<String>,

        /// Skip torrent creation
        #[arg(long)]
        no_torrent: bool,

        /// Show the naming token without writing anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Show the metadata and naming token of a release folder
    Inspect {
        /// Release folder to inspect
        #[arg(required = true)]
        folder: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check that required external tools are available
    CheckTools,

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "takeoutfix")]
#[command(author, version, about = "Fix photo and video extensions in data exports")]
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
    /// Check whether a directory contains any photos or videos
    Preflight {
        /// Directory to check
        #[arg(required = true)]
        dir: PathBuf,
    },

    /// Rename files whose extension does not match their real type
    Fix {
        /// Directory to process
        #[arg(required = true)]
        dir: PathBuf,

        /// Show what would be renamed without renaming
        #[arg(long)]
        dry_run: bool,

        /// Worker threads (0 = one per CPU)
        #[arg(short, long)]
        workers: Option<usize>,

        /// Output the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the file types exiftool can write metadata into
    Writable {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check that exiftool is available
    CheckTools,

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}

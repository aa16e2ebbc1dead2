//! CLI module for YouNotes.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// YouNotes - notes from transcripts and YouTube videos
///
/// Paste a transcript or point at a YouTube video and get concise notes back.
#[derive(Parser, Debug)]
#[command(name = "younotes")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Base URL of the transcript extraction service
    #[arg(long, global = true, env = "YOUNOTES_SERVICE_URL")]
    pub service_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate notes from a transcript or a YouTube video
    Notes {
        /// Transcript text to summarize
        #[arg(short, long, conflicts_with_all = ["file", "youtube"])]
        text: Option<String>,

        /// Read the transcript from a file ('-' for stdin)
        #[arg(short, long, conflicts_with = "youtube")]
        file: Option<String>,

        /// YouTube video URL to fetch the transcript from
        #[arg(short, long)]
        youtube: Option<String>,

        /// Transcript language code (e.g. en, es, fr)
        #[arg(short, long)]
        lang: Option<String>,

        /// Write notes to a file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Fetch the transcript of a YouTube video without generating notes
    Transcript {
        /// YouTube video URL
        url: String,

        /// Transcript language code
        #[arg(short, long)]
        lang: Option<String>,
    },

    /// Show how much of the token budget a transcript uses
    Budget {
        /// Transcript text
        #[arg(short, long, conflicts_with = "file")]
        text: Option<String>,

        /// Read the transcript from a file ('-' for stdin)
        #[arg(short, long)]
        file: Option<String>,
    },

    /// List supported transcript languages
    Languages,

    /// Start the HTTP API server
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Check configuration and connectivity
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Open configuration file in editor
    Edit,

    /// Show configuration file path
    Path,
}

//! CLI module for Moviewhiz.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Moviewhiz - Conversational Movie Recommendations
///
/// Chat with a movie assistant and get catalog cards for every title it recommends.
#[derive(Parser, Debug)]
#[command(name = "moviewhiz")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "MOVIEWHIZ_CONFIG")]
    pub config: Option<String>,

    /// Extra env file with API keys (a `.env` in the working directory is always read)
    #[arg(long, global = true)]
    pub env_file: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check credentials and configuration
    Doctor,

    /// Start an interactive chat session
    Chat,

    /// Ask a single question and print the answer with movie cards
    Ask {
        /// The question to ask
        question: String,
    },

    /// Search the movie catalog directly
    Search {
        /// Movie title or keywords
        query: String,

        /// Maximum number of results
        #[arg(short, long, default_value = "5")]
        limit: usize,
    },

    /// Start HTTP API server for chat sessions
    Serve {
        /// Host to bind to (defaults to [server].host)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (defaults to [server].port)
        #[arg(short, long)]
        port: Option<u16>,
    },

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

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// `beer-reviews` - beer review API with a background LLM rater.
#[derive(Parser, Debug)]
#[command(name = "beer-reviews")]
#[command(version)]
#[command(about = "Beer review API with a background LLM rater.", long_about = None)]
pub struct Cli {
    /// Config file (default: ~/.beer-reviews/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the review API only
    Serve {
        /// Port to listen on (use 0 for random available port)
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,
    },

    /// Run the background rater only (needs storage shared with `serve`)
    Rater,

    /// Run the review API and the rater together in one process
    Daemon {
        /// Port to listen on (use 0 for random available port)
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,
    },

    /// Apply database migrations and exit
    Migrate,
}

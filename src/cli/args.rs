//! CLI argument definitions using clap
//!
//! Commands:
//! - beersample serve --config <path> [--port <n>] [--endpoint <url>]
//! - beersample import --config <path> --file <docs.json>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// beersample - browse and edit a catalog of beers and breweries
#[derive(Parser, Debug)]
#[command(name = "beersample")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the web server
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./beersample.json")]
        config: PathBuf,

        /// Port to listen on, overriding the config file
        #[arg(long)]
        port: Option<u16>,

        /// Store endpoint, overriding the config file
        #[arg(long)]
        endpoint: Option<String>,
    },

    /// Load documents from a JSON file into the configured store
    Import {
        /// Path to configuration file
        #[arg(long, default_value = "./beersample.json")]
        config: PathBuf,

        /// JSON object mapping document ids to documents
        #[arg(long)]
        file: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

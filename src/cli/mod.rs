//! CLI module for beersample
//!
//! Provides command-line interface for:
//! - serve: Open the store and run the web server
//! - import: Load a JSON documents file into the store

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{import, import_documents, load_config, prepare_state, run, run_command, serve};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_documents, write_response};

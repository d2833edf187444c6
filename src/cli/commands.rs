//! CLI command implementations
//!
//! `serve` follows a fixed boot order: logging, config, store, templates,
//! then the listener. Any failure before the listener is bound is fatal.

use std::path::Path;
use std::sync::Arc;

use serde_json::{json, Map, Value};
use tracing::info;

use crate::catalog::Catalog;
use crate::config::AppConfig;
use crate::observability::{init_logging, Event};
use crate::store::{self, DocumentStore};
use crate::web::{AppServer, AppState, TemplateRegistry};

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::{read_documents, write_response};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    init_logging();

    match cmd {
        Command::Serve {
            config,
            port,
            endpoint,
        } => serve(&config, port, endpoint),
        Command::Import { config, file } => import(&config, &file),
    }
}

/// Start the web server and block until it stops
pub fn serve(config_path: &Path, port: Option<u16>, endpoint: Option<String>) -> CliResult<()> {
    let config = load_config(config_path, port, endpoint)?;
    let state = prepare_state(&config)?;
    let server = AppServer::new(config, state);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::serve_error(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::serve_error(format!("HTTP server failed: {}", e)))
    })
}

/// Load every document in `file` into the configured store
pub fn import(config_path: &Path, file: &Path) -> CliResult<()> {
    let config = load_config(config_path, None, None)?;
    let store = open_store(&config)?;
    let documents = read_documents(file)?;

    let imported = import_documents(store.as_ref(), documents)?;
    info!(
        event = Event::ImportComplete.as_str(),
        imported,
        file = %file.display(),
        "imported {} documents",
        imported
    );

    write_response(json!({ "imported": imported }))
}

/// Load the config file and apply command line overrides
pub fn load_config(
    config_path: &Path,
    port: Option<u16>,
    endpoint: Option<String>,
) -> CliResult<AppConfig> {
    let mut config = AppConfig::load(config_path)?;
    if let Some(port) = port {
        config.port = port;
    }
    if let Some(endpoint) = endpoint {
        if endpoint.is_empty() {
            return Err(CliError::config_error("--endpoint must not be empty"));
        }
        config.store.endpoint = endpoint;
    }

    info!(
        event = Event::ConfigLoaded.as_str(),
        path = %config_path.display(),
        addr = %config.socket_addr(),
        endpoint = %config.store.endpoint,
        "configuration loaded"
    );
    Ok(config)
}

/// Open the store, parse templates and build the shared handler state
pub fn prepare_state(config: &AppConfig) -> CliResult<Arc<AppState>> {
    let store = open_store(config)?;

    let templates = match &config.template_dir {
        Some(dir) => TemplateRegistry::load(dir)?,
        None => TemplateRegistry::embedded()?,
    };
    info!(
        event = Event::TemplatesLoaded.as_str(),
        pages = templates.page_names().len(),
        embedded = config.template_dir.is_none(),
        "templates loaded"
    );

    let catalog = Catalog::new(store, config.catalog.clone());
    Ok(Arc::new(AppState::new(catalog, templates)))
}

fn open_store(config: &AppConfig) -> CliResult<Arc<dyn DocumentStore>> {
    let store = store::open(&config.store.endpoint, &config.store.bucket)?;
    info!(
        event = Event::StoreOpened.as_str(),
        endpoint = %config.store.endpoint,
        bucket = %config.store.bucket,
        "store opened"
    );
    Ok(store)
}

/// Upsert each `(id, document)` pair, stopping at the first failure
pub fn import_documents(store: &dyn DocumentStore, documents: Map<String, Value>) -> CliResult<usize> {
    let mut imported = 0;
    for (id, document) in documents {
        store
            .upsert(&id, &document)
            .map_err(|e| CliError::store_error(format!("Failed to import {}: {}", id, e)))?;
        imported += 1;
    }
    Ok(imported)
}

//! # HTTP Server
//!
//! Combines the page, search, health and static-file routers.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::Html,
    routing::get,
    Router,
};
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{info, info_span};
use uuid::Uuid;

use super::beer_routes::beer_routes;
use super::brewery_routes::brewery_routes;
use super::errors::WebResult;
use super::health::health_routes;
use super::state::AppState;
use crate::config::AppConfig;
use crate::observability::Event;

/// HTTP server for the catalog
pub struct AppServer {
    config: AppConfig,
    router: Router,
}

impl AppServer {
    /// Create a server around prepared state
    pub fn new(config: AppConfig, state: Arc<AppState>) -> Self {
        let router = build_router(state, &config.static_dir);
        Self { config, router }
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until the process exits
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid socket address {}: {}", self.config.socket_addr(), e),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;
        info!(event = Event::ServerStarting.as_str(), addr = %addr, "Starting server on {}", addr);

        axum::serve(listener, self.router).await
    }
}

/// Build the combined router
pub fn build_router(state: Arc<AppState>, static_dir: &Path) -> Router {
    Router::new()
        .merge(health_routes(state.clone()))
        .merge(welcome_routes(state.clone()))
        .merge(beer_routes(state.clone()))
        .merge(brewery_routes(state))
        .nest_service("/css", ServeDir::new(static_dir.join("css")))
        .nest_service("/js", ServeDir::new(static_dir.join("js")))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                info_span!(
                    "request",
                    request_id = %Uuid::new_v4(),
                    method = %request.method(),
                    path = %request.uri().path()
                )
            }),
        )
}

fn welcome_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(welcome_handler))
        .with_state(state)
}

async fn welcome_handler(State(state): State<Arc<AppState>>) -> WebResult<Html<String>> {
    state.page("welcome.html", &json!({}))
}

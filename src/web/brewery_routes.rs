//! Brewery HTTP Routes
//!
//! Breweries are read-only here apart from delete.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    response::Html,
    routing::get,
    Json, Router,
};
use serde::Serialize;

use super::beer_routes::{delete_handler, SearchQuery};
use super::errors::{catalog_failure, WebResult};
use super::state::AppState;
use crate::catalog::{brewery_fields, Brewery, BreweryFull};

#[derive(Debug, Serialize)]
pub struct BreweryIndexPage {
    pub results: Vec<Brewery>,
}

#[derive(Debug, Serialize)]
pub struct BreweryShowPage {
    pub brewery: BreweryFull,
    pub brewery_fields: BTreeMap<&'static str, String>,
}

/// Create brewery routes
pub fn brewery_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/breweries", get(index_handler))
        .route("/breweries/search", get(search_handler))
        .route("/breweries/show/:id", get(show_handler))
        .route("/breweries/delete/:id", get(delete_handler))
        .with_state(state)
}

async fn index_handler(State(state): State<Arc<AppState>>) -> WebResult<Html<String>> {
    let results = state.catalog.list_breweries().map_err(catalog_failure)?;
    state.page("brewery/index.html", &BreweryIndexPage { results })
}

async fn search_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> WebResult<Json<Vec<Brewery>>> {
    let results = state
        .catalog
        .search_breweries(&query.value)
        .map_err(catalog_failure)?;
    Ok(Json(results))
}

async fn show_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> WebResult<Html<String>> {
    let brewery = state.catalog.get_brewery(&id).map_err(catalog_failure)?;

    state.page(
        "brewery/show.html",
        &BreweryShowPage {
            brewery_fields: brewery_fields(&brewery),
            brewery,
        },
    )
}

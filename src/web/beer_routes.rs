//! Beer HTTP Routes
//!
//! Listing, search, detail, create, edit and delete pages for beers.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use super::errors::{catalog_failure, WebResult};
use super::redirect::{found, location};
use super::state::AppState;
use crate::catalog::{beer_fields, beer_from_form, Beer, BeerFull, FormFields};
use crate::observability::Event;

// ==================
// Page Data
// ==================

#[derive(Debug, Serialize)]
pub struct BeerIndexPage {
    pub results: Vec<Beer>,
    pub skipped: usize,
}

#[derive(Debug, Serialize)]
pub struct BeerShowPage {
    pub beer: BeerFull,
    pub beer_fields: BTreeMap<&'static str, String>,
}

#[derive(Debug, Serialize)]
pub struct BeerEditPage {
    pub beer: BeerFull,
    pub is_create: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub value: String,
}

// ==================
// Beer Routes
// ==================

/// Create beer routes
pub fn beer_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/beers", get(index_handler))
        .route("/beers/search", get(search_handler))
        .route("/beers/show/:id", get(show_handler))
        .route("/beers/create", get(create_form_handler).post(create_handler))
        .route("/beers/edit/:id", get(edit_form_handler).post(edit_handler))
        .route("/beers/delete/:id", get(delete_handler))
        .with_state(state)
}

async fn index_handler(State(state): State<Arc<AppState>>) -> WebResult<Html<String>> {
    let listing = state.catalog.list_beers().map_err(catalog_failure)?;

    state.page(
        "beer/index.html",
        &BeerIndexPage {
            skipped: listing.skipped.len(),
            results: listing.items,
        },
    )
}

async fn search_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> WebResult<Json<Vec<Beer>>> {
    let listing = state
        .catalog
        .search_beers(&query.value)
        .map_err(catalog_failure)?;
    Ok(Json(listing.items))
}

async fn show_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> WebResult<Html<String>> {
    let beer = state.catalog.get_beer(&id).map_err(catalog_failure)?;

    state.page(
        "beer/show.html",
        &BeerShowPage {
            beer_fields: beer_fields(&beer),
            beer,
        },
    )
}

async fn create_form_handler(State(state): State<Arc<AppState>>) -> WebResult<Html<String>> {
    state.page(
        "beer/edit.html",
        &BeerEditPage {
            beer: BeerFull::default(),
            is_create: true,
        },
    )
}

async fn create_handler(
    State(state): State<Arc<AppState>>,
    Form(form): Form<FormFields>,
) -> Response {
    let (id, result) = state.catalog.create_beer(beer_from_form(&form));

    // The client is redirected whether or not the insert took
    if let Err(e) = result {
        error!(event = Event::WriteFailed.as_str(), id = %id, error = %e, "beer insert failed");
    }
    found(&location("/beers/show/", &id))
}

async fn edit_form_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> WebResult<Html<String>> {
    let beer = state.catalog.get_beer(&id).map_err(catalog_failure)?;

    state.page(
        "beer/edit.html",
        &BeerEditPage {
            beer,
            is_create: false,
        },
    )
}

async fn edit_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Form(form): Form<FormFields>,
) -> Response {
    let beer = beer_from_form(&form);

    if let Err(e) = state.catalog.update_beer(&id, beer) {
        error!(event = Event::WriteFailed.as_str(), id = %id, error = %e, "beer upsert failed");
    }
    found(&location("/beers/show/", &id))
}

/// Remove any document by id; shared with the brewery routes
pub(super) async fn delete_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    match state.catalog.delete(&id) {
        Ok(()) => found("/"),
        Err(e) => {
            error!(event = Event::DeleteFailed.as_str(), id = %id, error = %e, "remove failed");
            StatusCode::OK.into_response()
        }
    }
}

//! Catalog access over a document store
//!
//! Listings and searches read the `by_name` views. Beer rows carry only a
//! document id, so each is fetched by key; a row whose fetch fails is left
//! out of the listing and reported in [`Listing::skipped`]. Brewery rows
//! already carry the display name and are returned directly.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use super::config::CatalogConfig;
use super::errors::{CatalogError, CatalogResult};
use super::id::beer_id;
use super::model::{Beer, BeerFull, Brewery, BreweryFull, BEER_TYPE, BREWERY_TYPE};
use crate::observability::Event;
use crate::store::{DocumentStore, Freshness, StoreError, ViewQuery, ViewRow};

/// Appended to a search term to form the exclusive upper bound of the range
pub const MAX_SUFFIX: char = char::MAX;

const BEER_DESIGN: &str = BEER_TYPE;
const BREWERY_DESIGN: &str = BREWERY_TYPE;
const BY_NAME: &str = "by_name";

/// A view row left out of a listing because its document could not be read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    pub id: String,
    pub reason: String,
}

/// Listing result: the entries read plus the rows that were skipped
#[derive(Debug, Clone, PartialEq)]
pub struct Listing<T> {
    pub items: Vec<T>,
    pub skipped: Vec<SkippedRow>,
}

impl<T> Listing<T> {
    /// Whether every row was read
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Beer and brewery catalog
#[derive(Debug, Clone)]
pub struct Catalog {
    store: Arc<dyn DocumentStore>,
    config: CatalogConfig,
}

impl Catalog {
    /// Create a catalog over `store`
    pub fn new(store: Arc<dyn DocumentStore>, config: CatalogConfig) -> Self {
        Self { store, config }
    }

    // ==================
    // Beers
    // ==================

    /// First page of beers in name order
    pub fn list_beers(&self) -> CatalogResult<Listing<Beer>> {
        self.beers(self.by_name(BEER_DESIGN, self.config.beer_freshness))
    }

    /// Beers whose name starts with `term`
    pub fn search_beers(&self, term: &str) -> CatalogResult<Listing<Beer>> {
        let query = prefix_range(self.by_name(BEER_DESIGN, self.config.beer_freshness), term);
        self.beers(query)
    }

    /// Beer stored under `id`, with `id` filled in
    pub fn get_beer(&self, id: &str) -> CatalogResult<BeerFull> {
        let mut beer: BeerFull = self.fetch(id).map_err(|source| CatalogError::Get {
            id: id.to_string(),
            source,
        })?;
        beer.id = id.to_string();
        Ok(beer)
    }

    /// Id a newly created beer is stored under
    pub fn beer_id_for(&self, beer: &BeerFull) -> String {
        beer_id(&beer.brewery_id, &beer.name, self.config.id_spaces)
    }

    /// Store a new beer under its synthesized id.
    ///
    /// The id is returned even when the insert fails so the caller can still
    /// point the client at it.
    pub fn create_beer(&self, beer: BeerFull) -> (String, CatalogResult<()>) {
        let id = self.beer_id_for(&beer);
        let result = self.insert_beer(&id, beer);
        (id, result)
    }

    /// Store a new beer under `id`; fails if the key is taken
    pub fn insert_beer(&self, id: &str, beer: BeerFull) -> CatalogResult<()> {
        let document = beer_document(id, beer)?;
        self.store
            .insert(id, &document)
            .map_err(|source| CatalogError::Write {
                id: id.to_string(),
                source,
            })
    }

    /// Replace the beer stored under `id`
    pub fn update_beer(&self, id: &str, beer: BeerFull) -> CatalogResult<()> {
        let document = beer_document(id, beer)?;
        self.store
            .upsert(id, &document)
            .map_err(|source| CatalogError::Write {
                id: id.to_string(),
                source,
            })
    }

    // ==================
    // Breweries
    // ==================

    /// First page of breweries in name order
    pub fn list_breweries(&self) -> CatalogResult<Vec<Brewery>> {
        self.breweries(self.by_name(BREWERY_DESIGN, self.config.brewery_freshness))
    }

    /// Breweries whose name starts with `term`
    pub fn search_breweries(&self, term: &str) -> CatalogResult<Vec<Brewery>> {
        let query = prefix_range(
            self.by_name(BREWERY_DESIGN, self.config.brewery_freshness),
            term,
        );
        self.breweries(query)
    }

    /// Brewery stored under `id`, with `id` filled in
    pub fn get_brewery(&self, id: &str) -> CatalogResult<BreweryFull> {
        let mut brewery: BreweryFull = self.fetch(id).map_err(|source| CatalogError::Get {
            id: id.to_string(),
            source,
        })?;
        brewery.id = id.to_string();
        Ok(brewery)
    }

    // ==================
    // Shared
    // ==================

    /// Remove the document stored under `id`, whatever its kind
    pub fn delete(&self, id: &str) -> CatalogResult<()> {
        self.store.remove(id).map_err(|source| CatalogError::Remove {
            id: id.to_string(),
            source,
        })
    }

    /// Cheapest round trip that proves the store and its views answer
    pub fn ping(&self) -> CatalogResult<()> {
        let query = ViewQuery::new(BEER_DESIGN, BY_NAME)
            .limit(1)
            .freshness(Freshness::Ok);
        self.run(&query).map(|_| ())
    }

    fn by_name(&self, design: &str, freshness: Freshness) -> ViewQuery {
        ViewQuery::new(design, BY_NAME)
            .limit(self.config.page_size)
            .freshness(freshness)
    }

    fn beers(&self, query: ViewQuery) -> CatalogResult<Listing<Beer>> {
        let rows = self.run(&query)?;

        let mut listing = Listing {
            items: Vec::with_capacity(rows.len()),
            skipped: Vec::new(),
        };
        for row in rows {
            match self.fetch::<Beer>(&row.id) {
                Ok(mut beer) => {
                    beer.id = row.id;
                    listing.items.push(beer);
                }
                Err(e) => {
                    warn!(event = Event::RowSkipped.as_str(), id = %row.id, error = %e, "skipping beer row");
                    listing.skipped.push(SkippedRow {
                        id: row.id,
                        reason: e.to_string(),
                    });
                }
            }
        }
        Ok(listing)
    }

    fn breweries(&self, query: ViewQuery) -> CatalogResult<Vec<Brewery>> {
        let rows = self.run(&query)?;
        Ok(rows
            .into_iter()
            .map(|row| Brewery {
                id: row.id,
                name: row.key,
            })
            .collect())
    }

    fn run(&self, query: &ViewQuery) -> CatalogResult<Vec<ViewRow>> {
        self.store
            .query_view(query)
            .map_err(|source| CatalogError::View {
                view: format!("{}/{}", query.design, query.view),
                source,
            })
    }

    fn fetch<T: DeserializeOwned>(&self, id: &str) -> Result<T, StoreError> {
        let document = self.store.get(id)?;
        serde_json::from_value(document).map_err(|e| StoreError::Decode {
            id: id.to_string(),
            reason: e.to_string(),
        })
    }
}

fn prefix_range(query: ViewQuery, term: &str) -> ViewQuery {
    let end = format!("{}{}", term, MAX_SUFFIX);
    query.range(term, end, false)
}

fn beer_document(id: &str, mut beer: BeerFull) -> CatalogResult<serde_json::Value> {
    beer.doc_type = BEER_TYPE.to_string();
    beer.id.clear();
    encode(id, &beer)
}

fn encode<T: Serialize>(id: &str, record: &T) -> CatalogResult<serde_json::Value> {
    serde_json::to_value(record).map_err(|e| CatalogError::Write {
        id: id.to_string(),
        source: StoreError::Encode {
            id: id.to_string(),
            reason: e.to_string(),
        },
    })
}

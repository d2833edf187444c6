//! # Catalog
//!
//! Beers and breweries over the document store: record shapes, form
//! decoding, id synthesis and the list/search/get/write operations the
//! HTTP layer calls.

mod access;
mod codec;
mod config;
mod errors;
mod id;
mod model;

pub use access::{Catalog, Listing, SkippedRow, MAX_SUFFIX};
pub use codec::{beer_fields, beer_from_form, brewery_fields, format_float, parse_float, FormFields};
pub use config::CatalogConfig;
pub use errors::{CatalogError, CatalogResult};
pub use id::{beer_id, IdSpaces};
pub use model::{Beer, BeerFull, Brewery, BreweryFull, BEER_TYPE, BREWERY_TYPE};

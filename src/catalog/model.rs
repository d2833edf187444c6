//! Catalog record shapes
//!
//! Summary records (`Beer`, `Brewery`) feed listings and search results;
//! the `Full` variants back the show and edit pages. Every field defaults
//! when missing from a stored document.

use serde::{Deserialize, Serialize};

pub use crate::store::{BEER_TYPE, BREWERY_TYPE};

/// Beer listing entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Beer {
    #[serde(rename = "type")]
    pub doc_type: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub brewery_id: String,
    pub name: String,
}

/// Complete beer document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeerFull {
    #[serde(rename = "type")]
    pub doc_type: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub brewery_id: String,
    pub name: String,
    pub description: String,
    pub style: String,
    pub category: String,
    pub abv: f64,
    pub ibu: f64,
    pub srm: f64,
    pub upc: f64,
}

/// Brewery listing entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Brewery {
    pub id: String,
    pub name: String,
}

/// Complete brewery document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreweryFull {
    pub id: String,
    pub name: String,
    pub city: String,
    pub state: String,
    pub code: String,
    pub country: String,
    pub phone: String,
    pub website: String,
    pub description: String,
}

//! Catalog configuration

use serde::{Deserialize, Serialize};

use super::id::IdSpaces;
use crate::store::Freshness;

/// Catalog access configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Maximum rows per listing or search (default: 30)
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// View freshness for beer queries (default: ok)
    #[serde(default = "default_beer_freshness")]
    pub beer_freshness: Freshness,

    /// View freshness for brewery queries (default: update_before)
    #[serde(default = "default_brewery_freshness")]
    pub brewery_freshness: Freshness,

    /// Space handling when synthesizing beer ids (default: hyphenate)
    #[serde(default)]
    pub id_spaces: IdSpaces,
}

fn default_page_size() -> usize {
    30
}

fn default_beer_freshness() -> Freshness {
    Freshness::Ok
}

fn default_brewery_freshness() -> Freshness {
    Freshness::UpdateBefore
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            beer_freshness: default_beer_freshness(),
            brewery_freshness: default_brewery_freshness(),
            id_spaces: IdSpaces::default(),
        }
    }
}

//! Document ids for newly created beers.

use serde::{Deserialize, Serialize};

/// What happens to spaces in a beer name when it becomes part of an id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdSpaces {
    /// Each space becomes `-`
    #[default]
    Hyphenate,
    /// Spaces are kept as-is, matching ids created by older deployments
    Preserve,
}

/// `<brewery_id>-<name>`, lowercased.
pub fn beer_id(brewery_id: &str, name: &str, spaces: IdSpaces) -> String {
    let name = match spaces {
        IdSpaces::Hyphenate => name.replace(' ', "-"),
        IdSpaces::Preserve => name.to_string(),
    };
    format!("{}-{}", brewery_id, name).to_lowercase()
}

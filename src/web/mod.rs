//! # Web Module
//!
//! Server-rendered pages and JSON search endpoints over the catalog.
//!
//! # Endpoints
//!
//! - `/` - Welcome page
//! - `/beers/*` - Beer listing, search, detail, create, edit, delete
//! - `/breweries/*` - Brewery listing, search, detail, delete
//! - `/css/*`, `/js/*` - Static files
//! - `/health` - Health check

pub mod beer_routes;
pub mod brewery_routes;
pub mod errors;
pub mod health;
pub mod redirect;
pub mod server;
pub mod state;
pub mod templates;

pub use errors::{WebError, WebResult};
pub use server::{build_router, AppServer};
pub use state::AppState;
pub use templates::{TemplateError, TemplateRegistry};

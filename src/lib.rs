//! beersample - a web catalog of beers and breweries
//!
//! Documents live in a [`store::DocumentStore`]; [`catalog::Catalog`]
//! turns them into beer and brewery records, and [`web`] serves the pages.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod observability;
pub mod store;
pub mod web;

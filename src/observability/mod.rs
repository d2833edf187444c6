//! Observability for beersample
//!
//! Structured logging through `tracing`. Events are named by [`Event`];
//! the subscriber is installed once by the CLI before anything else runs.
//!
//! # Usage
//!
//! ```ignore
//! use beersample::observability::Event;
//!
//! tracing::warn!(event = Event::RowSkipped.as_str(), id = "x", "skipping beer row");
//! ```

mod events;

pub use events::Event;

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "info,tower_http=info";

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` overrides [`DEFAULT_FILTER`]. Calling this more than once is
/// harmless; later calls leave the first subscriber in place.
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

//! Domain types for the pokedex.
//!
//! - Entry: validated catalog entries
//! - Schema: the gate upstream JSON passes through
//! - State: URL-carried page state and mutation intents

pub mod entry;
pub mod schema;
pub mod state;

pub use entry::{CatalogEntry, CatalogRef};
pub use schema::SchemaError;
pub use state::{CapturedSet, DecodeError, FilterState, Intent, PageState};

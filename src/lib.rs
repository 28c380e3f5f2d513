//! pokedex - Creature catalog with URL-persisted captures
//!
//! Lists one page of creatures from a public REST API (PokeAPI by default),
//! filters it by name and type, and lets a user capture or release entries.
//! All user state lives in the page URL; the server keeps no session.
//!
//! # Modules
//!
//! - `adapters`: Upstream catalog sources (PokeAPI)
//! - `core`: Filtering and request handling (read and mutation paths)
//! - `domain`: Data structures (CatalogEntry, PageState, Intent) and the schema gate
//! - `server`: HTTP routes and HTML rendering
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Serve the page
//! pokedex serve --address 127.0.0.1:3000
//!
//! # List fire types with two captures
//! pokedex list --type fire --captured '[1,4]'
//!
//! # Preview a capture
//! pokedex apply --query 'captured=%5B4%5D' --intent capture --pokemon-id 1
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod server;

// Re-export main types at crate root for convenience
pub use crate::adapters::{CatalogSource, PokeApiClient, UpstreamError};
pub use crate::core::{HandlerError, PageView};
pub use crate::domain::{CapturedSet, CatalogEntry, DecodeError, FilterState, Intent, PageState};

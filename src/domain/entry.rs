//! Catalog entries as the rest of the crate sees them.
//!
//! Values here only ever come out of [`super::schema`], so anything holding
//! a `CatalogEntry` can rely on its fields having been validated.

use serde::{Deserialize, Serialize};

/// A fully fetched creature
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Upstream id (always > 0)
    pub id: u64,

    /// Lowercase name as returned upstream (e.g. "bulbasaur")
    pub name: String,

    /// Front sprite image URL
    pub sprite_url: String,

    /// Type names in upstream slot order, duplicates kept
    pub types: Vec<String>,
}

impl CatalogEntry {
    /// Create a new entry
    pub fn new(
        id: u64,
        name: impl Into<String>,
        sprite_url: impl Into<String>,
        types: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            sprite_url: sprite_url.into(),
            types: types.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether this entry carries the given type name (exact match)
    pub fn has_type(&self, type_name: &str) -> bool {
        self.types.iter().any(|t| t == type_name)
    }
}

/// One row of the list endpoint: a name plus where to fetch its detail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRef {
    pub name: String,
    pub detail_url: String,
}

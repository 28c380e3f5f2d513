//! Validation gate for upstream JSON.
//!
//! The upstream API is only trusted as far as these wire structs describe it.
//! Bodies are deserialized into the private `Wire*` types (unknown fields are
//! ignored, missing or mistyped required fields are rejected) and then
//! converted into [`CatalogRef`] / [`CatalogEntry`].

use serde::Deserialize;
use thiserror::Error;

use super::entry::{CatalogEntry, CatalogRef};

/// Errors raised when an upstream body does not have the expected shape
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("Unexpected {what} shape: {source}")]
    Shape {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid entry id 0 for '{name}'")]
    ZeroId { name: String },
}

#[derive(Debug, Deserialize)]
struct WireList {
    results: Vec<WireListItem>,
}

#[derive(Debug, Deserialize)]
struct WireListItem {
    name: String,
    url: String,
}

#[derive(Debug, Deserialize)]
struct WireDetail {
    id: u64,
    name: String,
    sprites: WireSprites,
    types: Vec<WireTypeSlot>,
}

#[derive(Debug, Deserialize)]
struct WireSprites {
    front_default: String,
}

#[derive(Debug, Deserialize)]
struct WireTypeSlot {
    #[serde(rename = "type")]
    type_ref: WireTypeName,
}

#[derive(Debug, Deserialize)]
struct WireTypeName {
    name: String,
}

/// Parse a list-endpoint body (`{ results: [{name, url}] }`)
pub fn parse_list(body: &str) -> Result<Vec<CatalogRef>, SchemaError> {
    let list: WireList = serde_json::from_str(body).map_err(|source| SchemaError::Shape {
        what: "catalog list",
        source,
    })?;

    Ok(list
        .results
        .into_iter()
        .map(|item| CatalogRef {
            name: item.name,
            detail_url: item.url,
        })
        .collect())
}

/// Parse a detail-endpoint body into a validated entry
pub fn parse_detail(body: &str) -> Result<CatalogEntry, SchemaError> {
    let detail: WireDetail = serde_json::from_str(body).map_err(|source| SchemaError::Shape {
        what: "catalog detail",
        source,
    })?;

    if detail.id == 0 {
        return Err(SchemaError::ZeroId { name: detail.name });
    }

    Ok(CatalogEntry {
        id: detail.id,
        name: detail.name,
        sprite_url: detail.sprites.front_default,
        types: detail.types.into_iter().map(|slot| slot.type_ref.name).collect(),
    })
}

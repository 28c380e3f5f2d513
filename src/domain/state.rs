//! URL-carried page state.
//!
//! The application keeps no server-side session: everything a user has done
//! lives in three query parameters.
//! - `captured`: JSON array of non-negative integer ids
//! - `filterName`: optional name substring
//! - `filterType`: optional exact type name
//!
//! [`PageState`] is the typed form of that query string. Mutations arrive as
//! an [`Intent`] and produce a new `PageState`, which is rendered back into a
//! query string for the redirect. Unrelated parameters ride along untouched.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::form_urlencoded;

pub const PARAM_CAPTURED: &str = "captured";
pub const PARAM_FILTER_NAME: &str = "filterName";
pub const PARAM_FILTER_TYPE: &str = "filterType";
pub const FIELD_INTENT: &str = "intent";
pub const FIELD_POKEMON_ID: &str = "pokemonId";

/// Errors decoding URL state or mutation form fields
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("Malformed captured parameter {raw:?}: {reason}")]
    MalformedCaptured { raw: String, reason: String },

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid pokemonId {0:?}: expected a non-negative integer")]
    InvalidPokemonId(String),

    #[error("Unknown intent: {0:?}")]
    UnknownIntent(String),
}

/// Set of captured entry ids
///
/// Backed by a `BTreeSet` so the encoding is ascending and stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapturedSet(BTreeSet<u64>);

impl CapturedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode the raw `captured` parameter.
    ///
    /// An absent or empty parameter is the empty set. Anything else must be a
    /// JSON array of non-negative integers.
    pub fn decode(raw: Option<&str>) -> Result<Self, DecodeError> {
        let raw = match raw {
            None => return Ok(Self::new()),
            Some(raw) if raw.is_empty() => return Ok(Self::new()),
            Some(raw) => raw,
        };

        let ids: Vec<u64> =
            serde_json::from_str(raw).map_err(|e| DecodeError::MalformedCaptured {
                raw: raw.to_string(),
                reason: e.to_string(),
            })?;

        Ok(ids.into_iter().collect())
    }

    /// Encode as a JSON array in ascending order
    pub fn encode(&self) -> String {
        let ids: Vec<u64> = self.0.iter().copied().collect();
        // Serializing a Vec<u64> cannot fail
        serde_json::to_string(&ids).unwrap_or_else(|_| "[]".to_string())
    }

    /// Add an id (no-op if already present)
    pub fn add(&mut self, id: u64) {
        self.0.insert(id);
    }

    /// Remove an id (no-op if absent)
    pub fn remove(&mut self, id: u64) {
        self.0.remove(&id);
    }

    pub fn contains(&self, id: u64) -> bool {
        self.0.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<u64> for CapturedSet {
    fn from_iter<I: IntoIterator<Item = u64>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Active list filters; an empty string disables that filter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub name: String,
    pub type_name: String,
}

impl FilterState {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.type_name.is_empty()
    }
}

/// Everything the URL carries between requests
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageState {
    pub captured: CapturedSet,
    pub filter: FilterState,

    /// Query pairs that are not page state, in their original order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra: Vec<(String, String)>,
}

impl PageState {
    /// Parse from a raw (still percent-encoded) query string, without the `?`.
    ///
    /// When a state parameter repeats, the first occurrence wins. Other
    /// parameters are kept in `extra`.
    pub fn from_query(query: Option<&str>) -> Result<Self, DecodeError> {
        let mut captured: Option<String> = None;
        let mut name: Option<String> = None;
        let mut type_name: Option<String> = None;
        let mut extra = Vec::new();

        for (key, value) in form_urlencoded::parse(query.unwrap_or("").as_bytes()) {
            let slot = match key.as_ref() {
                PARAM_CAPTURED => &mut captured,
                PARAM_FILTER_NAME => &mut name,
                PARAM_FILTER_TYPE => &mut type_name,
                _ => {
                    extra.push((key.into_owned(), value.into_owned()));
                    continue;
                }
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }

        Ok(Self {
            captured: CapturedSet::decode(captured.as_deref())?,
            filter: FilterState {
                name: name.unwrap_or_default(),
                type_name: type_name.unwrap_or_default(),
            },
            extra,
        })
    }

    /// Render back into a query string.
    ///
    /// Unrelated pairs come first, as they arrived. Empty filter values are
    /// left out entirely; `captured` is always set.
    pub fn to_query(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        serializer.extend_pairs(&self.extra);
        if !self.filter.name.is_empty() {
            serializer.append_pair(PARAM_FILTER_NAME, &self.filter.name);
        }
        if !self.filter.type_name.is_empty() {
            serializer.append_pair(PARAM_FILTER_TYPE, &self.filter.type_name);
        }
        serializer.append_pair(PARAM_CAPTURED, &self.captured.encode());
        serializer.finish()
    }

    /// Apply one intent. Each intent touches exactly one half of the state.
    pub fn apply(mut self, intent: &Intent) -> Self {
        match intent {
            Intent::Capture(id) => self.captured.add(*id),
            Intent::Release(id) => self.captured.remove(*id),
            Intent::SetFilter { name, type_name } => {
                self.filter = FilterState::new(name.clone(), type_name.clone());
            }
        }
        self
    }
}

/// The single effect a mutation request declares
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Capture(u64),
    Release(u64),
    SetFilter { name: String, type_name: String },
}

impl Intent {
    /// Decode from submitted form fields; a repeated field keeps its first value
    pub fn from_form(fields: &[(String, String)]) -> Result<Self, DecodeError> {
        let intent = required(fields, FIELD_INTENT)?;

        match intent {
            "capture" => Ok(Self::Capture(pokemon_id(fields)?)),
            "release" => Ok(Self::Release(pokemon_id(fields)?)),
            "filter" => Ok(Self::SetFilter {
                name: required(fields, PARAM_FILTER_NAME)?.to_string(),
                type_name: required(fields, PARAM_FILTER_TYPE)?.to_string(),
            }),
            other => Err(DecodeError::UnknownIntent(other.to_string())),
        }
    }

    /// Form value of the `intent` field for this variant
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Capture(_) => "capture",
            Self::Release(_) => "release",
            Self::SetFilter { .. } => "filter",
        }
    }
}

fn required<'a>(fields: &'a [(String, String)], name: &'static str) -> Result<&'a str, DecodeError> {
    fields
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
        .ok_or(DecodeError::MissingField(name))
}

fn pokemon_id(fields: &[(String, String)]) -> Result<u64, DecodeError> {
    let raw = required(fields, FIELD_POKEMON_ID)?;
    raw.trim()
        .parse()
        .map_err(|_| DecodeError::InvalidPokemonId(raw.to_string()))
}

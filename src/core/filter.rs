//! List filtering.

use crate::domain::{CatalogEntry, FilterState};

/// Keep entries matching both the name and the type filter.
///
/// The name filter is a case-insensitive substring match, the type filter an
/// exact match against any of the entry's types. Empty filters match
/// everything. Input order is preserved.
pub fn apply_filters(entries: &[CatalogEntry], filter: &FilterState) -> Vec<CatalogEntry> {
    let name_lower = filter.name.to_lowercase();

    entries
        .iter()
        .filter(|entry| name_lower.is_empty() || entry.name.to_lowercase().contains(&name_lower))
        .filter(|entry| filter.type_name.is_empty() || entry.has_type(&filter.type_name))
        .cloned()
        .collect()
}

/// Distinct type names across all entries, in first-seen order
pub fn available_types(entries: &[CatalogEntry]) -> Vec<String> {
    let mut types: Vec<String> = Vec::new();
    for type_name in entries.iter().flat_map(|e| e.types.iter()) {
        if !types.contains(type_name) {
            types.push(type_name.clone());
        }
    }
    types
}

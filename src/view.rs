//! Derives what the listing screen shows from the stored list and the two
//! user-controlled filters.

use crate::models::Property;

/// User-controlled filter parameters. Empty strings mean "inactive".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    /// Case-insensitive substring of name or location. Not trimmed.
    pub search: String,
    /// Exact, case-sensitive type label
    pub type_filter: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    /// Matching properties in server order
    pub displayed: Vec<Property>,
    /// Distinct type labels of the unfiltered list, first-seen order
    pub type_labels: Vec<String>,
}

/// Pure projection of `(list, filters)`; call again whenever any input changes.
pub fn project(properties: &[Property], filters: &Filters) -> Projection {
    let needle = filters.search.to_lowercase();

    let displayed = properties
        .iter()
        .filter(|p| filters.type_filter.is_empty() || p.kind == filters.type_filter)
        .filter(|p| needle.is_empty() || matches_search(p, &needle))
        .cloned()
        .collect();

    Projection {
        displayed,
        type_labels: type_labels(properties),
    }
}

fn matches_search(property: &Property, needle: &str) -> bool {
    property.name.to_lowercase().contains(needle)
        || property.location.to_lowercase().contains(needle)
}

fn type_labels(properties: &[Property]) -> Vec<String> {
    let mut labels: Vec<String> = Vec::new();
    for property in properties {
        if !labels.contains(&property.kind) {
            labels.push(property.kind.clone());
        }
    }
    labels
}

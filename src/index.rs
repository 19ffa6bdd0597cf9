//! In-memory index of key references built from scan results.

use std::collections::{BTreeMap, BTreeSet};

use crate::config::APPLICATION_CONTROLLER;
use crate::scanner::{KeyOccurrence, SourceLocation};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct KeyEntry {
    /// Locations in scan order.
    locations: Vec<SourceLocation>,
    /// Every controller scope the key was referenced under.
    scopes: BTreeSet<String>,
}

/// Mapping from message key to its reference locations and scopes.
///
/// Building the index is a pure fold over scan results: indexing the same
/// occurrences twice yields an identical index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyIndex {
    entries: BTreeMap<String, KeyEntry>,
}

impl KeyIndex {
    pub fn from_occurrences<I>(occurrences: I) -> Self
    where
        I: IntoIterator<Item = KeyOccurrence>,
    {
        let mut entries: BTreeMap<String, KeyEntry> = BTreeMap::new();
        for occ in occurrences {
            let entry = entries.entry(occ.key).or_default();
            entry.locations.push(occ.location);
            entry.scopes.insert(occ.scope);
        }
        Self { entries }
    }

    /// Keys referenced within `scope`, plus keys referenced under the shared
    /// application scope. The application scope itself covers every key.
    pub fn keys_in_scope(&self, scope: &str) -> BTreeSet<String> {
        self.entries
            .iter()
            .filter(|(_, entry)| {
                scope == APPLICATION_CONTROLLER
                    || entry.scopes.contains(scope)
                    || entry.scopes.contains(APPLICATION_CONTROLLER)
            })
            .map(|(key, _)| key.clone())
            .collect()
    }

    /// Reference locations for a key, in scan order. Empty if never referenced.
    pub fn locations_for(&self, key: &str) -> &[SourceLocation] {
        self.entries
            .get(key)
            .map(|e| e.locations.as_slice())
            .unwrap_or(&[])
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

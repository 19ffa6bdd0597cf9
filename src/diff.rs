//! The new/obsolete/existing key classification.
//!
//! Pure set algebra over referenced keys, catalog keys and the keep and
//! ignore lists. The three output sets are pairwise disjoint.

use std::collections::BTreeSet;

/// Outcome of diffing referenced keys against a catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconciliationResult {
    /// Referenced in source but missing from the catalog.
    pub new_keys: BTreeSet<String>,
    /// In the catalog but no longer referenced anywhere.
    pub obsolete_keys: BTreeSet<String>,
    /// In the catalog and still referenced (plus kept keys in default scope).
    pub existing_keys: BTreeSet<String>,
}

/// Classify every key as new, obsolete or existing.
///
/// - Ignored keys are never new; kept keys are never obsolete.
/// - For a specific-controller diff (`is_default_scope == false`) keys already
///   present in the application catalog are inherited, not new; `inherited`
///   carries that catalog's key set and is unused otherwise.
/// - In default scope, kept keys always show up as existing, even when
///   currently unreferenced.
pub fn diff(
    referenced: &BTreeSet<String>,
    catalog_keys: &BTreeSet<String>,
    keep_list: &BTreeSet<String>,
    ignore_list: &BTreeSet<String>,
    inherited: &BTreeSet<String>,
    is_default_scope: bool,
) -> ReconciliationResult {
    let mut new_keys: BTreeSet<String> = referenced
        .difference(catalog_keys)
        .filter(|k| !ignore_list.contains(*k))
        .cloned()
        .collect();
    if !is_default_scope {
        new_keys.retain(|k| !inherited.contains(k));
    }

    let obsolete_keys: BTreeSet<String> = catalog_keys
        .difference(referenced)
        .filter(|k| !keep_list.contains(*k))
        .cloned()
        .collect();

    let mut existing_keys: BTreeSet<String> =
        catalog_keys.intersection(referenced).cloned().collect();
    if is_default_scope {
        existing_keys.extend(keep_list.iter().cloned());
        // A key can't be both protected and pending addition
        for key in keep_list {
            new_keys.remove(key);
        }
    }

    ReconciliationResult {
        new_keys,
        obsolete_keys,
        existing_keys,
    }
}

//! Reconciliation orchestration and catalog mutation operations.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::{Result, ensure};

use crate::{
    config::{APPLICATION_CONTROLLER, Config},
    diff::{ReconciliationResult, diff},
    index::KeyIndex,
    scanner::scan_sources,
    store::{Catalog, CatalogStore},
};

/// Bulk action applied to a selection of keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkAction {
    /// Remove the keys from the catalog.
    Remove,
    /// Add the keys to the ignore list.
    Ignore,
    /// Drop the keys from the ignore list.
    Unignore,
}

/// Key index plus scan statistics from one walk of the source tree.
pub struct SourceScan {
    pub index: KeyIndex,
    /// Controller scopes discovered by directory convention, whether or not
    /// any reference was found under them.
    pub controller_scopes: BTreeSet<String>,
    pub files_scanned: usize,
}

/// Everything one reconciliation run produced, ready for presentation.
pub struct Reconciliation {
    pub language: String,
    pub default_language: String,
    pub controller: String,
    /// Catalog values for the requested language; for the application
    /// controller this is merged with every discovered controller catalog.
    pub values: Catalog,
    /// Same merge for the default language.
    pub default_values: Catalog,
    pub keep_list: BTreeSet<String>,
    pub ignore_list: BTreeSet<String>,
    pub index: KeyIndex,
    pub result: ReconciliationResult,
    pub files_scanned: usize,
}

/// Orchestrates reconciliation runs and catalog mutations against one store.
pub struct Reconciler<S: CatalogStore> {
    base_dir: PathBuf,
    config: Config,
    store: S,
}

impl<S: CatalogStore> Reconciler<S> {
    pub fn new(base_dir: &Path, config: Config, store: S) -> Self {
        Self {
            base_dir: base_dir.to_path_buf(),
            config,
            store,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Run one reconciliation. Read-only: scans the source tree, loads the
    /// catalogs and lists, and classifies every key.
    pub fn reconcile(
        &self,
        language: Option<&str>,
        controller: Option<&str>,
    ) -> Result<Reconciliation> {
        let language = resolve(language, &self.config.default_language);
        let controller = resolve(controller, APPLICATION_CONTROLLER);
        let is_default_scope = controller == APPLICATION_CONTROLLER;

        let scan = self.scan_index();

        let mut values = self.store.load_catalog(&language, &controller)?;
        let mut default_values = self
            .store
            .load_catalog(&self.config.default_language, &controller)?;
        if is_default_scope {
            // Merge every discovered controller catalog for presentation
            // breadth; controller values shadow application ones
            for scope in &scan.controller_scopes {
                values.extend(self.store.load_catalog(&language, scope)?);
                default_values.extend(
                    self.store
                        .load_catalog(&self.config.default_language, scope)?,
                );
            }
        }

        let keep_list = self.store.load_keep_list()?;
        let ignore_list = self.store.load_ignore_list()?;

        let referenced = scan.index.keys_in_scope(&controller);
        let catalog_keys: BTreeSet<String> = values.keys().cloned().collect();
        let inherited: BTreeSet<String> = if is_default_scope {
            BTreeSet::new()
        } else {
            self.store
                .load_catalog(&language, APPLICATION_CONTROLLER)?
                .keys()
                .cloned()
                .collect()
        };

        let result = diff(
            &referenced,
            &catalog_keys,
            &keep_list,
            &ignore_list,
            &inherited,
            is_default_scope,
        );

        Ok(Reconciliation {
            language,
            default_language: self.config.default_language.clone(),
            controller,
            values,
            default_values,
            keep_list,
            ignore_list,
            index: scan.index,
            result,
            files_scanned: scan.files_scanned,
        })
    }

    /// Scan the source tree and build the reference index. No catalog access.
    pub fn scan_index(&self) -> SourceScan {
        let scan = scan_sources(
            &self.base_dir,
            &self.config.source_roots,
            &self.config.file_extensions,
            &self.config.excluded_paths,
        );
        SourceScan {
            index: KeyIndex::from_occurrences(scan.occurrences),
            controller_scopes: scan.controller_scopes,
            files_scanned: scan.files_scanned,
        }
    }

    /// Upsert one message, optionally protecting it on the keep list.
    pub fn save_key(
        &self,
        language: Option<&str>,
        controller: Option<&str>,
        key: &str,
        value: &str,
        keep: bool,
    ) -> Result<()> {
        ensure!(!key.trim().is_empty(), "Key must not be empty");
        ensure!(!value.trim().is_empty(), "Value must not be empty");
        let language = resolve(language, &self.config.default_language);
        let controller = resolve(controller, APPLICATION_CONTROLLER);

        let guard = self.store.lock_mutations();
        let mut catalog = self.store.load_catalog(&language, &controller)?;
        catalog.insert(key.to_string(), value.to_string());
        self.store.save_catalog(&language, &controller, &catalog)?;
        drop(guard);

        if keep {
            self.keep(&[key.to_string()])
        } else {
            self.unkeep(&[key.to_string()])
        }
    }

    /// Protect keys from obsolete classification.
    pub fn keep(&self, keys: &[String]) -> Result<()> {
        let _guard = self.store.lock_mutations();
        let mut list = self.store.load_keep_list()?;
        let before = list.len();
        list.extend(keys.iter().cloned());
        if list.len() != before {
            self.store.save_keep_list(&list)?;
        }
        Ok(())
    }

    pub fn unkeep(&self, keys: &[String]) -> Result<()> {
        let _guard = self.store.lock_mutations();
        let mut list = self.store.load_keep_list()?;
        let before = list.len();
        for key in keys {
            list.remove(key);
        }
        if list.len() != before {
            self.store.save_keep_list(&list)?;
        }
        Ok(())
    }

    /// Remove keys from one catalog.
    pub fn remove_all(
        &self,
        language: Option<&str>,
        controller: Option<&str>,
        keys: &[String],
    ) -> Result<()> {
        let language = resolve(language, &self.config.default_language);
        let controller = resolve(controller, APPLICATION_CONTROLLER);

        let _guard = self.store.lock_mutations();
        let mut catalog = self.store.load_catalog(&language, &controller)?;
        for key in keys {
            catalog.remove(key);
        }
        self.store.save_catalog(&language, &controller, &catalog)
    }

    /// Exempt keys from new classification.
    pub fn ignore_all(&self, keys: &[String]) -> Result<()> {
        let _guard = self.store.lock_mutations();
        let mut list = self.store.load_ignore_list()?;
        list.extend(keys.iter().cloned());
        self.store.save_ignore_list(&list)
    }

    pub fn unignore_all(&self, keys: &[String]) -> Result<()> {
        let _guard = self.store.lock_mutations();
        let mut list = self.store.load_ignore_list()?;
        for key in keys {
            list.remove(key);
        }
        self.store.save_ignore_list(&list)
    }

    /// Apply a bulk action, then re-run reconciliation for a fresh result.
    pub fn apply_changes(
        &self,
        language: Option<&str>,
        controller: Option<&str>,
        action: BulkAction,
        keys: &[String],
    ) -> Result<Reconciliation> {
        match action {
            BulkAction::Remove => self.remove_all(language, controller, keys)?,
            BulkAction::Ignore => self.ignore_all(keys)?,
            BulkAction::Unignore => self.unignore_all(keys)?,
        }
        self.reconcile(language, controller)
    }
}

fn resolve(value: Option<&str>, fallback: &str) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => fallback.to_string(),
    }
}

//! Catalog, keep list and ignore list persistence.
//!
//! Catalogs are UTF-8 properties files, one `key=value` pair per line, sorted
//! by key on save with a generated header comment. Missing files load as
//! empty. Saves write a complete replacement through a sibling temp file so a
//! crash mid-write never leaves a half-written catalog.

use std::{
    collections::{BTreeMap, BTreeSet},
    fs,
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard},
};

use anyhow::{Context, Result};
use chrono::Local;

use crate::config::{APPLICATION_CONTROLLER, Config, DEFAULT_LANGUAGE};

/// Persisted key to message text mapping for one (language, controller) pair.
pub type Catalog = BTreeMap<String, String>;

const KEEP_LIST_FILE: &str = "messages.keep";
const IGNORE_LIST_FILE: &str = "messages.ignore";

/// Persistence seam for catalogs and the keep/ignore lists.
pub trait CatalogStore {
    /// Load a catalog. A missing file is an empty catalog, not an error.
    fn load_catalog(&self, language: &str, controller: &str) -> Result<Catalog>;
    /// Replace a catalog on disk. Write failures are fatal to the caller.
    fn save_catalog(&self, language: &str, controller: &str, catalog: &Catalog) -> Result<()>;

    fn load_keep_list(&self) -> Result<BTreeSet<String>>;
    fn save_keep_list(&self, list: &BTreeSet<String>) -> Result<()>;
    fn load_ignore_list(&self) -> Result<BTreeSet<String>>;
    fn save_ignore_list(&self, list: &BTreeSet<String>) -> Result<()>;

    /// Serialize read-modify-write cycles against this store.
    fn lock_mutations(&self) -> MutexGuard<'_, ()>;
}

/// File-system store over the Play-style message file layout:
///
/// - `<catalog_root>/messages` for the default language
/// - `<catalog_root>/messages.<lang>` for other languages
/// - `<controller_root>/messages.<controller>.<lang>` for controller catalogs
pub struct FsCatalogStore {
    catalog_root: PathBuf,
    controller_root: PathBuf,
    mutation_lock: Mutex<()>,
}

impl FsCatalogStore {
    pub fn new(base_dir: &Path, config: &Config) -> Self {
        Self {
            catalog_root: base_dir.join(&config.catalog_root),
            controller_root: base_dir.join(&config.controller_catalog_root),
            mutation_lock: Mutex::new(()),
        }
    }

    fn catalog_file(&self, language: &str, controller: &str) -> PathBuf {
        if language == DEFAULT_LANGUAGE {
            self.catalog_root.join("messages")
        } else if controller == APPLICATION_CONTROLLER {
            self.catalog_root.join(format!("messages.{}", language))
        } else {
            self.controller_root
                .join(format!("messages.{}.{}", controller, language))
        }
    }

    fn load_lines(&self, path: &Path) -> Result<Vec<String>> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {}", path.display()));
            }
        };
        Ok(content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect())
    }

    fn save_lines<I, S>(&self, path: &Path, lines: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut content = format!("# Saved by msgsync on {}\n", Local::now().to_rfc2822());
        for line in lines {
            content.push_str(line.as_ref());
            content.push('\n');
        }
        write_replace(path, &content)
    }
}

impl CatalogStore for FsCatalogStore {
    fn load_catalog(&self, language: &str, controller: &str) -> Result<Catalog> {
        let path = self.catalog_file(language, controller);
        let mut catalog = Catalog::new();
        for line in self.load_lines(&path)? {
            // Lines without a separator are malformed and dropped
            if let Some((key, value)) = line.split_once('=') {
                catalog.insert(key.trim().to_string(), value.trim().to_string());
            }
        }
        Ok(catalog)
    }

    fn save_catalog(&self, language: &str, controller: &str, catalog: &Catalog) -> Result<()> {
        let path = self.catalog_file(language, controller);
        // BTreeMap iteration gives the sorted-by-key order the format requires
        let lines = catalog
            .iter()
            .map(|(key, value)| format!("{}={}", key, value));
        self.save_lines(&path, lines)
    }

    fn load_keep_list(&self) -> Result<BTreeSet<String>> {
        let lines = self.load_lines(&self.catalog_root.join(KEEP_LIST_FILE))?;
        Ok(lines.into_iter().collect())
    }

    fn save_keep_list(&self, list: &BTreeSet<String>) -> Result<()> {
        self.save_lines(&self.catalog_root.join(KEEP_LIST_FILE), list)
    }

    fn load_ignore_list(&self) -> Result<BTreeSet<String>> {
        let lines = self.load_lines(&self.catalog_root.join(IGNORE_LIST_FILE))?;
        Ok(lines.into_iter().collect())
    }

    fn save_ignore_list(&self, list: &BTreeSet<String>) -> Result<()> {
        self.save_lines(&self.catalog_root.join(IGNORE_LIST_FILE), list)
    }

    fn lock_mutations(&self) -> MutexGuard<'_, ()> {
        self.mutation_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Write a complete replacement of `path`: temp file first, then rename.
fn write_replace(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    fs::write(&tmp, content)
        .with_context(|| format!("Failed to write file: {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("Failed to replace file: {}", path.display()))?;

    Ok(())
}

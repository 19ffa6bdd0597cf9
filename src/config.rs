use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result};
use glob::Pattern;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".msgsyncrc.json";

/// Language sentinel for the application's default message catalog
/// (the plain `messages` file without a language suffix).
pub const DEFAULT_LANGUAGE: &str = "default";

/// Controller sentinel for keys shared by every controller.
pub const APPLICATION_CONTROLLER: &str = "application";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directories scanned for message key references.
    #[serde(default = "default_source_roots")]
    pub source_roots: Vec<String>,
    /// File extensions considered when scanning.
    #[serde(default = "default_file_extensions")]
    pub file_extensions: Vec<String>,
    /// Path fragments or glob patterns excluded from scanning.
    #[serde(default)]
    pub excluded_paths: Vec<String>,
    #[serde(default = "default_language")]
    pub default_language: String,
    /// Directory holding `messages`, `messages.<lang>` and the keep/ignore lists.
    #[serde(default = "default_catalog_root")]
    pub catalog_root: String,
    /// Directory holding the per-controller `messages.<controller>.<lang>` files.
    #[serde(default = "default_controller_catalog_root")]
    pub controller_catalog_root: String,
}

fn default_source_roots() -> Vec<String> {
    vec!["app/views".to_string(), "app/controllers".to_string()]
}

fn default_file_extensions() -> Vec<String> {
    ["html", "tag", "txt", "java"].map(String::from).to_vec()
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

fn default_catalog_root() -> String {
    "conf".to_string()
}

fn default_controller_catalog_root() -> String {
    // Distinct from the default-language catalog file `conf/messages`
    "conf/Messages".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_roots: default_source_roots(),
            file_extensions: default_file_extensions(),
            excluded_paths: Vec::new(),
            default_language: default_language(),
            catalog_root: default_catalog_root(),
            controller_catalog_root: default_controller_catalog_root(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any glob patterns in `excludedPaths` are invalid.
    pub fn validate(&self) -> Result<()> {
        // Fragments without wildcards are matched as literal path substrings,
        // only wildcard patterns go through the glob engine.
        for pattern in &self.excluded_paths {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'excludedPaths': \"{}\"", pattern)
                })?;
            }
        }

        for ext in &self.file_extensions {
            if ext.starts_with('.') {
                anyhow::bail!(
                    "File extension \"{}\" must not include the leading dot",
                    ext
                );
            }
        }

        Ok(())
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}

//! Source tree scanning and message key extraction.
//!
//! Walks the configured source roots and extracts every `&{'key'}` style
//! message reference, recording the originating file and 1-indexed line.
//! Scanning is best-effort line matching: malformed references are skipped
//! silently and unreadable files are skipped with a warning.

use std::{collections::BTreeSet, fs, path::Path, sync::LazyLock};

use colored::Colorize;
use glob::Pattern;
use regex::Regex;
use walkdir::WalkDir;

use crate::config::APPLICATION_CONTROLLER;

/// Matches a message reference marker followed by a quoted key literal, e.g.
/// `&{'greeting.hello'}` or `&{"greeting.hello", arg}`. A literal containing
/// a backslash escape does not match and the reference is skipped.
static MESSAGE_REF_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"&\{\s*(?:'([^'\\]*)'|"([^"\\]*)")"#).unwrap());

/// Location of a single key reference in source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    pub file_path: String,
    /// 1-indexed line number.
    pub line: usize,
}

impl SourceLocation {
    pub fn new(file_path: impl Into<String>, line: usize) -> Self {
        Self {
            file_path: file_path.into(),
            line,
        }
    }
}

/// One extracted key reference occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyOccurrence {
    pub key: String,
    pub location: SourceLocation,
    /// Controller scope derived from the file's position under its source root.
    pub scope: String,
}

/// Result of scanning the source tree.
pub struct ScanResult {
    /// Occurrences in walk order, line order within a file, left-to-right
    /// within a line.
    pub occurrences: Vec<KeyOccurrence>,
    /// Controller scopes named by the immediate subdirectories of the source
    /// roots, whether or not anything under them references a key.
    pub controller_scopes: BTreeSet<String>,
    pub files_scanned: usize,
    pub files_skipped: usize,
}

pub fn scan_sources(
    base_dir: &Path,
    source_roots: &[String],
    file_extensions: &[String],
    excluded_paths: &[String],
) -> ScanResult {
    let mut occurrences = Vec::new();
    let mut controller_scopes = BTreeSet::new();
    let mut files_scanned = 0;
    let mut files_skipped = 0;

    // Separate exclusions into literal fragments and glob patterns
    let mut literal_fragments: Vec<&str> = Vec::new();
    let mut glob_patterns: Vec<Pattern> = Vec::new();
    for p in excluded_paths {
        if p.contains('*') || p.contains('?') {
            match Pattern::new(p) {
                Ok(pattern) => glob_patterns.push(pattern),
                Err(e) => {
                    eprintln!(
                        "{} Invalid excluded pattern '{}': {}",
                        "warning:".bold().yellow(),
                        p,
                        e
                    );
                }
            }
        } else {
            literal_fragments.push(p);
        }
    }

    for root in source_roots {
        let root_dir = base_dir.join(root);
        if !root_dir.exists() {
            continue;
        }

        for entry in WalkDir::new(&root_dir).sort_by_file_name() {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    files_skipped += 1;
                    eprintln!("{} Cannot access path: {}", "warning:".bold().yellow(), e);
                    continue;
                }
            };
            let path = entry.path();
            // Exclusions are matched against the path relative to the
            // project root, never against the directories above it
            let rel = path.strip_prefix(base_dir).unwrap_or(path);
            let rel_str = rel.to_string_lossy();

            if literal_fragments.iter().any(|f| rel_str.contains(f)) {
                continue;
            }
            if glob_patterns.iter().any(|p| p.matches(&rel_str)) {
                continue;
            }

            if entry.file_type().is_dir() {
                // Immediate subdirectories name controller scopes even when
                // no reference was found under them
                if entry.depth() == 1 {
                    controller_scopes.insert(entry.file_name().to_string_lossy().to_lowercase());
                }
                continue;
            }
            if !entry.file_type().is_file() || !has_scannable_extension(path, file_extensions) {
                continue;
            }

            let scope = scope_for(path, &root_dir);
            match fs::read_to_string(path) {
                Ok(content) => {
                    files_scanned += 1;
                    scan_content(&content, &path.to_string_lossy(), &scope, &mut occurrences);
                }
                Err(e) => {
                    files_skipped += 1;
                    eprintln!(
                        "{} Cannot read {}: {}",
                        "warning:".bold().yellow(),
                        path.display(),
                        e
                    );
                }
            }
        }
    }

    ScanResult {
        occurrences,
        controller_scopes,
        files_scanned,
        files_skipped,
    }
}

/// Extract every reference from one file's content. A line may hold several
/// references; a marker without a valid quoted literal yields nothing.
fn scan_content(content: &str, file_path: &str, scope: &str, out: &mut Vec<KeyOccurrence>) {
    for (i, line) in content.lines().enumerate() {
        for caps in MESSAGE_REF_REGEX.captures_iter(line) {
            let key = caps
                .get(1)
                .or_else(|| caps.get(2))
                .map(|m| m.as_str())
                .unwrap_or("");
            if key.is_empty() {
                continue;
            }
            out.push(KeyOccurrence {
                key: key.to_string(),
                location: SourceLocation::new(file_path, i + 1),
                scope: scope.to_string(),
            });
        }
    }
}

/// Derive the controller scope from a file's position under its source root.
///
/// The immediate subdirectory names the controller (`app/views/Admin/list.html`
/// scopes to `admin`); files directly under the root belong to the shared
/// application scope.
fn scope_for(path: &Path, root_dir: &Path) -> String {
    let relative = match path.strip_prefix(root_dir) {
        Ok(rel) => rel,
        Err(_) => return APPLICATION_CONTROLLER.to_string(),
    };
    let components: Vec<_> = relative.components().collect();
    if components.len() >= 2 {
        components[0].as_os_str().to_string_lossy().to_lowercase()
    } else {
        APPLICATION_CONTROLLER.to_string()
    }
}

fn has_scannable_extension(path: &Path, file_extensions: &[String]) -> bool {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => file_extensions.iter().any(|e| e == ext),
        None => false,
    }
}

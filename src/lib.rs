//! Msgsync - message catalog reconciliation for Play-style properties files
//!
//! Msgsync is a CLI tool and library for keeping per-language message catalogs
//! in sync with the message keys actually referenced in source code. It scans
//! templates and controllers for `&{'key'}` references, diffs them against the
//! persisted catalogs, and classifies every key as new, obsolete or existing.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (user-facing commands and reporting)
//! - `config`: Configuration file loading and parsing
//! - `scanner`: Source tree scanning and key reference extraction
//! - `index`: In-memory index of key references by controller scope
//! - `diff`: The pure new/obsolete/existing classification
//! - `store`: Catalog, keep list and ignore list persistence
//! - `service`: Reconciliation orchestration and mutation operations

pub mod cli;
pub mod config;
pub mod diff;
pub mod index;
pub mod scanner;
pub mod service;
pub mod store;

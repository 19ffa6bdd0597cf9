//! Report formatting and printing utilities.
//!
//! Displays reconciliation results in cargo-style format. Separate from the
//! core logic so msgsync can be used as a library.

use std::io::{self, Write};

use colored::Colorize;

use crate::scanner::SourceLocation;
use crate::service::Reconciliation;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Maximum number of reference locations to display per key.
const MAX_LOCATIONS_DISPLAY: usize = 3;

/// Print a reconciliation report to stdout.
pub fn print_reconciliation(recon: &Reconciliation) {
    print_reconciliation_to(recon, &mut io::stdout().lock());
}

/// Print a reconciliation report to a custom writer.
///
/// Useful for testing or redirecting output.
pub fn print_reconciliation_to<W: Write>(recon: &Reconciliation, writer: &mut W) {
    for key in &recon.result.new_keys {
        let _ = writeln!(
            writer,
            "{}: \"{}\" is referenced but missing from the catalog  {}",
            "error".bold().red(),
            key,
            "new-key".dimmed().cyan()
        );
        print_locations(recon.index.locations_for(key), writer);
        let _ = writeln!(writer);
    }

    for key in &recon.result.obsolete_keys {
        let value = recon.values.get(key).map(String::as_str).unwrap_or("");
        let _ = writeln!(
            writer,
            "{}: \"{}\" is in the catalog but never referenced  {} ({:?})",
            "warning".bold().yellow(),
            key,
            "obsolete-key".dimmed().cyan(),
            value
        );
        let _ = writeln!(writer);
    }

    print_summary(recon, writer);
}

fn print_locations<W: Write>(locations: &[SourceLocation], writer: &mut W) {
    let total = locations.len();
    let display_count = total.min(MAX_LOCATIONS_DISPLAY);

    for (i, location) in locations.iter().take(display_count).enumerate() {
        let is_last = i == display_count - 1;
        let remaining = total.saturating_sub(display_count);
        let suffix = if is_last && remaining > 0 {
            format!(" (and {} more)", remaining)
        } else {
            String::new()
        };

        let _ = writeln!(
            writer,
            "  {} {}:{}{}",
            "-->".blue(),
            location.file_path,
            location.line,
            suffix
        );
    }
}

fn print_summary<W: Write>(recon: &Reconciliation, writer: &mut W) {
    let new = recon.result.new_keys.len();
    let obsolete = recon.result.obsolete_keys.len();

    if new + obsolete > 0 {
        let _ = writeln!(
            writer,
            "{} {} problems ({} {}, {} {})",
            FAILURE_MARK.red(),
            new + obsolete,
            new,
            if new == 1 { "new key" } else { "new keys" }.red(),
            obsolete,
            if obsolete == 1 {
                "obsolete key"
            } else {
                "obsolete keys"
            }
            .yellow()
        );
    } else {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "Checked {} source {}, {} catalog {} - catalogs are in sync",
                recon.files_scanned,
                if recon.files_scanned == 1 { "file" } else { "files" },
                recon.values.len(),
                if recon.values.len() == 1 { "key" } else { "keys" }
            )
            .green()
        );
    }
}

/// Print every reference location of one key.
pub fn print_sources(key: &str, locations: &[SourceLocation]) {
    print_sources_to(key, locations, &mut io::stdout().lock());
}

pub fn print_sources_to<W: Write>(key: &str, locations: &[SourceLocation], writer: &mut W) {
    if locations.is_empty() {
        let _ = writeln!(writer, "\"{}\" is not referenced anywhere", key);
        return;
    }

    let _ = writeln!(writer, "\"{}\" is referenced from:", key);
    for location in locations {
        let _ = writeln!(
            writer,
            "  {} {}:{}",
            "-->".blue(),
            location.file_path,
            location.line
        );
    }
}

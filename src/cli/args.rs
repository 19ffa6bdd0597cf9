//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `check`: Reconcile catalogs against source references and report
//! - `sources`: Show where a key is referenced
//! - `clean`: Remove obsolete keys from a catalog
//! - `set`: Save one message to a catalog
//! - `keep` / `unkeep`: Manage the keep list
//! - `ignore` / `unignore`: Manage the ignore list
//! - `init`: Initialize msgsync configuration file

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }
}

/// Common arguments shared by catalog-facing commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Language of the catalog to reconcile (defaults to the default language)
    #[arg(short, long)]
    pub language: Option<String>,

    /// Controller scope to reconcile (defaults to the shared application scope)
    #[arg(short, long)]
    pub controller: Option<String>,
}

#[derive(Debug, Args)]
pub struct CheckCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct SourcesCommand {
    /// The message key to look up
    pub key: String,
}

#[derive(Debug, Args)]
pub struct CleanCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Actually delete obsolete keys (default is dry-run)
    #[arg(long)]
    pub apply: bool,
}

#[derive(Debug, Args)]
pub struct SetCommand {
    /// The message key to save
    pub key: String,

    /// The message text
    pub value: String,

    /// Also protect the key on the keep list
    #[arg(long)]
    pub keep: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct KeysCommand {
    /// Message keys to operate on
    #[arg(required = true)]
    pub keys: Vec<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Reconcile catalogs against source references and report new/obsolete/existing keys
    Check(CheckCommand),
    /// Show every source location referencing a key
    Sources(SourcesCommand),
    /// Remove obsolete keys from the catalog
    Clean(CleanCommand),
    /// Save one message to a catalog
    Set(SetCommand),
    /// Protect keys from obsolete classification
    Keep(KeysCommand),
    /// Drop keys from the keep list
    Unkeep(KeysCommand),
    /// Exempt keys from new classification
    Ignore(KeysCommand),
    /// Drop keys from the ignore list
    Unignore(KeysCommand),
    /// Initialize a new .msgsyncrc.json configuration file
    Init,
}

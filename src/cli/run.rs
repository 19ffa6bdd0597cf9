use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;

use super::args::{CleanCommand, Command, CommonArgs, KeysCommand, SetCommand};
use super::ExitStatus;
use super::report::{self, FAILURE_MARK, SUCCESS_MARK};
use crate::config::{self, CONFIG_FILE_NAME};
use crate::service::{BulkAction, Reconciler};
use crate::store::FsCatalogStore;

pub fn run(command: Command, base_dir: &Path) -> Result<ExitStatus> {
    if let Command::Init = command {
        return init(base_dir);
    }

    let loaded = config::load_config(base_dir)?;
    let config = loaded.config;
    let store = FsCatalogStore::new(base_dir, &config);
    let reconciler = Reconciler::new(base_dir, config, store);

    match command {
        Command::Check(cmd) => check(&reconciler, &cmd.common),
        Command::Sources(cmd) => sources(&reconciler, &cmd.key),
        Command::Clean(cmd) => clean(&reconciler, cmd),
        Command::Set(cmd) => set(&reconciler, cmd),
        Command::Keep(cmd) => keys_op(&cmd, "keep list", |keys| reconciler.keep(keys)),
        Command::Unkeep(cmd) => keys_op(&cmd, "keep list", |keys| reconciler.unkeep(keys)),
        Command::Ignore(cmd) => keys_op(&cmd, "ignore list", |keys| reconciler.ignore_all(keys)),
        Command::Unignore(cmd) => {
            keys_op(&cmd, "ignore list", |keys| reconciler.unignore_all(keys))
        }
        Command::Init => unreachable!("handled above"),
    }
}

fn check(reconciler: &Reconciler<FsCatalogStore>, common: &CommonArgs) -> Result<ExitStatus> {
    let recon = reconciler.reconcile(common.language.as_deref(), common.controller.as_deref())?;
    report::print_reconciliation(&recon);

    if recon.result.new_keys.is_empty() && recon.result.obsolete_keys.is_empty() {
        Ok(ExitStatus::Success)
    } else {
        Ok(ExitStatus::Failure)
    }
}

fn sources(reconciler: &Reconciler<FsCatalogStore>, key: &str) -> Result<ExitStatus> {
    let scan = reconciler.scan_index();
    report::print_sources(key, scan.index.locations_for(key));
    Ok(ExitStatus::Success)
}

fn clean(reconciler: &Reconciler<FsCatalogStore>, cmd: CleanCommand) -> Result<ExitStatus> {
    let language = cmd.common.language.as_deref();
    let controller = cmd.common.controller.as_deref();

    let recon = reconciler.reconcile(language, controller)?;
    let obsolete: Vec<String> = recon.result.obsolete_keys.iter().cloned().collect();

    if obsolete.is_empty() {
        println!(
            "{} {}",
            SUCCESS_MARK.green(),
            "No obsolete keys to remove".green()
        );
        return Ok(ExitStatus::Success);
    }

    if cmd.apply {
        let fresh = reconciler.apply_changes(language, controller, BulkAction::Remove, &obsolete)?;
        println!(
            "{} {} key(s) from the {} catalog.",
            "Deleted".green().bold(),
            obsolete.len(),
            fresh.language
        );
    } else {
        println!(
            "{} {} key(s):",
            "Would delete".yellow().bold(),
            obsolete.len()
        );
        for key in &obsolete {
            let value = recon.values.get(key).map(String::as_str).unwrap_or("");
            println!("  {} ({:?})", key, value);
        }
        println!("Run with {} to delete these keys.", "--apply".cyan());
    }

    Ok(ExitStatus::Success)
}

fn set(reconciler: &Reconciler<FsCatalogStore>, cmd: SetCommand) -> Result<ExitStatus> {
    reconciler.save_key(
        cmd.common.language.as_deref(),
        cmd.common.controller.as_deref(),
        &cmd.key,
        &cmd.value,
        cmd.keep,
    )?;
    println!(
        "{} {}",
        SUCCESS_MARK.green(),
        format!("Saved \"{}\"", cmd.key).green()
    );
    Ok(ExitStatus::Success)
}

fn keys_op<F>(cmd: &KeysCommand, list_name: &str, op: F) -> Result<ExitStatus>
where
    F: FnOnce(&[String]) -> Result<()>,
{
    op(&cmd.keys)?;
    println!(
        "{} {}",
        SUCCESS_MARK.green(),
        format!("Updated the {} ({} key(s))", list_name, cmd.keys.len()).green()
    );
    Ok(ExitStatus::Success)
}

fn init(base_dir: &Path) -> Result<ExitStatus> {
    let path = base_dir.join(CONFIG_FILE_NAME);
    if path.exists() {
        println!(
            "{} {} already exists",
            FAILURE_MARK.red(),
            CONFIG_FILE_NAME
        );
        return Ok(ExitStatus::Failure);
    }

    let content = config::default_config_json()?;
    fs::write(&path, format!("{}\n", content))
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!(
        "{} {}",
        SUCCESS_MARK.green(),
        format!("Created {}", CONFIG_FILE_NAME).green()
    );
    Ok(ExitStatus::Success)
}

//! Config command handler
//!
//! Besides the plain key/value edits, changes to `data_dir` or `key` report
//! where the record will be read from next, since they never move it.

use super::confirm;
use crate::args::ConfigSubcommand;
use gpa_calc::config::Config;
use gpa_calc::info;
use gpa_calc::store::FileStore;
use std::path::PathBuf;

/// Keys that decide which record file is opened
const STORAGE_KEYS: [&str; 3] = ["data_dir", "data-dir", "key"];

/// Dispatch config subcommands
pub fn run(subcommand: Option<ConfigSubcommand>, config: &mut Config, defaults: &Config) {
    let outcome = match subcommand {
        None | Some(ConfigSubcommand::Get { key: None }) => {
            show_all(config);
            Ok(())
        }
        Some(ConfigSubcommand::Get { key: Some(key) }) => config
            .get(&key)
            .map(|value| println!("{value}"))
            .ok_or_else(|| format!("Unknown config key: '{key}'")),
        Some(ConfigSubcommand::Set { key, value }) => config
            .set(&key, &value)
            .and_then(|()| save(config, &key))
            .map(|()| println!("✓ Set {key} = {value}")),
        Some(ConfigSubcommand::Unset { key }) => config
            .unset(&key, defaults)
            .and_then(|()| save(config, &key))
            .map(|()| println!("✓ Reset {key} to default")),
        Some(ConfigSubcommand::Reset) => {
            reset();
            Ok(())
        }
    };

    if let Err(e) = outcome {
        eprintln!("✗ {e}");
        std::process::exit(1);
    }
}

/// Path of the record file the given config points at
fn state_file(config: &Config) -> Result<PathBuf, String> {
    FileStore::new(&config.storage.data_dir)
        .path_for(&config.storage.key)
        .map_err(|e| e.to_string())
}

fn show_all(config: &Config) {
    println!("\n=== Configuration ===\n");
    print!("{config}");
    match state_file(config) {
        Ok(path) => println!("\nRecord file: {}", path.display()),
        Err(e) => println!("\nRecord file: unavailable ({e})"),
    }
}

fn save(config: &Config, key: &str) -> Result<(), String> {
    config
        .save()
        .map_err(|e| format!("Failed to save config: {e}"))?;
    info!("Config key '{key}' saved");

    if STORAGE_KEYS.contains(&key) {
        let path = state_file(config)?;
        let note = if path.exists() {
            "an existing record will be used"
        } else {
            "no record there yet; the next edit starts a fresh one"
        };
        println!("  Record file is now {} ({note})", path.display());
    }
    Ok(())
}

fn reset() {
    if !Config::get_config_file_path().exists() {
        println!("✓ Config is already at defaults");
        return;
    }

    if !confirm("Are you sure you want to reset config to defaults?") {
        println!("✗ Reset cancelled");
        return;
    }
    if let Err(e) = Config::reset() {
        eprintln!("✗ Failed to remove config file: {e}");
        std::process::exit(1);
    }
    println!("✓ Config reset to defaults");
}

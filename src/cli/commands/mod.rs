//! CLI command handlers for `gpacalc`.
//!
//! Each command is implemented in its own submodule. Handlers that edit the
//! record open a [`Calculator`] over the configured data directory.

pub mod config;
pub mod record;
pub mod report;
pub mod rubric;
pub mod types;

use gpa_calc::calculator::{CalcError, Calculator};
use gpa_calc::config::Config;
use gpa_calc::error;
use gpa_calc::store::FileStore;
use std::io::{self, Write};

/// Open the calculator over the configured data directory and key
pub fn open_calculator(config: &Config) -> Calculator<FileStore> {
    let store = FileStore::new(&config.storage.data_dir);
    Calculator::open(store, config.storage.key.as_str())
}

/// Unwrap an edit result, or report the error and exit
pub fn or_exit<T>(result: Result<T, CalcError>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            error!("{e}");
            eprintln!("✗ {e}");
            std::process::exit(1);
        }
    }
}

/// Ask a yes/no question on stdin; anything but "y"/"yes" is a no
pub fn confirm(question: &str) -> bool {
    print!("{question} (y/n): ");
    io::stdout().flush().ok();

    let mut response = String::new();
    io::stdin().read_line(&mut response).ok();

    let response = response.trim();
    response.eq_ignore_ascii_case("y") || response.eq_ignore_ascii_case("yes")
}

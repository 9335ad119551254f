//! Core module: grade models, calculation, migration and persistence

pub mod calculator;
pub mod config;
pub mod gpa;
pub mod migration;
pub mod models;
pub mod report;
pub mod store;

/// Returns the current version of the `gpa-calc` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

//! Shared library for `gpa-calc`
//! Contains the grade models, the GPA engine, state migration and persistence
//! used by the `gpacalc` command-line interface.

pub mod logger;

pub mod core;

pub use crate::core::*;

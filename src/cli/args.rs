//! CLI argument definitions for `gpacalc`

use clap::{builder::BoolishValueParser, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use gpa_calc::config::ConfigOverrides;
use gpa_calc::logger::Level;

/// CLI log level argument
///
/// Converts to lowercase strings for config storage and to `Level` for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let as_str = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        };
        write!(f, "{as_str}")
    }
}

/// Parse a 1-based position from the command line into a 0-based index
fn position(value: &str) -> Result<usize, String> {
    match value.trim().parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(format!("'{value}' is not a position (expected 1, 2, 3, ...)")),
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    Get {
        /// Optional configuration key (e.g., `level`, `data_dir`, `reports_dir`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum RubricSubcommand {
    /// List the grading rubric.
    List,
    /// Add a grade to the rubric.
    Add {
        /// Grade label (e.g., "A+")
        #[arg(value_name = "GRADE")]
        grade: String,
        /// Grade points; anything that is not a number is stored as "no value"
        #[arg(value_name = "POINTS", allow_hyphen_values = true)]
        points: String,
        /// Insert at this position instead of appending
        #[arg(long, value_name = "POS", value_parser = position)]
        at: Option<usize>,
    },
    /// Edit a rubric row.
    Set {
        /// Row position (1-based)
        #[arg(value_name = "POS", value_parser = position)]
        index: usize,
        /// New grade label
        #[arg(long, value_name = "GRADE")]
        grade: Option<String>,
        /// New grade points
        #[arg(long, value_name = "POINTS", allow_hyphen_values = true)]
        points: Option<String>,
    },
    /// Remove a rubric row.
    Remove {
        /// Row position (1-based)
        #[arg(value_name = "POS", value_parser = position)]
        index: usize,
    },
    /// Restore the built-in rubric.
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum TypesSubcommand {
    /// List the subject types.
    List,
    /// Add a subject type.
    Add {
        /// Type name
        #[arg(value_name = "NAME")]
        name: String,
        /// Credits carried by subjects of this type
        #[arg(value_name = "CREDITS", allow_hyphen_values = true)]
        credits: String,
        /// Insert at this position instead of appending
        #[arg(long, value_name = "POS", value_parser = position)]
        at: Option<usize>,
    },
    /// Edit a subject type.
    Set {
        /// Type position (1-based)
        #[arg(value_name = "POS", value_parser = position)]
        index: usize,
        /// New name (subjects referring to the old name are not updated)
        #[arg(long, value_name = "NAME")]
        name: Option<String>,
        /// New credits
        #[arg(long, value_name = "CREDITS", allow_hyphen_values = true)]
        credits: Option<String>,
    },
    /// Remove a subject type.
    Remove {
        /// Type position (1-based)
        #[arg(value_name = "POS", value_parser = position)]
        index: usize,
    },
    /// Restore the built-in subject types.
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum YearSubcommand {
    /// Append a year with two empty semesters.
    Add,
    /// Remove a year and everything in it.
    Remove {
        /// Year number (1-based)
        #[arg(value_name = "YEAR", value_parser = position)]
        year: usize,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum SubjectSubcommand {
    /// Add a subject to a semester.
    Add {
        /// Year number (1-based)
        #[arg(value_name = "YEAR", value_parser = position)]
        year: usize,
        /// Semester within the year (1 or 2)
        #[arg(value_name = "SEM", value_parser = position)]
        semester: usize,
        /// Subject name
        #[arg(value_name = "NAME", default_value = "")]
        name: String,
        /// Grade label; omit to leave the subject ungraded
        #[arg(short, long, value_name = "GRADE")]
        grade: Option<String>,
        /// Subject type; defaults to the first type
        #[arg(short = 't', long = "type", value_name = "TYPE")]
        subject_type: Option<String>,
    },
    /// Edit a subject.
    Set {
        /// Year number (1-based)
        #[arg(value_name = "YEAR", value_parser = position)]
        year: usize,
        /// Semester within the year (1 or 2)
        #[arg(value_name = "SEM", value_parser = position)]
        semester: usize,
        /// Subject position within the semester (1-based)
        #[arg(value_name = "POS", value_parser = position)]
        index: usize,
        /// New name
        #[arg(long, value_name = "NAME")]
        name: Option<String>,
        /// New grade label; an empty value clears the grade
        #[arg(short, long, value_name = "GRADE")]
        grade: Option<String>,
        /// New subject type
        #[arg(short = 't', long = "type", value_name = "TYPE")]
        subject_type: Option<String>,
    },
    /// Remove a subject.
    Remove {
        /// Year number (1-based)
        #[arg(value_name = "YEAR", value_parser = position)]
        year: usize,
        /// Semester within the year (1 or 2)
        #[arg(value_name = "SEM", value_parser = position)]
        semester: usize,
        /// Subject position within the semester (1-based)
        #[arg(value_name = "POS", value_parser = position)]
        index: usize,
    },
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Manage the grading rubric.
    Rubric {
        #[command(subcommand)]
        subcommand: Option<RubricSubcommand>,
    },
    /// Manage subject types and their credits.
    Types {
        #[command(subcommand)]
        subcommand: Option<TypesSubcommand>,
    },
    /// Add or remove academic years.
    Year {
        #[command(subcommand)]
        subcommand: YearSubcommand,
    },
    /// Add, edit or remove subjects.
    Subject {
        #[command(subcommand)]
        subcommand: SubjectSubcommand,
    },
    /// Show the record with semester GPAs and the CGPA.
    Show,
    /// Write a grade report.
    ///
    /// Defaults to `<reports_dir>/grade-report.<ext>` when no output path is given.
    Report {
        /// Output file path
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Report format: markdown (md) or html
        #[arg(short, long, value_name = "FORMAT", default_value = "html")]
        format: String,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "gpacalc",
    about = "Semester GPA and CGPA calculator",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config logging level
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Override the directory holding the saved record
    #[arg(long = "data-dir", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override the key the record is saved under
    #[arg(long = "key", value_name = "KEY")]
    pub key: Option<String>,

    /// Override the directory reports are written to
    #[arg(long = "reports-dir", value_name = "DIR")]
    pub reports_dir: Option<PathBuf>,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// # Returns
    /// A `ConfigOverrides` struct with values from CLI flags, where `None` means no override.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string()),
            file: self
                .config_log_file
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            verbose: self.config_verbose,
            data_dir: self
                .data_dir
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            key: self.key.clone().filter(|k| !k.trim().is_empty()),
            reports_dir: self
                .reports_dir
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("gpacalc").chain(args.iter().copied()))
            .expect("valid arguments")
    }

    #[test]
    fn test_log_level_display() {
        assert_eq!(LogLevelArg::Error.to_string(), "error");
        assert_eq!(LogLevelArg::Warn.to_string(), "warn");
        assert_eq!(LogLevelArg::Info.to_string(), "info");
        assert_eq!(LogLevelArg::Debug.to_string(), "debug");
    }

    #[test]
    fn test_log_level_to_logger_level() {
        assert_eq!(Level::from(LogLevelArg::Error), Level::Error);
        assert_eq!(Level::from(LogLevelArg::Warn), Level::Warn);
        assert_eq!(Level::from(LogLevelArg::Info), Level::Info);
        assert_eq!(Level::from(LogLevelArg::Debug), Level::Debug);
    }

    #[test]
    fn test_position_is_one_based() {
        assert_eq!(position("1"), Ok(0));
        assert_eq!(position("12"), Ok(11));
        assert!(position("0").is_err());
        assert!(position("-1").is_err());
        assert!(position("first").is_err());
    }

    #[test]
    fn test_to_config_overrides_empty() {
        let overrides = parse(&["show"]).to_config_overrides();
        assert!(overrides.level.is_none());
        assert!(overrides.file.is_none());
        assert!(overrides.verbose.is_none());
        assert!(overrides.data_dir.is_none());
        assert!(overrides.key.is_none());
        assert!(overrides.reports_dir.is_none());
    }

    #[test]
    fn test_to_config_overrides_with_values() {
        let cli = parse(&[
            "--config-level",
            "debug",
            "--config-log-file",
            "/tmp/test.log",
            "--config-verbose",
            "true",
            "--data-dir",
            "/data",
            "--key",
            "altRecord",
            "--reports-dir",
            "/reports",
            "show",
        ]);

        let overrides = cli.to_config_overrides();
        assert_eq!(overrides.level, Some("debug".to_string()));
        assert_eq!(overrides.file, Some("/tmp/test.log".to_string()));
        assert_eq!(overrides.verbose, Some(true));
        assert_eq!(overrides.data_dir, Some("/data".to_string()));
        assert_eq!(overrides.key, Some("altRecord".to_string()));
        assert_eq!(overrides.reports_dir, Some("/reports".to_string()));
    }

    #[test]
    fn test_subject_add_positions_converted() {
        let cli = parse(&["subject", "add", "2", "1", "Torts", "-g", "A", "-t", "Law"]);
        match cli.command {
            Command::Subject {
                subcommand:
                    SubjectSubcommand::Add {
                        year,
                        semester,
                        name,
                        grade,
                        subject_type,
                    },
            } => {
                assert_eq!((year, semester), (1, 0));
                assert_eq!(name, "Torts");
                assert_eq!(grade.as_deref(), Some("A"));
                assert_eq!(subject_type.as_deref(), Some("Law"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_rubric_add_accepts_negative_points() {
        let cli = parse(&["rubric", "add", "F", "-1"]);
        assert!(matches!(
            cli.command,
            Command::Rubric {
                subcommand: Some(RubricSubcommand::Add { ref points, at: None, .. })
            } if points == "-1"
        ));
    }

    #[test]
    fn test_year_remove_requires_position() {
        assert!(
            Cli::try_parse_from(["gpacalc", "year", "remove", "0"]).is_err()
        );
        let cli = parse(&["year", "remove", "3", "--yes"]);
        assert!(matches!(
            cli.command,
            Command::Year {
                subcommand: YearSubcommand::Remove { year: 2, yes: true }
            }
        ));
    }
}

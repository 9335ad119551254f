//! Report generation for a grade record
//!
//! Renders the semester GPA breakdown, CGPA, subject listing and the rubric
//! and type tables to Markdown or HTML.

pub mod formats;

use crate::core::gpa::{self, RecordSummary};
use crate::core::models::{AppState, Subject};
use std::error::Error;
use std::path::Path;

pub use formats::{HtmlReporter, MarkdownReporter, ReportFormat};

/// How a subject was treated by the GPA calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubjectStatus {
    /// Counted toward the semester GPA
    Counted,
    /// No grade yet
    Ungraded,
    /// Left out by the first-semester name rule
    Excluded,
}

impl SubjectStatus {
    /// Short note shown next to subjects that did not count
    #[must_use]
    pub const fn note(self) -> &'static str {
        match self {
            Self::Counted => "",
            Self::Ungraded => "ungraded",
            Self::Excluded => "excluded",
        }
    }
}

/// A subject with its resolved weights
#[derive(Debug, Clone)]
pub struct SubjectRow<'a> {
    /// The stored subject
    pub subject: &'a Subject,
    /// Resolved credits (0 when the type does not resolve)
    pub credits: f64,
    /// Resolved grade points (0 when the grade does not resolve)
    pub points: f64,
    /// Whether it counted
    pub status: SubjectStatus,
}

/// Data context for report generation
#[derive(Debug, Clone, Copy)]
pub struct ReportContext<'a> {
    /// State being reported
    pub state: &'a AppState,
    /// Precomputed GPA breakdown for `state`
    pub summary: &'a RecordSummary,
}

impl<'a> ReportContext<'a> {
    /// Create a new report context
    #[must_use]
    pub const fn new(state: &'a AppState, summary: &'a RecordSummary) -> Self {
        Self { state, summary }
    }

    /// Formatted CGPA ("-" when there is no data)
    #[must_use]
    pub fn cgpa(&self) -> String {
        self.summary.cgpa.to_string()
    }

    /// Total subjects across the record
    #[must_use]
    pub fn subject_count(&self) -> usize {
        self.state
            .years
            .iter()
            .flat_map(|y| &y.semesters)
            .map(|s| s.subjects.len())
            .sum()
    }

    /// Resolved rows for one semester, addressed by 0-based positions
    #[must_use]
    pub fn subject_rows(&self, year: usize, semester: usize) -> Vec<SubjectRow<'a>> {
        let state = self.state;
        let global_index = crate::core::models::global_semester_index(year, semester);
        state
            .years
            .get(year)
            .and_then(|y| y.semesters.get(semester))
            .map(|sem| {
                sem.subjects
                    .iter()
                    .map(|subject| SubjectRow {
                        subject,
                        credits: gpa::get_credits(&state.subject_types, &subject.subject_type),
                        points: gpa::get_grade_points(&state.rubric, &subject.grade),
                        status: if gpa::is_excluded(&subject.name, global_index) {
                            SubjectStatus::Excluded
                        } else if subject.is_graded() {
                            SubjectStatus::Counted
                        } else {
                            SubjectStatus::Ungraded
                        },
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Format a stored number for display; non-numbers show as "-"
#[must_use]
pub fn display_number(value: f64) -> String {
    if value.is_finite() {
        value.to_string()
    } else {
        "-".to_string()
    }
}

/// Fill `{{name}}` placeholders in one left-to-right pass.
///
/// Inserted values are never scanned again, so user text that looks like a
/// placeholder is written out literally. Unknown placeholders are kept as is.
#[must_use]
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let value = after.find("}}").and_then(|end| {
            let name = &after[..end];
            values
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value, end))
        });
        match value {
            Some((value, end)) => {
                out.push_str(value);
                rest = &after[end + 2..];
            }
            None => {
                out.push_str("{{");
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Generate a report to a file
    ///
    /// # Errors
    /// Returns an error if report generation or file writing fails
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let content = self.render(ctx)?;
        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(output_path, content)?;
        Ok(())
    }

    /// Generate report content as a string
    ///
    /// # Errors
    /// Returns an error if report generation fails
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>>;
}

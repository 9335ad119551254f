//! Markdown report generator
//!
//! Renders the grade report as GitHub-flavored Markdown tables.

use crate::core::get_version;
use crate::core::report::{display_number, fill_template, ReportContext, ReportGenerator};
use std::error::Error;
use std::fmt::Write;

/// Embedded Markdown report template
const MARKDOWN_TEMPLATE: &str = include_str!("../templates/report.md");

/// Markdown report generator
#[derive(Debug, Default)]
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// Create a new Markdown reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Render the report using template substitution
    fn render_template(ctx: &ReportContext) -> String {
        let cgpa = ctx.cgpa();
        let total_semesters = ctx.summary.total_semesters().to_string();
        let graded_semesters = ctx.summary.graded_semesters().to_string();
        let subject_count = ctx.subject_count().to_string();
        let semester_table = Self::generate_semester_table(ctx);
        let subjects_section = Self::generate_subjects(ctx);
        let rubric_table = Self::generate_rubric_table(ctx);
        let types_table = Self::generate_types_table(ctx);

        fill_template(
            MARKDOWN_TEMPLATE,
            &[
                ("version", get_version()),
                ("cgpa", cgpa.as_str()),
                ("total_semesters", total_semesters.as_str()),
                ("graded_semesters", graded_semesters.as_str()),
                ("subject_count", subject_count.as_str()),
                ("semester_table", semester_table.as_str()),
                ("subjects_section", subjects_section.as_str()),
                ("rubric_table", rubric_table.as_str()),
                ("types_table", types_table.as_str()),
            ],
        )
    }

    fn generate_semester_table(ctx: &ReportContext) -> String {
        if ctx.summary.semesters.is_empty() {
            return "_No semesters recorded._".to_string();
        }
        let mut table = String::from("| Semester | GPA |\n|----------|-----|\n");
        for result in &ctx.summary.semesters {
            let _ = writeln!(table, "| {} | {} |", result.label(), result.gpa);
        }
        table
    }

    fn generate_subjects(ctx: &ReportContext) -> String {
        let mut out = String::new();
        for result in &ctx.summary.semesters {
            let rows = ctx.subject_rows(result.year_index, result.semester_index);
            if rows.is_empty() {
                continue;
            }
            let _ = writeln!(out, "### {} (GPA {})\n", result.label(), result.gpa);
            out.push_str("| Subject | Type | Credits | Grade | Points | Note |\n");
            out.push_str("|---------|------|---------|-------|--------|------|\n");
            for row in rows {
                let _ = writeln!(
                    out,
                    "| {} | {} | {} | {} | {} | {} |",
                    escape_cell(&row.subject.name),
                    escape_cell(&row.subject.subject_type),
                    display_number(row.credits),
                    escape_cell(&row.subject.grade),
                    display_number(row.points),
                    row.status.note()
                );
            }
            out.push('\n');
        }
        if out.is_empty() {
            "_No subjects recorded._".to_string()
        } else {
            out
        }
    }

    fn generate_rubric_table(ctx: &ReportContext) -> String {
        let mut table = String::from("| Grade | Points |\n|-------|--------|\n");
        for entry in &ctx.state.rubric {
            let _ = writeln!(
                table,
                "| {} | {} |",
                escape_cell(&entry.grade),
                display_number(entry.points)
            );
        }
        table
    }

    fn generate_types_table(ctx: &ReportContext) -> String {
        let mut table = String::from("| Type | Credits |\n|------|---------|\n");
        for ty in &ctx.state.subject_types {
            let _ = writeln!(
                table,
                "| {} | {} |",
                escape_cell(&ty.name),
                display_number(ty.credits)
            );
        }
        table
    }
}

/// Keep user text from breaking table columns
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

impl ReportGenerator for MarkdownReporter {
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        Ok(Self::render_template(ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::gpa::summarize;
    use crate::core::models::{AppState, Subject, Year};

    #[test]
    fn test_render_contains_breakdown() {
        let mut state = AppState::default();
        state.years.push(Year::new(1));
        state.years[0].semesters[1]
            .subjects
            .push(Subject::new("Torts | Part I", "O", "Law"));
        let summary = summarize(&state);
        let ctx = ReportContext::new(&state, &summary);

        let md = MarkdownReporter::new().render(&ctx).expect("renders");
        assert!(md.contains("| Overall CGPA | **10.00** |"));
        assert!(md.contains("| Year 1 · Sem 1 | - |"));
        assert!(md.contains("| Year 1 · Sem 2 | 10.00 |"));
        assert!(md.contains("Torts \\| Part I"));
        assert!(md.contains("| Non-Law | 3 |"));
        assert!(!md.contains("{{"));
    }

    #[test]
    fn test_render_empty_record() {
        let state = AppState::default();
        let summary = summarize(&state);
        let ctx = ReportContext::new(&state, &summary);
        let md = MarkdownReporter::new().render(&ctx).expect("renders");
        assert!(md.contains("_No semesters recorded._"));
        assert!(md.contains("| Overall CGPA | **-** |"));
    }

    #[test]
    fn test_placeholder_like_names_are_written_literally() {
        let mut state = AppState::default();
        state.years.push(Year::new(1));
        state.years[0].semesters[1]
            .subjects
            .push(Subject::new("{{rubric_table}}", "A", "{{types_table}}"));
        let summary = summarize(&state);
        let ctx = ReportContext::new(&state, &summary);

        let md = MarkdownReporter::new().render(&ctx).expect("renders");
        assert_eq!(md.matches("| Grade | Points |\n").count(), 1);
        assert_eq!(md.matches("| Type | Credits |\n").count(), 1);
        assert!(md.contains("| {{rubric_table}} | {{types_table}} |"));
    }
}

//! HTML report generator
//!
//! Generates a self-contained HTML page with embedded CSS.

use crate::core::get_version;
use crate::core::report::{
    display_number, fill_template, ReportContext, ReportGenerator, SubjectStatus,
};
use std::error::Error;
use std::fmt::Write;

/// Embedded HTML report template
const HTML_TEMPLATE: &str = include_str!("../templates/report.html");

/// HTML report generator
#[derive(Debug, Default)]
pub struct HtmlReporter;

impl HtmlReporter {
    /// Create a new HTML reporter
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
        let semester_table = Self::generate_semester_items(ctx);
        let subjects_section = Self::generate_subjects(ctx);
        let rubric_table = Self::generate_rubric_table(ctx);
        let types_table = Self::generate_types_table(ctx);

        fill_template(
            HTML_TEMPLATE,
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

    fn generate_semester_items(ctx: &ReportContext) -> String {
        if ctx.summary.semesters.is_empty() {
            return "<p>No semesters recorded.</p>".to_string();
        }
        let mut html = String::new();
        for result in &ctx.summary.semesters {
            let _ = writeln!(
                html,
                "  <div class=\"semester-gpa-item\"><div class=\"semester-gpa-label\">{}</div><div class=\"semester-gpa-value\">{}</div></div>",
                escape_html(&result.label()),
                result.gpa
            );
        }
        html
    }

    fn generate_subjects(ctx: &ReportContext) -> String {
        let mut html = String::new();
        for result in &ctx.summary.semesters {
            let rows = ctx.subject_rows(result.year_index, result.semester_index);
            if rows.is_empty() {
                continue;
            }
            let _ = writeln!(
                html,
                "<h3>{} <small>(GPA {})</small></h3>",
                escape_html(&result.label()),
                result.gpa
            );
            html.push_str("<table>\n<tr><th>Subject</th><th>Type</th><th>Credits</th><th>Grade</th><th>Points</th><th></th></tr>\n");
            for row in rows {
                let note_class = if row.status == SubjectStatus::Counted {
                    ""
                } else {
                    " class=\"note\""
                };
                let _ = writeln!(
                    html,
                    "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td{note_class}>{}</td></tr>",
                    escape_html(&row.subject.name),
                    escape_html(&row.subject.subject_type),
                    display_number(row.credits),
                    escape_html(&row.subject.grade),
                    display_number(row.points),
                    row.status.note()
                );
            }
            html.push_str("</table>\n");
        }
        if html.is_empty() {
            "<p>No subjects recorded.</p>".to_string()
        } else {
            html
        }
    }

    fn generate_rubric_table(ctx: &ReportContext) -> String {
        let mut html = String::from("<table>\n<tr><th>Grade</th><th>Points</th></tr>\n");
        for entry in &ctx.state.rubric {
            let _ = writeln!(
                html,
                "<tr><td>{}</td><td>{}</td></tr>",
                escape_html(&entry.grade),
                display_number(entry.points)
            );
        }
        html.push_str("</table>");
        html
    }

    fn generate_types_table(ctx: &ReportContext) -> String {
        let mut html = String::from("<table>\n<tr><th>Type</th><th>Credits</th></tr>\n");
        for ty in &ctx.state.subject_types {
            let _ = writeln!(
                html,
                "<tr><td>{}</td><td>{}</td></tr>",
                escape_html(&ty.name),
                display_number(ty.credits)
            );
        }
        html.push_str("</table>");
        html
    }
}

/// Escape text for use inside HTML element content
fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

impl ReportGenerator for HtmlReporter {
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        Ok(Self::render_template(ctx))
    }
}

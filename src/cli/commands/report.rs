//! Summary and report command handlers

use super::open_calculator;
use gpa_calc::config::Config;
use gpa_calc::report::{
    display_number, HtmlReporter, MarkdownReporter, ReportContext, ReportFormat, ReportGenerator,
};
use gpa_calc::{error, info};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Base name of reports written to the reports directory
const DEFAULT_REPORT_NAME: &str = "grade-report";

/// Print every semester with its subjects and GPA, then the CGPA
pub fn show(config: &Config) {
    let calc = open_calculator(config);
    let state = calc.state();
    let summary = calc.summary();
    let ctx = ReportContext::new(state, &summary);

    if summary.semesters.is_empty() {
        println!("No years recorded yet. Add one with `gpacalc year add`.");
    }

    for result in &summary.semesters {
        println!("\n{}    GPA {}", result.label(), result.gpa);
        let rows = ctx.subject_rows(result.year_index, result.semester_index);
        if rows.is_empty() {
            println!("    (no subjects)");
        }
        for (i, row) in rows.iter().enumerate() {
            println!(
                "  {:>2}. {:<32} {:<10} {:>5} cr  {:<4} {}",
                i + 1,
                row.subject.name,
                row.subject.subject_type,
                display_number(row.credits),
                row.subject.grade,
                row.status.note()
            );
        }
    }

    println!(
        "\nCGPA: {}  ({} of {} semesters graded)",
        summary.cgpa,
        summary.graded_semesters(),
        summary.total_semesters()
    );
}

/// Run the report command.
///
/// # Arguments
/// * `output_file` - Optional output path
/// * `format_str` - Report format (markdown or html)
/// * `config` - Configuration containing the reports directory
pub fn run(output_file: Option<&Path>, format_str: &str, config: &Config) {
    match generate_report(output_file, format_str, config) {
        Ok(path) => println!("✓ Report generated: {}", path.display()),
        Err(err) => {
            error!("Report generation failed: {err}");
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}

fn generate_report(
    output_file: Option<&Path>,
    format_str: &str,
    config: &Config,
) -> Result<PathBuf, String> {
    let format = ReportFormat::from_str(format_str).map_err(|e| format!("✗ {e}"))?;
    let output_path = output_file.map_or_else(
        || {
            PathBuf::from(&config.paths.reports_dir)
                .join(format!("{DEFAULT_REPORT_NAME}.{}", format.extension()))
        },
        Path::to_path_buf,
    );

    let calc = open_calculator(config);
    let summary = calc.summary();
    let ctx = ReportContext::new(calc.state(), &summary);

    let result = match format {
        ReportFormat::Markdown => MarkdownReporter::new().generate(&ctx, &output_path),
        ReportFormat::Html => HtmlReporter::new().generate(&ctx, &output_path),
    };
    result.map_err(|e| format!("✗ Failed to write {}: {e}", output_path.display()))?;

    info!("{format} report written to {}", output_path.display());
    Ok(output_path)
}

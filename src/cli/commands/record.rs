//! Year and subject command handlers

use super::{confirm, open_calculator, or_exit};
use crate::args::{SubjectSubcommand, YearSubcommand};
use gpa_calc::calculator::Calculator;
use gpa_calc::config::Config;
use gpa_calc::store::KeyValueStore;
use gpa_calc::{info, warn};

/// Dispatch year subcommands
pub fn run_year(subcommand: YearSubcommand, config: &Config) {
    let mut calc = open_calculator(config);
    match subcommand {
        YearSubcommand::Add => {
            let number = or_exit(calc.add_year());
            println!("✓ Added Year {number}");
        }
        YearSubcommand::Remove { year, yes } => {
            let Some(existing) = calc.state().years.get(year) else {
                eprintln!("✗ Year {} does not exist", year + 1);
                std::process::exit(1);
            };
            let subjects: usize = existing.semesters.iter().map(|s| s.subjects.len()).sum();
            let question = format!(
                "Remove Year {} and its {subjects} subject(s)?",
                existing.number
            );
            if !yes && !confirm(&question) {
                println!("✗ Removal cancelled");
                return;
            }
            let removed = or_exit(calc.remove_year(year));
            info!("Removed year {} ({subjects} subjects)", removed.number);
            println!(
                "✓ Removed Year {}; {} year(s) remain",
                removed.number,
                calc.state().years.len()
            );
        }
    }
}

/// Dispatch subject subcommands
pub fn run_subject(subcommand: SubjectSubcommand, config: &Config) {
    let mut calc = open_calculator(config);
    match subcommand {
        SubjectSubcommand::Add {
            year,
            semester,
            name,
            grade,
            subject_type,
        } => {
            let mut subject = calc.blank_subject();
            subject.name = name;
            if let Some(grade) = grade {
                subject.grade = grade;
            }
            if let Some(subject_type) = subject_type {
                subject.subject_type = subject_type;
            }
            warn_unknown(&calc, &subject.grade, &subject.subject_type);
            let index = or_exit(calc.add_subject(year, semester, subject));
            println!(
                "✓ Added subject {} to Year {} · Sem {}",
                index + 1,
                year + 1,
                semester + 1
            );
            print_semester_gpa(&calc, year, semester);
        }
        SubjectSubcommand::Set {
            year,
            semester,
            index,
            name,
            grade,
            subject_type,
        } => {
            warn_unknown(
                &calc,
                grade.as_deref().unwrap_or(""),
                subject_type.as_deref().unwrap_or(""),
            );
            if let Some(name) = name {
                or_exit(calc.set_subject_name(year, semester, index, &name));
            }
            if let Some(grade) = grade {
                or_exit(calc.set_subject_grade(year, semester, index, &grade));
            }
            if let Some(subject_type) = subject_type {
                or_exit(calc.set_subject_type(year, semester, index, &subject_type));
            }
            print_semester_gpa(&calc, year, semester);
        }
        SubjectSubcommand::Remove {
            year,
            semester,
            index,
        } => {
            let removed = or_exit(calc.remove_subject(year, semester, index));
            println!("✓ Removed subject '{}'", removed.name);
            print_semester_gpa(&calc, year, semester);
        }
    }
}

/// Labels that do not resolve are stored anyway and count as zero
fn warn_unknown<S: KeyValueStore>(
    calc: &Calculator<S>,
    grade: &str,
    subject_type: &str,
) {
    let state = calc.state();
    let grade = grade.trim();
    if !grade.is_empty() && !state.rubric.iter().any(|r| r.grade == grade) {
        warn!("Grade '{grade}' is not in the rubric and counts as 0 points");
    }
    let subject_type = subject_type.trim();
    if !subject_type.is_empty() && !state.subject_types.iter().any(|t| t.name == subject_type) {
        warn!("Subject type '{subject_type}' is not defined and carries 0 credits");
    }
}

fn print_semester_gpa<S: KeyValueStore>(
    calc: &Calculator<S>,
    year: usize,
    semester: usize,
) {
    if let Ok(gpa) = calc.semester_gpa(year, semester) {
        println!("  Semester GPA: {gpa}    CGPA: {}", calc.cgpa());
    }
}

//! Rubric command handler

use super::{open_calculator, or_exit};
use crate::args::RubricSubcommand;
use gpa_calc::config::Config;
use gpa_calc::info;
use gpa_calc::models::{parse_numeric, RubricEntry};
use gpa_calc::report::display_number;

/// Dispatch rubric subcommands
pub fn run(subcommand: Option<RubricSubcommand>, config: &Config) {
    let mut calc = open_calculator(config);
    match subcommand {
        None | Some(RubricSubcommand::List) => print_rubric(calc.state().rubric.as_slice()),
        Some(RubricSubcommand::Add { grade, points, at }) => {
            let index = at.unwrap_or(calc.state().rubric.len());
            let entry = RubricEntry::new(grade, parse_numeric(&points));
            or_exit(calc.insert_rubric_entry(index, entry));
            info!("Rubric row added at position {}", index + 1);
            print_rubric(calc.state().rubric.as_slice());
        }
        Some(RubricSubcommand::Set {
            index,
            grade,
            points,
        }) => {
            if let Some(grade) = grade {
                or_exit(calc.set_rubric_grade(index, &grade));
            }
            if let Some(points) = points {
                or_exit(calc.set_rubric_points(index, &points));
            }
            print_rubric(calc.state().rubric.as_slice());
        }
        Some(RubricSubcommand::Remove { index }) => {
            let removed = or_exit(calc.remove_rubric_entry(index));
            println!("✓ Removed grade '{}'", removed.grade);
        }
        Some(RubricSubcommand::Reset) => {
            or_exit(calc.reset_rubric());
            println!("✓ Rubric restored to defaults");
        }
    }
}

fn print_rubric(rubric: &[RubricEntry]) {
    if rubric.is_empty() {
        println!("(rubric is empty)");
        return;
    }
    println!("{:>3}  {:<8} POINTS", "#", "GRADE");
    for (i, entry) in rubric.iter().enumerate() {
        println!(
            "{:>3}  {:<8} {}",
            i + 1,
            entry.grade,
            display_number(entry.points)
        );
    }
}

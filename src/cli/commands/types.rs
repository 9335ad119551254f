//! Subject type command handler

use super::{open_calculator, or_exit};
use crate::args::TypesSubcommand;
use gpa_calc::config::Config;
use gpa_calc::models::{parse_numeric, SubjectType};
use gpa_calc::report::display_number;

/// Dispatch subject type subcommands
pub fn run(subcommand: Option<TypesSubcommand>, config: &Config) {
    let mut calc = open_calculator(config);
    match subcommand {
        None | Some(TypesSubcommand::List) => print_types(calc.state().subject_types.as_slice()),
        Some(TypesSubcommand::Add { name, credits, at }) => {
            let index = at.unwrap_or(calc.state().subject_types.len());
            let subject_type = SubjectType::new(name, parse_numeric(&credits));
            or_exit(calc.insert_subject_type(index, subject_type));
            print_types(calc.state().subject_types.as_slice());
        }
        Some(TypesSubcommand::Set {
            index,
            name,
            credits,
        }) => {
            if let Some(name) = name {
                or_exit(calc.set_subject_type_name(index, &name));
            }
            if let Some(credits) = credits {
                or_exit(calc.set_subject_type_credits(index, &credits));
            }
            print_types(calc.state().subject_types.as_slice());
        }
        Some(TypesSubcommand::Remove { index }) => {
            let removed = or_exit(calc.remove_subject_type(index));
            println!("✓ Removed type '{}'", removed.name);
        }
        Some(TypesSubcommand::Reset) => {
            or_exit(calc.reset_subject_types());
            println!("✓ Subject types restored to defaults");
        }
    }
}

fn print_types(types: &[SubjectType]) {
    if types.is_empty() {
        println!("(no subject types)");
        return;
    }
    println!("{:>3}  {:<16} CREDITS", "#", "TYPE");
    for (i, ty) in types.iter().enumerate() {
        println!("{:>3}  {:<16} {}", i + 1, ty.name, display_number(ty.credits));
    }
}

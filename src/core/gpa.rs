//! GPA and CGPA calculation
//!
//! All functions here are pure: they read a slice of the state and return a
//! value. Rubric and type lookups join by string value and never fail; an
//! unresolved label simply counts as zero.

use crate::core::models::{
    global_semester_index, AppState, RubricEntry, Semester, SubjectType, Year,
};
use std::fmt;

/// Subjects whose name contains this (case-insensitive) are ignored in the
/// very first semester of the record.
pub const FIRST_SEMESTER_EXCLUDED_KEYWORD: &str = "english";

/// Result of a GPA calculation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GpaValue {
    /// A GPA rounded to two decimal places
    Value(f64),
    /// Nothing gradeable contributed any credits
    NoData,
}

impl GpaValue {
    /// The numeric value, if any
    #[must_use]
    pub const fn value(self) -> Option<f64> {
        match self {
            Self::Value(v) => Some(v),
            Self::NoData => None,
        }
    }

    /// Whether this is the "no data" sentinel
    #[must_use]
    pub const fn is_no_data(self) -> bool {
        matches!(self, Self::NoData)
    }
}

impl fmt::Display for GpaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => write!(f, "{v:.2}"),
            Self::NoData => write!(f, "-"),
        }
    }
}

/// Round half away from zero to two decimal places
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Non-finite numbers left behind by invalid edits count as zero
fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Look up the points for a grade label.
///
/// Exact match against the first rubric row carrying the label. Returns 0
/// for an empty label, an unknown label, or a row whose points are not a number.
#[must_use]
pub fn get_grade_points(rubric: &[RubricEntry], grade: &str) -> f64 {
    if grade.is_empty() {
        return 0.0;
    }
    rubric
        .iter()
        .find(|entry| entry.grade == grade)
        .map_or(0.0, |entry| finite_or_zero(entry.points))
}

/// Look up the credit weight for a subject type name.
///
/// Exact match against the first type with that name; 0 when unmatched or
/// when the stored credits are not a number.
#[must_use]
pub fn get_credits(subject_types: &[SubjectType], type_name: &str) -> f64 {
    subject_types
        .iter()
        .find(|ty| ty.name == type_name)
        .map_or(0.0, |ty| finite_or_zero(ty.credits))
}

/// Whether a subject is left out of its semester's GPA by name.
///
/// Only applies to the semester at global index 0.
#[must_use]
pub fn is_excluded(name: &str, global_index: usize) -> bool {
    global_index == 0
        && name
            .to_lowercase()
            .contains(FIRST_SEMESTER_EXCLUDED_KEYWORD)
}

/// Compute the credit-weighted GPA of one semester.
///
/// `global_index` is the semester's position across the whole record; at
/// index 0 any subject named like "English ..." is skipped. Ungraded subjects
/// contribute nothing. A graded subject with an unknown grade still adds its
/// credits, with zero points.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn calculate_semester_gpa(
    semester: &Semester,
    global_index: usize,
    rubric: &[RubricEntry],
    subject_types: &[SubjectType],
) -> GpaValue {
    let mut total_points = 0.0;
    let mut total_credits = 0.0;

    for subject in &semester.subjects {
        if is_excluded(&subject.name, global_index) || !subject.is_graded() {
            continue;
        }
        let credits = get_credits(subject_types, &subject.subject_type);
        total_points += get_grade_points(rubric, &subject.grade) * credits;
        total_credits += credits;
    }

    if total_credits == 0.0 {
        GpaValue::NoData
    } else {
        GpaValue::Value(round2(total_points / total_credits))
    }
}

/// One semester's entry in a record summary
#[derive(Debug, Clone, PartialEq)]
pub struct SemesterResult {
    /// 0-based position of the year in the record
    pub year_index: usize,
    /// 0-based position of the semester within its year
    pub semester_index: usize,
    /// Number of the year the semester belongs to
    pub year_number: u32,
    /// Semester number within its year
    pub semester_number: u32,
    /// Zero-based position across the whole record
    pub global_index: usize,
    /// Semester GPA
    pub gpa: GpaValue,
}

impl SemesterResult {
    /// Short display label (e.g., "Year 1 · Sem 2")
    #[must_use]
    pub fn label(&self) -> String {
        format!("Year {} · Sem {}", self.year_number, self.semester_number)
    }
}

/// Per-semester GPAs for every semester of the record, in order
#[must_use]
pub fn semester_results(
    years: &[Year],
    rubric: &[RubricEntry],
    subject_types: &[SubjectType],
) -> Vec<SemesterResult> {
    years
        .iter()
        .enumerate()
        .flat_map(|(year_index, year)| {
            year.semesters
                .iter()
                .enumerate()
                .map(move |(semester_index, semester)| {
                    let global_index = global_semester_index(year_index, semester_index);
                    SemesterResult {
                        year_index,
                        semester_index,
                        year_number: year.number,
                        semester_number: semester.number,
                        global_index,
                        gpa: calculate_semester_gpa(semester, global_index, rubric, subject_types),
                    }
                })
        })
        .collect()
}

fn mean_of_valid<I: IntoIterator<Item = GpaValue>>(gpas: I) -> GpaValue {
    let (sum, count) = gpas
        .into_iter()
        .filter_map(GpaValue::value)
        .fold((0.0, 0u32), |(sum, count), v| (sum + v, count + 1));

    if count == 0 {
        GpaValue::NoData
    } else {
        GpaValue::Value(round2(sum / f64::from(count)))
    }
}

/// Compute the cumulative GPA.
///
/// This is the plain mean of every semester GPA that is not "no data"; each
/// semester counts once regardless of how many credits it carries. The mean is
/// taken over the already-rounded semester values.
#[must_use]
pub fn calculate_cgpa(
    years: &[Year],
    rubric: &[RubricEntry],
    subject_types: &[SubjectType],
) -> GpaValue {
    mean_of_valid(
        semester_results(years, rubric, subject_types)
            .into_iter()
            .map(|r| r.gpa),
    )
}

/// Everything a summary view displays
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSummary {
    /// Per-semester results in record order
    pub semesters: Vec<SemesterResult>,
    /// Cumulative GPA
    pub cgpa: GpaValue,
}

impl RecordSummary {
    /// Total number of semesters, graded or not
    #[must_use]
    pub fn total_semesters(&self) -> usize {
        self.semesters.len()
    }

    /// Number of semesters that produced a GPA
    #[must_use]
    pub fn graded_semesters(&self) -> usize {
        self.semesters.iter().filter(|r| !r.gpa.is_no_data()).count()
    }
}

/// Compute the semester breakdown and CGPA for the whole state
#[must_use]
pub fn summarize(state: &AppState) -> RecordSummary {
    let semesters = semester_results(&state.years, &state.rubric, &state.subject_types);
    let cgpa = mean_of_valid(semesters.iter().map(|r| r.gpa));
    RecordSummary { semesters, cgpa }
}

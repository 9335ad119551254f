//! Semester and academic year models

use super::Subject;
use serde::{Deserialize, Serialize};

/// Number of semesters in every academic year
pub const SEMESTERS_PER_YEAR: usize = 2;

/// A semester and its subjects
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Semester {
    /// 1-based position within its year
    #[serde(default)]
    pub number: u32,

    /// Subjects in entry order
    #[serde(default)]
    pub subjects: Vec<Subject>,
}

impl Semester {
    /// Create an empty semester
    #[must_use]
    pub const fn new(number: u32) -> Self {
        Self {
            number,
            subjects: Vec::new(),
        }
    }

    /// Get total number of subjects in the semester
    #[must_use]
    pub const fn subject_count(&self) -> usize {
        self.subjects.len()
    }
}

/// An academic year holding exactly two semesters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Year {
    /// 1-based position within the record
    pub number: u32,

    /// Semester 1 and semester 2
    pub semesters: Vec<Semester>,
}

impl Year {
    /// Create a year with two empty semesters
    #[must_use]
    pub fn new(number: u32) -> Self {
        Self::with_semesters(number, Semester::new(1), Semester::new(2))
    }

    /// Create a year from two existing semesters, renumbering them 1 and 2
    #[must_use]
    pub fn with_semesters(number: u32, mut first: Semester, mut second: Semester) -> Self {
        first.number = 1;
        second.number = 2;
        Self {
            number,
            semesters: vec![first, second],
        }
    }
}

/// Global position of a semester across the whole record.
///
/// Index 0 is the first semester of the first year.
#[must_use]
pub const fn global_semester_index(year_index: usize, semester_index: usize) -> usize {
    year_index * SEMESTERS_PER_YEAR + semester_index
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_year_has_two_empty_semesters() {
        let year = Year::new(3);
        assert_eq!(year.number, 3);
        assert_eq!(year.semesters.len(), SEMESTERS_PER_YEAR);
        assert_eq!(year.semesters[0], Semester::new(1));
        assert_eq!(year.semesters[1], Semester::new(2));
    }

    #[test]
    fn test_with_semesters_renumbers() {
        let mut a = Semester::new(5);
        a.subjects.push(Subject::new("Contracts", "A", "Law"));
        let b = Semester::new(6);

        let year = Year::with_semesters(1, a, b);
        assert_eq!(year.semesters[0].number, 1);
        assert_eq!(year.semesters[1].number, 2);
        assert_eq!(year.semesters[0].subject_count(), 1);
    }

    #[test]
    fn test_global_semester_index() {
        assert_eq!(global_semester_index(0, 0), 0);
        assert_eq!(global_semester_index(0, 1), 1);
        assert_eq!(global_semester_index(1, 0), 2);
        assert_eq!(global_semester_index(2, 1), 5);
    }
}

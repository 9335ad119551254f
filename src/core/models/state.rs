//! Application state model

use super::{default_rubric, default_subject_types, RubricEntry, SubjectType, Year};
use serde::{Deserialize, Serialize};

/// Everything the calculator persists: rubric, subject types and the record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    /// Grade label to points table, in display order
    pub rubric: Vec<RubricEntry>,

    /// Subject type to credits table, in display order
    pub subject_types: Vec<SubjectType>,

    /// Academic years in order
    pub years: Vec<Year>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            rubric: default_rubric(),
            subject_types: default_subject_types(),
            years: Vec::new(),
        }
    }
}

impl AppState {
    /// Total number of semesters across all years
    #[must_use]
    pub fn semester_count(&self) -> usize {
        self.years.iter().map(|y| y.semesters.len()).sum()
    }

    /// Re-derive year numbers as `1..=N` in list order
    pub fn renumber_years(&mut self) {
        for (number, year) in (1u32..).zip(self.years.iter_mut()) {
            year.number = number;
        }
    }

    /// Serialize to the persisted JSON form
    ///
    /// # Errors
    /// Returns an error if serialization fails
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state() {
        let state = AppState::default();
        assert_eq!(state.rubric, default_rubric());
        assert_eq!(state.subject_types, default_subject_types());
        assert!(state.years.is_empty());
        assert_eq!(state.semester_count(), 0);
    }

    #[test]
    fn test_field_names_in_json() {
        let json = AppState::default().to_json().expect("serializes");
        assert!(json.contains("\"rubric\""));
        assert!(json.contains("\"subjectTypes\""));
        assert!(json.contains("\"years\""));
    }

    #[test]
    fn test_renumber_years() {
        let mut state = AppState {
            years: vec![Year::new(4), Year::new(9), Year::new(2)],
            ..AppState::default()
        };
        state.renumber_years();
        let numbers: Vec<u32> = state.years.iter().map(|y| y.number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(state.semester_count(), 6);
    }
}

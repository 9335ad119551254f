//! Grading rubric model

use serde::{Deserialize, Serialize};

/// One row of the grading rubric: a grade label and the points it is worth
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RubricEntry {
    /// Grade label (e.g., "O", "A+")
    pub grade: String,

    /// Grade points, normally in `0..=10`. `NaN` after an invalid edit.
    #[serde(deserialize_with = "super::number_or_nan")]
    pub points: f64,
}

impl RubricEntry {
    /// Create a new rubric entry
    #[must_use]
    pub fn new(grade: impl Into<String>, points: f64) -> Self {
        Self {
            grade: grade.into(),
            points,
        }
    }

    /// A blank entry as appended by "add grade"
    #[must_use]
    pub const fn blank() -> Self {
        Self {
            grade: String::new(),
            points: 0.0,
        }
    }
}

/// The built-in grading rubric
#[must_use]
pub fn default_rubric() -> Vec<RubricEntry> {
    vec![
        RubricEntry::new("O", 10.0),
        RubricEntry::new("A+", 9.5),
        RubricEntry::new("A", 9.0),
        RubricEntry::new("B+", 8.5),
        RubricEntry::new("B", 8.0),
        RubricEntry::new("C", 7.5),
        RubricEntry::new("P", 7.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rubric_order() {
        let rubric = default_rubric();
        let labels: Vec<&str> = rubric.iter().map(|r| r.grade.as_str()).collect();
        assert_eq!(labels, vec!["O", "A+", "A", "B+", "B", "C", "P"]);
    }

    #[test]
    fn test_default_rubric_points_in_range() {
        for entry in default_rubric() {
            assert!((0.0..=10.0).contains(&entry.points), "{entry:?}");
        }
    }

    #[test]
    fn test_null_points_read_as_nan() {
        let entry: RubricEntry =
            serde_json::from_str(r#"{"grade":"X","points":null}"#).expect("valid json");
        assert_eq!(entry.grade, "X");
        assert!(entry.points.is_nan());
    }

    #[test]
    fn test_blank_entry() {
        let entry = RubricEntry::blank();
        assert!(entry.grade.is_empty());
        assert!(entry.points.abs() < f64::EPSILON);
    }
}

//! Subject type model

use serde::{Deserialize, Serialize};

/// A kind of subject and the credit weight it carries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectType {
    /// Type name (e.g., "Law")
    pub name: String,

    /// Credit weight. `NaN` after an invalid edit.
    #[serde(deserialize_with = "super::number_or_nan")]
    pub credits: f64,
}

impl SubjectType {
    /// Create a new subject type
    #[must_use]
    pub fn new(name: impl Into<String>, credits: f64) -> Self {
        Self {
            name: name.into(),
            credits,
        }
    }

    /// A blank type as appended by "add type"
    #[must_use]
    pub const fn blank() -> Self {
        Self {
            name: String::new(),
            credits: 0.0,
        }
    }
}

/// The built-in subject type table
#[must_use]
pub fn default_subject_types() -> Vec<SubjectType> {
    vec![SubjectType::new("Law", 4.0), SubjectType::new("Non-Law", 3.0)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_types() {
        let types = default_subject_types();
        assert_eq!(types.len(), 2);
        assert_eq!(types[0], SubjectType::new("Law", 4.0));
        assert_eq!(types[1], SubjectType::new("Non-Law", 3.0));
    }

    #[test]
    fn test_nan_credits_round_trip_through_null() {
        let ty = SubjectType::new("Lab", f64::NAN);
        let json = serde_json::to_string(&ty).expect("serializes");
        assert_eq!(json, r#"{"name":"Lab","credits":null}"#);
        let back: SubjectType = serde_json::from_str(&json).expect("deserializes");
        assert!(back.credits.is_nan());
    }
}

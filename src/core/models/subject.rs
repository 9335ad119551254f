//! Subject model

use serde::{Deserialize, Serialize};

/// A subject taken in a semester.
///
/// `grade` and `subject_type` are copies of a rubric label and a type name,
/// not references: renaming or removing the rubric row or type leaves the
/// subject holding a string that simply no longer resolves.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Subject {
    /// Free-text subject name
    #[serde(default)]
    pub name: String,

    /// Grade label; empty means not graded yet
    #[serde(default)]
    pub grade: String,

    /// Subject type name
    #[serde(rename = "type", default)]
    pub subject_type: String,
}

impl Subject {
    /// Create a new subject
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        grade: impl Into<String>,
        subject_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            grade: grade.into(),
            subject_type: subject_type.into(),
        }
    }

    /// Whether a grade has been set
    #[must_use]
    pub fn is_graded(&self) -> bool {
        !self.grade.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_type_field_is_named_type() {
        let subject = Subject::new("Torts", "A", "Law");
        let json = serde_json::to_string(&subject).expect("serializes");
        assert_eq!(json, r#"{"name":"Torts","grade":"A","type":"Law"}"#);
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let subject: Subject = serde_json::from_str(r#"{"name":"Ethics"}"#).expect("parses");
        assert_eq!(subject.name, "Ethics");
        assert!(!subject.is_graded());
        assert!(subject.subject_type.is_empty());
    }
}

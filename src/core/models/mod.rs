//! Data models for `gpa-calc`

pub mod rubric;
pub mod semester;
pub mod state;
pub mod subject;
pub mod subject_type;

pub use rubric::{default_rubric, RubricEntry};
pub use semester::{global_semester_index, Semester, Year, SEMESTERS_PER_YEAR};
pub use state::AppState;
pub use subject::Subject;
pub use subject_type::{default_subject_types, SubjectType};

use serde::{Deserialize, Deserializer};

/// Parse an edited numeric field.
///
/// Surrounding whitespace is ignored. Empty or unparsable input yields `NaN`,
/// which the GPA engine resolves to zero.
#[must_use]
pub fn parse_numeric(value: &str) -> f64 {
    value.trim().parse::<f64>().unwrap_or(f64::NAN)
}

/// Deserialize a number that may have been stored as `null`.
///
/// `serde_json` writes non-finite floats as `null`; reading them back as `NaN`
/// keeps such a record loadable instead of malformed.
pub(crate) fn number_or_nan<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

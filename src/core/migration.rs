//! Decoding and migration of the persisted state blob
//!
//! A stored blob comes in one of two shapes:
//! - legacy: `{ rubric, semesters: [...] }` with a flat semester list
//! - current: `{ rubric, subjectTypes, years: [...] }`
//!
//! Anything that is not valid JSON, not an object, or whose fields do not
//! have the expected structure is treated as malformed and replaced by the
//! defaults as a whole.

use crate::core::models::{
    default_rubric, default_subject_types, AppState, RubricEntry, Semester, SubjectType, Year,
    SEMESTERS_PER_YEAR,
};
use serde::Deserialize;
use serde_json::{Map, Value};

/// Legacy persisted shape: one flat list of semesters
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyRecord {
    /// Stored rubric, if any
    #[serde(default)]
    pub rubric: Option<Vec<RubricEntry>>,
    /// Stored subject types, if any
    #[serde(default)]
    pub subject_types: Option<Vec<SubjectType>>,
    /// Flat semester list; stored semester numbers are ignored
    pub semesters: Vec<Semester>,
}

/// Current persisted shape, with every field optional so gaps can be backfilled
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CurrentRecord {
    /// Stored rubric, if any
    pub rubric: Option<Vec<RubricEntry>>,
    /// Stored subject types, if any
    pub subject_types: Option<Vec<SubjectType>>,
    /// Stored years; `None` when absent or not a list
    pub years: Option<Vec<Year>>,
}

/// A persisted blob classified by its structure
#[derive(Debug, Clone, PartialEq)]
pub enum PersistedBlob {
    /// Flat-semester record that needs migrating
    Legacy(LegacyRecord),
    /// Year/semester record, possibly with missing fields
    Current(CurrentRecord),
    /// Unusable data; carries the reason
    Malformed(String),
}

impl PersistedBlob {
    /// Classify and decode a raw persisted string
    #[must_use]
    pub fn decode(raw: &str) -> Self {
        match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(map)) => Self::from_object(map),
            Ok(other) => Self::Malformed(format!("expected an object, found {}", kind_of(&other))),
            Err(e) => Self::Malformed(e.to_string()),
        }
    }

    fn from_object(map: Map<String, Value>) -> Self {
        if map.contains_key("semesters") && !map.contains_key("years") {
            return serde_json::from_value::<LegacyRecord>(Value::Object(map))
                .map_or_else(|e| Self::Malformed(e.to_string()), Self::Legacy);
        }
        decode_current(map).unwrap_or_else(Self::Malformed)
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn optional_field<T>(map: &mut Map<String, Value>, key: &str) -> Result<Option<T>, String>
where
    T: for<'de> Deserialize<'de>,
{
    match map.remove(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => serde_json::from_value(value)
            .map(Some)
            .map_err(|e| format!("invalid `{key}`: {e}")),
    }
}

fn decode_current(mut map: Map<String, Value>) -> Result<PersistedBlob, String> {
    let rubric = optional_field(&mut map, "rubric")?;
    let subject_types = optional_field(&mut map, "subjectTypes")?;
    let years = match map.remove("years") {
        Some(value @ Value::Array(_)) => Some(
            serde_json::from_value::<Vec<Year>>(value)
                .map_err(|e| format!("invalid `years`: {e}"))?,
        ),
        _ => None,
    };
    if let Some(year) = years
        .iter()
        .flatten()
        .find(|y| y.semesters.len() > SEMESTERS_PER_YEAR)
    {
        return Err(format!(
            "year {} has {} semesters",
            year.number,
            year.semesters.len()
        ));
    }
    Ok(PersistedBlob::Current(CurrentRecord {
        rubric,
        subject_types,
        years,
    }))
}

/// Group a flat semester list into years of two, in order.
///
/// Pair `i` becomes year `i + 1`; a missing second semester is filled with an
/// empty placeholder. Semesters are renumbered 1 and 2 by position.
#[must_use]
pub fn group_into_years(semesters: Vec<Semester>) -> Vec<Year> {
    let mut flat = semesters.into_iter();
    let mut years = Vec::new();
    let mut number = 1;
    while let Some(first) = flat.next() {
        let second = flat.next().unwrap_or_else(|| Semester::new(2));
        years.push(Year::with_semesters(number, first, second));
        number += 1;
    }
    years
}

/// How a state was obtained at load time
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Nothing was stored; defaults are used
    Fresh,
    /// A complete current-shape record was read as is
    Loaded,
    /// A current-shape record had the named fields filled with defaults
    Backfilled(Vec<&'static str>),
    /// A legacy record was regrouped into this many years
    Migrated {
        /// Number of years synthesized
        years: usize,
    },
    /// Stored data was unusable and defaults are used
    Reset(String),
}

/// A state together with how it was obtained
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedState {
    /// The state to work with
    pub state: AppState,
    /// What happened while loading
    pub outcome: LoadOutcome,
}

impl LoadedState {
    /// Whether the state differs from what is stored and must be written back
    #[must_use]
    pub const fn needs_write_back(&self) -> bool {
        matches!(
            self.outcome,
            LoadOutcome::Backfilled(_) | LoadOutcome::Migrated { .. }
        )
    }
}

/// Turn a legacy record into the current state shape
#[must_use]
pub fn migrate_legacy(record: LegacyRecord) -> AppState {
    AppState {
        rubric: record.rubric.unwrap_or_else(default_rubric),
        subject_types: record.subject_types.unwrap_or_else(default_subject_types),
        years: group_into_years(record.semesters),
    }
}

/// Give every year its full set of semesters, appending empty ones where
/// missing. Returns `true` if anything was added.
fn pad_semesters(years: &mut [Year]) -> bool {
    let mut padded = false;
    for year in years {
        while year.semesters.len() < SEMESTERS_PER_YEAR {
            let number = u32::try_from(year.semesters.len() + 1).unwrap_or(u32::MAX);
            year.semesters.push(Semester::new(number));
            padded = true;
        }
    }
    padded
}

/// Fill the missing fields of a current-shape record, reporting which were filled
#[must_use]
pub fn backfill_current(record: CurrentRecord) -> (AppState, Vec<&'static str>) {
    let mut filled = Vec::new();
    let rubric = record.rubric.unwrap_or_else(|| {
        filled.push("rubric");
        default_rubric()
    });
    let subject_types = record.subject_types.unwrap_or_else(|| {
        filled.push("subjectTypes");
        default_subject_types()
    });
    let mut years = record.years.unwrap_or_else(|| {
        filled.push("years");
        Vec::new()
    });
    if pad_semesters(&mut years) {
        filled.push("semesters");
    }
    (
        AppState {
            rubric,
            subject_types,
            years,
        },
        filled,
    )
}

/// Resolve a decoded blob into a usable state
#[must_use]
pub fn resolve(blob: PersistedBlob) -> LoadedState {
    match blob {
        PersistedBlob::Legacy(record) => {
            let state = migrate_legacy(record);
            let years = state.years.len();
            LoadedState {
                state,
                outcome: LoadOutcome::Migrated { years },
            }
        }
        PersistedBlob::Current(record) => {
            let (state, filled) = backfill_current(record);
            let outcome = if filled.is_empty() {
                LoadOutcome::Loaded
            } else {
                LoadOutcome::Backfilled(filled)
            };
            LoadedState { state, outcome }
        }
        PersistedBlob::Malformed(reason) => LoadedState {
            state: AppState::default(),
            outcome: LoadOutcome::Reset(reason),
        },
    }
}

/// Produce the working state from whatever the store returned
#[must_use]
pub fn load_state(raw: Option<&str>) -> LoadedState {
    raw.map_or_else(
        || LoadedState {
            state: AppState::default(),
            outcome: LoadOutcome::Fresh,
        },
        |raw| resolve(PersistedBlob::decode(raw)),
    )
}

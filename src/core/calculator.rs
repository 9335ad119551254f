//! Stateful calculator: owns the current state and persists every edit
//!
//! All calculation lives in [`crate::core::gpa`] and all load-time decoding in
//! [`crate::core::migration`]; this type only holds the state, applies edits
//! and writes the result back to its [`KeyValueStore`] after each one.
//!
//! Positions taken by the editing methods are 0-based list indices. Removing a
//! year renumbers the remaining years; nothing else is renumbered. Destructive
//! operations are unconditional; confirming them is up to the caller.

use crate::core::gpa::{self, GpaValue, RecordSummary};
use crate::core::migration::{self, LoadOutcome};
use crate::core::models::{
    default_rubric, default_subject_types, parse_numeric, AppState, RubricEntry, Semester,
    Subject, SubjectType, Year,
};
use crate::core::store::{KeyValueStore, StoreError};
use thiserror::Error;

/// Errors returned by calculator edits
#[derive(Error, Debug)]
pub enum CalcError {
    /// The edited state could not be persisted
    #[error("Failed to persist state: {0}")]
    Store(#[from] StoreError),

    /// A position does not exist
    #[error("{what} {index} is out of range ({len} available)")]
    IndexOutOfRange {
        /// Kind of item addressed
        what: &'static str,
        /// Requested 0-based position
        index: usize,
        /// Number of items present
        len: usize,
    },
}

/// Result alias for calculator edits
pub type Result<T> = std::result::Result<T, CalcError>;

fn check(what: &'static str, index: usize, len: usize) -> Result<()> {
    if index < len {
        Ok(())
    } else {
        Err(CalcError::IndexOutOfRange { what, index, len })
    }
}

fn item_mut<'a, T>(items: &'a mut [T], what: &'static str, index: usize) -> Result<&'a mut T> {
    let len = items.len();
    items
        .get_mut(index)
        .ok_or(CalcError::IndexOutOfRange { what, index, len })
}

fn semester_mut(state: &mut AppState, year: usize, semester: usize) -> Result<&mut Semester> {
    let year = item_mut(&mut state.years, "year", year)?;
    item_mut(&mut year.semesters, "semester", semester)
}

fn subject_mut(
    state: &mut AppState,
    year: usize,
    semester: usize,
    subject: usize,
) -> Result<&mut Subject> {
    item_mut(
        &mut semester_mut(state, year, semester)?.subjects,
        "subject",
        subject,
    )
}

/// Owns the application state and keeps the store in sync with it
#[derive(Debug)]
pub struct Calculator<S: KeyValueStore> {
    store: S,
    key: String,
    state: AppState,
    load_outcome: LoadOutcome,
}

impl<S: KeyValueStore> Calculator<S> {
    /// Load the state stored under `key`, migrating or resetting it as needed.
    ///
    /// Never fails: an unreadable store or malformed blob yields the defaults.
    /// Migrated or backfilled state is written back immediately; a failure to
    /// do so is logged and retried on the next edit.
    pub fn open(store: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let raw = match store.get(&key) {
            Ok(raw) => raw,
            Err(e) => {
                crate::warn!("Could not read stored state '{key}': {e}. Using defaults.");
                None
            }
        };

        let loaded = migration::load_state(raw.as_deref());
        match &loaded.outcome {
            LoadOutcome::Fresh => crate::info!("No stored state under '{key}', starting fresh"),
            LoadOutcome::Loaded => crate::debug!("Loaded stored state '{key}'"),
            LoadOutcome::Backfilled(fields) => {
                crate::debug!("Backfilled missing fields: {}", fields.join(", "));
            }
            LoadOutcome::Migrated { years } => {
                crate::info!("Migrated flat semester list into {years} year(s)");
            }
            LoadOutcome::Reset(reason) => {
                crate::warn!("Stored state '{key}' is malformed ({reason}). Using defaults.");
            }
        }

        let needs_write_back = loaded.needs_write_back();
        let mut calculator = Self {
            store,
            key,
            state: loaded.state,
            load_outcome: loaded.outcome,
        };
        if needs_write_back {
            if let Err(e) = calculator.persist() {
                crate::warn!("Could not write back loaded state: {e}");
            }
        }
        calculator
    }

    /// Current state
    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    /// What happened when the state was loaded
    #[must_use]
    pub const fn load_outcome(&self) -> &LoadOutcome {
        &self.load_outcome
    }

    /// Underlying store
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Storage key the state is kept under
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Write the current state to the store
    ///
    /// # Errors
    /// Returns an error if serialization or the store write fails
    pub fn persist(&mut self) -> Result<()> {
        let json = self.state.to_json().map_err(StoreError::from)?;
        self.store.set(&self.key, &json)?;
        crate::debug!("Persisted state under '{}' ({} bytes)", self.key, json.len());
        Ok(())
    }

    fn commit<T>(&mut self, edit: impl FnOnce(&mut AppState) -> Result<T>) -> Result<T> {
        let out = edit(&mut self.state)?;
        self.persist()?;
        Ok(out)
    }

    // --- Calculations ---

    /// GPA of one semester, addressed by year and semester position
    ///
    /// # Errors
    /// Returns an error if either position does not exist
    pub fn semester_gpa(&self, year: usize, semester: usize) -> Result<GpaValue> {
        check("year", year, self.state.years.len())?;
        let sem_count = self.state.years[year].semesters.len();
        check("semester", semester, sem_count)?;
        Ok(gpa::calculate_semester_gpa(
            &self.state.years[year].semesters[semester],
            crate::core::models::global_semester_index(year, semester),
            &self.state.rubric,
            &self.state.subject_types,
        ))
    }

    /// Cumulative GPA of the whole record
    #[must_use]
    pub fn cgpa(&self) -> GpaValue {
        gpa::calculate_cgpa(
            &self.state.years,
            &self.state.rubric,
            &self.state.subject_types,
        )
    }

    /// Per-semester breakdown plus CGPA
    #[must_use]
    pub fn summary(&self) -> RecordSummary {
        gpa::summarize(&self.state)
    }

    // --- Rubric ---

    /// Append a blank rubric row
    ///
    /// # Errors
    /// Returns an error if the state cannot be persisted
    pub fn add_rubric_entry(&mut self) -> Result<usize> {
        self.commit(|state| {
            state.rubric.push(RubricEntry::blank());
            Ok(state.rubric.len() - 1)
        })
    }

    /// Insert a rubric row at `index` (`index == len` appends). Labels need not be unique.
    ///
    /// # Errors
    /// Returns an error if `index` is past the end or the state cannot be persisted
    pub fn insert_rubric_entry(&mut self, index: usize, mut entry: RubricEntry) -> Result<()> {
        entry.grade = entry.grade.trim().to_string();
        self.commit(|state| {
            check("rubric entry", index, state.rubric.len() + 1)?;
            state.rubric.insert(index, entry);
            Ok(())
        })
    }

    /// Remove the rubric row at `index`. Subjects graded with it keep their label.
    ///
    /// # Errors
    /// Returns an error if `index` does not exist or the state cannot be persisted
    pub fn remove_rubric_entry(&mut self, index: usize) -> Result<RubricEntry> {
        self.commit(|state| {
            check("rubric entry", index, state.rubric.len())?;
            Ok(state.rubric.remove(index))
        })
    }

    /// Rename a rubric grade (trimmed). Subjects are not updated.
    ///
    /// # Errors
    /// Returns an error if `index` does not exist or the state cannot be persisted
    pub fn set_rubric_grade(&mut self, index: usize, grade: &str) -> Result<()> {
        self.commit(|state| {
            item_mut(&mut state.rubric, "rubric entry", index)?.grade = grade.trim().to_string();
            Ok(())
        })
    }

    /// Set a rubric row's points from user input; invalid input stores `NaN`
    ///
    /// # Errors
    /// Returns an error if `index` does not exist or the state cannot be persisted
    pub fn set_rubric_points(&mut self, index: usize, points: &str) -> Result<()> {
        self.commit(|state| {
            item_mut(&mut state.rubric, "rubric entry", index)?.points = parse_numeric(points);
            Ok(())
        })
    }

    /// Restore the built-in rubric
    ///
    /// # Errors
    /// Returns an error if the state cannot be persisted
    pub fn reset_rubric(&mut self) -> Result<()> {
        self.commit(|state| {
            state.rubric = default_rubric();
            Ok(())
        })
    }

    // --- Subject types ---

    /// Append a blank subject type
    ///
    /// # Errors
    /// Returns an error if the state cannot be persisted
    pub fn add_subject_type(&mut self) -> Result<usize> {
        self.commit(|state| {
            state.subject_types.push(SubjectType::blank());
            Ok(state.subject_types.len() - 1)
        })
    }

    /// Insert a subject type at `index` (`index == len` appends). Names need not be unique.
    ///
    /// # Errors
    /// Returns an error if `index` is past the end or the state cannot be persisted
    pub fn insert_subject_type(&mut self, index: usize, mut subject_type: SubjectType) -> Result<()> {
        subject_type.name = subject_type.name.trim().to_string();
        self.commit(|state| {
            check("subject type", index, state.subject_types.len() + 1)?;
            state.subject_types.insert(index, subject_type);
            Ok(())
        })
    }

    /// Remove the subject type at `index`. Subjects of that type keep the name.
    ///
    /// # Errors
    /// Returns an error if `index` does not exist or the state cannot be persisted
    pub fn remove_subject_type(&mut self, index: usize) -> Result<SubjectType> {
        self.commit(|state| {
            check("subject type", index, state.subject_types.len())?;
            Ok(state.subject_types.remove(index))
        })
    }

    /// Rename a subject type (trimmed). Subjects are not updated.
    ///
    /// # Errors
    /// Returns an error if `index` does not exist or the state cannot be persisted
    pub fn set_subject_type_name(&mut self, index: usize, name: &str) -> Result<()> {
        self.commit(|state| {
            item_mut(&mut state.subject_types, "subject type", index)?.name =
                name.trim().to_string();
            Ok(())
        })
    }

    /// Set a subject type's credits from user input; invalid input stores `NaN`
    ///
    /// # Errors
    /// Returns an error if `index` does not exist or the state cannot be persisted
    pub fn set_subject_type_credits(&mut self, index: usize, credits: &str) -> Result<()> {
        self.commit(|state| {
            item_mut(&mut state.subject_types, "subject type", index)?.credits =
                parse_numeric(credits);
            Ok(())
        })
    }

    /// Restore the built-in subject types
    ///
    /// # Errors
    /// Returns an error if the state cannot be persisted
    pub fn reset_subject_types(&mut self) -> Result<()> {
        self.commit(|state| {
            state.subject_types = default_subject_types();
            Ok(())
        })
    }

    // --- Years ---

    /// Append a year with two empty semesters; returns its number
    ///
    /// # Errors
    /// Returns an error if the state cannot be persisted
    pub fn add_year(&mut self) -> Result<u32> {
        self.commit(|state| {
            let number = u32::try_from(state.years.len() + 1).unwrap_or(u32::MAX);
            state.years.push(Year::new(number));
            Ok(number)
        })
    }

    /// Remove the year at `index` and renumber the rest `1..=N`
    ///
    /// # Errors
    /// Returns an error if `index` does not exist or the state cannot be persisted
    pub fn remove_year(&mut self, index: usize) -> Result<Year> {
        self.commit(|state| {
            check("year", index, state.years.len())?;
            let removed = state.years.remove(index);
            state.renumber_years();
            Ok(removed)
        })
    }

    // --- Subjects ---

    /// A new, ungraded subject of the first subject type
    #[must_use]
    pub fn blank_subject(&self) -> Subject {
        Subject::new(
            "",
            "",
            self.state
                .subject_types
                .first()
                .map_or_else(String::new, |t| t.name.clone()),
        )
    }

    /// Append a subject to a semester; returns its position. Text fields are trimmed.
    ///
    /// # Errors
    /// Returns an error if the year or semester does not exist or the state cannot be persisted
    pub fn add_subject(&mut self, year: usize, semester: usize, subject: Subject) -> Result<usize> {
        let subject = Subject::new(
            subject.name.trim(),
            subject.grade.trim(),
            subject.subject_type.trim(),
        );
        self.commit(|state| {
            let subjects = &mut semester_mut(state, year, semester)?.subjects;
            subjects.push(subject);
            Ok(subjects.len() - 1)
        })
    }

    /// Remove a subject from a semester
    ///
    /// # Errors
    /// Returns an error if any position does not exist or the state cannot be persisted
    pub fn remove_subject(&mut self, year: usize, semester: usize, index: usize) -> Result<Subject> {
        self.commit(|state| {
            let subjects = &mut semester_mut(state, year, semester)?.subjects;
            check("subject", index, subjects.len())?;
            Ok(subjects.remove(index))
        })
    }

    /// Rename a subject (trimmed)
    ///
    /// # Errors
    /// Returns an error if any position does not exist or the state cannot be persisted
    pub fn set_subject_name(
        &mut self,
        year: usize,
        semester: usize,
        index: usize,
        name: &str,
    ) -> Result<()> {
        self.commit(|state| {
            subject_mut(state, year, semester, index)?.name = name.trim().to_string();
            Ok(())
        })
    }

    /// Set a subject's grade label (trimmed); empty clears the grade
    ///
    /// # Errors
    /// Returns an error if any position does not exist or the state cannot be persisted
    pub fn set_subject_grade(
        &mut self,
        year: usize,
        semester: usize,
        index: usize,
        grade: &str,
    ) -> Result<()> {
        self.commit(|state| {
            subject_mut(state, year, semester, index)?.grade = grade.trim().to_string();
            Ok(())
        })
    }

    /// Set a subject's type name (trimmed)
    ///
    /// # Errors
    /// Returns an error if any position does not exist or the state cannot be persisted
    pub fn set_subject_type(
        &mut self,
        year: usize,
        semester: usize,
        index: usize,
        type_name: &str,
    ) -> Result<()> {
        self.commit(|state| {
            subject_mut(state, year, semester, index)?.subject_type = type_name.trim().to_string();
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::MemoryStore;

    const KEY: &str = "gpaCalculatorState";

    fn fresh() -> Calculator<MemoryStore> {
        Calculator::open(MemoryStore::new(), KEY)
    }

    #[test]
    fn test_open_empty_store_uses_defaults_without_writing() {
        let calc = fresh();
        assert_eq!(calc.state(), &AppState::default());
        assert_eq!(calc.load_outcome(), &LoadOutcome::Fresh);
        assert!(calc.store().raw(KEY).is_none());
    }

    #[test]
    fn test_every_edit_persists() {
        let mut calc = fresh();
        calc.add_year().expect("add year");
        let stored = calc.store().raw(KEY).expect("persisted");
        assert!(stored.contains("\"years\":[{\"number\":1"));
    }

    #[test]
    fn test_add_year_numbers_sequentially() {
        let mut calc = fresh();
        assert_eq!(calc.add_year().expect("ok"), 1);
        assert_eq!(calc.add_year().expect("ok"), 2);
        assert_eq!(calc.state().semester_count(), 4);
    }

    #[test]
    fn test_remove_year_renumbers() {
        let mut calc = fresh();
        for _ in 0..3 {
            calc.add_year().expect("ok");
        }
        calc.add_subject(2, 0, Subject::new("Evidence", "A", "Law"))
            .expect("ok");

        let removed = calc.remove_year(1).expect("ok");
        assert_eq!(removed.number, 2);
        let numbers: Vec<u32> = calc.state().years.iter().map(|y| y.number).collect();
        assert_eq!(numbers, vec![1, 2]);
        assert_eq!(calc.state().years[1].semesters[0].subjects[0].name, "Evidence");
    }

    #[test]
    fn test_out_of_range_leaves_state_untouched() {
        let mut calc = fresh();
        let err = calc.remove_year(0).expect_err("no years yet");
        assert!(matches!(
            err,
            CalcError::IndexOutOfRange {
                what: "year",
                index: 0,
                len: 0
            }
        ));
        assert!(calc.store().raw(KEY).is_none());

        calc.add_year().expect("ok");
        assert!(calc.add_subject(0, 2, Subject::default()).is_err());
        assert!(calc.set_subject_name(0, 0, 0, "x").is_err());
    }

    #[test]
    fn test_subject_text_fields_are_trimmed() {
        let mut calc = fresh();
        calc.add_year().expect("ok");
        let idx = calc
            .add_subject(0, 1, Subject::new("  Torts ", " A ", " Law"))
            .expect("ok");
        calc.set_subject_name(0, 1, idx, "  Law of Torts  ").expect("ok");

        let subject = &calc.state().years[0].semesters[1].subjects[idx];
        assert_eq!(subject, &Subject::new("Law of Torts", "A", "Law"));
    }

    #[test]
    fn test_blank_subject_uses_first_type() {
        let mut calc = fresh();
        assert_eq!(calc.blank_subject().subject_type, "Law");
        calc.remove_subject_type(0).expect("ok");
        calc.remove_subject_type(0).expect("ok");
        assert!(calc.blank_subject().subject_type.is_empty());
    }

    #[test]
    fn test_invalid_points_store_nan_and_count_zero() {
        let mut calc = fresh();
        calc.add_year().expect("ok");
        calc.add_subject(0, 1, Subject::new("Torts", "O", "Law"))
            .expect("ok");
        calc.set_rubric_points(0, "ten").expect("ok");

        assert!(calc.state().rubric[0].points.is_nan());
        assert_eq!(calc.semester_gpa(0, 1).expect("ok"), GpaValue::Value(0.0));

        // The NaN survives a reload through its `null` encoding
        let reopened = Calculator::open(calc.store().clone(), KEY);
        assert!(reopened.state().rubric[0].points.is_nan());
        assert_eq!(reopened.load_outcome(), &LoadOutcome::Loaded);
    }

    #[test]
    fn test_rename_rubric_orphans_subjects() {
        let mut calc = fresh();
        calc.add_year().expect("ok");
        calc.add_subject(0, 1, Subject::new("Torts", "O", "Law"))
            .expect("ok");
        calc.add_subject(0, 1, Subject::new("History", "P", "Non-Law"))
            .expect("ok");
        calc.set_rubric_grade(0, "Outstanding").expect("ok");

        // "O" no longer resolves: 0 points but its 4 credits still count
        assert_eq!(calc.semester_gpa(0, 1).expect("ok"), GpaValue::Value(3.0));
        assert_eq!(calc.state().years[0].semesters[1].subjects[0].grade, "O");
    }

    #[test]
    fn test_insert_and_reset_tables() {
        let mut calc = fresh();
        calc.insert_rubric_entry(0, RubricEntry::new(" S ", 10.0))
            .expect("ok");
        assert_eq!(calc.state().rubric[0].grade, "S");
        let len = calc.state().rubric.len();
        assert!(calc.insert_rubric_entry(len + 1, RubricEntry::blank()).is_err());
        calc.insert_rubric_entry(len, RubricEntry::blank()).expect("append");
        calc.reset_rubric().expect("ok");
        assert_eq!(calc.state().rubric, default_rubric());

        calc.insert_subject_type(1, SubjectType::new("Clinical", 2.0))
            .expect("ok");
        calc.set_subject_type_credits(1, "").expect("ok");
        assert!(calc.state().subject_types[1].credits.is_nan());
        calc.set_subject_type_name(1, " Clinic ").expect("ok");
        assert_eq!(calc.state().subject_types[1].name, "Clinic");
        calc.reset_subject_types().expect("ok");
        assert_eq!(calc.state().subject_types, default_subject_types());
    }

    #[test]
    fn test_add_blank_rows() {
        let mut calc = fresh();
        let r = calc.add_rubric_entry().expect("ok");
        let t = calc.add_subject_type().expect("ok");
        assert_eq!(calc.state().rubric[r], RubricEntry::blank());
        assert_eq!(calc.state().subject_types[t], SubjectType::blank());
    }

    #[test]
    fn test_remove_subject() {
        let mut calc = fresh();
        calc.add_year().expect("ok");
        calc.add_subject(0, 0, Subject::new("A", "", "Law")).expect("ok");
        calc.add_subject(0, 0, Subject::new("B", "", "Law")).expect("ok");
        let removed = calc.remove_subject(0, 0, 0).expect("ok");
        assert_eq!(removed.name, "A");
        assert_eq!(calc.state().years[0].semesters[0].subjects[0].name, "B");
        assert!(calc.remove_subject(0, 0, 5).is_err());
    }

    #[test]
    fn test_legacy_state_is_migrated_and_written_back() {
        let legacy = r#"{"rubric":[{"grade":"O","points":10}],"semesters":[
            {"number":1,"subjects":[{"name":"Torts","grade":"O","type":"Law"}]}
        ]}"#;
        let calc = Calculator::open(MemoryStore::with_value(KEY, legacy), KEY);

        assert_eq!(calc.load_outcome(), &LoadOutcome::Migrated { years: 1 });
        let stored = calc.store().raw(KEY).expect("written back");
        assert!(stored.contains("\"years\""));
        assert_eq!(calc.state().subject_types, default_subject_types());
        assert_eq!(calc.state().years[0].semesters[1], Semester::new(2));
        assert_eq!(calc.cgpa(), GpaValue::Value(10.0));

        // Reopening reads the written-back record as current shape
        let reopened = Calculator::open(calc.store().clone(), KEY);
        assert_eq!(reopened.load_outcome(), &LoadOutcome::Loaded);
        assert_eq!(reopened.state(), calc.state());
    }
}

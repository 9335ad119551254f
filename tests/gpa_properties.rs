//! Integration tests for the GPA rules and state loading

use gpa_calc::gpa::{calculate_cgpa, calculate_semester_gpa, GpaValue};
use gpa_calc::migration::{load_state, LoadOutcome};
use gpa_calc::models::{
    default_rubric, default_subject_types, AppState, Semester, Subject, Year,
};

fn semester(subjects: Vec<Subject>) -> Semester {
    Semester {
        number: 1,
        subjects,
    }
}

fn gpa_at(sem: &Semester, global_index: usize) -> GpaValue {
    calculate_semester_gpa(sem, global_index, &default_rubric(), &default_subject_types())
}

#[test]
fn ungraded_or_empty_semester_has_no_data() {
    assert_eq!(gpa_at(&semester(Vec::new()), 3), GpaValue::NoData);
    assert_eq!(
        gpa_at(&semester(vec![Subject::new("Torts", "", "Law")]), 3),
        GpaValue::NoData
    );
    assert_eq!(
        gpa_at(&semester(vec![Subject::new("English", "O", "Law")]), 0),
        GpaValue::NoData
    );
}

#[test]
fn semester_gpa_is_credit_weighted() {
    let sem = semester(vec![
        Subject::new("Contracts", "O", "Law"),
        Subject::new("Economics", "P", "Non-Law"),
    ]);
    assert_eq!(gpa_at(&sem, 1), GpaValue::Value(8.71));
    assert_eq!(gpa_at(&sem, 1).to_string(), "8.71");
}

#[test]
fn english_is_excluded_only_in_the_first_semester() {
    let sem = semester(vec![
        Subject::new("English Language", "P", "Non-Law"),
        Subject::new("Torts", "O", "Law"),
    ]);
    assert_eq!(gpa_at(&sem, 0), GpaValue::Value(10.0));
    // (7*3 + 10*4) / 7
    assert_eq!(gpa_at(&sem, 1), GpaValue::Value(8.71));
}

#[test]
fn cgpa_is_unweighted_mean_of_semesters() {
    let years = vec![Year::with_semesters(
        1,
        semester(vec![Subject::new("Torts", "B", "Law")]),
        semester(vec![
            Subject::new("Contracts", "A", "Law"),
            Subject::new("History", "A", "Non-Law"),
            Subject::new("Politics", "A", "Non-Law"),
        ]),
    )];
    assert_eq!(
        calculate_cgpa(&years, &default_rubric(), &default_subject_types()),
        GpaValue::Value(8.5)
    );
}

#[test]
fn cgpa_skips_semesters_without_data() {
    let years = vec![
        Year::with_semesters(
            1,
            semester(vec![Subject::new("Torts", "B", "Law")]),
            Semester::new(2),
        ),
        Year::new(2),
    ];
    assert_eq!(
        calculate_cgpa(&years, &default_rubric(), &default_subject_types()),
        GpaValue::Value(8.0)
    );
    assert_eq!(
        calculate_cgpa(&[], &default_rubric(), &default_subject_types()),
        GpaValue::NoData
    );
}

#[test]
fn unknown_grade_counts_credits_with_zero_points() {
    let sem = semester(vec![
        Subject::new("Torts", "Z", "Law"),
        Subject::new("Contracts", "O", "Law"),
    ]);
    assert_eq!(gpa_at(&sem, 1), GpaValue::Value(5.0));
}

#[test]
fn unknown_type_contributes_nothing() {
    let sem = semester(vec![
        Subject::new("Torts", "O", "Elective"),
        Subject::new("Contracts", "P", "Law"),
    ]);
    assert_eq!(gpa_at(&sem, 1), GpaValue::Value(7.0));
}

#[test]
fn legacy_record_is_regrouped_and_stable() {
    let legacy = r#"{
        "rubric": [{"grade": "O", "points": 10}],
        "semesters": [
            {"number": 1, "subjects": [{"name": "a", "grade": "O", "type": "Law"}]},
            {"number": 2, "subjects": [{"name": "b", "grade": "O", "type": "Law"}]},
            {"number": 3, "subjects": [{"name": "c", "grade": "O", "type": "Law"}]}
        ]
    }"#;

    let migrated = load_state(Some(legacy));
    assert_eq!(migrated.outcome, LoadOutcome::Migrated { years: 2 });
    let years = &migrated.state.years;
    assert_eq!(years.len(), 2);
    assert_eq!(years[0].number, 1);
    assert_eq!(years[0].semesters[0].subjects[0].name, "a");
    assert_eq!(years[0].semesters[1].subjects[0].name, "b");
    assert_eq!(years[1].number, 2);
    assert_eq!(years[1].semesters[0].subjects[0].name, "c");
    assert!(years[1].semesters[1].subjects.is_empty());
    assert_eq!(years[1].semesters[1].number, 2);

    let json = migrated.state.to_json().expect("serializable");
    let reloaded = load_state(Some(&json));
    assert_eq!(reloaded.outcome, LoadOutcome::Loaded);
    assert_eq!(reloaded.state, migrated.state);
}

#[test]
fn removing_a_year_renumbers_the_rest() {
    let mut state = AppState::default();
    state.years = vec![Year::new(1), Year::new(2), Year::new(3)];
    state.years[2].semesters[0]
        .subjects
        .push(Subject::new("marker", "", "Law"));

    state.years.remove(1);
    state.renumber_years();

    assert_eq!(state.years.len(), 2);
    assert_eq!(state.years[0].number, 1);
    assert_eq!(state.years[1].number, 2);
    assert_eq!(state.years[1].semesters[0].subjects[0].name, "marker");
}

#[test]
fn malformed_blob_yields_defaults() {
    for raw in ["", "{not json", "42", r#"{"years": [{"semesters": 5}]}"#] {
        let loaded = load_state(Some(raw));
        assert!(
            matches!(loaded.outcome, LoadOutcome::Reset(_)),
            "{raw:?} -> {:?}",
            loaded.outcome
        );
        assert_eq!(loaded.state, AppState::default());
    }
}

#[test]
fn nan_points_survive_a_save_cycle() {
    let mut state = AppState::default();
    state.rubric[0].points = f64::NAN;
    let json = state.to_json().expect("serializable");
    assert!(json.contains("null"));

    let loaded = load_state(Some(&json));
    assert_eq!(loaded.outcome, LoadOutcome::Loaded);
    assert!(loaded.state.rubric[0].points.is_nan());
}

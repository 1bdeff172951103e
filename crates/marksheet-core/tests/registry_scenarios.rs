//! # Registry Scenario Tests
//!
//! End-to-end create/update flows through the public `Registry` API,
//! grouped by rule.

#![allow(clippy::unwrap_used, clippy::panic)]

use chrono::{Days, Months, NaiveDate};
use marksheet_core::{MarksheetError, NewStudent, Outcome, Registry, StudentId};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).expect("date")
}

fn born_years_ago(years: u32) -> NaiveDate {
    today()
        .checked_sub_months(Months::new(years * 12))
        .expect("date")
}

fn ann_lee() -> NewStudent {
    NewStudent {
        first_name: Some("Ann".to_string()),
        last_name: Some("Lee".to_string()),
        date_of_birth: Some(born_years_ago(18)),
        section: Some("A".to_string()),
        gender: Some("F".to_string()),
        marks1: Some(60),
        marks2: Some(60),
        marks3: Some(60),
        ..NewStudent::default()
    }
}

fn invalid_field(result: Result<marksheet_core::StudentRecord, MarksheetError>) -> &'static str {
    match result {
        Err(MarksheetError::InvalidInput { field, .. }) => field,
        other => unreachable!("expected InvalidInput, got {:?}", other),
    }
}

// =============================================================================
// CREATION
// =============================================================================

mod creation {
    use super::*;

    #[test]
    fn three_character_names_accepted() {
        let mut registry = Registry::new();
        let record = registry.create_student_on(&ann_lee(), today()).expect("create");

        assert_eq!(record.first_name(), "Ann");
        assert_eq!(record.last_name(), "Lee");
        assert_eq!(record.id(), StudentId(1));
    }

    #[test]
    fn two_character_name_rejected() {
        let mut registry = Registry::new();
        let input = NewStudent {
            first_name: Some("An".to_string()),
            ..ann_lee()
        };
        assert_eq!(
            invalid_field(registry.create_student_on(&input, today())),
            "firstName"
        );
    }

    /// Creating without marks is rejected: marks are validated on create
    /// exactly as on update.
    #[test]
    fn missing_marks_rejected() {
        let mut registry = Registry::new();
        let input = NewStudent {
            marks1: None,
            marks2: None,
            marks3: None,
            ..ann_lee()
        };

        let err = registry
            .create_student_on(&input, today())
            .expect_err("marks are mandatory");
        assert_eq!(err.to_string(), "Marks 1, Marks 2, and Marks 3 are mandatory.");
        assert_eq!(registry.student_count().expect("count"), 0);
    }

    #[test]
    fn out_of_range_mark_on_create_rejected() {
        let mut registry = Registry::new();
        let input = NewStudent {
            marks2: Some(101),
            ..ann_lee()
        };
        assert_eq!(
            invalid_field(registry.create_student_on(&input, today())),
            "marks2"
        );
    }

    #[test]
    fn section_d_rejected() {
        let mut registry = Registry::new();
        let input = NewStudent {
            section: Some("D".to_string()),
            ..ann_lee()
        };

        let err = registry.create_student_on(&input, today()).expect_err("section");
        assert_eq!(err.field(), Some("section"));
        assert!(err.to_string().contains("section"));
    }

    #[test]
    fn ids_increase_per_create() {
        let mut registry = Registry::new();
        let ids: Vec<StudentId> = (0..3)
            .map(|_| registry.create_student_on(&ann_lee(), today()).expect("create").id())
            .collect();

        assert_eq!(ids, vec![StudentId(1), StudentId(2), StudentId(3)]);
    }
}

// =============================================================================
// AGE WINDOW
// =============================================================================

mod age_window {
    use super::*;

    fn create_with_dob(dob: NaiveDate) -> Result<marksheet_core::StudentRecord, MarksheetError> {
        let input = NewStudent {
            date_of_birth: Some(dob),
            ..ann_lee()
        };
        Registry::new().create_student_on(&input, today())
    }

    #[test]
    fn fifteen_rejected() {
        assert_eq!(invalid_field(create_with_dob(born_years_ago(15))), "dob");
    }

    #[test]
    fn one_day_short_of_sixteen_rejected() {
        let dob = born_years_ago(16)
            .checked_add_days(Days::new(1))
            .expect("date");
        assert_eq!(invalid_field(create_with_dob(dob)), "dob");
    }

    #[test]
    fn sixteen_accepted() {
        assert!(create_with_dob(born_years_ago(16)).is_ok());
    }

    #[test]
    fn twenty_accepted() {
        let dob = born_years_ago(21)
            .checked_add_days(Days::new(1))
            .expect("date");
        assert!(create_with_dob(born_years_ago(20)).is_ok());
        assert!(create_with_dob(dob).is_ok());
    }

    #[test]
    fn twenty_one_rejected() {
        assert_eq!(invalid_field(create_with_dob(born_years_ago(21))), "dob");
    }
}

// =============================================================================
// UPDATE MARKS
// =============================================================================

mod update_marks {
    use super::*;

    fn registry_with_ann() -> Registry {
        let mut registry = Registry::new();
        registry.create_student_on(&ann_lee(), today()).expect("create");
        registry
    }

    #[test]
    fn passing_update() {
        let mut registry = registry_with_ann();
        let record = registry
            .update_student_marks(StudentId(1), Some(40), Some(50), Some(36))
            .expect("update");

        assert_eq!(record.results().total(), 126);
        assert_eq!(record.results().average(), 42.0);
        assert_eq!(record.results().outcome(), Outcome::Pass);
    }

    #[test]
    fn one_failing_subject_fails_overall() {
        let mut registry = registry_with_ann();
        let record = registry
            .update_student_marks(StudentId(1), Some(30), Some(90), Some(90))
            .expect("update");

        assert_eq!(record.results().total(), 210);
        assert_eq!(record.results().outcome(), Outcome::Fail);
    }

    #[test]
    fn pass_mark_boundary() {
        let mut registry = registry_with_ann();

        let at = registry
            .update_student_marks(StudentId(1), Some(35), Some(35), Some(35))
            .expect("update");
        assert_eq!(at.results().outcome(), Outcome::Pass);

        let below = registry
            .update_student_marks(StudentId(1), Some(35), Some(35), Some(34))
            .expect("update");
        assert_eq!(below.results().outcome(), Outcome::Fail);
    }

    #[test]
    fn out_of_range_rejected() {
        let mut registry = registry_with_ann();

        assert_eq!(
            invalid_field(registry.update_student_marks(
                StudentId(1),
                Some(-1),
                Some(50),
                Some(50)
            )),
            "marks1"
        );
        assert_eq!(
            invalid_field(registry.update_student_marks(
                StudentId(1),
                Some(50),
                Some(50),
                Some(101)
            )),
            "marks3"
        );
    }

    #[test]
    fn missing_mark_rejected() {
        let mut registry = registry_with_ann();
        assert_eq!(
            invalid_field(registry.update_student_marks(StudentId(1), Some(50), None, Some(50))),
            "marks2"
        );
    }

    #[test]
    fn unknown_id_not_found() {
        let mut registry = registry_with_ann();
        let err = registry
            .update_student_marks(StudentId(999), Some(50), Some(50), Some(50))
            .expect_err("unknown");

        assert_eq!(err, MarksheetError::NotFound(StudentId(999)));
    }

    #[test]
    fn identity_fields_survive_update() {
        let mut registry = registry_with_ann();
        let before = registry.find_student(StudentId(1)).expect("find");
        let after = registry
            .update_student_marks(StudentId(1), Some(90), Some(80), Some(70))
            .expect("update");

        assert_eq!(after.id(), before.id());
        assert_eq!(after.first_name(), before.first_name());
        assert_eq!(after.date_of_birth(), before.date_of_birth());
        assert_eq!(after.section(), before.section());
        assert_eq!(after.gender(), before.gender());
    }
}

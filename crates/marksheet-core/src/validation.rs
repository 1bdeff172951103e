//! # Validation Rules
//!
//! Pure checks run before anything reaches a record store. Each failure is
//! reported as [`MarksheetError::InvalidInput`] naming the offending field,
//! and the first failing rule wins.
//!
//! Creation checks run in a fixed order: id, names, date of birth, section,
//! gender, caller-supplied derived values, then marks. Marks on creation are
//! held to the same rules as on update, so a stored record can never lack
//! one of them.

use crate::primitives::{
    MAX_AGE, MAX_AVERAGE, MAX_MARK, MAX_TOTAL, MIN_AGE_EXCLUSIVE, MIN_NAME_LENGTH,
};
use crate::types::{Gender, Marks, MarksheetError, NewStudent, Outcome, Section, StudentDraft};
use chrono::NaiveDate;

/// Validate a create payload against `today` and return the accepted draft.
pub fn validate_for_creation(
    input: &NewStudent,
    today: NaiveDate,
) -> Result<StudentDraft, MarksheetError> {
    if input.id.is_some() {
        return Err(MarksheetError::invalid("id", "Id should be auto-generated."));
    }

    let first_name = validate_name(input.first_name.as_deref(), "firstName", "First Name")?;
    let last_name = validate_name(input.last_name.as_deref(), "lastName", "Last Name")?;
    let date_of_birth = validate_date_of_birth(input.date_of_birth, today)?;
    let section = validate_section(input.section.as_deref())?;
    let gender = validate_gender(input.gender.as_deref())?;
    validate_total_average(input.total, input.average)?;
    validate_result(input.result.as_deref())?;
    let marks = validate_for_update(input.marks1, input.marks2, input.marks3)?;

    Ok(StudentDraft {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        date_of_birth,
        section,
        gender,
        marks,
    })
}

/// Validate a marks triple. All three are mandatory and each must lie in
/// `0..=MAX_MARK`.
pub fn validate_for_update(
    marks1: Option<i64>,
    marks2: Option<i64>,
    marks3: Option<i64>,
) -> Result<Marks, MarksheetError> {
    let (Some(m1), Some(m2), Some(m3)) = (marks1, marks2, marks3) else {
        let field = match (marks1, marks2) {
            (None, _) => "marks1",
            (_, None) => "marks2",
            _ => "marks3",
        };
        return Err(MarksheetError::invalid(
            field,
            "Marks 1, Marks 2, and Marks 3 are mandatory.",
        ));
    };

    Ok(Marks::new(
        validate_mark(m1, "marks1", "Marks 1")?,
        validate_mark(m2, "marks2", "Marks 2")?,
        validate_mark(m3, "marks3", "Marks 3")?,
    ))
}

/// Full years between `date_of_birth` and `today`.
///
/// Returns `None` when the birth date lies after `today`.
pub fn age_on(date_of_birth: NaiveDate, today: NaiveDate) -> Option<u32> {
    today.years_since(date_of_birth)
}

fn validate_name<'a>(
    name: Option<&'a str>,
    field: &'static str,
    label: &str,
) -> Result<&'a str, MarksheetError> {
    // Length is in Unicode scalar values, so a name made of two characters
    // outside the BMP is still two characters long.
    match name {
        Some(n) if n.chars().count() >= MIN_NAME_LENGTH => Ok(n),
        _ => Err(MarksheetError::invalid(
            field,
            format!(
                "{} should have a minimum length of {} characters.",
                label, MIN_NAME_LENGTH
            ),
        )),
    }
}

fn validate_date_of_birth(
    date_of_birth: Option<NaiveDate>,
    today: NaiveDate,
) -> Result<NaiveDate, MarksheetError> {
    let Some(dob) = date_of_birth else {
        return Err(MarksheetError::invalid("dob", "Date of Birth is mandatory."));
    };

    match age_on(dob, today) {
        Some(age) if age > MIN_AGE_EXCLUSIVE && age <= MAX_AGE => Ok(dob),
        _ => Err(MarksheetError::invalid(
            "dob",
            format!(
                "Age should be greater than {} and less than or equal to {} years.",
                MIN_AGE_EXCLUSIVE, MAX_AGE
            ),
        )),
    }
}

fn validate_section(section: Option<&str>) -> Result<Section, MarksheetError> {
    section.and_then(Section::from_label).ok_or_else(|| {
        MarksheetError::invalid("section", "Invalid section. Valid values are A, B, and C.")
    })
}

fn validate_gender(gender: Option<&str>) -> Result<Gender, MarksheetError> {
    gender
        .and_then(Gender::from_label)
        .ok_or_else(|| {
            MarksheetError::invalid("gender", "Invalid gender. Valid values are M or F.")
        })
}

fn validate_total_average(total: Option<i64>, average: Option<f64>) -> Result<(), MarksheetError> {
    if let Some(t) = total
        && !(0..=MAX_TOTAL).contains(&t)
    {
        return Err(MarksheetError::invalid(
            "total",
            format!("Total should be in the range of 0 to {}.", MAX_TOTAL),
        ));
    }

    // NaN fails the range check as well.
    if let Some(a) = average
        && !(0.0..=MAX_AVERAGE).contains(&a)
    {
        return Err(MarksheetError::invalid(
            "average",
            format!("Average should be in the range of 0 to {}.", MAX_AVERAGE),
        ));
    }

    Ok(())
}

fn validate_result(result: Option<&str>) -> Result<(), MarksheetError> {
    match result {
        Some(r) if Outcome::from_label(r).is_none() => Err(MarksheetError::invalid(
            "result",
            "Invalid result. Valid values are Pass or Fail.",
        )),
        _ => Ok(()),
    }
}

fn validate_mark(mark: i64, field: &'static str, label: &str) -> Result<u8, MarksheetError> {
    u8::try_from(mark)
        .ok()
        .filter(|&m| i64::from(m) <= MAX_MARK)
        .ok_or_else(|| {
            MarksheetError::invalid(
                field,
                format!("{} should be in the range of 0 to {}.", label, MAX_MARK),
            )
        })
}

// =============================================================================
// TESTS
// =============================================================================

//! # Core Type Definitions
//!
//! This module contains all core types for the student marks registry:
//! - Record identifiers (`StudentId`)
//! - Closed enumerations (`Section`, `Gender`, `Outcome`)
//! - Validated marks and their derived results (`Marks`, `Results`)
//! - Create input and stored record (`NewStudent`, `StudentDraft`, `StudentRecord`)
//! - Error types (`MarksheetError`)
//!
//! ## Derived Field Guarantees
//!
//! `Results` can only be produced from a `Marks` value, and `StudentRecord`
//! keeps both private. There is no setter for total, average or result: the
//! only way to change them is to replace the marks.

use crate::derivation::derive_results;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Unique identifier of a stored student record.
/// Assigned by the record store on creation and never changed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StudentId(pub u64);

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// CLOSED ENUMERATIONS
// =============================================================================

/// Administrative grouping label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Section {
    A,
    B,
    C,
}

impl Section {
    /// Parse the exact wire label. Matching is case-sensitive.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "A" => Some(Self::A),
            "B" => Some(Self::B),
            "C" => Some(Self::C),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Gender {
    M,
    F,
}

impl Gender {
    /// Parse the exact wire label. Matching is case-sensitive.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "M" => Some(Self::M),
            "F" => Some(Self::F),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::M => "M",
            Self::F => "F",
        }
    }
}

/// Pass/fail outcome across all three subjects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Pass,
    Fail,
}

impl Outcome {
    /// Case-insensitive parse, used only to check caller-supplied results.
    pub fn from_label(label: &str) -> Option<Self> {
        if label.eq_ignore_ascii_case("pass") {
            Some(Self::Pass)
        } else if label.eq_ignore_ascii_case("fail") {
            Some(Self::Fail)
        } else {
            None
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pass => "Pass",
            Self::Fail => "Fail",
        }
    }
}

// =============================================================================
// MARKS & RESULTS
// =============================================================================

/// Three subject marks, each already checked to lie in `0..=MAX_MARK`.
///
/// Construct through [`crate::validation::validate_for_update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Marks {
    marks1: u8,
    marks2: u8,
    marks3: u8,
}

impl Marks {
    pub(crate) const fn new(marks1: u8, marks2: u8, marks3: u8) -> Self {
        Self {
            marks1,
            marks2,
            marks3,
        }
    }

    #[must_use]
    pub const fn marks1(self) -> u8 {
        self.marks1
    }

    #[must_use]
    pub const fn marks2(self) -> u8 {
        self.marks2
    }

    #[must_use]
    pub const fn marks3(self) -> u8 {
        self.marks3
    }

    /// All three marks in subject order.
    #[must_use]
    pub const fn as_array(self) -> [u8; 3] {
        [self.marks1, self.marks2, self.marks3]
    }
}

/// Derived aggregate fields. Only [`derive_results`] builds these.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Results {
    pub(crate) total: u16,
    pub(crate) average: f64,
    pub(crate) outcome: Outcome,
}

impl Results {
    #[must_use]
    pub const fn total(self) -> u16 {
        self.total
    }

    #[must_use]
    pub const fn average(self) -> f64 {
        self.average
    }

    #[must_use]
    pub const fn outcome(self) -> Outcome {
        self.outcome
    }
}

// =============================================================================
// CREATE INPUT
// =============================================================================

/// Unvalidated create payload.
///
/// Every field is optional so that absence can be reported as a validation
/// failure naming the field. `id`, `total`, `average` and `result` must not
/// be trusted: `id` is rejected when present, and the derived fields are
/// range-checked and then discarded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewStudent {
    pub id: Option<u64>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub section: Option<String>,
    pub gender: Option<String>,
    pub marks1: Option<i64>,
    pub marks2: Option<i64>,
    pub marks3: Option<i64>,
    pub total: Option<i64>,
    pub average: Option<f64>,
    pub result: Option<String>,
}

/// A create payload that passed validation but has no id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct StudentDraft {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub section: Section,
    pub gender: Gender,
    pub marks: Marks,
}

impl StudentDraft {
    /// Attach a store-assigned id and compute the derived fields.
    pub(crate) fn into_record(self, id: StudentId) -> StudentRecord {
        StudentRecord {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            date_of_birth: self.date_of_birth,
            section: self.section,
            gender: self.gender,
            marks: self.marks,
            results: derive_results(self.marks),
        }
    }
}

// =============================================================================
// STORED RECORD
// =============================================================================

/// A persisted student record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    id: StudentId,
    first_name: String,
    last_name: String,
    date_of_birth: NaiveDate,
    section: Section,
    gender: Gender,
    marks: Marks,
    results: Results,
}

impl StudentRecord {
    #[must_use]
    pub const fn id(&self) -> StudentId {
        self.id
    }

    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    #[must_use]
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    #[must_use]
    pub const fn date_of_birth(&self) -> NaiveDate {
        self.date_of_birth
    }

    #[must_use]
    pub const fn section(&self) -> Section {
        self.section
    }

    #[must_use]
    pub const fn gender(&self) -> Gender {
        self.gender
    }

    #[must_use]
    pub const fn marks(&self) -> Marks {
        self.marks
    }

    #[must_use]
    pub const fn results(&self) -> Results {
        self.results
    }

    /// Replace all three marks and recompute total, average and result together.
    pub fn replace_marks(&mut self, marks: Marks) {
        self.marks = marks;
        self.results = derive_results(marks);
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in registry operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarksheetError {
    /// A domain rule was violated. Raised before anything is persisted.
    #[error("{message}")]
    InvalidInput {
        /// Wire name of the offending field.
        field: &'static str,
        /// Human-readable description of the violated constraint.
        message: String,
    },

    /// No record exists with the given id.
    #[error("Student not found: {0}")]
    NotFound(StudentId),

    /// A serialization or deserialization error occurred.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),
}

impl MarksheetError {
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            message: message.into(),
        }
    }

    /// The offending field, for validation failures.
    #[must_use]
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::InvalidInput { field, .. } => Some(field),
            _ => None,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

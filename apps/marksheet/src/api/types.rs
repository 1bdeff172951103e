//! # API Request/Response Types
//!
//! This module defines the JSON structures for the HTTP API.
//! Student payloads use camelCase field names.

use chrono::NaiveDate;
use marksheet_core::{MarksheetError, NewStudent, StudentRecord};
use serde::{Deserialize, Serialize};

// =============================================================================
// HEALTH RESPONSE
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

// =============================================================================
// STATUS RESPONSE
// =============================================================================

/// Registry status response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub student_count: usize,
    pub backend: String,
}

// =============================================================================
// STUDENT JSON
// =============================================================================

/// Wire representation of a stored record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentJson {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub dob: NaiveDate,
    pub section: String,
    pub gender: String,
    pub marks1: u8,
    pub marks2: u8,
    pub marks3: u8,
    pub total: u16,
    pub average: f64,
    pub result: String,
}

impl From<&StudentRecord> for StudentJson {
    fn from(record: &StudentRecord) -> Self {
        let marks = record.marks();
        let results = record.results();
        Self {
            id: record.id().0,
            first_name: record.first_name().to_string(),
            last_name: record.last_name().to_string(),
            dob: record.date_of_birth(),
            section: record.section().as_str().to_string(),
            gender: record.gender().as_str().to_string(),
            marks1: marks.marks1(),
            marks2: marks.marks2(),
            marks3: marks.marks3(),
            total: results.total(),
            average: results.average(),
            result: results.outcome().as_str().to_string(),
        }
    }
}

// =============================================================================
// CREATE REQUEST
// =============================================================================

/// Student create request.
///
/// Every field is optional at the JSON level so that a missing field is
/// reported by the validation rules (with the field named) rather than as a
/// generic deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudentRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[serde(alias = "dateOfBirth")]
    pub dob: Option<NaiveDate>,
    pub section: Option<String>,
    pub gender: Option<String>,
    pub marks1: Option<i64>,
    pub marks2: Option<i64>,
    pub marks3: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
}

impl CreateStudentRequest {
    /// Convert to the core create payload. No validation happens here.
    pub fn into_new_student(self) -> NewStudent {
        NewStudent {
            id: self.id,
            first_name: self.first_name,
            last_name: self.last_name,
            date_of_birth: self.dob,
            section: self.section,
            gender: self.gender,
            marks1: self.marks1,
            marks2: self.marks2,
            marks3: self.marks3,
            total: self.total,
            average: self.average,
            result: self.result,
        }
    }
}

// =============================================================================
// UPDATE MARKS QUERY
// =============================================================================

/// Query string of `PUT /students/{id}/update-marks`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateMarksQuery {
    pub marks1: Option<i64>,
    pub marks2: Option<i64>,
    pub marks3: Option<i64>,
}

// =============================================================================
// STUDENT RESPONSE
// =============================================================================

/// Response envelope for both student operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentResponse {
    pub success: bool,
    pub student: Option<StudentJson>,
    pub error: Option<String>,
    /// Offending field, for validation failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl StudentResponse {
    pub fn success(record: &StudentRecord) -> Self {
        Self {
            success: true,
            student: Some(StudentJson::from(record)),
            error: None,
            field: None,
        }
    }

    pub fn error(err: &MarksheetError) -> Self {
        Self {
            success: false,
            student: None,
            error: Some(err.to_string()),
            field: err.field().map(str::to_string),
        }
    }
}

//! # marksheet-core
//!
//! The student record engine for Marksheet - THE LOGIC.
//!
//! This crate validates student records, derives their aggregate results
//! (total, average, pass/fail) and persists them through a record store.
//!
//! ## Architectural Constraints
//!
//! The CORE:
//! - Has NO async, NO network dependencies (pure Rust)
//! - Never lets a caller set total, average or result directly
//! - Validates every mutation fully before touching storage

// =============================================================================
// MODULES
// =============================================================================

pub mod derivation;
pub mod primitives;
pub mod registry;
pub mod storage;
pub mod types;
pub mod validation;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{
    Gender, Marks, MarksheetError, NewStudent, Outcome, Results, Section, StudentDraft,
    StudentId, StudentRecord,
};

// =============================================================================
// RE-EXPORTS: Engine
// =============================================================================

pub use derivation::derive_results;
pub use registry::{Registry, StorageBackend};
pub use storage::{MemoryStore, RecordStore, RedbStore};
pub use validation::{age_on, validate_for_creation, validate_for_update};

//! # Domain Limits
//!
//! Fixed constants for the registry rules. These are compiled in and are
//! immutable at runtime.

/// Minimum length (in characters) of a first or last name.
pub const MIN_NAME_LENGTH: usize = 3;

/// A student must be strictly older than this many full years.
pub const MIN_AGE_EXCLUSIVE: u32 = 15;

/// A student may be at most this many full years old.
pub const MAX_AGE: u32 = 20;

/// Highest mark a single subject can carry.
pub const MAX_MARK: i64 = 100;

/// Lowest mark that still passes a subject.
pub const PASS_MARK: u8 = 35;

/// Upper bound of a caller-supplied total (three subjects at `MAX_MARK`).
pub const MAX_TOTAL: i64 = 300;

/// Upper bound of a caller-supplied average.
pub const MAX_AVERAGE: f64 = 100.0;

/// Number of subjects a record carries marks for.
pub const SUBJECT_COUNT: u16 = 3;

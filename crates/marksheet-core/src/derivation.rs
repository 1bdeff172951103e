//! # Result Derivation
//!
//! Computes total, average and pass/fail from a set of validated marks.
//! The function is total over [`Marks`]: every value it can receive is
//! already inside `0..=MAX_MARK`, so nothing here can fail.

use crate::primitives::{PASS_MARK, SUBJECT_COUNT};
use crate::types::{Marks, Outcome, Results};

/// Derive the aggregate fields for a record.
///
/// - `total` is the integer sum of the three marks.
/// - `average` is `total / 3.0`, without rounding.
/// - `outcome` is `Pass` only when every subject reaches `PASS_MARK`.
#[must_use]
#[allow(clippy::float_arithmetic)]
pub fn derive_results(marks: Marks) -> Results {
    let values = marks.as_array();
    let total: u16 = values.iter().map(|&m| u16::from(m)).sum();
    let average = f64::from(total) / f64::from(SUBJECT_COUNT);
    let outcome = if values.iter().all(|&m| m >= PASS_MARK) {
        Outcome::Pass
    } else {
        Outcome::Fail
    };

    Results {
        total,
        average,
        outcome,
    }
}

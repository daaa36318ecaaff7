//! Data model for the safety engine
//!
//! This module provides the value types every engine operation consumes and produces:
//! - [`process`]: A competing process with its `allocation`, `max`, and derived `need`
//! - [`state`]: The per-step [`state::SimulationState`] snapshot and its [`state::StepDetail`] records
//! - [`scenario`]: A validated input bundle (processes + available vector) and the built-in dataset
//!
//! # Resource Vectors
//!
//! Every vector has one entry per resource type. Entries are signed so that
//! malformed user or file input (e.g. a negative availability) can be
//! represented long enough for the validator to reject it. After validation
//! all entries are non-negative.
//!
//! Vector helpers in this module assert equal lengths: a length mismatch means
//! malformed input slipped past validation, which is a fatal precondition violation.

pub mod process;
pub mod scenario;
pub mod state;

/// One entry per resource type
pub type ResourceVec = Vec<i64>;

/// Check whether `need` is component-wise satisfiable by `work`
pub fn fits(need: &[i64], work: &[i64]) -> bool {
    assert_eq!(
        need.len(),
        work.len(),
        "need/work length mismatch ({} vs {})",
        need.len(),
        work.len()
    );
    need.iter().zip(work).all(|(n, w)| n <= w)
}

/// Add `released` into `work` component-wise
pub fn release_into(work: &mut [i64], released: &[i64]) {
    assert_eq!(
        work.len(),
        released.len(),
        "work/allocation length mismatch ({} vs {})",
        work.len(),
        released.len()
    );
    for (w, r) in work.iter_mut().zip(released) {
        *w += r;
    }
}

/// Component-wise sum `base + Σ rows`
pub fn column_totals<'a, I>(base: &[i64], rows: I) -> ResourceVec
where
    I: IntoIterator<Item = &'a [i64]>,
{
    let mut totals = base.to_vec();
    for row in rows {
        release_into(&mut totals, row);
    }
    totals
}

/// Format a vector as `[a, b, c]`
pub fn format_vec(v: &[i64]) -> String {
    let parts: Vec<String> = v.iter().map(|n| n.to_string()).collect();
    format!("[{}]", parts.join(", "))
}

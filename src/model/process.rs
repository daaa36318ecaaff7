//! Process representation
//!
//! A [`Process`] holds three resource vectors of equal length:
//! - `allocation`: units currently held, per resource type
//! - `max`: declared ceiling demand
//! - `need`: remaining demand, `max - allocation`
//!
//! `need` is never set directly. Constructors and setters recompute it, with
//! one exception: [`Process::imported`] takes a `need` column verbatim from a
//! table so that the validator can detect inconsistent files.

use super::ResourceVec;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Process {
    id: usize,
    name: String,
    allocation: ResourceVec,
    max: ResourceVec,
    need: ResourceVec,
    finished: bool,
}

impl Process {
    /// Create a process, deriving `need` from `max - allocation`
    pub fn new(id: usize, name: impl Into<String>, allocation: ResourceVec, max: ResourceVec) -> Self {
        let need = derive_need(&allocation, &max);
        Process {
            id,
            name: name.into(),
            allocation,
            max,
            need,
            finished: false,
        }
    }

    /// Create a process with the default `P<id>` name
    pub fn numbered(id: usize, allocation: ResourceVec, max: ResourceVec) -> Self {
        Self::new(id, format!("P{}", id), allocation, max)
    }

    /// Create a process from imported columns, keeping `need` as given.
    ///
    /// The result may violate `need == max - allocation`; run the validator
    /// before starting a simulation.
    pub fn imported(id: usize, allocation: ResourceVec, max: ResourceVec, need: ResourceVec) -> Self {
        Process {
            id,
            name: format!("P{}", id),
            allocation,
            max,
            need,
            finished: false,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn allocation(&self) -> &[i64] {
        &self.allocation
    }

    pub fn max(&self) -> &[i64] {
        &self.max
    }

    pub fn need(&self) -> &[i64] {
        &self.need
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn resource_count(&self) -> usize {
        self.allocation.len()
    }

    /// Replace the allocation vector (configuration time only)
    pub fn set_allocation(&mut self, allocation: ResourceVec) {
        self.allocation = allocation;
        self.need = derive_need(&self.allocation, &self.max);
    }

    /// Replace the max vector (configuration time only)
    pub fn set_max(&mut self, max: ResourceVec) {
        self.max = max;
        self.need = derive_need(&self.allocation, &self.max);
    }

    /// Whether all three vectors are zero (an empty table row)
    pub fn is_blank(&self) -> bool {
        [&self.allocation, &self.max, &self.need]
            .iter()
            .all(|v| v.iter().all(|&n| n == 0))
    }

    /// Monotonic false -> true; only the stepper calls this
    pub(crate) fn mark_finished(&mut self) {
        self.finished = true;
    }

    /// Clear the finished flag when a run is (re)initialized
    pub(crate) fn reset(&mut self) {
        self.finished = false;
    }
}

fn derive_need(allocation: &[i64], max: &[i64]) -> ResourceVec {
    assert_eq!(
        allocation.len(),
        max.len(),
        "allocation/max length mismatch ({} vs {})",
        allocation.len(),
        max.len()
    );
    max.iter().zip(allocation).map(|(m, a)| m - a).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_need_is_derived() {
        let p = Process::numbered(1, vec![2, 0, 0], vec![3, 2, 2]);
        assert_eq!(p.need(), &[1, 2, 2]);
        assert_eq!(p.name(), "P1");
        assert!(!p.is_finished());
    }

    #[test]
    fn test_setters_recompute_need() {
        let mut p = Process::numbered(0, vec![0, 1, 0], vec![7, 5, 3]);
        p.set_allocation(vec![1, 1, 1]);
        assert_eq!(p.need(), &[6, 4, 2]);
        p.set_max(vec![2, 2, 2]);
        assert_eq!(p.need(), &[1, 1, 1]);
    }

    #[test]
    fn test_blank_row() {
        assert!(Process::imported(0, vec![0, 0], vec![0, 0], vec![0, 0]).is_blank());
        assert!(!Process::imported(0, vec![0, 0], vec![0, 0], vec![0, 1]).is_blank());
    }
}

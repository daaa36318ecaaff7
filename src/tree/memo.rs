//! Memoized safety classification
//!
//! The work vector at any point of a safety check is fully determined by the
//! set of processes already executed (`available + Σ allocation` over that
//! set), so results are cached per executed set.
//!
//! Running an executable process only grows `work`, so it can never block a
//! process that could otherwise run. A greedy pass that runs whatever fits
//! until nothing changes therefore finishes every process exactly when some
//! completion order exists. Each query costs `O(n² · R)` and has no bound on
//! the process count.

use crate::model::{fits, release_into, ResourceVec};
use rustc_hash::FxHashMap;

/// Completability oracle over executed sets
pub struct Classifier<'a> {
    allocation: &'a [ResourceVec],
    need: &'a [ResourceVec],
    available: &'a [i64],
    memo: FxHashMap<Vec<bool>, bool>,
}

impl<'a> Classifier<'a> {
    pub fn new(allocation: &'a [ResourceVec], need: &'a [ResourceVec], available: &'a [i64]) -> Self {
        assert_eq!(
            allocation.len(),
            need.len(),
            "allocation/need row count mismatch"
        );
        Classifier {
            allocation,
            need,
            available,
            memo: FxHashMap::default(),
        }
    }

    /// Work vector after every process in `executed` has released its allocation
    pub fn work_for(&self, executed: &[bool]) -> ResourceVec {
        let mut work = self.available.to_vec();
        for (row, _) in self.allocation.iter().zip(executed).filter(|(_, done)| **done) {
            release_into(&mut work, row);
        }
        work
    }

    /// Whether the remaining processes can all finish from the `executed` state
    pub fn is_completable(&mut self, executed: &[bool]) -> bool {
        assert_eq!(
            executed.len(),
            self.allocation.len(),
            "executed set/process count mismatch"
        );
        if let Some(&known) = self.memo.get(executed) {
            return known;
        }

        let result = self.run_greedy(executed);
        self.memo.insert(executed.to_vec(), result);
        result
    }

    fn run_greedy(&self, executed: &[bool]) -> bool {
        let mut done = executed.to_vec();
        let mut work = self.work_for(executed);

        let mut progressed = true;
        while progressed {
            progressed = false;
            for (index, finished) in done.iter_mut().enumerate() {
                if !*finished && fits(&self.need[index], &work) {
                    release_into(&mut work, &self.allocation[index]);
                    *finished = true;
                    progressed = true;
                }
            }
        }

        done.iter().all(|&finished| finished)
    }

    /// Distinct executed sets classified so far
    pub fn states_visited(&self) -> usize {
        self.memo.len()
    }
}

/// Derive the need matrix `max - allocation`
pub fn need_matrix(allocation: &[ResourceVec], max: &[ResourceVec]) -> Vec<ResourceVec> {
    assert_eq!(allocation.len(), max.len(), "allocation/max row count mismatch");
    allocation
        .iter()
        .zip(max)
        .map(|(a, m)| {
            assert_eq!(a.len(), m.len(), "allocation/max length mismatch");
            m.iter().zip(a).map(|(m, a)| m - a).collect()
        })
        .collect()
}

/// Safety check for a whole configuration
pub fn is_safe(allocation: &[ResourceVec], max: &[ResourceVec], available: &[i64]) -> bool {
    let need = need_matrix(allocation, max);
    let executed = vec![false; allocation.len()];
    Classifier::new(allocation, &need, available).is_completable(&executed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::scenario::Scenario;
    use std::time::{Duration, Instant};

    #[test]
    fn test_classic_is_safe() {
        let s = Scenario::classic();
        assert!(is_safe(&s.allocation_matrix(), &s.max_matrix(), &s.available));
        assert!(!is_safe(&s.allocation_matrix(), &s.max_matrix(), &[0, 0, 0]));
    }

    #[test]
    fn test_work_for_executed_set() {
        let s = Scenario::classic();
        let allocation = s.allocation_matrix();
        let need = need_matrix(&allocation, &s.max_matrix());
        let classifier = Classifier::new(&allocation, &need, &s.available);
        let executed = [false, true, false, true, false];
        assert_eq!(classifier.work_for(&executed), vec![7, 4, 3]);
    }

    #[test]
    fn test_repeated_queries_hit_the_memo() {
        let allocation = vec![vec![1]; 4];
        let max = vec![vec![1]; 4];
        let need = need_matrix(&allocation, &max);
        let mut classifier = Classifier::new(&allocation, &need, &[0]);
        let executed = [true, false, false, true];

        assert!(classifier.is_completable(&executed));
        assert!(classifier.is_completable(&executed));
        assert_eq!(classifier.states_visited(), 1);
    }

    #[test]
    fn test_order_sensitive_release_is_found() {
        // P1 only fits after P0 releases, and P2 only after both
        let allocation = vec![vec![2], vec![1], vec![0]];
        let max = vec![vec![3], vec![4], vec![4]];
        assert!(is_safe(&allocation, &max, &[1]));
        assert!(!is_safe(&allocation, &max, &[0]));
    }

    #[test]
    fn test_many_processes_with_one_blocked() {
        // Seventy free processes plus one that can never run
        let mut allocation = vec![vec![0]; 70];
        let mut max = vec![vec![0]; 70];
        allocation.push(vec![0]);
        max.push(vec![1]);

        let started = Instant::now();
        assert!(!is_safe(&allocation, &max, &[0]));
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}

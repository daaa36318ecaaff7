// Snapshot history for stepping backward

use crate::model::state::SimulationState;

/// Manages prior simulation states as a last-in-first-out stack.
///
/// Every entry is an owned deep copy; nothing is shared with the live state.
#[derive(Debug, Default, Clone)]
pub struct SnapshotManager {
    snapshots: Vec<SimulationState>,
}

impl SnapshotManager {
    pub fn new() -> Self {
        SnapshotManager {
            snapshots: Vec::new(),
        }
    }

    /// Archive a copy of `state` before it is advanced
    pub fn push(&mut self, state: &SimulationState) {
        self.snapshots.push(state.clone());
    }

    /// Remove and return the most recent snapshot; `None` when there is nothing to undo
    pub fn pop(&mut self) -> Option<SimulationState> {
        self.snapshots.pop()
    }

    /// The snapshot `pop` would return
    pub fn peek(&self) -> Option<&SimulationState> {
        self.snapshots.last()
    }

    /// The oldest snapshot (the state before the first forward step)
    pub fn first(&self) -> Option<&SimulationState> {
        self.snapshots.first()
    }

    /// Get the number of snapshots
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::stepper::execute_step;
    use crate::model::scenario::Scenario;

    #[test]
    fn test_pop_on_empty_is_noop() {
        let mut history = SnapshotManager::new();
        assert!(history.pop().is_none());
        assert!(history.is_empty());
    }

    #[test]
    fn test_snapshots_are_detached() {
        let scenario = Scenario::classic();
        let mut live = SimulationState::new(&scenario.processes, &scenario.available);
        let original = live.clone();

        let mut history = SnapshotManager::new();
        history.push(&live);
        live = execute_step(&live);
        live.work[0] = 999;

        assert_eq!(history.len(), 1);
        assert_eq!(history.peek(), Some(&original));
        assert_eq!(history.pop(), Some(original));
    }

    #[test]
    fn test_lifo_order() {
        let scenario = Scenario::classic();
        let s0 = SimulationState::new(&scenario.processes, &scenario.available);
        let s1 = execute_step(&s0);

        let mut history = SnapshotManager::new();
        history.push(&s0);
        history.push(&s1);

        assert_eq!(history.first(), Some(&s0));
        assert_eq!(history.pop(), Some(s1));
        assert_eq!(history.pop(), Some(s0));
        assert_eq!(history.pop(), None);
    }
}

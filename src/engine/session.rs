// Live simulation session: the single mutable state cell plus its undo stack

use super::errors::{ConfigError, SessionError};
use super::stepper::{execute_step, run_to_completion};
use crate::model::scenario::Scenario;
use crate::model::state::SimulationState;
use crate::snapshot::SnapshotManager;
use crate::tree::{explore, DecisionTree, ExploreOptions};
use tracing::info;

/// A validated scenario together with its live state, history, and decision tree
pub struct Simulation {
    /// Input the session was started from
    scenario: Scenario,

    /// State before any step was taken
    initial: SimulationState,

    /// Live state shown to the user
    current: SimulationState,

    /// Snapshot manager for stepping backward
    history: SnapshotManager,

    /// Every safe ordering reachable from the initial state
    tree: DecisionTree,
}

impl Simulation {
    /// Validate `scenario` and start a session. Nothing is constructed on failure.
    pub fn new(scenario: Scenario, options: ExploreOptions) -> Result<Self, ConfigError> {
        scenario.validate()?;

        let initial = SimulationState::new(&scenario.processes, &scenario.available);
        let tree = explore(
            &scenario.allocation_matrix(),
            &scenario.max_matrix(),
            &scenario.available,
            options,
        );

        info!(
            processes = initial.process_count(),
            resources = scenario.resource_count(),
            tree_nodes = tree.node_count(),
            "Simulation started"
        );

        Ok(Simulation {
            scenario,
            current: initial.clone(),
            initial,
            history: SnapshotManager::new(),
            tree,
        })
    }

    /// Advance one safety-check decision, archiving the prior state
    pub fn step_forward(&mut self) -> Result<(), SessionError> {
        if self.current.is_complete {
            return Err(SessionError::AlreadyComplete);
        }

        self.history.push(&self.current);
        self.current = execute_step(&self.current);
        self.log_if_complete();
        Ok(())
    }

    /// Run to the final result in one move (undone by a single step backward)
    pub fn run_to_result(&mut self) -> Result<(), SessionError> {
        if self.current.is_complete {
            return Err(SessionError::AlreadyComplete);
        }

        self.history.push(&self.current);
        self.current = run_to_completion(&self.current);
        self.log_if_complete();
        Ok(())
    }

    /// Restore the most recent snapshot
    pub fn step_backward(&mut self) -> Result<(), SessionError> {
        match self.history.pop() {
            Some(previous) => {
                self.current = previous;
                Ok(())
            }
            None => Err(SessionError::NothingToUndo),
        }
    }

    /// Discard all progress and return to the initial state
    pub fn reset(&mut self) {
        self.history.clear();
        self.current = self.initial.clone();
        info!("Simulation reset");
    }

    fn log_if_complete(&self) {
        if self.current.is_complete {
            info!(
                safe = self.current.is_safe,
                sequence = ?self.current.safe_sequence,
                "Simulation complete"
            );
        }
    }

    // ========== Getter methods for UI ==========

    pub fn state(&self) -> &SimulationState {
        &self.current
    }

    pub fn initial_state(&self) -> &SimulationState {
        &self.initial
    }

    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    pub fn tree(&self) -> &DecisionTree {
        &self.tree
    }

    /// Number of undoable steps
    pub fn history_depth(&self) -> usize {
        self.history.len()
    }

    pub fn is_at_start(&self) -> bool {
        self.history.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classic() -> Simulation {
        Simulation::new(Scenario::classic(), ExploreOptions::default()).unwrap()
    }

    #[test]
    fn test_invalid_scenario_is_rejected() {
        let mut scenario = Scenario::classic();
        scenario.available = vec![-1, 0, 0];
        assert!(matches!(
            Simulation::new(scenario, ExploreOptions::default()),
            Err(ConfigError::NegativeAvailable { .. })
        ));
    }

    #[test]
    fn test_step_forward_then_back() {
        let mut sim = classic();
        let start = sim.state().clone();

        sim.step_forward().unwrap();
        sim.step_forward().unwrap();
        assert_eq!(sim.history_depth(), 2);
        assert_eq!(sim.state().safe_sequence, vec![1, 3]);

        sim.step_backward().unwrap();
        sim.step_backward().unwrap();
        assert_eq!(sim.state(), &start);
        assert_eq!(sim.step_backward(), Err(SessionError::NothingToUndo));
        assert_eq!(sim.state(), &start);
    }

    #[test]
    fn test_run_to_result_is_one_undo() {
        let mut sim = classic();
        sim.step_forward().unwrap();
        let before = sim.state().clone();

        sim.run_to_result().unwrap();
        assert!(sim.state().is_safe);
        assert_eq!(sim.step_forward(), Err(SessionError::AlreadyComplete));
        assert_eq!(sim.run_to_result(), Err(SessionError::AlreadyComplete));

        sim.step_backward().unwrap();
        assert_eq!(sim.state(), &before);
    }

    #[test]
    fn test_reset_clears_history() {
        let mut sim = classic();
        sim.run_to_result().unwrap();
        sim.reset();
        assert!(sim.is_at_start());
        assert_eq!(sim.state(), sim.initial_state());
    }

    #[test]
    fn test_tree_agrees_with_stepper() {
        let mut sim = classic();
        sim.run_to_result().unwrap();
        assert_eq!(sim.tree().is_safe(), sim.state().is_safe);
        assert!(sim
            .tree()
            .safe_sequences()
            .contains(&sim.state().safe_sequence));
    }
}

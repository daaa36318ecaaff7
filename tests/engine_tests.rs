// Integration tests for the safety engine

use safetty::engine::errors::{ConfigError, SessionError};
use safetty::engine::session::Simulation;
use safetty::engine::stepper::{execute_step, run_to_completion, UNSAFE_MESSAGE};
use safetty::model::process::Process;
use safetty::model::scenario::Scenario;
use safetty::model::state::{SimulationState, StepDetail};
use safetty::tree::{explore, memo, ExploreOptions};

fn classic_state() -> SimulationState {
    let scenario = Scenario::classic();
    SimulationState::new(&scenario.processes, &scenario.available)
}

#[test]
fn test_classic_safe_sequence() {
    let result = run_to_completion(&classic_state());

    assert!(result.is_complete);
    assert!(result.is_safe);
    assert_eq!(result.safe_sequence, vec![1, 3, 4, 0, 2]);
    assert_eq!(result.current_step, 5);
    assert_eq!(result.work, vec![10, 5, 7]);
    assert_eq!(result.work, result.resources);
}

#[test]
fn test_classic_work_after_each_step() {
    let expected_work = [
        vec![5, 3, 2],
        vec![7, 4, 3],
        vec![7, 4, 5],
        vec![7, 5, 5],
        vec![10, 5, 7],
    ];

    let mut state = classic_state();
    for work in &expected_work {
        state = execute_step(&state);
        assert_eq!(&state.work, work);
        assert_eq!(state.conserved_total(), state.resources);
    }
    assert!(state.is_complete);
}

#[test]
fn test_first_step_explanation() {
    let state = execute_step(&classic_state());

    assert_eq!(state.step_explanation.len(), 3);
    assert_eq!(
        state.step_explanation[0],
        StepDetail::Evaluated {
            process: 0,
            name: "P0".to_string(),
            need: vec![7, 4, 3],
            work: vec![3, 3, 2],
            can_execute: false,
        }
    );
    assert_eq!(
        state.step_explanation[2],
        StepDetail::Released {
            process: 1,
            name: "P1".to_string(),
            released: vec![2, 0, 0],
            updated_work: vec![5, 3, 2],
        }
    );
}

#[test]
fn test_unsafe_with_nothing_available() {
    let scenario = Scenario::classic();
    let initial = SimulationState::new(&scenario.processes, &[0, 0, 0]);

    let result = run_to_completion(&initial);

    assert!(result.is_complete);
    assert!(!result.is_safe);
    assert!(result.safe_sequence.is_empty());
    assert_eq!(result.current_step, 0);
    assert_eq!(
        result.step_explanation,
        vec![StepDetail::Blocked {
            message: UNSAFE_MESSAGE.to_string()
        }]
    );

    let tree = explore(
        &scenario.allocation_matrix(),
        &scenario.max_matrix(),
        &[0, 0, 0],
        ExploreOptions::default(),
    );
    assert_eq!(tree.node_count(), 1);
    assert!(!tree.is_safe());
}

#[test]
fn test_negative_available_rejected() {
    let mut scenario = Scenario::classic();
    scenario.available = vec![-1, 0, 0];

    let err = Simulation::new(scenario, ExploreOptions::default()).err();
    assert_eq!(
        err,
        Some(ConfigError::NegativeAvailable {
            resource: 0,
            value: -1
        })
    );
}

#[test]
fn test_validation_names_process_and_resource() {
    let mut scenario = Scenario::classic();
    scenario.processes[2] = Process::numbered(2, vec![3, 0, 2], vec![11, 0, 2]);

    let err = scenario.validate().unwrap_err();
    let message = err.to_string();
    assert!(message.contains("P2"), "message was: {}", message);
    assert!(matches!(err, ConfigError::MaxExceedsTotal { resource: 0, .. }));
}

#[test]
fn test_imported_need_mismatch_rejected() {
    let scenario = Scenario::new(
        vec![Process::imported(0, vec![1, 0], vec![2, 2], vec![1, 1])],
        vec![1, 2],
    );
    assert!(matches!(
        scenario.validate(),
        Err(ConfigError::NeedMismatch { resource: 1, .. })
    ));
}

#[test]
fn test_session_walkthrough_and_undo() {
    let mut sim = Simulation::new(Scenario::classic(), ExploreOptions::default()).unwrap();
    let initial = sim.state().clone();

    let mut seen = vec![initial.clone()];
    while !sim.state().is_complete {
        sim.step_forward().unwrap();
        seen.push(sim.state().clone());
    }
    assert_eq!(sim.step_forward(), Err(SessionError::AlreadyComplete));
    assert_eq!(sim.history_depth(), 5);

    for expected in seen.iter().rev().skip(1) {
        sim.step_backward().unwrap();
        assert_eq!(sim.state(), expected);
    }
    assert_eq!(sim.state(), &initial);
    assert_eq!(sim.step_backward(), Err(SessionError::NothingToUndo));
}

#[test]
fn test_stepper_tree_and_classifier_agree_on_classic() {
    let scenario = Scenario::classic();
    let sim = Simulation::new(scenario.clone(), ExploreOptions::default()).unwrap();
    let result = run_to_completion(sim.initial_state());

    assert!(result.is_safe);
    assert!(sim.tree().is_safe());
    assert!(memo::is_safe(
        &scenario.allocation_matrix(),
        &scenario.max_matrix(),
        &scenario.available
    ));
    assert!(sim.tree().safe_sequences().contains(&result.safe_sequence));
}

#[test]
fn test_every_tree_node_matches_root() {
    let scenario = Scenario::new(
        vec![
            Process::numbered(0, vec![1], vec![2]),
            Process::numbered(1, vec![1], vec![3]),
            Process::numbered(2, vec![0], vec![1]),
        ],
        vec![1],
    );
    let tree = explore(
        &scenario.allocation_matrix(),
        &scenario.max_matrix(),
        &scenario.available,
        ExploreOptions::default(),
    );

    assert!(tree.is_safe());
    assert!(tree.preorder().iter().all(|n| n.is_safe == tree.is_safe()));
}

#[test]
fn test_session_accepts_sixty_five_processes() {
    let processes = (0..65)
        .map(|id| Process::numbered(id, vec![0], vec![0]))
        .collect();
    let scenario = Scenario::new(processes, vec![1]);

    let mut sim = Simulation::new(scenario, ExploreOptions { node_budget: 1_000 }).unwrap();
    assert!(sim.tree().is_safe());
    assert!(sim.tree().truncated());

    sim.run_to_result().unwrap();
    assert!(sim.state().is_safe);
    assert_eq!(sim.state().safe_sequence, (0..65).collect::<Vec<_>>());
}

#[test]
fn test_max_below_allocation_rejected() {
    let scenario = Scenario::new(vec![Process::numbered(0, vec![3], vec![2])], vec![0]);
    assert!(matches!(
        Simulation::new(scenario, ExploreOptions::default()),
        Err(ConfigError::NegativeEntry { vector: "need", .. })
    ));
}

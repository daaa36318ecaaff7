// Single-step safety check and run-to-completion

use crate::model::state::{SimulationState, StepDetail};
use crate::model::{fits, release_into};
use tracing::debug;

/// Message carried by the terminal record of an unsafe run
pub const UNSAFE_MESSAGE: &str = "No process can execute. System is in an unsafe state.";

/// Advance the safety check by exactly one decision.
///
/// Unfinished processes are scanned in ascending id order, continuing the
/// current pass just after the process that executed last and wrapping
/// around to the lowest id. The first process whose `need` fits in `work`
/// runs to completion and releases its allocation. If a full cycle finds
/// none, the state becomes complete and unsafe. A complete state is returned
/// unchanged.
///
/// Resuming after the last executed process, rather than restarting at id 0,
/// is what yields `[1, 3, 4, 0, 2]` for [`Scenario::classic`]; a restart
/// would give `[1, 3, 0, 2, 4]`.
///
/// [`Scenario::classic`]: crate::model::scenario::Scenario::classic
pub fn execute_step(state: &SimulationState) -> SimulationState {
    if state.is_complete {
        return state.clone();
    }

    let mut next = state.clone();
    let mut details = Vec::new();
    let count = next.processes.len();
    let start = scan_start(&next);

    for index in (0..count).map(|offset| (start + offset) % count) {
        if next.processes[index].is_finished() {
            continue;
        }

        let process = &next.processes[index];
        let can_execute = fits(process.need(), &next.work);
        details.push(StepDetail::Evaluated {
            process: process.id(),
            name: process.name().to_string(),
            need: process.need().to_vec(),
            work: next.work.clone(),
            can_execute,
        });

        if !can_execute {
            continue;
        }

        let process = &mut next.processes[index];
        process.mark_finished();
        let id = process.id();
        let name = process.name().to_string();
        let released = process.allocation().to_vec();

        release_into(&mut next.work, &released);
        details.push(StepDetail::Released {
            process: id,
            name,
            released,
            updated_work: next.work.clone(),
        });

        next.safe_sequence.push(id);
        next.current_step += 1;
        next.step_explanation = details;

        if next.safe_sequence.len() == count {
            next.is_complete = true;
            next.is_safe = true;
        }

        debug!(
            process = id,
            work = ?next.work,
            step = next.current_step,
            safe = next.is_safe,
            "Process executed"
        );
        return next;
    }

    next.is_complete = true;
    next.is_safe = false;
    next.step_explanation = vec![StepDetail::Blocked {
        message: UNSAFE_MESSAGE.to_string(),
    }];

    debug!(
        remaining = ?next.remaining(),
        work = ?next.work,
        "No process can execute"
    );
    next
}

/// Position just after the most recently executed process (0 before the first step)
fn scan_start(state: &SimulationState) -> usize {
    state
        .safe_sequence
        .last()
        .and_then(|&id| state.processes.iter().position(|p| p.id() == id))
        .map_or(0, |pos| (pos + 1) % state.processes.len())
}

/// Repeatedly step until the run is complete.
///
/// Each step either finishes one more process or completes the run, so at
/// most `process_count + 1` steps are taken.
pub fn run_to_completion(state: &SimulationState) -> SimulationState {
    let mut current = state.clone();
    let mut iterations = 0;

    while !current.is_complete {
        current = execute_step(&current);
        iterations += 1;
        debug_assert!(
            iterations <= current.process_count() + 1,
            "run_to_completion exceeded its step bound"
        );
    }

    current
}

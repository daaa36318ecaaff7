//! Headless output of a run
//!
//! - [`text_report`]: step-by-step explanation followed by the verdict
//! - [`json_report`]: final state plus the decision tree as JSON
//!
//! [`describe_detail`] is shared with the TUI explanation pane.

use crate::engine::session::Simulation;
use crate::engine::stepper::{execute_step, run_to_completion};
use crate::model::format_vec;
use crate::model::state::{SimulationState, StepDetail};
use crate::tree::DecisionTree;
use serde::Serialize;
use std::fmt::Write;

/// One human-readable line for a step detail
pub fn describe_detail(detail: &StepDetail) -> String {
    match detail {
        StepDetail::Evaluated {
            name,
            need,
            work,
            can_execute,
            ..
        } => format!(
            "{}: need {} <= work {}? {}",
            name,
            format_vec(need),
            format_vec(work),
            if *can_execute { "yes" } else { "no" }
        ),
        StepDetail::Released {
            name,
            released,
            updated_work,
            ..
        } => format!(
            "{} finished, released {} -> work {}",
            name,
            format_vec(released),
            format_vec(updated_work)
        ),
        StepDetail::Blocked { message } => message.clone(),
    }
}

/// Format a safe sequence as `<P1, P3, ...>`
pub fn format_sequence(state: &SimulationState, sequence: &[usize]) -> String {
    let names: Vec<&str> = sequence
        .iter()
        .map(|&id| {
            state
                .processes
                .iter()
                .find(|p| p.id() == id)
                .map_or("?", |p| p.name())
        })
        .collect();
    format!("<{}>", names.join(", "))
}

/// Plain-text walk through every step from the initial state
pub fn text_report(sim: &Simulation) -> String {
    let mut out = String::new();
    let initial = sim.initial_state();

    let _ = writeln!(
        out,
        "Scenario: {} processes, {} resource types",
        initial.process_count(),
        initial.available.len()
    );
    let _ = writeln!(
        out,
        "Available: {}  Total: {}",
        format_vec(&initial.available),
        format_vec(&initial.resources)
    );
    for p in &initial.processes {
        let _ = writeln!(
            out,
            "  {:<4} allocation {}  max {}  need {}",
            p.name(),
            format_vec(p.allocation()),
            format_vec(p.max()),
            format_vec(p.need())
        );
    }

    let mut state = initial.clone();
    let mut step = 1;
    while !state.is_complete {
        state = execute_step(&state);
        let _ = writeln!(out);
        let _ = writeln!(out, "Step {}", step);
        for detail in &state.step_explanation {
            let _ = writeln!(out, "  {}", describe_detail(detail));
        }
        step += 1;
    }

    let _ = writeln!(out);
    if state.is_safe {
        let _ = writeln!(
            out,
            "Result: SAFE, sequence {}",
            format_sequence(&state, &state.safe_sequence)
        );
    } else {
        let _ = writeln!(
            out,
            "Result: UNSAFE after {}",
            format_sequence(&state, &state.safe_sequence)
        );
    }

    let tree = sim.tree();
    let _ = writeln!(
        out,
        "Decision tree: {} nodes, {} safe sequence(s){}",
        tree.node_count(),
        tree.safe_sequences().len(),
        if tree.truncated() { " (truncated)" } else { "" }
    );
    out
}

#[derive(Serialize)]
struct JsonReport<'a> {
    initial: &'a SimulationState,
    result: SimulationState,
    tree: &'a DecisionTree,
}

/// Final state and decision tree as pretty-printed JSON
pub fn json_report(sim: &Simulation) -> serde_json::Result<String> {
    let report = JsonReport {
        initial: sim.initial_state(),
        result: run_to_completion(sim.initial_state()),
        tree: sim.tree(),
    };
    serde_json::to_string_pretty(&report)
}

//! Simulation state snapshot
//!
//! [`SimulationState`] is value-semantic: cloning it produces a fully detached
//! copy (processes, vectors, explanation records) so history snapshots never
//! share backing storage with the live state.

use super::process::Process;
use super::{column_totals, ResourceVec};
use serde::Serialize;

/// Diagnostic record for one evaluation made by the stepper
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepDetail {
    /// A process was examined against the current work vector
    Evaluated {
        process: usize,
        name: String,
        need: ResourceVec,
        work: ResourceVec,
        can_execute: bool,
    },
    /// The executed process released its allocation back into work
    Released {
        process: usize,
        name: String,
        released: ResourceVec,
        updated_work: ResourceVec,
    },
    /// No unfinished process could execute
    Blocked { message: String },
}

/// Snapshot of a safety-check run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimulationState {
    /// Ordered by process id; cardinality fixed for the run
    pub processes: Vec<Process>,
    /// Total system capacity, `available + Σ allocation`
    pub resources: ResourceVec,
    pub available: ResourceVec,
    pub work: ResourceVec,
    pub safe_sequence: Vec<usize>,
    pub current_step: usize,
    pub is_complete: bool,
    pub is_safe: bool,
    /// Details for the most recent step only
    pub step_explanation: Vec<StepDetail>,
}

impl SimulationState {
    /// Build the initial state for a run. `finished` flags are cleared.
    pub fn new(processes: &[Process], available: &[i64]) -> Self {
        let processes: Vec<Process> = processes
            .iter()
            .cloned()
            .map(|mut p| {
                p.reset();
                p
            })
            .collect();

        let resources = column_totals(available, processes.iter().map(|p| p.allocation()));

        SimulationState {
            processes,
            resources,
            available: available.to_vec(),
            work: available.to_vec(),
            safe_sequence: Vec::new(),
            current_step: 0,
            is_complete: false,
            is_safe: false,
            step_explanation: Vec::new(),
        }
    }

    pub fn process_count(&self) -> usize {
        self.processes.len()
    }

    pub fn finished_count(&self) -> usize {
        self.processes.iter().filter(|p| p.is_finished()).count()
    }

    /// Ids of processes that have not finished yet, ascending
    pub fn remaining(&self) -> Vec<usize> {
        self.processes
            .iter()
            .filter(|p| !p.is_finished())
            .map(|p| p.id())
            .collect()
    }

    /// `work + Σ allocation of unfinished processes`; equals `resources` at every step
    pub fn conserved_total(&self) -> ResourceVec {
        column_totals(
            &self.work,
            self.processes
                .iter()
                .filter(|p| !p.is_finished())
                .map(|p| p.allocation()),
        )
    }

    /// Process id of the most recent `Released` detail, if the last step executed one
    pub fn last_executed(&self) -> Option<usize> {
        self.step_explanation.iter().rev().find_map(|d| match d {
            StepDetail::Released { process, .. } => Some(*process),
            _ => None,
        })
    }
}

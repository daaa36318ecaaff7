//! Error types for the safety engine
//!
//! This module defines the error taxonomy at the engine boundary:
//! - [`ConfigError`]: the validator rejected a configuration; the run must not start
//! - [`SessionError`]: a step/undo request that cannot be honored in the current state
//!
//! An unsafe outcome is not an error. It is a terminal [`SimulationState`]
//! with `is_safe == false`.
//!
//! [`SimulationState`]: crate::model::state::SimulationState

use thiserror::Error;

/// Configuration rejected by the validator
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("At least one process and one resource type are required")]
    Empty,

    #[error("Process {process} has {got} entries in its {vector} vector, expected {expected}")]
    DimensionMismatch {
        process: String,
        vector: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("Available resources cannot be negative (resource {resource} is {value})")]
    NegativeAvailable { resource: usize, value: i64 },

    #[error("Total allocated resources for resource {resource} exceed the total system resources ({allocated} > {total})")]
    OverAllocated {
        resource: usize,
        allocated: i64,
        total: i64,
    },

    #[error("Process {process} requests more than the total system resources for resource {resource} ({max} > {total})")]
    MaxExceedsTotal {
        process: String,
        resource: usize,
        max: i64,
        total: i64,
    },

    #[error("Need calculation is incorrect for process {process} at resource {resource} (need {need}, expected {expected})")]
    NeedMismatch {
        process: String,
        resource: usize,
        need: i64,
        expected: i64,
    },

    #[error("Process {process} has a negative {vector} entry for resource {resource}")]
    NegativeEntry {
        process: String,
        vector: &'static str,
        resource: usize,
    },
}

/// A step or undo request that is a no-op in the current state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Simulation already complete")]
    AlreadyComplete,

    #[error("Already at the beginning of the simulation")]
    NothingToUndo,
}

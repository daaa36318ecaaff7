//! Safety-check engine
//!
//! This module provides the operations that drive a run:
//! - [`validate`]: configuration consistency checks gating every run
//! - [`stepper`]: [`stepper::execute_step`] (one decision) and [`stepper::run_to_completion`]
//! - [`session`]: [`session::Simulation`], the live state cell plus undo history
//! - [`errors`]: configuration and session error types
//!
//! # Execution Model
//!
//! Engine functions are pure: they take a [`SimulationState`] by reference and
//! return a new one. The session is the only place state is replaced, and it
//! archives the previous state in a [`SnapshotManager`] before every forward move.
//!
//! [`SimulationState`]: crate::model::state::SimulationState
//! [`SnapshotManager`]: crate::snapshot::SnapshotManager

pub mod errors;
pub mod session;
pub mod stepper;
pub mod validate;

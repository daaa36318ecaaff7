//! # Introduction
//!
//! safeTTY runs the Banker's algorithm safety check on a set of processes
//! competing for resources, one decision at a time. Each state is archived
//! before it is advanced, so the run can be navigated forward and backward
//! through a terminal UI built with [ratatui](https://docs.rs/ratatui).
//! Alongside the single canonical run, every safe completion order is
//! explored and drawn as a decision tree.
//!
//! ## Pipeline
//!
//! ```text
//! CSV / args / default → Scenario → Validator → SimulationState → Stepper ⇄ Snapshots → TUI
//!                                            ↘ Tree Explorer ↗
//! ```
//!
//! 1. [`import`]: parses a CSV table or command-line vectors into a
//!    [`model::scenario::Scenario`].
//! 2. [`engine`]: validates the scenario, then advances a
//!    [`model::state::SimulationState`] one safety-check decision at a time.
//! 3. [`model`]: processes, resource vectors, and step-detail records.
//! 4. [`snapshot`]: LIFO history of detached states for stepping backward.
//! 5. [`tree`]: exhaustive decision tree of every legal completion order.
//! 6. [`report`]: plain-text and JSON output for headless runs.
//! 7. [`ui`]: ratatui-based TUI; not part of the stable library API.
//!
//! ## Engine guarantees
//!
//! Every engine operation is a pure, terminating computation over in-memory
//! values. The same input always yields the same output, and an unsafe
//! outcome is a normal terminal state rather than an error.

pub mod engine;
pub mod import;
pub mod model;
pub mod report;
pub mod snapshot;
pub mod tree;
pub mod ui;

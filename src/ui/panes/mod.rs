//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`processes`]: Allocation / Max / Need table with finish status
//! - [`vectors`]: Available, Work, and Total resource vectors
//! - [`explanation`]: Step-detail records for the most recent step
//! - [`sequence`]: Safe sequence accepted so far and the verdict
//! - [`tree`]: Decision-tree canvas and the list of every safe ordering
//! - [`status`]: Status bar with keybindings and playback state
//!
//! Each pane module exports a primary `render_*` function. Panes read the
//! simulation state and never mutate it; only scroll offsets are written back.

mod utils;

pub mod explanation;
pub mod processes;
pub mod sequence;
pub mod status;
pub mod tree;
pub mod vectors;

// Re-export render functions for convenience
pub use explanation::render_explanation_pane;
pub use processes::render_process_pane;
pub use sequence::render_sequence_pane;
pub use status::{render_status_bar, StatusRenderData};
pub use tree::{render_safe_sequences_pane, render_tree_pane};
pub use vectors::render_vector_pane;

//! Decision-tree explorer
//!
//! Exhaustively expands every completion order the safety rule allows,
//! rather than the single order the stepper picks:
//! - [`explore`]: recursive expansion from the initial available vector
//! - [`layout`]: 2-D positions for drawing (purely geometric)
//! - [`memo`]: memoized completability over executed sets
//!
//! # Node Safety
//!
//! - A node with no remaining processes is a leaf and safe
//! - A node with remaining processes but no executable one is a dead end and unsafe
//! - Any other node is safe iff at least one child is safe
//!
//! # Node Budget
//!
//! The tree can grow factorially when most processes are runnable at once.
//! Expansion stops creating nodes once [`ExploreOptions::node_budget`] is
//! reached; nodes left unexpanded take their safety from the memoized
//! classifier, so classification stays exact even for a truncated tree.

pub mod layout;
pub mod memo;

use crate::model::{fits, release_into, ResourceVec};
use memo::{need_matrix, Classifier};
use serde::Serialize;
use tracing::{info, warn};

/// Expansion limits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExploreOptions {
    pub node_budget: usize,
}

impl Default for ExploreOptions {
    fn default() -> Self {
        ExploreOptions {
            node_budget: 200_000,
        }
    }
}

/// Drawing position; x in leaf-width units, y = depth
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// One reachable state of the safety check
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecisionNode {
    /// Process executed to reach this node (`None` at the root)
    pub process: Option<usize>,
    /// Work vector before `process` released its allocation
    pub available: ResourceVec,
    /// Work vector at this node
    pub work: ResourceVec,
    /// Process ids executed from the root to here
    pub sequence: Vec<usize>,
    pub children: Vec<DecisionNode>,
    pub is_safe: bool,
    pub depth: usize,
    /// Index among siblings
    pub order: usize,
    /// False when the node budget cut expansion short here
    pub expanded: bool,
    pub position: Position,
}

impl DecisionNode {
    fn root(available: &[i64]) -> Self {
        DecisionNode {
            process: None,
            available: available.to_vec(),
            work: available.to_vec(),
            sequence: Vec::new(),
            children: Vec::new(),
            is_safe: false,
            depth: 0,
            order: 0,
            expanded: true,
            position: Position::default(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// The full decision space of a configuration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecisionTree {
    root: DecisionNode,
    process_count: usize,
    node_count: usize,
    truncated: bool,
    max_depth: usize,
    safe_sequences: Vec<Vec<usize>>,
}

impl DecisionTree {
    pub fn root(&self) -> &DecisionNode {
        &self.root
    }

    /// Whether some completion order exists from the initial state
    pub fn is_safe(&self) -> bool {
        self.root.is_safe
    }

    pub fn process_count(&self) -> usize {
        self.process_count
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Whether the node budget stopped expansion anywhere
    pub fn truncated(&self) -> bool {
        self.truncated
    }

    /// All nodes in depth-first pre-order
    pub fn preorder(&self) -> Vec<&DecisionNode> {
        let mut out = Vec::with_capacity(self.node_count);
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(node.children.iter().rev());
        }
        out
    }

    pub fn leaf_count(&self) -> usize {
        self.preorder().iter().filter(|n| n.is_leaf()).count()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Every complete safe ordering present in the tree, in expansion order.
    /// Collected once when the tree is built.
    pub fn safe_sequences(&self) -> &[Vec<usize>] {
        &self.safe_sequences
    }
}

/// Expand every legal completion order from `available`.
///
/// `allocation` and `max` are indexed by process id (rows) and resource
/// type (columns).
pub fn explore(
    allocation: &[ResourceVec],
    max: &[ResourceVec],
    available: &[i64],
    options: ExploreOptions,
) -> DecisionTree {
    let need = need_matrix(allocation, max);
    let mut explorer = Explorer {
        allocation,
        need: &need,
        budget: options.node_budget.max(1),
        node_count: 1,
        truncated: false,
        classifier: Classifier::new(allocation, &need, available),
    };

    let mut root = DecisionNode::root(available);
    let mut executed = vec![false; allocation.len()];
    explorer.expand(&mut root, &mut executed);
    layout::assign_positions(&mut root);

    let mut tree = DecisionTree {
        root,
        process_count: allocation.len(),
        node_count: explorer.node_count,
        truncated: explorer.truncated,
        max_depth: 0,
        safe_sequences: Vec::new(),
    };
    tree.max_depth = tree.preorder().iter().map(|n| n.depth).max().unwrap_or(0);
    tree.safe_sequences = collect_safe_sequences(&tree);

    if tree.truncated {
        warn!(
            budget = options.node_budget,
            nodes = tree.node_count,
            "Decision tree truncated at node budget"
        );
    }
    info!(
        nodes = tree.node_count,
        safe_sequences = tree.safe_sequences.len(),
        safe = tree.is_safe(),
        "Decision tree explored"
    );
    tree
}

fn collect_safe_sequences(tree: &DecisionTree) -> Vec<Vec<usize>> {
    tree.preorder()
        .into_iter()
        .filter(|n| n.is_leaf() && n.sequence.len() == tree.process_count)
        .map(|n| n.sequence.clone())
        .collect()
}

struct Explorer<'a> {
    allocation: &'a [ResourceVec],
    need: &'a [ResourceVec],
    budget: usize,
    node_count: usize,
    truncated: bool,
    classifier: Classifier<'a>,
}

impl Explorer<'_> {
    fn expand(&mut self, node: &mut DecisionNode, executed: &mut [bool]) {
        if node.sequence.len() == self.allocation.len() {
            node.is_safe = true;
            return;
        }

        if self.node_count >= self.budget {
            node.expanded = false;
            node.is_safe = self.classifier.is_completable(executed);
            self.truncated = true;
            return;
        }

        let runnable: Vec<usize> = (0..self.allocation.len())
            .filter(|&i| !executed[i] && fits(&self.need[i], &node.work))
            .collect();

        for (order, &id) in runnable.iter().enumerate() {
            let mut work = node.work.clone();
            release_into(&mut work, &self.allocation[id]);

            let mut sequence = node.sequence.clone();
            sequence.push(id);

            node.children.push(DecisionNode {
                process: Some(id),
                available: node.work.clone(),
                work,
                sequence,
                children: Vec::new(),
                is_safe: false,
                depth: node.depth + 1,
                order,
                expanded: true,
                position: Position::default(),
            });
        }
        self.node_count += runnable.len();

        for (child, &id) in node.children.iter_mut().zip(&runnable) {
            executed[id] = true;
            self.expand(child, executed);
            executed[id] = false;
        }

        // A dead end (no runnable process) stays unsafe
        node.is_safe = node.children.iter().any(|c| c.is_safe);
    }
}

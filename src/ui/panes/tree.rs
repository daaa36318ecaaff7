//! Decision tree rendering
//!
//! The tree is drawn on a braille canvas using the positions computed by
//! [`crate::tree::layout`]: x in leaf units, one row per depth. Edges between
//! safe nodes are green, others red. Nodes on the path the live simulation has
//! taken so far are drawn in the path color.
//!
//! Labels are only printed when there is enough horizontal room per leaf;
//! wide trees fall back to edges only.

use super::utils::{clamp_scroll, pane_block};
use crate::model::state::SimulationState;
use crate::report::format_sequence;
use crate::tree::layout::subtree_extent;
use crate::tree::{DecisionNode, DecisionTree};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::Span,
    widgets::canvas::{Canvas, Line as CanvasLine},
    widgets::{List, ListItem},
    Frame,
};

/// Minimum terminal columns per leaf before node labels are printed
const LABEL_COLUMNS_PER_LEAF: f64 = 3.0;

struct Edge {
    from: (f64, f64),
    to: (f64, f64),
    color: Color,
}

struct Label {
    at: (f64, f64),
    text: String,
    style: Style,
}

fn on_path(node: &DecisionNode, path: &[usize]) -> bool {
    node.sequence.len() <= path.len() && path.starts_with(&node.sequence)
}

fn collect(node: &DecisionNode, path: &[usize], edges: &mut Vec<Edge>, labels: &mut Vec<Label>) {
    let here = (node.position.x, -node.position.y);

    for child in &node.children {
        let color = if on_path(node, path) && on_path(child, path) {
            DEFAULT_THEME.path
        } else if node.is_safe && child.is_safe {
            DEFAULT_THEME.success
        } else {
            DEFAULT_THEME.error
        };
        edges.push(Edge {
            from: here,
            to: (child.position.x, -child.position.y),
            color,
        });
        collect(child, path, edges, labels);
    }

    let text = match node.process {
        Some(id) => format!("P{}", id),
        None => "●".to_string(),
    };
    let fg = if on_path(node, path) {
        DEFAULT_THEME.path
    } else if node.process.is_none() {
        DEFAULT_THEME.primary
    } else if node.is_safe {
        DEFAULT_THEME.success
    } else {
        DEFAULT_THEME.error
    };
    labels.push(Label {
        at: here,
        text,
        style: Style::default().fg(fg).add_modifier(Modifier::BOLD),
    });
}

/// Render the decision tree canvas
pub fn render_tree_pane(frame: &mut Frame, area: Rect, tree: &DecisionTree, state: &SimulationState) {
    let title = format!(
        " Decision Tree ({} nodes{}) ",
        tree.node_count(),
        if tree.truncated() { ", truncated" } else { "" }
    );
    let block = pane_block(&title, false);

    let (min_x, max_x) = subtree_extent(tree.root());
    let width = (max_x - min_x + 1.0).max(1.0);
    let depth = tree.max_depth() as f64;

    let mut edges = Vec::with_capacity(tree.node_count());
    let mut labels = Vec::with_capacity(tree.node_count());
    collect(tree.root(), &state.safe_sequence, &mut edges, &mut labels);

    let inner_columns = area.width.saturating_sub(2) as f64;
    let show_labels = inner_columns / width >= LABEL_COLUMNS_PER_LEAF || tree.node_count() == 1;

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds([min_x - 0.5, max_x + 0.5])
        .y_bounds([-depth - 0.5, 0.5])
        .paint(move |ctx| {
            for edge in &edges {
                ctx.draw(&CanvasLine {
                    x1: edge.from.0,
                    y1: edge.from.1,
                    x2: edge.to.0,
                    y2: edge.to.1,
                    color: edge.color,
                });
            }
            if show_labels {
                ctx.layer();
                for label in &labels {
                    ctx.print(
                        label.at.0,
                        label.at.1,
                        Span::styled(label.text.clone(), label.style),
                    );
                }
            }
        });

    frame.render_widget(canvas, area);
}

/// Render the list of every complete safe ordering found by the explorer
pub fn render_safe_sequences_pane(
    frame: &mut Frame,
    area: Rect,
    tree: &DecisionTree,
    state: &SimulationState,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let sequences = tree.safe_sequences();
    let title = format!(" All Safe Sequences ({}) ", sequences.len());
    let block = pane_block(&title, is_focused);

    if sequences.is_empty() {
        let item = ListItem::new("(none: the initial state is unsafe)")
            .style(Style::default().fg(DEFAULT_THEME.error));
        frame.render_widget(List::new(vec![item]).block(block), area);
        return;
    }

    let visible_height = clamp_scroll(scroll_offset, sequences.len(), area.height, 2);

    let items: Vec<ListItem> = sequences
        .iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(i, sequence)| {
            let style = if sequence.starts_with(&state.safe_sequence) && !state.safe_sequence.is_empty() {
                Style::default().fg(DEFAULT_THEME.path)
            } else {
                Style::default().fg(DEFAULT_THEME.fg)
            };
            ListItem::new(format!("{:>3}. {}", i + 1, format_sequence(state, sequence))).style(style)
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

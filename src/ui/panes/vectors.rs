//! Resource vector pane: Available, Work, and Total

use super::utils::pane_block;
use crate::model::format_vec;
use crate::model::state::SimulationState;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Render the vector pane
pub fn render_vector_pane(frame: &mut Frame, area: Rect, state: &SimulationState) {
    let label = |text: &'static str| Span::styled(text, Style::default().fg(DEFAULT_THEME.comment));
    let value = |v: &[i64]| Span::styled(format_vec(v), Style::default().fg(DEFAULT_THEME.number));

    let lines = vec![
        Line::from(vec![label(" Available  "), value(&state.available)]),
        Line::from(vec![label(" Work       "), value(&state.work)]),
        Line::from(vec![label(" Total      "), value(&state.resources)]),
    ];

    let paragraph = Paragraph::new(lines).block(pane_block(" Resources ", false));
    frame.render_widget(paragraph, area);
}

//! Safe sequence pane with the run verdict

use super::utils::pane_block;
use crate::model::state::SimulationState;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Render the accepted safe sequence
pub fn render_sequence_pane(frame: &mut Frame, area: Rect, state: &SimulationState) {
    let (verdict, color) = match (state.is_complete, state.is_safe) {
        (true, true) => (" SAFE ", DEFAULT_THEME.success),
        (true, false) => (" UNSAFE ", DEFAULT_THEME.error),
        (false, _) => (" RUNNING ", DEFAULT_THEME.secondary),
    };

    let mut spans = vec![
        Span::styled(
            verdict,
            Style::default()
                .bg(color)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
    ];

    if state.safe_sequence.is_empty() {
        spans.push(Span::styled("(empty)", Style::default().fg(DEFAULT_THEME.comment)));
    }

    for (i, &id) in state.safe_sequence.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" → ", Style::default().fg(DEFAULT_THEME.comment)));
        }
        let name = state
            .processes
            .iter()
            .find(|p| p.id() == id)
            .map_or_else(|| format!("P{}", id), |p| p.name().to_string());
        spans.push(Span::styled(
            name,
            Style::default()
                .fg(DEFAULT_THEME.process)
                .add_modifier(Modifier::BOLD),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).block(pane_block(" Safe Sequence ", false));
    frame.render_widget(paragraph, area);
}

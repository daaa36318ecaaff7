//! Step explanation pane
//!
//! Lists the evaluation records produced by the most recent step: each
//! process examined against the work vector, the release of the executed
//! process, or the terminal "no process can execute" message.

use super::utils::{clamp_scroll, pane_block};
use crate::model::state::{SimulationState, StepDetail};
use crate::report::describe_detail;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{List, ListItem, Padding, Paragraph},
    Frame,
};

/// Render the explanation pane
pub fn render_explanation_pane(
    frame: &mut Frame,
    area: Rect,
    state: &SimulationState,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let title = if state.current_step == 0 && state.step_explanation.is_empty() {
        " Step Explanation ".to_string()
    } else {
        format!(" Step {} Explanation ", state.current_step)
    };
    let block = pane_block(&title, is_focused);

    if state.step_explanation.is_empty() {
        let paragraph = Paragraph::new("(press → to take the first step)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let block = block.padding(Padding::new(1, 0, 0, 0));
    let visible_height = clamp_scroll(scroll_offset, state.step_explanation.len(), area.height, 2);

    let items: Vec<ListItem> = state
        .step_explanation
        .iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|detail| {
            let style = match detail {
                StepDetail::Evaluated {
                    can_execute: true, ..
                } => Style::default().fg(DEFAULT_THEME.success),
                StepDetail::Evaluated { .. } => Style::default().fg(DEFAULT_THEME.comment),
                StepDetail::Released { .. } => Style::default()
                    .fg(DEFAULT_THEME.primary)
                    .add_modifier(Modifier::BOLD),
                StepDetail::Blocked { .. } => Style::default()
                    .fg(DEFAULT_THEME.error)
                    .add_modifier(Modifier::BOLD),
            };
            ListItem::new(describe_detail(detail)).style(style)
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

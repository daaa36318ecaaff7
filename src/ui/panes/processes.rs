//! Process table rendering
//!
//! One row per process showing its `allocation`, `max`, and `need` vectors
//! and whether it has finished. The process executed by the most recent step
//! is highlighted, and finished rows show their position in the safe sequence.

use super::utils::{clamp_scroll, pane_block};
use crate::model::format_vec;
use crate::model::state::SimulationState;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Cell, Row, Table},
    Frame,
};

/// Render the process table
pub fn render_process_pane(
    frame: &mut Frame,
    area: Rect,
    state: &SimulationState,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(" Processes ", is_focused);

    let header = Row::new(["Process", "Allocation", "Max", "Need", "Status"]).style(
        Style::default()
            .fg(DEFAULT_THEME.primary)
            .add_modifier(Modifier::BOLD),
    );

    // Borders plus header row
    let visible_height = clamp_scroll(scroll_offset, state.processes.len(), area.height, 3);
    let last_executed = state.last_executed();

    let rows: Vec<Row> = state
        .processes
        .iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|process| {
            let status = match state.safe_sequence.iter().position(|&id| id == process.id()) {
                Some(order) => Span::styled(
                    format!("done #{}", order + 1),
                    Style::default().fg(DEFAULT_THEME.success),
                ),
                None if state.is_complete && !state.is_safe => {
                    Span::styled("blocked", Style::default().fg(DEFAULT_THEME.error))
                }
                None => Span::styled("waiting", Style::default().fg(DEFAULT_THEME.comment)),
            };

            let row_style = if last_executed == Some(process.id()) {
                Style::default()
                    .fg(DEFAULT_THEME.fg)
                    .bg(DEFAULT_THEME.current_line_bg)
            } else {
                Style::default().fg(DEFAULT_THEME.fg)
            };

            Row::new(vec![
                Cell::from(Span::styled(
                    process.name().to_string(),
                    Style::default()
                        .fg(DEFAULT_THEME.process)
                        .add_modifier(Modifier::BOLD),
                )),
                Cell::from(format_vec(process.allocation())),
                Cell::from(format_vec(process.max())),
                Cell::from(Span::styled(
                    format_vec(process.need()),
                    Style::default().fg(DEFAULT_THEME.number),
                )),
                Cell::from(status),
            ])
            .style(row_style)
        })
        .collect();

    let widths = [
        Constraint::Length(8),
        Constraint::Min(12),
        Constraint::Min(12),
        Constraint::Min(12),
        Constraint::Length(10),
    ];

    let table = Table::new(rows, widths).header(header).block(block);
    frame.render_widget(table, area);
}

//! Main TUI application state and logic

use crate::engine::errors::SessionError;
use crate::engine::session::Simulation;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

/// Auto-play speed bounds, in steps per second
pub const MIN_SPEED: u8 = 1;
pub const MAX_SPEED: u8 = 10;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Processes,
    Explanation,
    Sequences,
}

impl FocusedPane {
    /// Move focus to the next pane (processes -> explanation -> sequences)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Processes => FocusedPane::Explanation,
            FocusedPane::Explanation => FocusedPane::Sequences,
            FocusedPane::Sequences => FocusedPane::Processes,
        }
    }

    /// Move focus to the previous pane
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Processes => FocusedPane::Sequences,
            FocusedPane::Explanation => FocusedPane::Processes,
            FocusedPane::Sequences => FocusedPane::Explanation,
        }
    }
}

/// The main application state
pub struct App {
    /// The simulation session
    pub simulation: Simulation,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub process_scroll: usize,
    pub explanation_scroll: usize,
    pub sequence_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Whether auto-play mode is active
    pub is_playing: bool,

    /// Auto-play speed in steps per second
    pub speed: u8,

    /// Last time a step was taken in play mode
    pub last_play_time: Instant,

    /// Last time space was pressed (for debouncing)
    pub last_space_press: Instant,
}

impl App {
    /// Create a new app for the given simulation
    pub fn new(simulation: Simulation, speed: u8) -> Self {
        App {
            simulation,
            focused_pane: FocusedPane::Processes,
            process_scroll: 0,
            explanation_scroll: 0,
            sequence_scroll: 0,
            should_quit: false,
            status_message: String::from("Ready!"),
            is_playing: false,
            speed: speed.clamp(MIN_SPEED, MAX_SPEED),
            last_play_time: Instant::now(),
            last_space_press: Instant::now()
                .checked_sub(Duration::from_secs(1))
                .unwrap_or(Instant::now()),
        }
    }

    fn play_interval(&self) -> Duration {
        Duration::from_millis(1000 / self.speed as u64)
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            // One step per tick keeps auto-play calls serialized on this thread
            if self.is_playing && self.last_play_time.elapsed() >= self.play_interval() {
                match self.simulation.step_forward() {
                    Ok(()) => {
                        self.status_message = "Playing...".to_string();
                        self.explanation_scroll = 0;
                    }
                    Err(_) => {
                        self.is_playing = false;
                        self.status_message = "Playback complete".to_string();
                    }
                }
                if self.simulation.state().is_complete {
                    self.is_playing = false;
                    self.status_message = self.verdict_message();
                }
                self.last_play_time = Instant::now();
            }

            // Use poll with timeout to allow auto-play to work
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Panes on top, status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(main_chunks[0]);

        // Left column: Processes | Vectors | Explanation
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(50),
                Constraint::Length(5),
                Constraint::Min(5),
            ])
            .split(columns[0]);

        // Right column: Safe sequence | Decision tree | All safe sequences
        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Percentage(65),
                Constraint::Min(4),
            ])
            .split(columns[1]);

        let state = self.simulation.state();

        super::panes::render_process_pane(
            frame,
            left_rows[0],
            state,
            self.focused_pane == FocusedPane::Processes,
            &mut self.process_scroll,
        );

        super::panes::render_vector_pane(frame, left_rows[1], state);

        super::panes::render_explanation_pane(
            frame,
            left_rows[2],
            state,
            self.focused_pane == FocusedPane::Explanation,
            &mut self.explanation_scroll,
        );

        super::panes::render_sequence_pane(frame, right_rows[0], state);

        super::panes::render_tree_pane(frame, right_rows[1], self.simulation.tree(), state);

        super::panes::render_safe_sequences_pane(
            frame,
            right_rows[2],
            self.simulation.tree(),
            state,
            self.focused_pane == FocusedPane::Sequences,
            &mut self.sequence_scroll,
        );

        super::panes::render_status_bar(
            frame,
            main_chunks[1],
            super::panes::StatusRenderData {
                message: &self.status_message,
                current_step: state.current_step,
                total_steps: state.process_count(),
                is_complete: state.is_complete,
                is_at_start: self.simulation.is_at_start(),
                is_playing: self.is_playing,
                speed: self.speed,
            },
        );
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            // Number keys step forward N times directly
            KeyCode::Char(c @ '1'..='9') => {
                self.is_playing = false;
                let n = c.to_digit(10).unwrap_or(1) as usize;
                let mut stepped = 0;
                for _ in 0..n {
                    if self.simulation.step_forward().is_ok() {
                        stepped += 1;
                    } else {
                        break;
                    }
                }
                self.status_message = format!("Stepped forward {} step(s)", stepped);
                self.explanation_scroll = 0;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.is_playing = false;
                self.step_backward();
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.is_playing = false;
                self.step_forward();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_add(1);
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.speed = (self.speed + 1).min(MAX_SPEED);
                self.status_message = format!("Speed: {} step(s)/s", self.speed);
            }
            KeyCode::Char('-') => {
                self.speed = self.speed.saturating_sub(1).max(MIN_SPEED);
                self.status_message = format!("Speed: {} step(s)/s", self.speed);
            }
            KeyCode::Char(' ') => {
                // Toggle auto-play mode (with 200ms debounce to prevent key repeat spam)
                if self.last_space_press.elapsed() >= Duration::from_millis(200) {
                    self.last_space_press = Instant::now();
                    if self.simulation.state().is_complete {
                        self.status_message = self.verdict_message();
                        return;
                    }
                    self.is_playing = !self.is_playing;
                    if self.is_playing {
                        self.last_play_time = Instant::now()
                            .checked_sub(self.play_interval())
                            .unwrap_or(Instant::now());
                        self.status_message = "Playing...".to_string();
                    } else {
                        self.status_message = "Paused".to_string();
                    }
                }
            }
            KeyCode::Enter => {
                // Jump to the final result
                self.is_playing = false;
                match self.simulation.run_to_result() {
                    Ok(()) => self.status_message = self.verdict_message(),
                    Err(e) => self.status_message = format!("Cannot run: {}", e),
                }
                self.explanation_scroll = 0;
            }
            KeyCode::Backspace | KeyCode::Char('r') => {
                // Jump to start
                self.is_playing = false;
                self.simulation.reset();
                self.status_message = "Reset to start".to_string();
                self.explanation_scroll = 0;
            }
            _ => {}
        }
    }

    fn focused_scroll(&mut self) -> &mut usize {
        match self.focused_pane {
            FocusedPane::Processes => &mut self.process_scroll,
            FocusedPane::Explanation => &mut self.explanation_scroll,
            FocusedPane::Sequences => &mut self.sequence_scroll,
        }
    }

    fn verdict_message(&self) -> String {
        let state = self.simulation.state();
        if state.is_safe {
            "System is in a safe state".to_string()
        } else {
            "System is in an unsafe state".to_string()
        }
    }

    /// Step forward in the simulation
    fn step_forward(&mut self) {
        match self.simulation.step_forward() {
            Ok(()) => {
                self.status_message = if self.simulation.state().is_complete {
                    self.verdict_message()
                } else {
                    "Stepped forward".to_string()
                };
                self.explanation_scroll = 0;
            }
            Err(SessionError::AlreadyComplete) => {
                self.status_message = format!("Cannot step forward: {}", SessionError::AlreadyComplete);
            }
            Err(e) => {
                self.status_message = format!("Error: {}", e);
            }
        }
    }

    /// Step backward in the simulation
    fn step_backward(&mut self) {
        match self.simulation.step_backward() {
            Ok(()) => {
                self.status_message = "Stepped backward".to_string();
                self.explanation_scroll = 0;
            }
            Err(e) => {
                self.status_message = format!("Cannot step backward: {}", e);
            }
        }
    }
}

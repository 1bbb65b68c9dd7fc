//! UI state management for the live terminal view

use std::collections::VecDeque;
use std::time::Duration;

use crossterm::event::KeyCode;

/// Maximum status messages to keep
const MAX_LOG_ENTRIES: usize = 50;

/// Bounds for the frame delay when the user changes speed
pub const MIN_FRAME: Duration = Duration::from_millis(10);
pub const MAX_FRAME: Duration = Duration::from_millis(2000);

/// What a keypress asks the view to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewCommand {
    Quit,
    TogglePause,
    /// Advance one tick while paused
    Step,
    Faster,
    Slower,
    ToggleEvents,
    Nothing,
}

impl ViewCommand {
    pub fn from_key(code: KeyCode) -> Self {
        match code {
            KeyCode::Char('q') | KeyCode::Char('x') | KeyCode::Esc => ViewCommand::Quit,
            KeyCode::Char(' ') | KeyCode::Char('p') => ViewCommand::TogglePause,
            KeyCode::Char('s') | KeyCode::Right => ViewCommand::Step,
            KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Up => ViewCommand::Faster,
            KeyCode::Char('-') | KeyCode::Down => ViewCommand::Slower,
            KeyCode::Char('e') => ViewCommand::ToggleEvents,
            _ => ViewCommand::Nothing,
        }
    }
}

/// Live view state
#[derive(Debug)]
pub struct ViewState {
    pub paused: bool,
    pub show_events: bool,
    pub frame: Duration,
    pub quit: bool,
    /// Ticks requested while paused
    pub pending_steps: u32,
    /// Status messages shown under the grid, newest last
    pub messages: VecDeque<String>,
}

impl ViewState {
    pub fn new(frame: Duration) -> Self {
        Self {
            paused: false,
            show_events: true,
            frame: frame.clamp(MIN_FRAME, MAX_FRAME),
            quit: false,
            pending_steps: 0,
            messages: VecDeque::with_capacity(MAX_LOG_ENTRIES),
        }
    }

    pub fn apply(&mut self, command: ViewCommand) {
        match command {
            ViewCommand::Quit => self.quit = true,
            ViewCommand::TogglePause => {
                self.paused = !self.paused;
                let text = if self.paused { "Paused" } else { "Resumed" };
                self.log(text.to_string());
            }
            ViewCommand::Step => {
                if self.paused {
                    self.pending_steps += 1;
                }
            }
            ViewCommand::Faster => {
                self.frame = (self.frame / 2).max(MIN_FRAME);
                self.log(format!("Frame delay {} ms", self.frame.as_millis()));
            }
            ViewCommand::Slower => {
                self.frame = (self.frame * 2).min(MAX_FRAME);
                self.log(format!("Frame delay {} ms", self.frame.as_millis()));
            }
            ViewCommand::ToggleEvents => self.show_events = !self.show_events,
            ViewCommand::Nothing => {}
        }
    }

    /// Whether the simulation should advance this frame. Consumes one
    /// pending step when paused.
    pub fn should_advance(&mut self) -> bool {
        if !self.paused {
            return true;
        }
        if self.pending_steps > 0 {
            self.pending_steps -= 1;
            return true;
        }
        false
    }

    pub fn log(&mut self, message: String) {
        if self.messages.len() >= MAX_LOG_ENTRIES {
            self.messages.pop_front();
        }
        self.messages.push_back(message);
    }

    pub fn last_message(&self) -> Option<&str> {
        self.messages.back().map(String::as_str)
    }
}

//! Terminal user interface for homestock.
//!
//! A screen implements [`TuiApp`] and is driven by [`run`], which owns the
//! terminal for the screen's lifetime.

pub mod event;
pub mod screens;
pub mod terminal;
pub mod widgets;

use anyhow::Result;
use ratatui::Frame;

use crate::tui::event::{EventHandler, TuiEvent};
use crate::tui::terminal::TerminalGuard;

/// How a screen finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppResult<T> {
    Done(T),
    Cancelled,
}

/// An interactive screen.
pub trait TuiApp {
    type Output;

    /// Handles one event. `Some` ends the run loop.
    fn handle_event(&mut self, event: &TuiEvent) -> Option<AppResult<Self::Output>>;

    fn render(&mut self, frame: &mut Frame);
}

/// Runs a screen until it finishes.
///
/// Returns `Ok(None)` when the user cancelled.
pub fn run<A: TuiApp>(mut app: A) -> Result<Option<A::Output>> {
    let mut terminal = TerminalGuard::new()?;
    let events = EventHandler::default();

    loop {
        terminal.terminal().draw(|frame| app.render(frame))?;

        let event = events.next()?;
        if let Some(result) = app.handle_event(&event) {
            return Ok(match result {
                AppResult::Done(output) => Some(output),
                AppResult::Cancelled => None,
            });
        }
    }
}

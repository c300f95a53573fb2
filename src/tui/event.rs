//! Terminal event polling.

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

/// Events delivered to a [`TuiApp`](super::TuiApp).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiEvent {
    Key(KeyEvent),
    /// Bracketed paste (also how terminals deliver dropped files)
    Paste(String),
    Resize(u16, u16),
    /// No input within the tick interval
    Tick,
}

/// Blocks for the next event, emitting [`TuiEvent::Tick`] when idle.
#[derive(Debug, Clone, Copy)]
pub struct EventHandler {
    tick_rate: Duration,
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new(Duration::from_millis(100))
    }
}

impl EventHandler {
    pub const fn new(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }

    pub fn next(&self) -> Result<TuiEvent> {
        if !event::poll(self.tick_rate)? {
            return Ok(TuiEvent::Tick);
        }
        Ok(match event::read()? {
            // Release/repeat events are reported on some platforms only
            Event::Key(key) if key.kind == KeyEventKind::Press => TuiEvent::Key(key),
            Event::Paste(text) => TuiEvent::Paste(text),
            Event::Resize(width, height) => TuiEvent::Resize(width, height),
            _ => TuiEvent::Tick,
        })
    }
}

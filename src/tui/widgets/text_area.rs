//! Multi-line text area backed by `tui-textarea`.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders},
    Frame,
};
use tui_textarea::TextArea;

pub struct TextAreaWidget<'a> {
    textarea: TextArea<'a>,
    label: String,
}

/// Keys owned by the surrounding screen (navigation, cancel, recording).
fn is_screen_key(key: KeyEvent) -> bool {
    if key.code == KeyCode::Esc {
        return true;
    }
    key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('n' | 'p' | 'c' | 'r'))
}

impl TextAreaWidget<'_> {
    pub fn new(label: impl Into<String>) -> Self {
        let mut textarea = TextArea::default();
        textarea.set_cursor_line_style(Style::default());
        Self {
            textarea,
            label: label.into(),
        }
    }

    /// Lines joined with `\n`.
    pub fn content(&self) -> String {
        self.textarea.lines().join("\n")
    }

    pub fn is_empty(&self) -> bool {
        self.textarea.is_empty()
    }

    pub fn clear(&mut self) {
        let label = std::mem::take(&mut self.label);
        *self = Self::new(label);
    }

    /// Inserts pasted text, keeping its line breaks.
    pub fn insert_text(&mut self, text: &str) {
        self.textarea.insert_str(text.replace("\r\n", "\n"));
    }

    /// Returns `false` for keys the screen handles itself.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if is_screen_key(key) {
            return false;
        }
        self.textarea.input(key);
        true
    }

    pub fn render(&mut self, area: Rect, frame: &mut Frame, focused: bool) {
        let border = if focused { Color::Cyan } else { Color::DarkGray };
        self.textarea.set_block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border))
                .title(format!(" {} ", self.label)),
        );
        self.textarea.set_cursor_style(if focused {
            Style::default().bg(Color::White).fg(Color::Black)
        } else {
            Style::default()
        });
        frame.render_widget(&self.textarea, area);
    }
}

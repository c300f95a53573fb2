//! Single-line text input.
//!
//! The cursor is a character index, so multi-byte input (umlauts, CJK) edits
//! correctly.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

#[derive(Debug, Clone)]
pub struct TextInput {
    content: String,
    cursor: usize,
    label: String,
    placeholder: String,
}

impl TextInput {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            content: String::new(),
            cursor: 0,
            label: label.into(),
            placeholder: String::new(),
        }
    }

    #[must_use]
    pub fn with_initial(mut self, value: impl Into<String>) -> Self {
        self.set_content(value);
        self
    }

    /// Dimmed hint shown while the input is empty.
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Replaces the content and moves the cursor to the end.
    pub fn set_content(&mut self, value: impl Into<String>) {
        self.content = value.into();
        self.cursor = self.content.chars().count();
    }

    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.content
            .char_indices()
            .nth(char_index)
            .map_or(self.content.len(), |(i, _)| i)
    }

    fn len_chars(&self) -> usize {
        self.content.chars().count()
    }

    /// Inserts pasted text at the cursor. Line breaks become spaces.
    pub fn insert_text(&mut self, text: &str) {
        let flat: String = text
            .chars()
            .map(|c| if matches!(c, '\n' | '\r') { ' ' } else { c })
            .collect();
        let at = self.byte_index(self.cursor);
        self.content.insert_str(at, &flat);
        self.cursor += flat.chars().count();
    }

    fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let at = self.byte_index(self.cursor);
        self.content.remove(at);
    }

    fn delete_word(&mut self) {
        let before: Vec<char> = self.content.chars().take(self.cursor).collect();
        let trailing_spaces = before.iter().rev().take_while(|c| **c == ' ').count();
        let word = before
            .iter()
            .rev()
            .skip(trailing_spaces)
            .take_while(|c| **c != ' ')
            .count();
        for _ in 0..trailing_spaces + word {
            self.backspace();
        }
    }

    /// Handles editing and cursor keys. Returns `false` for keys the input
    /// does not use, including unknown Ctrl combinations.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('u') if ctrl => self.clear(),
            KeyCode::Char('w') if ctrl => self.delete_word(),
            KeyCode::Char(_) if ctrl => return false,
            KeyCode::Char(c) => {
                let at = self.byte_index(self.cursor);
                self.content.insert(at, c);
                self.cursor += 1;
            }
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => {
                if self.cursor < self.len_chars() {
                    let at = self.byte_index(self.cursor);
                    self.content.remove(at);
                }
            }
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => self.cursor = (self.cursor + 1).min(self.len_chars()),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.len_chars(),
            _ => return false,
        }
        true
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer, focused: bool) {
        let border = if focused { Color::Cyan } else { Color::DarkGray };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(format!(" {} ", self.label));
        let inner = block.inner(area);
        block.render(area, buf);

        if self.content.is_empty() && !self.placeholder.is_empty() && !focused {
            Paragraph::new(self.placeholder.as_str())
                .style(Style::default().fg(Color::DarkGray))
                .render(inner, buf);
            return;
        }
        if !focused {
            Paragraph::new(self.content.as_str()).render(inner, buf);
            return;
        }

        let (before, after) = self.content.split_at(self.byte_index(self.cursor));
        let mut rest = after.chars();
        let under_cursor = rest.next().unwrap_or(' ');
        let line = Line::from(vec![
            Span::raw(before),
            Span::styled(
                under_cursor.to_string(),
                Style::default()
                    .bg(Color::White)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(rest.as_str()),
        ]);
        Paragraph::new(line).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(input: &mut TextInput, code: KeyCode) {
        input.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_edits_multibyte_content() {
        let mut input = TextInput::new("Name").with_initial("Käse");
        assert_eq!(input.cursor, 4);

        press(&mut input, KeyCode::Left);
        press(&mut input, KeyCode::Left);
        press(&mut input, KeyCode::Backspace);
        assert_eq!(input.content(), "Kse");

        press(&mut input, KeyCode::Char('ä'));
        assert_eq!(input.content(), "Käse");

        press(&mut input, KeyCode::Home);
        press(&mut input, KeyCode::Delete);
        assert_eq!(input.content(), "äse");
    }

    #[test]
    fn test_paste_flattens_lines() {
        let mut input = TextInput::new("Code");
        input.insert_text("400638\r\n1333931");
        assert_eq!(input.content(), "400638  1333931");
    }

    #[test]
    fn test_ctrl_w_deletes_previous_word() {
        let mut input = TextInput::new("Name").with_initial("oat milk  ");
        input.handle_key(KeyEvent::new(KeyCode::Char('w'), KeyModifiers::CONTROL));
        assert_eq!(input.content(), "oat ");
    }

    #[test]
    fn test_unknown_ctrl_keys_bubble_up() {
        let mut input = TextInput::new("Name");
        let handled = input.handle_key(KeyEvent::new(KeyCode::Char('n'), KeyModifiers::CONTROL));
        assert!(!handled);
        assert!(input.is_empty());
    }
}

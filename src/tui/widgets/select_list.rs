//! Single-select list with optional per-entry hints and disabled entries.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, StatefulWidget},
};

/// Outcome of a key press on the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectAction {
    None,
    /// Enter on an enabled entry
    Confirm(usize),
    Cancel,
}

#[derive(Debug, Clone)]
struct Entry {
    label: String,
    hint: String,
    enabled: bool,
}

#[derive(Debug, Clone)]
pub struct SelectList {
    entries: Vec<Entry>,
    state: ListState,
    title: String,
}

impl SelectList {
    pub fn new<T: ToString>(labels: Vec<T>) -> Self {
        let entries = labels
            .into_iter()
            .map(|label| Entry {
                label: label.to_string(),
                hint: String::new(),
                enabled: true,
            })
            .collect();
        let mut list = Self {
            entries,
            state: ListState::default(),
            title: String::new(),
        };
        list.select_first_enabled();
        list
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Adds a dimmed hint after the label of entry `index`.
    #[must_use]
    pub fn with_hint(mut self, index: usize, hint: impl Into<String>) -> Self {
        if let Some(entry) = self.entries.get_mut(index) {
            entry.hint = hint.into();
        }
        self
    }

    /// Shows entry `index` but makes it unselectable.
    #[must_use]
    pub fn with_disabled(mut self, index: usize) -> Self {
        if let Some(entry) = self.entries.get_mut(index) {
            entry.enabled = false;
        }
        if self.state.selected() == Some(index) {
            self.select_first_enabled();
        }
        self
    }

    fn select_first_enabled(&mut self) {
        let first = self.entries.iter().position(|e| e.enabled);
        self.state.select(first);
    }

    pub const fn selected_index(&self) -> Option<usize> {
        self.state.selected()
    }

    pub fn select(&mut self, index: usize) {
        if self.entries.get(index).is_some_and(|e| e.enabled) {
            self.state.select(Some(index));
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Moves by `step` (wrapping), skipping disabled entries.
    fn step(&mut self, forward: bool) {
        let len = self.entries.len();
        if len == 0 {
            return;
        }
        let current = self.state.selected().unwrap_or(0);
        let next = (1..=len)
            .map(|offset| {
                if forward {
                    (current + offset) % len
                } else {
                    (current + len - offset) % len
                }
            })
            .find(|&i| self.entries[i].enabled);
        if next.is_some() {
            self.state.select(next);
        }
    }

    pub fn select_next(&mut self) {
        self.step(true);
    }

    pub fn select_previous(&mut self) {
        self.step(false);
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> SelectAction {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.select_previous(),
            KeyCode::Down | KeyCode::Char('j') => self.select_next(),
            KeyCode::Enter => {
                if let Some(index) = self.state.selected() {
                    if self.entries[index].enabled {
                        return SelectAction::Confirm(index);
                    }
                }
            }
            KeyCode::Esc => return SelectAction::Cancel,
            _ => {}
        }
        SelectAction::None
    }

    pub fn render(&mut self, area: Rect, buf: &mut Buffer, focused: bool) {
        let border = if focused { Color::Cyan } else { Color::DarkGray };
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border));
        if !self.title.is_empty() {
            block = block.title(format!(" {} ", self.title));
        }

        let selected = self.state.selected();
        let items: Vec<ListItem> = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let is_current = selected == Some(i) && entry.enabled;
                let style = if !entry.enabled {
                    Style::default().fg(Color::DarkGray)
                } else if is_current && focused {
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                let mut spans = vec![
                    Span::styled(if is_current { "> " } else { "  " }, style),
                    Span::styled(entry.label.clone(), style),
                ];
                if !entry.hint.is_empty() {
                    spans.push(Span::styled(
                        format!("  {}", entry.hint),
                        Style::default().fg(Color::DarkGray),
                    ));
                }
                ListItem::new(Line::from(spans))
            })
            .collect();

        StatefulWidget::render(List::new(items).block(block), area, buf, &mut self.state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_disabled_entries_are_skipped() {
        let mut list = SelectList::new(vec!["Text", "Voice", "Photo"]).with_disabled(1);
        assert_eq!(list.selected_index(), Some(0));

        list.select_next();
        assert_eq!(list.selected_index(), Some(2));
        list.select_next();
        assert_eq!(list.selected_index(), Some(0));

        list.select(1);
        assert_eq!(list.selected_index(), Some(0));
    }

    #[test]
    fn test_first_enabled_is_preselected() {
        let list = SelectList::new(vec!["Voice", "Text"]).with_disabled(0);
        assert_eq!(list.selected_index(), Some(1));
    }

    #[test]
    fn test_enter_confirms_current() {
        let mut list = SelectList::new(vec!["a", "b"]);
        list.handle_key(key(KeyCode::Down));
        assert_eq!(list.handle_key(key(KeyCode::Enter)), SelectAction::Confirm(1));
        assert_eq!(list.handle_key(key(KeyCode::Esc)), SelectAction::Cancel);
    }
}

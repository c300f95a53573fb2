//! Review table for staged records.
//!
//! One row per record, one column per [`Column`] the record type declares,
//! plus a checkbox column mirroring the wizard's selection. The cursor moves
//! over cells so the current field can be edited in place.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, StatefulWidget, Table, TableState, Widget},
};

use crate::wizard::{Column, Selection, StagedRecord};

#[derive(Debug, Default)]
pub struct ReviewTable {
    row: usize,
    column: usize,
    state: TableState,
}

impl ReviewTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn row(&self) -> usize {
        self.row
    }

    /// Record under the cursor.
    pub fn current<'r, R: StagedRecord>(&self, records: &'r [R]) -> Option<&'r R> {
        records.get(self.row)
    }

    /// Column under the cursor.
    pub fn current_column<R: StagedRecord>(&self) -> Option<Column> {
        R::columns().get(self.column).copied()
    }

    /// Keeps the cursor inside a list that may have shrunk.
    pub fn clamp(&mut self, len: usize) {
        self.row = self.row.min(len.saturating_sub(1));
    }

    /// Moves the cursor. Returns `false` for keys the table does not use.
    pub fn handle_key<R: StagedRecord>(&mut self, key: KeyEvent, len: usize) -> bool {
        let last_row = len.saturating_sub(1);
        let last_column = R::columns().len().saturating_sub(1);
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.row = self.row.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => self.row = (self.row + 1).min(last_row),
            KeyCode::Left | KeyCode::Char('h') => self.column = self.column.saturating_sub(1),
            KeyCode::Right | KeyCode::Char('l') => {
                self.column = (self.column + 1).min(last_column);
            }
            KeyCode::Home | KeyCode::Char('g') => self.row = 0,
            KeyCode::End | KeyCode::Char('G') => self.row = last_row,
            _ => return false,
        }
        true
    }

    pub fn render<R: StagedRecord>(
        &mut self,
        area: Rect,
        buf: &mut Buffer,
        records: &[R],
        selection: &Selection,
        focused: bool,
    ) {
        let border = if focused { Color::Cyan } else { Color::DarkGray };
        let title = if selection.is_empty() {
            format!(" {} staged ", records.len())
        } else {
            format!(" {} staged, {} selected ", records.len(), selection.len())
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(title);

        if records.is_empty() {
            Paragraph::new("Nothing left to import. Press Ctrl+P to go back.")
                .style(Style::default().fg(Color::DarkGray))
                .block(block)
                .render(area, buf);
            return;
        }
        self.clamp(records.len());

        let columns = R::columns();
        let header = Row::new(
            std::iter::once(Cell::from(""))
                .chain(columns.iter().map(|c| Cell::from(c.label)))
                .collect::<Vec<_>>(),
        )
        .style(Style::default().add_modifier(Modifier::BOLD));

        let rows = records.iter().map(|record| {
            let mark = if selection.contains(record.id()) { "[x]" } else { "[ ]" };
            let cells = std::iter::once(Cell::from(mark)).chain(columns.iter().map(|column| {
                let value = record.field(column.key).unwrap_or_default();
                let style = if column.editable {
                    Style::default()
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                Cell::from(value).style(style)
            }));
            Row::new(cells.collect::<Vec<_>>())
        });

        let widths: Vec<Constraint> = std::iter::once(Constraint::Length(3))
            .chain(columns.iter().map(|c| Constraint::Min(c.width)))
            .collect();

        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .column_spacing(1)
            .row_highlight_style(Style::default().add_modifier(Modifier::BOLD))
            .cell_highlight_style(if focused {
                Style::default().bg(Color::Cyan).fg(Color::Black)
            } else {
                Style::default()
            });

        self.state.select(Some(self.row));
        self.state.select_column(Some(self.column + 1));
        StatefulWidget::render(table, area, buf, &mut self.state);
    }
}

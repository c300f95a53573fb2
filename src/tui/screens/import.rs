//! Import wizard screen.
//!
//! Drives an [`ImportWizard`] through method selection, input, review, and
//! completion. Host calls (conversions, barcode lookups, saves) run on the
//! tokio runtime between two frames, so "Working..." is drawn before the
//! screen blocks on them.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};
use tokio::runtime::Handle;
use unicode_width::UnicodeWidthStr;

use crate::{
    tui::{
        event::TuiEvent,
        widgets::{ReviewTable, SelectAction, SelectList, TextAreaWidget, TextInput},
        AppResult, TuiApp,
    },
    wizard::{
        Availability, Column, ImportHost, ImportMethod, ImportWizard, MethodDescriptor,
        MethodInput, Phase, ScanState, StagedRecord, WizardError, WizardExit,
    },
};

/// What happened during an interactive import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportSummary {
    /// Records saved over all commits of the session
    pub committed: usize,
    /// Left through "view items"
    pub view_items: bool,
}

/// A named list of quick-filter keywords.
pub type QuickFilter = (String, Vec<String>);

/// Host call scheduled for the next event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    Submit,
    Scan,
    Commit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Status {
    Info(String),
    Error(String),
}

impl From<WizardError> for Status {
    fn from(err: WizardError) -> Self {
        Self::Error(err.to_string())
    }
}

enum Overlay {
    None,
    Edit {
        id: String,
        column: Column,
        input: TextInput,
    },
    QuickFilter(SelectList),
}

/// Per-method input widgets, rebuilt whenever the input step is entered.
struct InputWidgets<'a> {
    text: TextAreaWidget<'a>,
    line: TextInput,
    import_types: SelectList,
    types_focused: bool,
}

impl InputWidgets<'_> {
    fn for_method<P>(method: Option<ImportMethod>, input: Option<&MethodInput<P>>) -> Self {
        let line = match method {
            Some(ImportMethod::Voice) => {
                TextInput::new("Audio file").with_placeholder("Path to a recording, or Ctrl+R to record")
            }
            Some(ImportMethod::Photo) => {
                TextInput::new("Add image").with_placeholder("Type or drop image paths")
            }
            Some(ImportMethod::Barcode) => {
                TextInput::new("Barcode").with_placeholder("Type a code, or Ctrl+R to scan")
            }
            Some(ImportMethod::DigitalReceipt) => {
                TextInput::new("Receipt URL").with_placeholder("https://...")
            }
            _ => TextInput::new("Input"),
        };
        let labels: Vec<String> = match input {
            Some(MethodInput::Photo(entry)) => {
                entry.import_types().iter().map(|t| t.label.clone()).collect()
            }
            _ => Vec::new(),
        };
        Self {
            text: TextAreaWidget::new("Shopping list"),
            line,
            import_types: SelectList::new(labels).with_title("Photo shows"),
            types_focused: method == Some(ImportMethod::Photo),
        }
    }
}

/// Interactive import wizard.
pub struct ImportScreen<'a, H: ImportHost> {
    wizard: ImportWizard<H>,
    runtime: Handle,
    quick_filters: Vec<QuickFilter>,
    descriptors: Vec<MethodDescriptor>,
    methods: SelectList,
    widgets: InputWidgets<'a>,
    table: ReviewTable,
    overlay: Overlay,
    pending: Option<Pending>,
    status: Option<Status>,
    committed: usize,
    last_commit: usize,
}

fn method_list(descriptors: &[MethodDescriptor]) -> SelectList {
    let mut list = SelectList::new(descriptors.iter().map(|d| d.label.clone()).collect())
        .with_title("How do you want to add items?");
    for (i, descriptor) in descriptors.iter().enumerate() {
        let hint = match descriptor.availability {
            Availability::Available => descriptor.description.clone(),
            Availability::Disabled => format!("{} (not configured)", descriptor.description),
            Availability::ComingSoon => "coming soon".to_string(),
        };
        list = list.with_hint(i, hint);
        if !descriptor.is_selectable() {
            list = list.with_disabled(i);
        }
    }
    list
}

fn describe_scan<P: std::fmt::Display>(state: &ScanState<P>) -> Status {
    match state {
        ScanState::Idle => Status::Info(String::new()),
        ScanState::Found { product, .. } => {
            Status::Info(format!("Found {product}. Press Ctrl+A to add it."))
        }
        ScanState::NotFound { code } => Status::Error(format!(
            "No product found for {code}. Scan another code or add it as text."
        )),
        ScanState::Failed { message, .. } => Status::Error(message.clone()),
    }
}

/// Splits shell-escaped paths as terminals insert them on file drop:
/// separated by unescaped whitespace, with `\ ` standing for a space.
fn split_dropped_paths(input: &str) -> Vec<String> {
    let mut paths = Vec::new();
    let mut current = String::new();
    let mut chars = input.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => current.push(chars.next().unwrap_or('\\')),
            c if c.is_whitespace() => {
                if !current.is_empty() {
                    paths.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        paths.push(current);
    }
    paths
}

impl<'a, H: ImportHost> ImportScreen<'a, H> {
    pub fn new(wizard: ImportWizard<H>, runtime: Handle, quick_filters: Vec<QuickFilter>) -> Self {
        let descriptors = wizard.methods();
        let methods = method_list(&descriptors);
        Self {
            wizard,
            runtime,
            quick_filters,
            descriptors,
            methods,
            widgets: InputWidgets::for_method::<H::Product>(None, None),
            table: ReviewTable::new(),
            overlay: Overlay::None,
            pending: None,
            status: None,
            committed: 0,
            last_commit: 0,
        }
    }

    pub const fn wizard(&self) -> &ImportWizard<H> {
        &self.wizard
    }

    const fn is_working(&self) -> bool {
        self.pending.is_some() || self.wizard.is_busy()
    }

    fn info(&mut self, message: impl Into<String>) {
        self.status = Some(Status::Info(message.into()));
    }

    fn error(&mut self, message: impl ToString) {
        self.status = Some(Status::Error(message.to_string()));
    }

    fn summary(&self, view_items: bool) -> ImportSummary {
        ImportSummary {
            committed: self.committed,
            view_items,
        }
    }

    /// Esc/Ctrl+C: a session that saved something still reports it.
    fn leave(&self) -> AppResult<ImportSummary> {
        if self.committed > 0 {
            AppResult::Done(self.summary(false))
        } else {
            AppResult::Cancelled
        }
    }

    fn reset_input_widgets(&mut self) {
        self.widgets = InputWidgets::for_method(self.wizard.selected_method(), self.wizard.input());
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    fn go_back(&mut self) {
        if !self.wizard.back() {
            return;
        }
        self.status = None;
        match self.wizard.phase() {
            Phase::Method => self.methods = method_list(&self.descriptors),
            Phase::Input => self.reset_input_widgets(),
            Phase::Review | Phase::Complete => {}
        }
    }

    fn go_next(&mut self) -> Option<AppResult<ImportSummary>> {
        match self.wizard.phase() {
            Phase::Method => {
                if let Some(index) = self.methods.selected_index() {
                    self.choose_method(index);
                }
            }
            Phase::Input => {
                self.sync_input();
                self.pending = Some(Pending::Submit);
            }
            Phase::Review => {
                if self.wizard.can_commit() {
                    self.pending = Some(Pending::Commit);
                } else {
                    self.error(WizardError::NothingToCommit);
                }
            }
            Phase::Complete => self.add_more(),
        }
        None
    }

    fn choose_method(&mut self, index: usize) {
        let Some(descriptor) = self.descriptors.get(index) else {
            return;
        };
        let label = descriptor.label.clone();
        if self.wizard.select_method(descriptor.method) {
            self.reset_input_widgets();
            self.status = None;
        } else {
            self.error(format!("{label} is not available"));
        }
    }

    fn add_more(&mut self) {
        if let Err(err) = self.wizard.add_more() {
            self.error(err);
            return;
        }
        self.descriptors = self.wizard.methods();
        self.methods = method_list(&self.descriptors);
        self.table = ReviewTable::new();
        self.status = None;
    }

    /// Copies widget contents into the active collector.
    fn sync_input(&mut self) {
        let Some(input) = self.wizard.input_mut() else {
            return;
        };
        match input {
            MethodInput::Text(entry) => entry.set_text(self.widgets.text.content()),
            MethodInput::Barcode(entry) => entry.set_code(self.widgets.line.content().trim()),
            MethodInput::Receipt(entry) => entry.set_url(self.widgets.line.content().trim()),
            MethodInput::Voice(_) | MethodInput::Photo(_) => {}
        }
    }

    fn run_pending(&mut self, pending: Pending) {
        let runtime = self.runtime.clone();
        let status = match pending {
            Pending::Submit => match runtime.block_on(self.wizard.submit()) {
                Ok(count) => {
                    self.table = ReviewTable::new();
                    Status::Info(format!("{count} item(s) ready for review"))
                }
                Err(err) => err.into(),
            },
            Pending::Scan => match runtime.block_on(self.wizard.scan()) {
                Ok(state) => describe_scan(state),
                Err(err) => err.into(),
            },
            Pending::Commit => match runtime.block_on(self.wizard.commit()) {
                Ok(count) => {
                    self.committed += count;
                    self.last_commit = count;
                    Status::Info(format!("Saved {count} item(s)"))
                }
                Err(err) => err.into(),
            },
        };
        self.status = Some(status);
    }

    // =========================================================================
    // Key handling
    // =========================================================================

    fn handle_key(&mut self, key: KeyEvent) -> Option<AppResult<ImportSummary>> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl && key.code == KeyCode::Char('c') {
            return Some(self.leave());
        }
        if !matches!(self.overlay, Overlay::None) {
            self.handle_overlay_key(key);
            return None;
        }
        if key.code == KeyCode::Esc {
            return Some(self.leave());
        }
        if ctrl && key.code == KeyCode::Char('p') {
            self.go_back();
            return None;
        }
        if ctrl && key.code == KeyCode::Char('n') {
            return self.go_next();
        }

        match self.wizard.phase() {
            Phase::Method => self.handle_method_key(key),
            Phase::Input => self.handle_input_key(key),
            Phase::Review => self.handle_review_key(key),
            Phase::Complete => return self.handle_complete_key(key),
        }
        None
    }

    fn handle_method_key(&mut self, key: KeyEvent) {
        if let SelectAction::Confirm(index) = self.methods.handle_key(key) {
            self.choose_method(index);
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) {
        match self.wizard.selected_method() {
            Some(ImportMethod::Text) => {
                self.widgets.text.handle_key(key);
            }
            Some(ImportMethod::Voice) => self.handle_voice_key(key),
            Some(ImportMethod::Photo) => self.handle_photo_key(key),
            Some(ImportMethod::Barcode) => self.handle_barcode_key(key),
            Some(ImportMethod::DigitalReceipt) => {
                if key.code == KeyCode::Enter {
                    self.sync_input();
                    self.pending = Some(Pending::Submit);
                } else {
                    self.widgets.line.handle_key(key);
                }
            }
            None => {}
        }
    }

    fn handle_voice_key(&mut self, key: KeyEvent) {
        let Some(MethodInput::Voice(entry)) = self.wizard.input_mut() else {
            return;
        };
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let status = match key.code {
            KeyCode::Char('r') if ctrl => {
                if entry.is_recording() {
                    match entry.stop_recording() {
                        Ok(clip) => Some(Status::Info(format!(
                            "Recorded {}. Press Ctrl+N to transcribe.",
                            clip.path.display()
                        ))),
                        Err(err) => Some(Status::Error(err.to_string())),
                    }
                } else {
                    match entry.start_recording() {
                        Ok(()) => Some(Status::Info("Recording... press Ctrl+R to stop".into())),
                        Err(err) => Some(Status::Error(err.to_string())),
                    }
                }
            }
            KeyCode::Enter => {
                let path = split_dropped_paths(self.widgets.line.content()).into_iter().next();
                path.map(|path| {
                    entry.use_file(&path);
                    self.widgets.line.clear();
                    Status::Info(format!("Using {path}"))
                })
            }
            _ => {
                self.widgets.line.handle_key(key);
                None
            }
        };
        if status.is_some() {
            self.status = status;
        }
    }

    fn handle_photo_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Tab || key.code == KeyCode::BackTab {
            self.widgets.types_focused = !self.widgets.types_focused;
            return;
        }
        let Some(MethodInput::Photo(entry)) = self.wizard.input_mut() else {
            return;
        };

        if self.widgets.types_focused {
            let action = self.widgets.import_types.handle_key(key);
            if let Some(index) = self.widgets.import_types.selected_index() {
                if let Some(type_key) = entry.import_types().get(index).map(|t| t.key.clone()) {
                    if let Err(err) = entry.set_import_type(&type_key) {
                        self.status = Some(Status::Error(err.to_string()));
                    }
                }
            }
            if matches!(action, SelectAction::Confirm(_)) {
                self.widgets.types_focused = false;
            }
            return;
        }

        match key.code {
            KeyCode::Enter => {
                for path in split_dropped_paths(self.widgets.line.content()) {
                    entry.add_file(path);
                }
                self.widgets.line.clear();
            }
            KeyCode::Backspace if self.widgets.line.is_empty() => {
                if let Some(last) = entry.files().len().checked_sub(1) {
                    entry.remove_file(last);
                }
            }
            _ => {
                self.widgets.line.handle_key(key);
            }
        }
    }

    fn handle_barcode_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Enter => {
                self.sync_input();
                self.pending = Some(Pending::Scan);
            }
            KeyCode::Char('a') if ctrl => self.add_scanned(),
            KeyCode::Char('r') if ctrl => self.toggle_camera(),
            _ => {
                self.widgets.line.handle_key(key);
            }
        }
    }

    fn add_scanned(&mut self) {
        let name = match self.wizard.input() {
            Some(MethodInput::Barcode(entry)) => entry.state().product().map(ToString::to_string),
            _ => None,
        };
        match self.wizard.add_scanned() {
            Ok(count) => {
                self.widgets.line.clear();
                self.info(format!(
                    "Added {}. {count} item(s) scanned, Ctrl+N to review.",
                    name.unwrap_or_default()
                ));
            }
            Err(err) => self.error(err),
        }
    }

    fn toggle_camera(&mut self) {
        let Some(MethodInput::Barcode(entry)) = self.wizard.input_mut() else {
            return;
        };
        if entry.is_scanning() {
            match entry.stop_camera() {
                Ok(code) => {
                    self.widgets.line.set_content(code);
                    self.pending = Some(Pending::Scan);
                }
                Err(err) => self.status = Some(Status::Error(err.to_string())),
            }
        } else {
            self.status = Some(match entry.start_camera() {
                Ok(()) => Status::Info("Scanning... press Ctrl+R when the code was read".into()),
                Err(err) => Status::Error(err.to_string()),
            });
        }
    }

    fn current_id(&self) -> Option<String> {
        self.table
            .current(self.wizard.staged())
            .map(|r| r.id().to_string())
    }

    fn handle_review_key(&mut self, key: KeyEvent) {
        if self
            .table
            .handle_key::<H::Record>(key, self.wizard.staged().len())
        {
            return;
        }
        match key.code {
            KeyCode::Char(' ') => {
                if let Some(id) = self.current_id() {
                    self.wizard.toggle_selected(&id);
                }
            }
            KeyCode::Char('a') => {
                if self.wizard.selection().len() == self.wizard.staged().len() {
                    self.wizard.clear_selection();
                } else {
                    self.wizard.select_all();
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(id) = self.current_id() {
                    match self.wizard.delete_record(&id) {
                        Ok(record) => self.info(format!("Removed {}", record.display_name())),
                        Err(err) => self.error(err),
                    }
                }
            }
            KeyCode::Char('D') => match self.wizard.delete_selected() {
                Ok(0) => self.error("No items selected (Space selects)"),
                Ok(count) => self.info(format!("Removed {count} item(s)")),
                Err(err) => self.error(err),
            },
            KeyCode::Enter | KeyCode::Char('e') => self.open_editor(),
            KeyCode::Char('f') => self.open_quick_filters(),
            _ => {}
        }
        self.table.clamp(self.wizard.staged().len());
    }

    fn open_editor(&mut self) {
        let Some(record) = self.table.current(self.wizard.staged()) else {
            return;
        };
        let Some(column) = self.table.current_column::<H::Record>() else {
            return;
        };
        if !column.editable {
            self.error(format!("{} cannot be edited", column.label));
            return;
        }
        let value = record.field(column.key).unwrap_or_default();
        self.overlay = Overlay::Edit {
            id: record.id().to_string(),
            column,
            input: TextInput::new(column.label).with_initial(value),
        };
    }

    fn open_quick_filters(&mut self) {
        if self.quick_filters.is_empty() {
            self.error("No quick filters configured");
            return;
        }
        let mut list = SelectList::new(self.quick_filters.iter().map(|(n, _)| n.clone()).collect())
            .with_title("Remove items matching");
        for (i, (_, keywords)) in self.quick_filters.iter().enumerate() {
            list = list.with_hint(i, keywords.join(", "));
        }
        self.overlay = Overlay::QuickFilter(list);
    }

    fn handle_overlay_key(&mut self, key: KeyEvent) {
        match &mut self.overlay {
            Overlay::None => {}
            Overlay::Edit { id, column, input } => match key.code {
                KeyCode::Esc => self.overlay = Overlay::None,
                KeyCode::Enter => {
                    match self.wizard.edit_field(id, column.key, input.content()) {
                        Ok(()) => {
                            self.status = Some(Status::Info(format!("Updated {}", column.label)));
                            self.overlay = Overlay::None;
                        }
                        Err(err) => self.status = Some(err.into()),
                    }
                }
                _ => {
                    input.handle_key(key);
                }
            },
            Overlay::QuickFilter(list) => match list.handle_key(key) {
                SelectAction::Cancel => self.overlay = Overlay::None,
                SelectAction::Confirm(index) => {
                    self.overlay = Overlay::None;
                    self.apply_quick_filter(index);
                }
                SelectAction::None => {}
            },
        }
    }

    fn apply_quick_filter(&mut self, index: usize) {
        let Some((name, keywords)) = self.quick_filters.get(index).cloned() else {
            return;
        };
        match self.wizard.quick_filter(&keywords) {
            Ok(0) => self.info(format!("No {name} found")),
            Ok(removed) => self.info(format!("Removed {removed} item(s) matching {name}")),
            Err(err) => self.error(err),
        }
        self.table.clamp(self.wizard.staged().len());
    }

    fn handle_complete_key(&mut self, key: KeyEvent) -> Option<AppResult<ImportSummary>> {
        match key.code {
            KeyCode::Char('a') | KeyCode::Enter => self.add_more(),
            KeyCode::Char('v') => match self.wizard.view_items() {
                Ok(WizardExit::ViewItems) => return Some(AppResult::Done(self.summary(true))),
                Err(err) => self.error(err),
            },
            KeyCode::Char('q') => return Some(AppResult::Done(self.summary(false))),
            _ => {}
        }
        None
    }

    fn handle_paste(&mut self, text: &str) {
        if let Overlay::Edit { input, .. } = &mut self.overlay {
            input.insert_text(text);
            return;
        }
        if self.wizard.phase() != Phase::Input {
            return;
        }
        match self.wizard.input_mut() {
            Some(MethodInput::Text(_)) => self.widgets.text.insert_text(text),
            Some(MethodInput::Photo(entry)) => {
                let paths = split_dropped_paths(text);
                let count = paths.len();
                for path in paths {
                    entry.add_file(path);
                }
                self.status = Some(Status::Info(format!("Added {count} file(s)")));
            }
            Some(MethodInput::Voice(entry)) => {
                if let Some(path) = split_dropped_paths(text).into_iter().next() {
                    entry.use_file(&path);
                    self.status = Some(Status::Info(format!("Using {path}")));
                }
            }
            Some(MethodInput::Barcode(_) | MethodInput::Receipt(_)) => {
                self.widgets.line.insert_text(text.trim());
            }
            None => {}
        }
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let current = self.wizard.phase();
        let mut indicators = Vec::new();
        for (i, phase) in Phase::ALL.iter().enumerate() {
            let style = match phase.index().cmp(&current.index()) {
                std::cmp::Ordering::Equal => Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
                std::cmp::Ordering::Less => Style::default().fg(Color::Green),
                std::cmp::Ordering::Greater => Style::default().fg(Color::DarkGray),
            };
            if i > 0 {
                indicators.push(Span::styled(" > ", Style::default().fg(Color::DarkGray)));
            }
            indicators.push(Span::styled(phase.name(), style));
        }

        let mode = self
            .wizard
            .selected_method()
            .and_then(|m| self.descriptors.iter().find(|d| d.method == m))
            .map_or_else(|| "Import".to_string(), |d| format!("Import: {}", d.label));
        let header = Paragraph::new(Line::from(indicators)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(format!(
                    " {mode} - Step {} of {} ",
                    current.index() + 1,
                    Phase::ALL.len()
                )),
        );
        frame.render_widget(header, area);
    }

    fn render_input(&mut self, frame: &mut Frame, area: Rect) {
        match self.wizard.selected_method() {
            Some(ImportMethod::Text) => self.widgets.text.render(area, frame, true),
            Some(ImportMethod::Voice) => self.render_voice(frame, area),
            Some(ImportMethod::Photo) => self.render_photo(frame, area),
            Some(ImportMethod::Barcode) => self.render_barcode(frame, area),
            Some(ImportMethod::DigitalReceipt) => {
                let [input, hint] =
                    Layout::vertical([Constraint::Length(3), Constraint::Min(1)]).areas(area);
                self.widgets.line.render(input, frame.buffer_mut(), true);
                frame.render_widget(
                    Paragraph::new("Paste the link from your store's app or e-mail receipt.")
                        .style(Style::default().fg(Color::DarkGray)),
                    hint,
                );
            }
            None => {}
        }
    }

    fn render_voice(&self, frame: &mut Frame, area: Rect) {
        let Some(MethodInput::Voice(entry)) = self.wizard.input() else {
            return;
        };
        let [info, input] = Layout::vertical([Constraint::Min(3), Constraint::Length(3)]).areas(area);

        let mut lines = Vec::new();
        if entry.is_recording() {
            lines.push(Line::styled(
                "● Recording",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ));
        } else if !entry.can_record() {
            lines.push(Line::styled(
                "No microphone configured; use an existing audio file.",
                Style::default().fg(Color::DarkGray),
            ));
        }
        match entry.clip() {
            Some(clip) => lines.push(Line::from(format!("Recording: {}", clip.path.display()))),
            None => lines.push(Line::from("No recording yet")),
        }
        frame.render_widget(
            Paragraph::new(lines).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray))
                    .title(" Voice "),
            ),
            info,
        );
        self.widgets.line.render(input, frame.buffer_mut(), true);
    }

    fn render_photo(&mut self, frame: &mut Frame, area: Rect) {
        let Some(MethodInput::Photo(entry)) = self.wizard.input() else {
            return;
        };
        let [types, right] =
            Layout::horizontal([Constraint::Percentage(35), Constraint::Min(20)]).areas(area);
        let [files, input] = Layout::vertical([Constraint::Min(3), Constraint::Length(3)]).areas(right);

        let focused = self.widgets.types_focused;
        self.widgets
            .import_types
            .render(types, frame.buffer_mut(), focused);

        let title = if entry.supports_multiple() {
            " Images "
        } else {
            " Image (one) "
        };
        let items: Vec<ListItem> = entry
            .files()
            .iter()
            .enumerate()
            .map(|(i, path)| ListItem::new(format!("{}. {}", i + 1, path.display())))
            .collect();
        frame.render_widget(
            List::new(items).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray))
                    .title(title),
            ),
            files,
        );
        self.widgets.line.render(input, frame.buffer_mut(), !focused);
    }

    fn render_barcode(&self, frame: &mut Frame, area: Rect) {
        let Some(MethodInput::Barcode(entry)) = self.wizard.input() else {
            return;
        };
        let [input, scanned] =
            Layout::vertical([Constraint::Length(3), Constraint::Min(3)]).areas(area);
        self.widgets.line.render(input, frame.buffer_mut(), true);

        let mut title = format!(" Scanned ({}) ", self.wizard.staged().len());
        if entry.is_scanning() {
            title = format!(" Scanned ({}) - camera active ", self.wizard.staged().len());
        }
        let items: Vec<ListItem> = self
            .wizard
            .staged()
            .iter()
            .map(|r| ListItem::new(format!("+ {}", r.display_name())))
            .collect();
        frame.render_widget(
            List::new(items).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray))
                    .title(title),
            ),
            scanned,
        );
    }

    fn render_complete(&self, frame: &mut Frame, area: Rect) {
        let lines = vec![
            Line::styled(
                format!("✓ Saved {} item(s)", self.last_commit),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
            Line::from(""),
            Line::from(vec![
                Span::styled("a", Style::default().fg(Color::Cyan)),
                Span::raw(" Add more   "),
                Span::styled("v", Style::default().fg(Color::Cyan)),
                Span::raw(" View items   "),
                Span::styled("q", Style::default().fg(Color::Cyan)),
                Span::raw(" Done"),
            ]),
        ];
        frame.render_widget(
            Paragraph::new(lines).block(Block::default().borders(Borders::ALL)),
            area,
        );
    }

    fn render_overlay(&mut self, frame: &mut Frame, area: Rect) {
        match &mut self.overlay {
            Overlay::None => {}
            Overlay::Edit { input, column, .. } => {
                let width = u16::try_from(input.content().width().max(column.label.width()))
                    .unwrap_or(u16::MAX)
                    .saturating_add(6)
                    .max(30)
                    .min(area.width);
                let popup = centered_rect(width, 3, area);
                frame.render_widget(Clear, popup);
                input.render(popup, frame.buffer_mut(), true);
            }
            Overlay::QuickFilter(list) => {
                let height = u16::try_from(list.len()).unwrap_or(u16::MAX).saturating_add(2);
                let popup = centered_rect(50.min(area.width), height.min(area.height), area);
                frame.render_widget(Clear, popup);
                list.render(popup, frame.buffer_mut(), true);
            }
        }
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let line = if self.is_working() {
            Line::styled("Working...", Style::default().fg(Color::Yellow))
        } else {
            match &self.status {
                Some(Status::Info(message)) => {
                    Line::styled(message.as_str(), Style::default().fg(Color::Green))
                }
                Some(Status::Error(message)) => {
                    Line::styled(message.as_str(), Style::default().fg(Color::Red))
                }
                None => Line::from(""),
            }
        };
        frame.render_widget(Paragraph::new(line).wrap(Wrap { trim: true }), area);
    }

    fn help_panel_spans(&self) -> Vec<Span<'static>> {
        let key = Style::default().fg(Color::Cyan);
        let pairs: &[(&'static str, &'static str)] = match self.wizard.phase() {
            Phase::Method => &[("Enter", " Select")],
            Phase::Input => match self.wizard.selected_method() {
                Some(ImportMethod::Voice) => &[("Ctrl+R", " Record  "), ("Enter", " Use file")],
                Some(ImportMethod::Photo) => {
                    &[("Tab", " Switch  "), ("Enter", " Add  "), ("Drop", " Add")]
                }
                Some(ImportMethod::Barcode) => &[
                    ("Enter", " Look up  "),
                    ("Ctrl+A", " Add  "),
                    ("Ctrl+R", " Camera"),
                ],
                _ => &[],
            },
            Phase::Review => &[
                ("Enter", " Edit  "),
                ("Space", " Select  "),
                ("d", " Delete  "),
                ("D", " Delete selected  "),
                ("f", " Filter"),
            ],
            Phase::Complete => &[],
        };
        pairs
            .iter()
            .flat_map(|(k, text)| [Span::styled(*k, key), Span::raw(*text)])
            .collect()
    }

    fn render_help(&self, frame: &mut Frame, area: Rect) {
        let phase = self.wizard.phase();
        let can_go_back = matches!(phase, Phase::Input | Phase::Review);
        let can_go_next = match phase {
            Phase::Review => self.wizard.can_commit(),
            _ => true,
        };
        let next_label = match phase {
            Phase::Method => "Select",
            Phase::Input => "Convert",
            Phase::Review => "Import",
            Phase::Complete => "Add more",
        };

        let key_on = Style::default().fg(Color::Cyan);
        let key_off = Style::default().fg(Color::DarkGray);
        let txt_off = Style::default().fg(Color::DarkGray);
        let nav_spans = vec![
            Span::styled("Ctrl+P", if can_go_back { key_on } else { key_off }),
            Span::styled(
                " Back  ",
                if can_go_back { Style::default() } else { txt_off },
            ),
            Span::styled("Ctrl+N", if can_go_next { key_on } else { key_off }),
            Span::styled(
                format!(" {next_label}  "),
                if can_go_next { Style::default() } else { txt_off },
            ),
            Span::styled("Esc", key_on),
            Span::raw(" Quit"),
        ];
        let panel_spans = self.help_panel_spans();

        let nav_width: usize = nav_spans.iter().map(|s| s.content.width()).sum();
        let panel_width: usize = panel_spans.iter().map(|s| s.content.width()).sum();
        let inner_width = area.width.saturating_sub(2) as usize;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));

        let lines = if panel_spans.is_empty() {
            vec![Line::from(nav_spans)]
        } else if nav_width + panel_width + 2 > inner_width {
            vec![Line::from(nav_spans), Line::from(panel_spans)]
        } else {
            let mut spans = nav_spans;
            spans.push(Span::raw(
                " ".repeat(inner_width.saturating_sub(nav_width + panel_width)),
            ));
            spans.extend(panel_spans);
            vec![Line::from(spans)]
        };
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

/// Centers a `width` x `height` rectangle inside `area`.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

impl<H: ImportHost> TuiApp for ImportScreen<'_, H> {
    type Output = ImportSummary;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<AppResult<Self::Output>> {
        // Input arriving while a host call is scheduled is dropped.
        if let Some(pending) = self.pending.take() {
            self.run_pending(pending);
            return None;
        }
        match event {
            TuiEvent::Key(key) => self.handle_key(*key),
            TuiEvent::Paste(text) => {
                self.handle_paste(text);
                None
            }
            TuiEvent::Resize(..) | TuiEvent::Tick => None,
        }
    }

    fn render(&mut self, frame: &mut Frame) {
        let [header, content, status, help] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(6),
            Constraint::Length(1),
            Constraint::Length(4),
        ])
        .areas(frame.area());

        self.render_header(frame, header);
        match self.wizard.phase() {
            Phase::Method => self.methods.render(content, frame.buffer_mut(), true),
            Phase::Input => self.render_input(frame, content),
            Phase::Review => {
                let focused = matches!(self.overlay, Overlay::None);
                self.table.render(
                    content,
                    frame.buffer_mut(),
                    self.wizard.staged(),
                    self.wizard.selection(),
                    focused,
                );
            }
            Phase::Complete => self.render_complete(frame, content),
        }
        self.render_overlay(frame, content);
        self.render_status(frame, status);
        self.render_help(frame, help);
    }
}

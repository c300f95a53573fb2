//! # Import Wizard
//!
//! A reusable multi-step import pipeline. A host module supplies conversion
//! and save callbacks ([`ImportHost`]); the wizard collects raw input, stages
//! the converted records for review, and commits them through the host.
//!
//! ```text
//! method --select--> input --convert(ok)--> review --commit(ok)--> complete
//!    ^                 |  ^                   |                       |
//!    +------back-------+  +-------back--------+                       |
//!    +-------------------------- add more ----------------------------+
//! ```
//!
//! Every forward edge stays on the current step when it fails and returns the
//! error to the caller. Going back discards the data of the step being left.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

pub mod capture;
pub mod error;
pub mod host;
pub mod method;
pub mod record;
pub mod review;
pub mod session;
pub mod strategy;

pub use self::{
    capture::{AudioClip, CaptureDevice, CaptureSlot, Recorder, Scanner},
    error::{CaptureError, FieldError, ValidationError, WizardError},
    host::ImportHost,
    method::{Availability, ImportMethod, ImportType, MethodDescriptor},
    record::{Column, StagedRecord},
    review::Selection,
    session::{Phase, WizardSession},
    strategy::{MethodInput, PhotoRequest, ScanState},
};

/// How the wizard was left from the completion step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardExit {
    ViewItems,
}

/// Validated artifact ready for a host conversion call.
enum Conversion {
    Text(String),
    Voice(AudioClip),
    Photo(PhotoRequest),
    Receipt(String),
}

/// One import session bound to a host module.
pub struct ImportWizard<H: ImportHost> {
    host: H,
    session: WizardSession<H::Record>,
    input: Option<MethodInput<H::Product>>,
    selection: Selection,
}

impl<H: ImportHost> ImportWizard<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            session: WizardSession::new(),
            input: None,
            selection: Selection::new(),
        }
    }

    pub const fn host(&self) -> &H {
        &self.host
    }

    pub const fn session(&self) -> &WizardSession<H::Record> {
        &self.session
    }

    pub const fn phase(&self) -> Phase {
        self.session.phase()
    }

    pub const fn selected_method(&self) -> Option<ImportMethod> {
        self.session.selected_method()
    }

    pub fn staged(&self) -> &[H::Record] {
        self.session.staged()
    }

    pub const fn is_busy(&self) -> bool {
        self.session.is_busy()
    }

    pub fn methods(&self) -> Vec<MethodDescriptor> {
        self.host.methods()
    }

    pub const fn input(&self) -> Option<&MethodInput<H::Product>> {
        self.input.as_ref()
    }

    pub fn input_mut(&mut self) -> Option<&mut MethodInput<H::Product>> {
        self.input.as_mut()
    }

    pub const fn selection(&self) -> &Selection {
        &self.selection
    }

    fn expect_phase(&self, expected: Phase) -> Result<(), WizardError> {
        let actual = self.phase();
        if actual == expected {
            Ok(())
        } else {
            Err(WizardError::WrongPhase { expected, actual })
        }
    }

    fn expect_idle(&self) -> Result<(), WizardError> {
        if self.is_busy() {
            Err(WizardError::Busy)
        } else {
            Ok(())
        }
    }

    // =========================================================================
    // Method selection
    // =========================================================================

    /// Selects a method and advances to the input step.
    ///
    /// Returns `false` without changing anything when the method is not
    /// declared by the host, is disabled or coming soon, or when the wizard is
    /// not on the method step.
    pub fn select_method(&mut self, method: ImportMethod) -> bool {
        if self.phase() != Phase::Method || self.is_busy() {
            return false;
        }
        let selectable = self
            .host
            .methods()
            .iter()
            .any(|d| d.method == method && d.is_selectable());
        if !selectable {
            tracing::debug!(%method, "ignored selection of unavailable method");
            return false;
        }

        self.input = Some(MethodInput::for_method(method, &self.host));
        self.session.set_selected_method(Some(method));
        self.session.set_phase(Phase::Input);
        tracing::info!(%method, "import method selected");
        true
    }

    /// Steps back (`input -> method`, `review -> input`), discarding the data
    /// of the step being left. Returns `false` if there is no previous step.
    pub fn back(&mut self) -> bool {
        if self.is_busy() {
            return false;
        }
        match self.phase() {
            Phase::Input => {
                self.input = None;
                self.session.set_staged(Vec::new());
                self.session.set_selected_method(None);
                self.session.set_phase(Phase::Method);
            }
            Phase::Review => {
                let Some(method) = self.selected_method() else {
                    return false;
                };
                self.selection.clear();
                self.session.set_staged(Vec::new());
                self.input = Some(MethodInput::for_method(method, &self.host));
                self.session.set_phase(Phase::Input);
            }
            Phase::Method | Phase::Complete => return false,
        }
        tracing::debug!(phase = %self.phase(), "stepped back");
        true
    }

    // =========================================================================
    // Input conversion
    // =========================================================================

    /// Validates the active input and runs the host conversion.
    ///
    /// On success the returned batch replaces the staged list and the wizard
    /// moves to review. On failure nothing is staged and the wizard stays on
    /// the input step. For the barcode method this is
    /// [`ImportWizard::proceed_to_review`].
    pub async fn submit(&mut self) -> Result<usize, WizardError> {
        self.expect_phase(Phase::Input)?;
        self.expect_idle()?;

        let conversion = match self.input.as_ref() {
            Some(MethodInput::Text(entry)) => Conversion::Text(entry.validate()?),
            Some(MethodInput::Voice(entry)) => Conversion::Voice(entry.validate()?),
            Some(MethodInput::Photo(entry)) => Conversion::Photo(entry.validate()?),
            Some(MethodInput::Receipt(entry)) => Conversion::Receipt(entry.validate()?),
            Some(MethodInput::Barcode(_)) => {
                self.proceed_to_review()?;
                return Ok(self.staged().len());
            }
            None => {
                return Err(WizardError::WrongPhase {
                    expected: Phase::Input,
                    actual: Phase::Method,
                })
            }
        };
        let method = match &conversion {
            Conversion::Text(_) => ImportMethod::Text,
            Conversion::Voice(_) => ImportMethod::Voice,
            Conversion::Photo(_) => ImportMethod::Photo,
            Conversion::Receipt(_) => ImportMethod::DigitalReceipt,
        };

        tracing::info!(%method, "converting input");
        let busy = self.session.busy_guard();
        let result = match &conversion {
            Conversion::Text(text) => self.host.parse_text(text).await,
            Conversion::Voice(clip) => self.host.transcribe_and_parse(clip).await,
            Conversion::Photo(PhotoRequest::Single { file, import_type }) => {
                self.host.parse_image(file, import_type).await
            }
            Conversion::Photo(PhotoRequest::Multiple { files, import_type }) => {
                self.host.parse_multiple_images(files, import_type).await
            }
            Conversion::Receipt(url) => self.host.parse_receipt_url(url).await,
        };
        drop(busy);

        let records = result.map_err(|err| {
            tracing::warn!(%method, error = %format!("{err:#}"), "conversion failed");
            WizardError::Conversion {
                method,
                message: format!("{err:#}"),
            }
        })?;
        review::ensure_unique_ids(&records)?;

        let count = records.len();
        self.session.set_staged(records);
        self.selection.clear();
        self.session.set_phase(Phase::Review);
        tracing::info!(%method, count, "staged converted records");
        Ok(count)
    }

    // =========================================================================
    // Barcode scanning
    // =========================================================================

    fn barcode_entry(&mut self) -> Result<&mut strategy::BarcodeEntry<H::Product>, WizardError> {
        match self.input.as_mut() {
            Some(MethodInput::Barcode(entry)) => Ok(entry),
            Some(other) => Err(WizardError::MethodMismatch {
                active: other.method(),
                requested: ImportMethod::Barcode,
            }),
            None => Err(WizardError::WrongPhase {
                expected: Phase::Input,
                actual: self.session.phase(),
            }),
        }
    }

    /// Looks up the entered code. The result is kept as a pending scan state;
    /// the session's staged list is not touched.
    pub async fn scan(&mut self) -> Result<&ScanState<H::Product>, WizardError> {
        self.expect_phase(Phase::Input)?;
        self.expect_idle()?;
        let code = self.barcode_entry()?.validate()?;

        tracing::info!(code = %code, "looking up barcode");
        let busy = self.session.busy_guard();
        let result = self.host.lookup_barcode(&code).await;
        drop(busy);

        let (state, outcome) = match result {
            Ok(Some(product)) => (ScanState::Found { code, product }, Ok(())),
            Ok(None) => (ScanState::NotFound { code }, Ok(())),
            Err(err) => {
                let message = format!("{err:#}");
                (
                    ScanState::Failed {
                        code,
                        message: message.clone(),
                    },
                    Err(WizardError::Lookup(message)),
                )
            }
        };

        let entry = self.barcode_entry()?;
        entry.set_state(state);
        outcome?;
        Ok(entry.state())
    }

    /// Appends the pending scanned product to the staged list.
    pub fn add_scanned(&mut self) -> Result<usize, WizardError> {
        self.expect_phase(Phase::Input)?;
        let entry = self.barcode_entry()?;
        let product = entry.take_found().ok_or(WizardError::NoPendingProduct)?;

        let record = match self.host.create_record_from_product(&product) {
            Ok(record) => record,
            Err(err) => {
                self.restore_found(product);
                return Err(WizardError::Conversion {
                    method: ImportMethod::Barcode,
                    message: format!("{err:#}"),
                });
            }
        };
        if self.staged().iter().any(|r| r.id() == record.id()) {
            let id = record.id().to_string();
            self.restore_found(product);
            return Err(WizardError::DuplicateId(id));
        }

        tracing::info!(id = record.id(), name = record.display_name(), "scanned item added");
        self.session.staged_mut().push(record);
        self.barcode_entry()?.record_added();
        Ok(self.staged().len())
    }

    fn restore_found(&mut self, product: H::Product) {
        if let Ok(entry) = self.barcode_entry() {
            let code = entry.code().to_string();
            entry.set_state(ScanState::Found { code, product });
        }
    }

    /// Moves scanned items on to review.
    pub fn proceed_to_review(&mut self) -> Result<(), WizardError> {
        self.expect_phase(Phase::Input)?;
        self.barcode_entry()?;
        if self.staged().is_empty() {
            return Err(ValidationError::NoScannedItems.into());
        }
        self.input = None;
        self.selection.clear();
        self.session.set_phase(Phase::Review);
        tracing::info!(count = self.staged().len(), "scanned items ready for review");
        Ok(())
    }

    // =========================================================================
    // Review
    // =========================================================================

    pub fn edit_field(&mut self, id: &str, key: &str, value: &str) -> Result<(), WizardError> {
        self.expect_phase(Phase::Review)?;
        review::edit_field(self.session.staged_mut(), id, key, value)
    }

    pub fn delete_record(&mut self, id: &str) -> Result<H::Record, WizardError> {
        self.expect_phase(Phase::Review)?;
        review::delete_record(self.session.staged_mut(), &mut self.selection, id)
    }

    /// Removes the listed records; unknown ids are ignored.
    pub fn delete_records<S: AsRef<str>>(&mut self, ids: &[S]) -> Result<usize, WizardError> {
        self.expect_phase(Phase::Review)?;
        Ok(review::delete_many(
            self.session.staged_mut(),
            &mut self.selection,
            ids,
        ))
    }

    /// Removes every checked record.
    pub fn delete_selected(&mut self) -> Result<usize, WizardError> {
        let ids = self.selection.ids();
        self.delete_records(&ids)
    }

    pub fn toggle_selected(&mut self, id: &str) -> bool {
        if self.phase() != Phase::Review || !self.staged().iter().any(|r| r.id() == id) {
            return false;
        }
        self.selection.toggle(id)
    }

    pub fn select_all(&mut self) {
        if self.phase() != Phase::Review {
            return;
        }
        for record in self.session.staged() {
            self.selection.insert(record.id());
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Deletes every staged record whose name contains any keyword.
    pub fn quick_filter<K: AsRef<str>>(&mut self, keywords: &[K]) -> Result<usize, WizardError> {
        self.expect_phase(Phase::Review)?;
        let removed = review::quick_filter(self.session.staged_mut(), &mut self.selection, keywords);
        tracing::info!(removed, "quick filter applied");
        Ok(removed)
    }

    // =========================================================================
    // Commit and completion
    // =========================================================================

    pub fn can_commit(&self) -> bool {
        self.phase() == Phase::Review && !self.is_busy() && !self.staged().is_empty()
    }

    /// Hands the full staged list to the host's save function.
    ///
    /// On failure the staged list is left intact and the wizard stays on review.
    pub async fn commit(&mut self) -> Result<usize, WizardError> {
        self.expect_phase(Phase::Review)?;
        self.expect_idle()?;
        if self.staged().is_empty() {
            return Err(WizardError::NothingToCommit);
        }

        let count = self.staged().len();
        tracing::info!(count, "committing staged records");
        let busy = self.session.busy_guard();
        let result = self.host.save(busy.staged()).await;
        drop(busy);

        if let Err(err) = result {
            tracing::error!(error = %format!("{err:#}"), "commit failed");
            return Err(WizardError::Save(format!("{err:#}")));
        }

        self.selection.clear();
        self.session.set_phase(Phase::Complete);
        tracing::info!(count, "import committed");
        Ok(count)
    }

    /// Starts over from the method step ("add more").
    pub fn add_more(&mut self) -> Result<(), WizardError> {
        self.expect_phase(Phase::Complete)?;
        self.reset();
        Ok(())
    }

    /// Leaves the wizard through the host's navigation hook ("view items").
    pub fn view_items(&mut self) -> Result<WizardExit, WizardError> {
        self.expect_phase(Phase::Complete)?;
        self.host.view_items();
        Ok(WizardExit::ViewItems)
    }

    /// Discards the whole session.
    pub fn reset(&mut self) {
        self.input = None;
        self.selection.clear();
        self.session.reset();
    }
}

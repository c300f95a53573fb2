//! Barcode input collector.
//!
//! Scanning is incremental: each lookup produces a pending [`ScanState`], and
//! only an explicit "add" moves the found product into the session.

use crate::wizard::{
    capture::{CaptureSlot, Scanner},
    error::{CaptureError, ValidationError},
};

/// Result of the latest scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanState<P> {
    Idle,
    Found { code: String, product: P },
    /// Terminal for this scan; the user has to scan again.
    NotFound { code: String },
    Failed { code: String, message: String },
}

impl<P> Default for ScanState<P> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<P> ScanState<P> {
    pub const fn product(&self) -> Option<&P> {
        match self {
            Self::Found { product, .. } => Some(product),
            _ => None,
        }
    }
}

/// Typed/scanned code buffer, camera, and the latest scan result.
pub struct BarcodeEntry<P> {
    camera: CaptureSlot<String>,
    code: String,
    state: ScanState<P>,
    added: usize,
}

impl<P> BarcodeEntry<P> {
    pub fn new(scanner: Option<Scanner>) -> Self {
        Self {
            camera: CaptureSlot::new(scanner, "camera"),
            code: String::new(),
            state: ScanState::Idle,
            added: 0,
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn set_code(&mut self, code: impl Into<String>) {
        self.code = code.into();
    }

    pub const fn state(&self) -> &ScanState<P> {
        &self.state
    }

    pub fn set_state(&mut self, state: ScanState<P>) {
        self.state = state;
    }

    /// Takes the pending product out of a `Found` state, returning to `Idle`.
    pub fn take_found(&mut self) -> Option<P> {
        match std::mem::take(&mut self.state) {
            ScanState::Found { product, .. } => Some(product),
            other => {
                self.state = other;
                None
            }
        }
    }

    /// Number of products added to the session from this entry.
    pub const fn added(&self) -> usize {
        self.added
    }

    pub fn record_added(&mut self) {
        self.added += 1;
        self.code.clear();
    }

    pub fn has_camera(&self) -> bool {
        self.camera.is_available()
    }

    pub fn is_scanning(&self) -> bool {
        self.camera.is_active()
    }

    pub fn start_camera(&mut self) -> Result<(), CaptureError> {
        self.camera.start()
    }

    /// Stops the camera and puts the decoded code into the buffer.
    pub fn stop_camera(&mut self) -> Result<&str, CaptureError> {
        let code = self.camera.stop()?;
        self.code = code.trim().to_string();
        Ok(&self.code)
    }

    pub fn validate(&self) -> Result<String, ValidationError> {
        let code = self.code.trim();
        if code.is_empty() {
            return Err(ValidationError::EmptyBarcode);
        }
        Ok(code.to_string())
    }
}

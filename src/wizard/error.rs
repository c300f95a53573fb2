//! # Wizard Errors
//!
//! Typed error values returned by the import wizard. Every failure is handed
//! back to the caller; the wizard never shows notifications on its own.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

use std::path::PathBuf;

use thiserror::Error;

use super::{method::ImportMethod, session::Phase};

/// Input validation failures, caught before any host call is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Enter at least {min} characters of text")]
    TextTooShort { min: usize },

    #[error("No recording available; record something first")]
    NoRecording,

    #[error("Select at least one image")]
    NoFileSelected,

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Choose what the photo shows")]
    NoImportType,

    #[error("Unknown photo type '{0}'")]
    UnknownImportType(String),

    #[error("Enter a receipt URL")]
    EmptyUrl,

    #[error("Not a valid http(s) URL: {0}")]
    InvalidUrl(String),

    #[error("Enter or scan a barcode")]
    EmptyBarcode,

    #[error("Scan and add at least one item first")]
    NoScannedItems,
}

/// Microphone/camera acquisition failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureError {
    #[error("Permission to use the {device} was denied; grant access and try again")]
    PermissionDenied { device: &'static str },

    #[error("No {device} is configured")]
    Unavailable { device: &'static str },

    #[error("The {device} is already in use")]
    AlreadyActive { device: &'static str },

    #[error("The {device} is not active")]
    NotActive { device: &'static str },

    #[error("{device} capture failed: {message}")]
    Failed {
        device: &'static str,
        message: String,
    },
}

/// Field edit failures reported by a record type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("Unknown field '{0}'")]
    UnknownField(String),

    #[error("Field '{0}' cannot be edited")]
    ReadOnly(String),

    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

impl FieldError {
    /// Shorthand for an [`FieldError::InvalidValue`].
    pub fn invalid(field: &str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

/// Errors returned by [`ImportWizard`](super::ImportWizard) operations.
#[derive(Debug, Error)]
pub enum WizardError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Capture(#[from] CaptureError),

    #[error(transparent)]
    Field(#[from] FieldError),

    #[error("{method} import failed: {message}")]
    Conversion {
        method: ImportMethod,
        message: String,
    },

    #[error("Could not save items: {0}")]
    Save(String),

    #[error("Barcode lookup failed: {0}")]
    Lookup(String),

    #[error("Nothing to commit")]
    NothingToCommit,

    #[error("Another request is still running")]
    Busy,

    #[error("Not available in the {actual} step (expected {expected})")]
    WrongPhase { expected: Phase, actual: Phase },

    #[error("The active method is {active}, not {requested}")]
    MethodMismatch {
        active: ImportMethod,
        requested: ImportMethod,
    },

    #[error("Duplicate record id '{0}'")]
    DuplicateId(String),

    #[error("No staged record with id '{0}'")]
    UnknownRecord(String),

    #[error("No scanned product to add")]
    NoPendingProduct,
}

impl WizardError {
    /// Whether the error came from user input rather than a host callback.
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Field(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_user_facing() {
        let err = WizardError::from(ValidationError::TextTooShort { min: 3 });
        assert_eq!(err.to_string(), "Enter at least 3 characters of text");
        assert!(err.is_validation());

        let err = WizardError::Conversion {
            method: ImportMethod::Voice,
            message: "service unavailable".to_string(),
        };
        assert_eq!(err.to_string(), "voice import failed: service unavailable");
        assert!(!err.is_validation());
    }

    #[test]
    fn test_capture_permission_message() {
        let err = CaptureError::PermissionDenied {
            device: "microphone",
        };
        assert!(err.to_string().contains("microphone"));
    }
}

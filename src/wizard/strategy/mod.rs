//! # Input Strategies
//!
//! One local collector per import method. A collector holds the raw artifact
//! (text, recording, image files, barcode, URL) and validates it superficially;
//! the wizard hands the validated artifact to the host's conversion function.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

pub mod barcode;
pub mod photo;
pub mod receipt;
pub mod text;
pub mod voice;

pub use self::{
    barcode::{BarcodeEntry, ScanState},
    photo::{PhotoEntry, PhotoRequest},
    receipt::{is_valid_url, ReceiptEntry},
    text::TextEntry,
    voice::VoiceEntry,
};
use super::{host::ImportHost, method::ImportMethod};

/// The active method's collector (tagged union over all methods).
pub enum MethodInput<P> {
    Text(TextEntry),
    Voice(VoiceEntry),
    Photo(PhotoEntry),
    Barcode(BarcodeEntry<P>),
    Receipt(ReceiptEntry),
}

impl<P> MethodInput<P> {
    /// Creates an empty collector for the method, acquiring nothing yet.
    pub fn for_method<H>(method: ImportMethod, host: &H) -> Self
    where
        H: ImportHost<Product = P>,
    {
        match method {
            ImportMethod::Text => Self::Text(TextEntry::new()),
            ImportMethod::Voice => Self::Voice(VoiceEntry::new(host.recorder())),
            ImportMethod::Photo => Self::Photo(PhotoEntry::new(host.import_types())),
            ImportMethod::Barcode => Self::Barcode(BarcodeEntry::new(host.scanner())),
            ImportMethod::DigitalReceipt => Self::Receipt(ReceiptEntry::new()),
        }
    }

    pub const fn method(&self) -> ImportMethod {
        match self {
            Self::Text(_) => ImportMethod::Text,
            Self::Voice(_) => ImportMethod::Voice,
            Self::Photo(_) => ImportMethod::Photo,
            Self::Barcode(_) => ImportMethod::Barcode,
            Self::Receipt(_) => ImportMethod::DigitalReceipt,
        }
    }
}

//! # Import Host
//!
//! The functions a hosting module supplies to the wizard. Conversion and save
//! callbacks are opaque to the wizard: it awaits them, stages what they return,
//! and reports their failures back to the caller.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use anyhow::Result;
use async_trait::async_trait;

use super::{
    capture::{AudioClip, Recorder, Scanner},
    method::{ImportMethod, ImportType, MethodDescriptor},
    record::StagedRecord,
};

/// Module-specific callbacks driving one import wizard.
///
/// Only [`ImportHost::methods`] and [`ImportHost::save`] are required; a host
/// overrides the conversions for the methods it declares as available.
#[async_trait]
pub trait ImportHost: Send + Sync {
    /// Record type staged by this host
    type Record: StagedRecord;

    /// Barcode lookup result
    type Product: Clone + fmt::Display + Send + Sync;

    /// Methods offered on the selection step
    fn methods(&self) -> Vec<MethodDescriptor>;

    /// Image import types offered on the photo step
    fn import_types(&self) -> Vec<ImportType> {
        Vec::new()
    }

    /// Microphone used by the voice method
    fn recorder(&self) -> Option<Recorder> {
        None
    }

    /// Camera used by the barcode method
    fn scanner(&self) -> Option<Scanner> {
        None
    }

    async fn parse_text(&self, _text: &str) -> Result<Vec<Self::Record>> {
        Err(unsupported(ImportMethod::Text))
    }

    async fn transcribe_and_parse(&self, _clip: &AudioClip) -> Result<Vec<Self::Record>> {
        Err(unsupported(ImportMethod::Voice))
    }

    async fn parse_image(&self, _file: &Path, _import_type: &str) -> Result<Vec<Self::Record>> {
        Err(unsupported(ImportMethod::Photo))
    }

    async fn parse_multiple_images(
        &self,
        _files: &[PathBuf],
        _import_type: &str,
    ) -> Result<Vec<Self::Record>> {
        Err(unsupported(ImportMethod::Photo))
    }

    async fn lookup_barcode(&self, _code: &str) -> Result<Option<Self::Product>> {
        Err(unsupported(ImportMethod::Barcode))
    }

    /// Builds a staged record from a looked-up product.
    fn create_record_from_product(&self, _product: &Self::Product) -> Result<Self::Record> {
        Err(unsupported(ImportMethod::Barcode))
    }

    async fn parse_receipt_url(&self, _url: &str) -> Result<Vec<Self::Record>> {
        Err(unsupported(ImportMethod::DigitalReceipt))
    }

    /// Persists the full staged list.
    async fn save(&self, records: &[Self::Record]) -> Result<()>;

    /// Navigation hook for the completion step's "view items" action.
    fn view_items(&self) {}
}

fn unsupported(method: ImportMethod) -> anyhow::Error {
    anyhow::anyhow!("{method} import is not supported here")
}

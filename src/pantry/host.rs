//! # Pantry Host
//!
//! Binds the import wizard to the pantry: conversions run the configured
//! converter commands (or the built-in text parser), barcodes resolve through
//! the household catalog, and committed items are written as Markdown files.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex, PoisonError},
};

use anyhow::{Context, Result};
use async_trait::async_trait;

use super::{
    catalog::{Catalog, Product},
    devices::{CommandRecorder, CommandScanner},
    text, ItemDraft, PantryItem,
};
use crate::{
    config::Config,
    constants::{GLOBAL_CONFIG_DIR, IMPORT_TYPE_ENV},
    converter::{self, Converter},
    id::IdAllocator,
    storage,
    wizard::{
        AudioClip, ImportHost, ImportMethod, ImportType, MethodDescriptor, Recorder, Scanner,
    },
};

/// Import types offered on the photo step.
pub fn import_types() -> Vec<ImportType> {
    vec![
        ImportType::new("receipt", "Shopping receipt", true),
        ImportType::new("groceries", "Photo of groceries", true),
        ImportType::new("product", "Single product label", false),
    ]
}

/// Paths written by every commit of a session. Cloning shares the list, so a
/// caller can keep a handle after the host moves into the wizard.
#[derive(Debug, Clone, Default)]
pub struct SavedPaths(Arc<Mutex<Vec<PathBuf>>>);

impl SavedPaths {
    fn extend(&self, paths: Vec<PathBuf>) {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend(paths);
    }

    pub fn to_vec(&self) -> Vec<PathBuf> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

pub struct PantryHost {
    config: Config,
    catalog: Catalog,
    ids: Mutex<IdAllocator>,
    scratch_dir: PathBuf,
    saved: SavedPaths,
}

impl PantryHost {
    /// Loads the barcode catalog and reserves the IDs already in the pantry.
    pub fn new(config: Config) -> Result<Self> {
        let catalog = Catalog::load(&config.catalog_path())?;
        let mut ids = IdAllocator::new(config.id_pattern());
        ids.reserve(storage::existing_ids(&config));

        Ok(Self {
            config,
            catalog,
            ids: Mutex::new(ids),
            scratch_dir: std::env::temp_dir().join(GLOBAL_CONFIG_DIR),
            saved: SavedPaths::default(),
        })
    }

    pub const fn config(&self) -> &Config {
        &self.config
    }

    pub fn saved_paths(&self) -> SavedPaths {
        self.saved.clone()
    }

    fn next_id(&self) -> String {
        self.ids
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .next_id()
    }

    fn converter(&self, method: ImportMethod) -> Result<Converter> {
        let converters = self.config.converters();
        let command = match method {
            ImportMethod::Text => &converters.text,
            ImportMethod::Voice => &converters.voice,
            ImportMethod::Photo => &converters.photo,
            ImportMethod::Barcode => &converters.barcode,
            ImportMethod::DigitalReceipt => &converters.receipt,
        };
        let command = command.as_deref().with_context(|| {
            format!("No {method} converter configured (set converters.{method})")
        })?;
        Converter::parse(command)
    }

    /// Turns drafts into staged items with fresh IDs. One invalid draft
    /// fails the whole batch.
    fn stage(&self, drafts: Vec<ItemDraft>, method: ImportMethod) -> Result<Vec<PantryItem>> {
        drafts
            .into_iter()
            .enumerate()
            .map(|(index, draft)| {
                PantryItem::from_draft(self.next_id(), draft, method)
                    .with_context(|| format!("Invalid item #{} from the {method} import", index + 1))
            })
            .collect()
    }

    async fn convert_images(
        &self,
        files: &[PathBuf],
        import_type: &str,
    ) -> Result<Vec<PantryItem>> {
        let drafts = self
            .converter(ImportMethod::Photo)?
            .drafts(files, None, &[(IMPORT_TYPE_ENV, import_type)])
            .await?;
        self.stage(drafts, ImportMethod::Photo)
    }

    fn descriptor(
        method: ImportMethod,
        label: &str,
        description: &str,
        configured: Option<&String>,
    ) -> MethodDescriptor {
        let descriptor = MethodDescriptor::new(method, label, description);
        if configured.is_some() {
            descriptor
        } else {
            descriptor.disabled()
        }
    }
}

#[async_trait]
impl ImportHost for PantryHost {
    type Record = PantryItem;
    type Product = Product;

    fn methods(&self) -> Vec<MethodDescriptor> {
        let c = self.config.converters();
        vec![
            MethodDescriptor::new(
                ImportMethod::Text,
                "Text",
                "Type or paste a shopping list",
            ),
            Self::descriptor(
                ImportMethod::Voice,
                "Voice",
                "Dictate what you bought",
                c.voice.as_ref(),
            ),
            Self::descriptor(
                ImportMethod::Photo,
                "Photo",
                "Receipts, grocery photos, or product labels",
                c.photo.as_ref(),
            ),
            MethodDescriptor::new(
                ImportMethod::Barcode,
                "Barcode",
                "Scan or type product barcodes",
            ),
            {
                let receipt = MethodDescriptor::new(
                    ImportMethod::DigitalReceipt,
                    "Digital receipt",
                    "Import from a receipt link",
                );
                if c.receipt.is_some() {
                    receipt
                } else {
                    receipt.coming_soon()
                }
            },
        ]
    }

    fn import_types(&self) -> Vec<ImportType> {
        import_types()
    }

    fn recorder(&self) -> Option<Recorder> {
        let command = self.config.converters().record.as_deref()?;
        match Converter::parse(command) {
            Ok(converter) => Some(Box::new(CommandRecorder::new(
                converter,
                self.scratch_dir.clone(),
            ))),
            Err(err) => {
                tracing::warn!(%err, "ignoring invalid record command");
                None
            }
        }
    }

    fn scanner(&self) -> Option<Scanner> {
        let command = self.config.converters().scan.as_deref()?;
        match Converter::parse(command) {
            Ok(converter) => Some(Box::new(CommandScanner::new(converter))),
            Err(err) => {
                tracing::warn!(%err, "ignoring invalid scan command");
                None
            }
        }
    }

    async fn parse_text(&self, input: &str) -> Result<Vec<PantryItem>> {
        let drafts = if self.config.converters().text.is_some() {
            self.converter(ImportMethod::Text)?
                .drafts(std::iter::empty::<&str>(), Some(input), &[])
                .await?
        } else {
            text::parse(input)
        };
        self.stage(drafts, ImportMethod::Text)
    }

    async fn transcribe_and_parse(&self, clip: &AudioClip) -> Result<Vec<PantryItem>> {
        let drafts = self
            .converter(ImportMethod::Voice)?
            .drafts([&clip.path], None, &[])
            .await?;
        self.stage(drafts, ImportMethod::Voice)
    }

    async fn parse_image(&self, file: &Path, import_type: &str) -> Result<Vec<PantryItem>> {
        self.convert_images(&[file.to_path_buf()], import_type).await
    }

    async fn parse_multiple_images(
        &self,
        files: &[PathBuf],
        import_type: &str,
    ) -> Result<Vec<PantryItem>> {
        self.convert_images(files, import_type).await
    }

    async fn lookup_barcode(&self, code: &str) -> Result<Option<Product>> {
        if let Some(product) = self.catalog.lookup(code) {
            tracing::debug!(code, "barcode found in catalog");
            return Ok(Some(product));
        }
        if self.config.converters().barcode.is_none() {
            return Ok(None);
        }

        let output = self
            .converter(ImportMethod::Barcode)?
            .run([code], None, &[])
            .await?;
        let draft = converter::parse_drafts(&output)?.into_iter().next();
        Ok(draft.map(|draft| Product {
            code: code.to_string(),
            draft: ItemDraft {
                barcode: draft.barcode.clone().or_else(|| Some(code.to_string())),
                ..draft
            },
        }))
    }

    fn create_record_from_product(&self, product: &Product) -> Result<PantryItem> {
        PantryItem::from_draft(self.next_id(), product.draft.clone(), ImportMethod::Barcode)
    }

    async fn parse_receipt_url(&self, url: &str) -> Result<Vec<PantryItem>> {
        let drafts = self
            .converter(ImportMethod::DigitalReceipt)?
            .drafts([url], None, &[])
            .await?;
        self.stage(drafts, ImportMethod::DigitalReceipt)
    }

    async fn save(&self, records: &[PantryItem]) -> Result<()> {
        let paths = storage::create_items(&self.config, records)?;
        tracing::info!(count = paths.len(), "pantry items written");
        self.saved.extend(paths);
        Ok(())
    }

    fn view_items(&self) {
        tracing::info!(pantry = %self.config.pantry_path().display(), "viewing pantry items");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GlobalConfig, ProjectConfig};

    fn config(root: &Path) -> Config {
        Config {
            global: GlobalConfig::default(),
            project: ProjectConfig::default(),
            project_root: root.to_path_buf(),
        }
    }

    #[test]
    fn test_unconfigured_methods_are_not_selectable() {
        let temp = tempfile::tempdir().unwrap();
        let host = PantryHost::new(config(temp.path())).unwrap();

        let selectable: Vec<_> = host
            .methods()
            .into_iter()
            .filter(MethodDescriptor::is_selectable)
            .map(|d| d.method)
            .collect();
        assert_eq!(selectable, vec![ImportMethod::Text, ImportMethod::Barcode]);
        assert!(host.recorder().is_none());
        assert!(host.scanner().is_none());
    }

    #[tokio::test]
    async fn test_builtin_text_parser_stages_unique_ids() {
        let temp = tempfile::tempdir().unwrap();
        let host = PantryHost::new(config(temp.path())).unwrap();

        let items = host.parse_text("- 2 l milk\n- bread\n- 6 eggs").await.unwrap();

        assert_eq!(items.len(), 3);
        assert_eq!(items[0].name(), "milk");
        assert_eq!(items[0].meta.source.as_deref(), Some("text"));
        let mut ids: Vec<_> = items.iter().map(|i| i.meta.id.clone()).collect();
        ids.dedup();
        assert_eq!(ids.len(), 3);
    }

    #[tokio::test]
    async fn test_catalog_lookup_and_unknown_code() {
        let temp = tempfile::tempdir().unwrap();
        let config = config(temp.path());
        std::fs::create_dir_all(config.pantry_path()).unwrap();
        let mut catalog = Catalog::default();
        catalog.insert("4006381333931", ItemDraft::named("Oat drink"));
        catalog.save(&config.catalog_path()).unwrap();
        let host = PantryHost::new(config).unwrap();

        let product = host.lookup_barcode("4006381333931").await.unwrap().unwrap();
        let item = host.create_record_from_product(&product).unwrap();
        assert_eq!(item.name(), "Oat drink");
        assert_eq!(item.meta.barcode.as_deref(), Some("4006381333931"));

        assert!(host.lookup_barcode("123").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_records_paths() {
        let temp = tempfile::tempdir().unwrap();
        let host = PantryHost::new(config(temp.path())).unwrap();
        let saved = host.saved_paths();

        let items = host.parse_text("rice, salt").await.unwrap();
        host.save(&items).await.unwrap();

        let paths = saved.to_vec();
        assert_eq!(paths.len(), 2);
        assert!(paths.iter().all(|p| p.exists()));
    }

    #[test]
    fn test_invalid_draft_fails_the_batch() {
        let temp = tempfile::tempdir().unwrap();
        let host = PantryHost::new(config(temp.path())).unwrap();

        let drafts = vec![ItemDraft::named("Milk"), ItemDraft::named("  ")];
        let err = host.stage(drafts, ImportMethod::DigitalReceipt).unwrap_err();
        assert!(format!("{err:#}").contains("#2"), "{err:#}");
    }

    #[tokio::test]
    async fn test_missing_converter_is_an_error() {
        let temp = tempfile::tempdir().unwrap();
        let host = PantryHost::new(config(temp.path())).unwrap();

        let err = host.parse_receipt_url("https://shop.example/r/1").await.unwrap_err();
        assert!(err.to_string().contains("converters.receipt"), "{err}");
    }
}

//! # Import Command
//!
//! Adds items to the pantry through the import wizard. Without a method the
//! interactive wizard opens; with `--method` the same steps run from flags,
//! which is how scripts and tests drive an import.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

use std::{
    io::Read,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use owo_colors::OwoColorize;
use tokio::runtime::{Builder, Runtime};

use super::list::{self, ListArgs};
use crate::{
    config::{Config, GlobalConfig},
    pantry::{PantryHost, SavedPaths},
    tui::{self, screens::ImportScreen},
    ui::{self, InteractiveArgs},
    wizard::{ImportMethod, ImportWizard, MethodInput},
};

/// Arguments for `hs import`.
#[derive(Debug, Clone, Default)]
pub struct ImportArgs {
    pub method: Option<ImportMethod>,
    /// Shopping list text (text method)
    pub text: Option<String>,
    /// File with the shopping list; `-` reads stdin (text method)
    pub file: Option<PathBuf>,
    /// Recorded audio file (voice method)
    pub audio: Option<PathBuf>,
    /// Image files (photo method)
    pub images: Vec<PathBuf>,
    /// What the images show (photo method)
    pub import_type: Option<String>,
    /// Receipt link (receipt method)
    pub url: Option<String>,
    /// Barcodes to look up (barcode method)
    pub codes: Vec<String>,
    /// Keywords removed from the staged items before saving
    pub drop: Vec<String>,
    /// Named quick filters from `.homestock` applied before saving
    pub filters: Vec<String>,
    pub dry_run: bool,
    pub interactive: InteractiveArgs,
}

/// Executes the import command.
pub fn execute(args: &ImportArgs) -> Result<()> {
    let config = Config::load()?;
    if let Ok(unknown) = GlobalConfig::unknown_fields() {
        let warnings: Vec<String> = unknown
            .iter()
            .map(|field| format!("unknown config field '{field}'"))
            .collect();
        ui::print_warnings(&warnings);
    }

    let host = PantryHost::new(config.clone())?;
    let saved = host.saved_paths();
    let runtime = build_runtime()?;

    if args.method.is_none() && args.interactive.should_run(&config) {
        return run_interactive(&config, host, &runtime, &saved);
    }
    let Some(method) = args.method else {
        bail!("No import method given (use --method, or run in a terminal for the wizard)");
    };

    let mut wizard = ImportWizard::new(host);
    runtime.block_on(run_scripted(&mut wizard, method, args, &config))?;
    print_saved(&config, &saved);
    Ok(())
}

fn build_runtime() -> Result<Runtime> {
    Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")
}

fn print_saved(config: &Config, saved: &SavedPaths) {
    for path in saved.to_vec() {
        ui::print_success("Added", config, &path);
    }
}

// =============================================================================
// Interactive
// =============================================================================

fn run_interactive(
    config: &Config,
    host: PantryHost,
    runtime: &Runtime,
    saved: &SavedPaths,
) -> Result<()> {
    let quick_filters = config
        .project
        .quick_filters
        .iter()
        .map(|(name, keywords)| (name.clone(), keywords.clone()))
        .collect();
    let screen = ImportScreen::new(
        ImportWizard::new(host),
        runtime.handle().clone(),
        quick_filters,
    );

    let summary = tui::run(screen)?;
    print_saved(config, saved);

    match summary {
        Some(summary) if summary.view_items => list::execute(&ListArgs::default()),
        Some(_) => Ok(()),
        None => {
            println!("{}", "Import cancelled.".dimmed());
            Ok(())
        }
    }
}

// =============================================================================
// Scripted
// =============================================================================

async fn run_scripted(
    wizard: &mut ImportWizard<PantryHost>,
    method: ImportMethod,
    args: &ImportArgs,
    config: &Config,
) -> Result<()> {
    if !wizard.select_method(method) {
        bail!("The {method} import is not available (configure converters.{method})");
    }

    if method == ImportMethod::Barcode {
        scan_codes(wizard, &args.codes).await?;
        wizard.proceed_to_review()?;
    } else {
        fill_input(wizard, args)?;
        wizard.submit().await?;
    }

    if !args.drop.is_empty() {
        let removed = wizard.quick_filter(&args.drop)?;
        tracing::debug!(removed, "dropped keywords");
    }
    for name in &args.filters {
        let keywords = config
            .quick_filter(name)
            .with_context(|| format!("Unknown quick filter '{name}' (see quick_filters in .homestock)"))?
            .to_vec();
        wizard.quick_filter(&keywords)?;
    }

    if wizard.staged().is_empty() {
        println!("{}", "Nothing to import.".dimmed());
        return Ok(());
    }

    if args.dry_run {
        println!("{}", ui::item_table_header().bold());
        for item in wizard.staged() {
            println!("{}", ui::item_table_row(item));
        }
        println!(
            "{}",
            format!("Dry run: {} item(s) not saved", wizard.staged().len()).dimmed()
        );
        return Ok(());
    }

    wizard.commit().await?;
    Ok(())
}

fn fill_input(wizard: &mut ImportWizard<PantryHost>, args: &ImportArgs) -> Result<()> {
    let Some(input) = wizard.input_mut() else {
        bail!("No import method selected");
    };

    match input {
        MethodInput::Text(entry) => entry.set_text(read_text(args)?),
        MethodInput::Voice(entry) => {
            let audio = args
                .audio
                .clone()
                .context("Voice import needs --audio <FILE>")?;
            entry.use_file(audio);
        }
        MethodInput::Photo(entry) => {
            if args.images.is_empty() {
                bail!("Photo import needs at least one --image <FILE>");
            }
            let import_type = match &args.import_type {
                Some(key) => key.clone(),
                None => entry
                    .import_types()
                    .first()
                    .map(|t| t.key.clone())
                    .context("No photo types available")?,
            };
            entry.set_import_type(&import_type)?;
            for image in &args.images {
                entry.add_file(image);
            }
        }
        MethodInput::Receipt(entry) => {
            let url = args.url.clone().context("Receipt import needs --url <URL>")?;
            entry.set_url(url);
        }
        MethodInput::Barcode(_) => {}
    }
    Ok(())
}

fn read_text(args: &ImportArgs) -> Result<String> {
    if let Some(text) = &args.text {
        return Ok(text.clone());
    }
    match args.file.as_deref() {
        Some(path) if path == Path::new("-") => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read shopping list from stdin")?;
            Ok(text)
        }
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read shopping list: {}", path.display())),
        None => bail!("Text import needs --text <TEXT> or --file <FILE>"),
    }
}

async fn scan_codes(wizard: &mut ImportWizard<PantryHost>, codes: &[String]) -> Result<()> {
    for code in codes {
        if let Some(MethodInput::Barcode(entry)) = wizard.input_mut() {
            entry.set_code(code.clone());
        }
        let found = wizard.scan().await?.product().is_some();
        if found {
            wizard.add_scanned()?;
        } else {
            ui::print_warnings(&[format!("Barcode {code} not found")]);
        }
    }
    Ok(())
}

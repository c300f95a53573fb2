//! # Frontmatter Documents
//!
//! Reads and writes Markdown files that start with a YAML frontmatter block.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

use anyhow::{Context, Result};
use super::ItemMeta;
use crate::constants::FRONTMATTER_DELIMITER;

/// Splits a document into its decoded frontmatter and the Markdown body.
pub fn parse(content: &str) -> Result<(ItemMeta, String)> {
    let content = content.trim_start();

    let Some(after_start) = content.strip_prefix(FRONTMATTER_DELIMITER) else {
        anyhow::bail!("File does not start with YAML frontmatter (---)");
    };

    let end_pos = after_start
        .find(&format!("\n{FRONTMATTER_DELIMITER}"))
        .ok_or_else(|| anyhow::anyhow!("No closing frontmatter delimiter found"))?;

    let yaml = &after_start[..end_pos];
    let body = after_start
        .get(end_pos + 1 + FRONTMATTER_DELIMITER.len()..)
        .unwrap_or("")
        .trim_start_matches(['\n', '\r'])
        .to_string();

    let meta: ItemMeta = serde_yml::from_str(yaml).context("Failed to parse YAML frontmatter")?;
    Ok((meta, body))
}

/// Renders frontmatter and body back into a document.
pub fn render(meta: &ItemMeta, body: &str) -> Result<String> {
    let yaml = serde_yml::to_string(meta).context("Failed to serialize frontmatter")?;

    let mut out = format!("{FRONTMATTER_DELIMITER}\n{yaml}{FRONTMATTER_DELIMITER}\n");
    let body = body.trim_end();
    if !body.is_empty() {
        out.push('\n');
        out.push_str(body);
        out.push('\n');
    }
    Ok(out)
}

//! # Completions Command
//!
//! Shell completion scripts for `hs`.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

use std::io::{self, Write};

use anyhow::Result;
use clap::Command;
use clap_complete::{generate, Shell};

/// Writes the completion script for `shell` to stdout.
/// `cmd` is the CLI definition (`Cli::command()`).
pub fn execute(shell: Shell, cmd: &mut Command) -> Result<()> {
    let mut stdout = io::stdout();
    write_to(shell, cmd, &mut stdout);
    stdout.flush()?;
    Ok(())
}

fn write_to(shell: Shell, cmd: &mut Command, out: &mut dyn Write) {
    let name = cmd.get_name().to_string();
    generate(shell, cmd, name, out);
}

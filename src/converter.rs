//! # External Converters
//!
//! Runs the user-configured commands that turn raw artifacts (text, audio,
//! images, receipt URLs, barcodes) into item drafts. A converter prints a YAML
//! or JSON list of items on stdout; a mapping with an `items` list or a single
//! item mapping is accepted as well.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

use std::{ffi::OsStr, process::Stdio};

use anyhow::{Context, Result};
use serde::Deserialize;
use tokio::{io::AsyncWriteExt, process::Command};

use crate::pantry::ItemDraft;

/// A parsed converter command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Converter {
    program: String,
    args: Vec<String>,
}

impl Converter {
    /// Splits a shell-style command line (`ocr-items --lang "de en"`).
    pub fn parse(command: &str) -> Result<Self> {
        let mut parts = shlex::split(command)
            .with_context(|| format!("Invalid converter command: {command}"))?
            .into_iter();
        let program = parts.next().context("Empty converter command")?;
        Ok(Self {
            program,
            args: parts.collect(),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Runs the converter with extra trailing arguments, optional stdin, and
    /// extra environment variables. Returns stdout on success.
    pub async fn run<A, S>(
        &self,
        extra: A,
        stdin: Option<&str>,
        envs: &[(&str, &str)],
    ) -> Result<String>
    where
        A: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .args(extra)
            .envs(envs.iter().copied())
            .stdin(if stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        tracing::debug!(program = %self.program, "running converter");
        let mut child = cmd
            .spawn()
            .with_context(|| format!("Failed to run converter: {}", self.program))?;

        // Stdin is fed while stdout and stderr are drained.
        let pipe = child.stdin.take();
        let feed = async move {
            if let (Some(input), Some(mut pipe)) = (stdin, pipe) {
                pipe.write_all(input.as_bytes()).await?;
                // Closing stdin signals end of input
                drop(pipe);
            }
            Ok::<_, std::io::Error>(())
        };
        let (fed, output) = tokio::join!(feed, child.wait_with_output());
        let output =
            output.with_context(|| format!("Converter did not finish: {}", self.program))?;
        if let Err(err) = fed {
            // A converter may exit without reading all of its input
            if err.kind() != std::io::ErrorKind::BrokenPipe {
                return Err(err).context("Failed to write converter input");
            }
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let detail = stderr.trim();
            anyhow::bail!(
                "{} exited with {}{}{detail}",
                self.program,
                output.status,
                if detail.is_empty() { "" } else { ": " },
            );
        }

        String::from_utf8(output.stdout).context("Converter output is not valid UTF-8")
    }

    /// Runs the converter and decodes its output as item drafts.
    pub async fn drafts<A, S>(
        &self,
        extra: A,
        stdin: Option<&str>,
        envs: &[(&str, &str)],
    ) -> Result<Vec<ItemDraft>>
    where
        A: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let stdout = self.run(extra, stdin, envs).await?;
        parse_drafts(&stdout).with_context(|| format!("Unexpected output from {}", self.program))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DraftOutput {
    List(Vec<ItemDraft>),
    Wrapped { items: Vec<ItemDraft> },
    Single(ItemDraft),
}

/// Decodes converter output. Empty output is an empty list.
pub fn parse_drafts(output: &str) -> Result<Vec<ItemDraft>> {
    if output.trim().is_empty() {
        return Ok(Vec::new());
    }
    let parsed: DraftOutput = serde_yml::from_str(output).context("Failed to parse item list")?;
    Ok(match parsed {
        DraftOutput::List(items) | DraftOutput::Wrapped { items } => items,
        DraftOutput::Single(item) => vec![item],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command_line() {
        let converter = Converter::parse(r#"ocr-items --lang "de en""#).unwrap();
        assert_eq!(converter.program(), "ocr-items");
        assert_eq!(converter.args, vec!["--lang", "de en"]);

        assert!(Converter::parse("   ").is_err());
        assert!(Converter::parse("unterminated \"quote").is_err());
    }

    #[test]
    fn test_parse_drafts_forms() {
        let yaml = "- name: Milk\n  quantity: 2\n  unit: l\n- name: Bread\n";
        let drafts = parse_drafts(yaml).unwrap();
        assert_eq!(drafts.len(), 2);
        assert_eq!(drafts[0].quantity, Some(2.0));

        let json = r#"{"items": [{"title": "Eggs", "qty": 6}]}"#;
        let drafts = parse_drafts(json).unwrap();
        assert_eq!(drafts[0].name, "Eggs");
        assert_eq!(drafts[0].quantity, Some(6.0));

        let single = parse_drafts("name: Salt\n").unwrap();
        assert_eq!(single, vec![ItemDraft::named("Salt")]);

        assert!(parse_drafts("\n").unwrap().is_empty());
        assert!(parse_drafts("just some prose").is_err());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_pipes_stdin_and_args() {
        let converter = Converter::parse("sh -c 'cat; echo \" $0 $HS_TEST\"'").unwrap();
        let out = converter
            .run(["arg0"], Some("hello"), &[("HS_TEST", "env")])
            .await
            .unwrap();
        assert_eq!(out.trim(), "hello arg0 env");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_large_stdin_streams_through() {
        let converter = Converter::parse("cat").unwrap();
        let input = "x".repeat(1024 * 1024);
        let out = tokio::time::timeout(
            std::time::Duration::from_secs(10),
            converter.run(std::iter::empty::<&str>(), Some(&input), &[]),
        )
        .await
        .expect("converter stalled on large input")
        .unwrap();
        assert_eq!(out.len(), input.len());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failing_converter_reports_stderr() {
        let converter = Converter::parse("sh -c 'echo boom >&2; exit 3'").unwrap();
        let err = converter
            .run(std::iter::empty::<&str>(), None, &[])
            .await
            .unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("boom"), "{message}");
    }
}

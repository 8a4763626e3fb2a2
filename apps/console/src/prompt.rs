//! Line-oriented input: command prompts, form fields and confirmations.

use std::io::Write;

use anyhow::Result;
use async_trait::async_trait;
use client_core::ConfirmDelete;
use shared::domain::PropertyId;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::warn;

/// Answer that empties a field instead of keeping its current value.
pub const CLEAR_FIELD: &str = "-";

pub struct Prompter<R> {
    lines: Lines<R>,
}

impl Prompter<BufReader<Stdin>> {
    pub fn stdin() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()))
    }
}

impl<R: AsyncBufRead + Unpin + Send> Prompter<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
        }
    }

    /// Prints `label` and reads one line. `None` means input is exhausted.
    pub async fn ask(&mut self, label: &str) -> Result<Option<String>> {
        print!("{label}");
        std::io::stdout().flush()?;
        Ok(self.lines.next_line().await?)
    }

    /// Reads a form field. A blank answer keeps `current`; [`CLEAR_FIELD`] empties it.
    pub async fn ask_with_default(&mut self, field: &str, current: &str) -> Result<Option<String>> {
        let answer = self.ask(&format!("{field} [{current}]: ")).await?;
        Ok(answer.map(|value| match value.trim() {
            "" => current.to_string(),
            CLEAR_FIELD => String::new(),
            _ => value,
        }))
    }

    pub async fn confirm(&mut self, question: &str) -> Result<bool> {
        let answer = self.ask(&format!("{question} [y/N]: ")).await?;
        Ok(matches!(
            answer.as_deref().map(str::trim),
            Some("y" | "Y" | "yes" | "Yes" | "YES")
        ))
    }
}

#[async_trait]
impl<R: AsyncBufRead + Unpin + Send> ConfirmDelete for Prompter<R> {
    async fn confirm_delete(&mut self, id: PropertyId) -> bool {
        match self.confirm(&format!("Are you sure you want to delete property #{id}?")).await {
            Ok(answer) => answer,
            Err(error) => {
                warn!(%error, "console: confirmation prompt failed");
                false
            }
        }
    }
}

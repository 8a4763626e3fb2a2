//! Console command line: one typed line maps to one controller command.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "console", no_binary_name = true, disable_version_flag = true)]
struct ConsoleLine {
    #[command(subcommand)]
    command: ConsoleCommand,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    /// Reload the current page
    #[command(visible_alias = "ls", alias = "refresh")]
    List,
    /// Go to the next page
    #[command(visible_alias = "n")]
    Next,
    /// Go to the previous page
    #[command(visible_alias = "p")]
    Prev,
    /// Filter by location, max price and min size (prompts when no flag is given)
    Filter {
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        max_price: Option<String>,
        #[arg(long)]
        min_size: Option<String>,
    },
    /// Clear every filter
    Clear,
    /// Add a property
    #[command(visible_alias = "add")]
    Create,
    /// Show one property
    View { id: i64 },
    /// Edit a property, or resume the open edit form
    Edit { id: Option<i64> },
    /// Close the open edit form
    Cancel,
    /// Delete a property after confirmation
    #[command(visible_alias = "rm")]
    Delete { id: i64 },
    /// Leave the console
    #[command(visible_alias = "exit")]
    Quit,
}

impl ConsoleCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Next => "next",
            Self::Prev => "prev",
            Self::Filter { .. } => "filter",
            Self::Clear => "clear",
            Self::Create => "create",
            Self::View { .. } => "view",
            Self::Edit { .. } => "edit",
            Self::Cancel => "cancel",
            Self::Delete { .. } => "delete",
            Self::Quit => "quit",
        }
    }
}

pub fn parse_line(line: &str) -> Result<ConsoleCommand, clap::Error> {
    ConsoleLine::try_parse_from(split_words(line)).map(|parsed| parsed.command)
}

/// Splits on whitespace, keeping double-quoted segments together.
pub fn split_words(line: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut has_word = false;

    for ch in line.chars() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
                has_word = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if has_word {
                    words.push(std::mem::take(&mut current));
                    has_word = false;
                }
            }
            c => {
                current.push(c);
                has_word = true;
            }
        }
    }
    if has_word {
        words.push(current);
    }
    words
}

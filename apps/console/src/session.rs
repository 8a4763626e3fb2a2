//! Interactive loop mapping console commands onto the list controller.

use std::time::Instant;

use anyhow::Result;
use client_core::{ListController, Navigation, NotificationKind};
use shared::domain::{coerce_number, PropertyId, PropertyInput};
use tokio::io::AsyncBufRead;
use tracing::debug;

use crate::{
    commands::{parse_line, ConsoleCommand},
    prompt::{Prompter, CLEAR_FIELD},
};

pub struct Session<R> {
    controller: ListController,
    prompter: Prompter<R>,
    /// Create form text kept after the backend rejected it.
    create_draft: Option<CreateDraft>,
}

#[derive(Debug, Clone, Default)]
struct CreateDraft {
    address: String,
    price: String,
    size: String,
    description: String,
}

enum Flow {
    Continue,
    Quit,
}

impl<R: AsyncBufRead + Unpin + Send> Session<R> {
    pub fn new(controller: ListController, prompter: Prompter<R>) -> Self {
        Self {
            controller,
            prompter,
            create_draft: None,
        }
    }

    pub fn controller(&self) -> &ListController {
        &self.controller
    }

    pub async fn run(&mut self) -> Result<()> {
        println!("Properties console. Type `help` for commands.");
        self.refresh().await;

        loop {
            self.controller.notifications_mut().prune(Instant::now());
            let Some(line) = self.prompter.ask("> ").await? else {
                break;
            };
            if line.trim().is_empty() {
                continue;
            }

            let command = match parse_line(&line) {
                Ok(command) => command,
                Err(err) => {
                    println!("{err}");
                    continue;
                }
            };

            debug!(command = command.name(), "console: dispatching command");
            let flow = self.dispatch(command).await?;
            self.flush_notifications();
            if matches!(flow, Flow::Quit) {
                break;
            }
        }
        Ok(())
    }

    async fn dispatch(&mut self, command: ConsoleCommand) -> Result<Flow> {
        match command {
            ConsoleCommand::List => self.refresh().await,
            ConsoleCommand::Next => {
                if let Ok(Navigation::AtBoundary) = self.controller.go_to_next_page().await {
                    println!("Already on the last page.");
                }
                self.print_list();
            }
            ConsoleCommand::Prev => {
                if let Ok(Navigation::AtBoundary) = self.controller.go_to_prev_page().await {
                    println!("Already on the first page.");
                }
                self.print_list();
            }
            ConsoleCommand::Filter {
                location,
                max_price,
                min_size,
            } => {
                let (location, max_price, min_size) =
                    if location.is_none() && max_price.is_none() && min_size.is_none() {
                        let Some(location) = self.prompter.ask("location: ").await? else {
                            return Ok(Flow::Quit);
                        };
                        let Some(max_price) = self.prompter.ask("max price: ").await? else {
                            return Ok(Flow::Quit);
                        };
                        let Some(min_size) = self.prompter.ask("min size: ").await? else {
                            return Ok(Flow::Quit);
                        };
                        (Some(location), Some(max_price), Some(min_size))
                    } else {
                        (location, max_price, min_size)
                    };

                let max_price = max_price.as_deref().and_then(coerce_number);
                let min_size = min_size.as_deref().and_then(coerce_number);
                let _ = self
                    .controller
                    .apply_filters(location, max_price, min_size)
                    .await;
                self.print_list();
            }
            ConsoleCommand::Clear => {
                let _ = self.controller.clear_filters().await;
                self.print_list();
            }
            ConsoleCommand::Create => {
                let Some(draft) = self.read_create_form().await? else {
                    return Ok(Flow::Quit);
                };
                let input = PropertyInput::from_form(
                    &draft.address,
                    &draft.price,
                    &draft.size,
                    &draft.description,
                );
                match self.controller.create_property(input).await {
                    Ok(_) => {
                        self.create_draft = None;
                        self.print_list();
                    }
                    Err(_) => {
                        self.create_draft = Some(draft);
                        println!("Values kept: `create` to retry with them as defaults.");
                    }
                }
            }
            ConsoleCommand::View { id } => {
                if let Ok(detail) = self.controller.view_property(PropertyId(id)).await {
                    print!("{detail}");
                }
                self.controller.close_detail();
            }
            ConsoleCommand::Edit { id } => {
                if let Some(id) = id {
                    if self.controller.edit_property(PropertyId(id)).await.is_err() {
                        return Ok(Flow::Continue);
                    }
                }
                return self.fill_and_submit_edit().await;
            }
            ConsoleCommand::Cancel => {
                if self.controller.edit_surface().is_some() {
                    self.controller.close_edit();
                    println!("Edit cancelled.");
                } else {
                    println!("No edit in progress.");
                }
            }
            ConsoleCommand::Delete { id } => {
                let id = PropertyId(id);
                match self.controller.delete_property(id, &mut self.prompter).await {
                    Ok(true) => self.print_list(),
                    Ok(false) => println!("Delete cancelled."),
                    Err(_) => {}
                }
            }
            ConsoleCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    async fn read_create_form(&mut self) -> Result<Option<CreateDraft>> {
        let mut draft = self.create_draft.clone().unwrap_or_default();
        let retrying = self.create_draft.is_some();
        if retrying {
            println!("Blank keeps the previous value, `{CLEAR_FIELD}` clears it.");
        }

        for (field, value) in [
            ("address", &mut draft.address),
            ("price", &mut draft.price),
            ("size", &mut draft.size),
            ("description", &mut draft.description),
        ] {
            let answer = if retrying {
                self.prompter.ask_with_default(field, value).await?
            } else {
                self.prompter.ask(&format!("{field}: ")).await?
            };
            let Some(answer) = answer else {
                return Ok(None);
            };
            *value = answer;
        }
        Ok(Some(draft))
    }

    async fn fill_and_submit_edit(&mut self) -> Result<Flow> {
        let Some(surface) = self.controller.edit_surface() else {
            println!("No edit in progress. Use `edit <id>`.");
            return Ok(Flow::Continue);
        };
        let mut form = surface.form.clone();
        print!("{form}");
        println!("Blank keeps the current value, `{CLEAR_FIELD}` clears it.");

        for (field, value) in [
            ("address", &mut form.address),
            ("price", &mut form.price),
            ("size", &mut form.size),
            ("description", &mut form.description),
        ] {
            let Some(answer) = self.prompter.ask_with_default(field, value).await? else {
                return Ok(Flow::Quit);
            };
            *value = answer;
        }

        self.controller.set_edit_form(form);
        match self.controller.submit_edit().await {
            Some(Ok(_)) => self.print_list(),
            Some(Err(_)) => {
                println!("Edit form still open: `edit` to retry, `cancel` to discard.");
            }
            None => {}
        }
        Ok(Flow::Continue)
    }

    async fn refresh(&mut self) {
        let _ = self.controller.load_page().await;
        self.flush_notifications();
        self.print_list();
    }

    fn print_list(&self) {
        print!("{}", self.controller.view());
    }

    fn flush_notifications(&mut self) {
        for notification in self.controller.notifications_mut().drain_new() {
            let tag = match notification.kind {
                NotificationKind::Success => "ok",
                NotificationKind::Error => "error",
            };
            println!("[{tag}] {notification}");
        }
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;

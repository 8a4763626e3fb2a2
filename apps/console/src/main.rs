use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{HttpPropertyApi, ListController, NotificationCenter};
use tracing::info;

mod commands;
mod config;
mod prompt;
mod session;

use config::{load_settings, DEFAULT_CONFIG_PATH};
use prompt::Prompter;
use session::Session;

#[derive(Parser, Debug)]
#[command(name = "properties-console", about = "Browse and edit the properties listing")]
struct Args {
    /// Base URL of the properties backend
    #[arg(long)]
    server_url: Option<String>,
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    /// Tracing filter, e.g. `client_core=debug`
    #[arg(long)]
    log_filter: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut settings = load_settings(&args.config);
    if let Some(server_url) = args.server_url {
        settings.server_url = server_url;
    }
    if let Some(log_filter) = args.log_filter {
        settings.log_filter = log_filter;
    }

    tracing_subscriber::fmt()
        .with_env_filter(settings.log_filter.as_str())
        .with_writer(std::io::stderr)
        .init();

    let api = HttpPropertyApi::new(settings.server_url.as_str())
        .with_context(|| format!("invalid server url '{}'", settings.server_url))?;
    info!(server_url = api.server_url(), "console: starting");

    let controller = ListController::with_notifications(
        Arc::new(api),
        NotificationCenter::new(settings.notification_ttl()),
    );
    Session::new(controller, Prompter::stdin()).run().await
}

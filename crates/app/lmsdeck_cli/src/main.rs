//! `lmsdeck`: render LMS configuration cards and run lifecycle actions.
//!
//! Logs go to stderr so stdout carries only the JSON output.

// Import and re-export the `error` module
pub use self::error::{Error, Result};
mod error;

use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use serde_json::json;
use tracing::{error, info};

use cli::{Cli, Commands, Target};
use lmsdeck_core::api::{ConfigListing, LmsApiClient};
use lmsdeck_core::config::DeckConfig;
use lmsdeck_core::integration::{CallerContext, LifecycleController, build_card, build_deck};
use lmsdeck_core::models::integration::{Action, ConfigKey, IntegrationConfig};

mod cli;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,lmsdeck_core=debug")),
        )
        .init();

    if let Err(e) = run(Cli::parse()).await {
        error!("{}", e);
        std::process::exit(1);
    }
}

async fn run(args: Cli) -> Result<()> {
    // Flags win over the environment; clap already falls back to it.
    let mut config = DeckConfig::from_env();
    if let Some(url) = args.api_base_url.filter(|v| !v.trim().is_empty()) {
        config.api_base_url = url;
    }
    if let Some(enterprise) = args.enterprise_customer.filter(|v| !v.trim().is_empty()) {
        config.enterprise_customer = Some(enterprise);
    }
    if args.sync_history {
        config.sync_history_enabled = true;
    }
    let caller = config.caller(args.admin);

    match args.command {
        Commands::Version => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        }
        Commands::Cards { file } => {
            let configs = match file {
                Some(path) => read_listing(&path)?,
                None => {
                    let client = LmsApiClient::from_config(&config);
                    client.list(config.enterprise_customer()?).await?
                }
            };
            let deck = build_deck(&configs, &caller)?;
            print_json(&deck)?;
        }
        Commands::Enable(target) => apply(&config, caller, Action::Enable, &target).await?,
        Commands::Disable(target) => apply(&config, caller, Action::Disable, &target).await?,
        Commands::Delete(target) => apply(&config, caller, Action::Delete, &target).await?,
    }

    Ok(())
}

/// Run one lifecycle mutation, then re-fetch and print the record's card.
async fn apply(
    config: &DeckConfig,
    caller: CallerContext,
    action: Action,
    target: &Target,
) -> Result<()> {
    let enterprise = config.enterprise_customer()?;
    let client = Arc::new(LmsApiClient::from_config(config));
    let key = target.key();

    let listing = client.list(enterprise).await?;
    let record = find(&listing, key)
        .ok_or_else(|| Error::Custom(format!("Configuration {key} not found")))?;

    let controller = LifecycleController::new(client.clone(), enterprise, caller);
    match action {
        Action::Enable => controller.enable(record).await?,
        Action::Disable => controller.disable(record).await?,
        Action::Delete => controller.delete(record).await?,
        Action::Configure | Action::ViewSyncHistory => {
            return Err(Error::Custom(format!("'{action}' is not a lifecycle mutation")));
        }
    }

    let refreshed = client.list(enterprise).await?;
    info!(%key, count = refreshed.len(), "Refreshed LMS configuration listing");
    match find(&refreshed, key) {
        Some(record) => print_json(&build_card(record, &caller)?)?,
        None => print_json(&json!({
            "channelCode": key.channel,
            "id": key.id,
            "deleted": true,
        }))?,
    }
    Ok(())
}

fn find(configs: &[IntegrationConfig], key: ConfigKey) -> Option<&IntegrationConfig> {
    configs.iter().find(|c| c.key() == key)
}

fn read_listing(path: &Path) -> Result<Vec<IntegrationConfig>> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

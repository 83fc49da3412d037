use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use lmsdeck_core::models::integration::{ChannelCode, ConfigKey};

/// Render and manage enterprise LMS integration configurations.
#[derive(Parser, Debug)]
#[command(name = "lmsdeck", version, about)]
pub struct Cli {
    /// LMS base URL.
    #[arg(long, global = true, env = "LMS_API_BASE_URL")]
    pub api_base_url: Option<String>,

    /// Owning enterprise UUID.
    #[arg(long, global = true, env = "ENTERPRISE_CUSTOMER_UUID")]
    pub enterprise_customer: Option<String>,

    /// Act as an enterprise administrator.
    #[arg(long, global = true, default_value_t = false)]
    pub admin: bool,

    /// Turn on integration reporting (sync history) regardless of
    /// `FEATURE_INTEGRATION_REPORTING`.
    #[arg(long, global = true, default_value_t = false)]
    pub sync_history: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the version.
    Version,

    /// Print the configuration cards as JSON.
    Cards {
        /// Read the listing from a JSON file instead of the API.
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Enable a disabled configuration.
    Enable(Target),

    /// Disable an active configuration.
    Disable(Target),

    /// Delete an incomplete configuration.
    Delete(Target),
}

/// A configuration addressed by channel and id.
#[derive(Args, Debug, Clone)]
pub struct Target {
    /// Channel code or path segment (e.g. BLACKBOARD, csod, sap_success_factors).
    #[arg(long)]
    pub channel: ChannelCode,

    /// Configuration id.
    #[arg(long)]
    pub id: i64,
}

impl Target {
    pub fn key(&self) -> ConfigKey {
        ConfigKey {
            channel: self.channel,
            id: self.id,
        }
    }
}

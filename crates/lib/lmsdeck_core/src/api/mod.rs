//! Integrated-channels REST API.
//!
//! The listing source and the per-channel mutation endpoint are traits so the
//! lifecycle controller can run against the live API or an in-memory double.

pub mod client;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::integration::{ChannelCode, IntegrationConfig, UpdatePayload};

pub use client::LmsApiClient;

/// REST client errors.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Unexpected response status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Response parse error: {0}")]
    Decode(String),
}

/// Source of the enterprise's configuration records.
#[async_trait]
pub trait ConfigListing: Send + Sync {
    /// All configurations of the enterprise, across every channel, in order.
    async fn list(&self, enterprise_customer: &str) -> Result<Vec<IntegrationConfig>, ApiError>;
}

/// Mutation endpoint for configuration records.
#[async_trait]
pub trait ConfigEndpoint: Send + Sync {
    async fn update(
        &self,
        channel: ChannelCode,
        id: i64,
        payload: &UpdatePayload,
    ) -> Result<(), ApiError>;

    async fn delete(&self, channel: ChannelCode, id: i64) -> Result<(), ApiError>;
}

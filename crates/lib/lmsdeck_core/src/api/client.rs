//! HTTP client for the integrated-channels configuration API.
//!
//! Each channel exposes `{base}/integrated_channels/api/v1/{segment}/configuration/`
//! with list (GET), update (PUT `{id}/`) and delete (DELETE `{id}/`).

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use tracing::debug;

use super::{ApiError, ConfigEndpoint, ConfigListing};
use crate::config::DeckConfig;
use crate::models::integration::{
    ChannelCode, IntegrationConfig, UpdatePayload, ValidationResult, deserialize_validation,
};

/// Listing row; the channel code is optional on per-channel endpoints.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListedConfig {
    id: i64,
    #[serde(default, alias = "channel_code")]
    channel_code: Option<ChannelCode>,
    #[serde(default, alias = "display_name")]
    display_name: String,
    #[serde(default)]
    active: bool,
    #[serde(
        default,
        rename = "isValid",
        alias = "is_valid",
        deserialize_with = "deserialize_validation"
    )]
    validation: Option<ValidationResult>,
}

impl ListedConfig {
    fn into_config(self, channel: ChannelCode) -> IntegrationConfig {
        IntegrationConfig {
            id: self.id,
            channel_code: self.channel_code.unwrap_or(channel),
            display_name: self.display_name,
            active: self.active,
            validation: self.validation,
        }
    }
}

/// REST client for LMS configuration records.
#[derive(Debug, Clone)]
pub struct LmsApiClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl LmsApiClient {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        }
    }

    pub fn from_config(config: &DeckConfig) -> Self {
        Self::new(config.api_base_url.clone(), config.api_token.clone())
    }

    /// Collection URL for a channel.
    pub fn configuration_url(&self, channel: ChannelCode) -> String {
        format!(
            "{}/integrated_channels/api/v1/{}/configuration/",
            self.base_url,
            channel.path_segment()
        )
    }

    fn record_url(&self, channel: ChannelCode, id: i64) -> String {
        format!("{}{id}/", self.configuration_url(channel))
    }

    fn authorized(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    /// Configurations of one channel.
    pub async fn list_channel(
        &self,
        channel: ChannelCode,
        enterprise_customer: &str,
    ) -> Result<Vec<IntegrationConfig>, ApiError> {
        let url = self.configuration_url(channel);
        let resp = self
            .authorized(self.http.get(&url))
            .query(&[("enterprise_customer", enterprise_customer)])
            .send()
            .await?;
        let resp = check_status(resp).await?;

        let rows: Vec<ListedConfig> = resp
            .json()
            .await
            .map_err(|e| ApiError::Decode(format!("{channel} listing: {e}")))?;

        debug!(channel = %channel, count = rows.len(), "Listed LMS configurations");
        Ok(rows.into_iter().map(|r| r.into_config(channel)).collect())
    }
}

#[async_trait]
impl ConfigListing for LmsApiClient {
    async fn list(&self, enterprise_customer: &str) -> Result<Vec<IntegrationConfig>, ApiError> {
        let mut configs = Vec::new();
        for channel in ChannelCode::ALL {
            configs.extend(self.list_channel(channel, enterprise_customer).await?);
        }
        Ok(configs)
    }
}

#[async_trait]
impl ConfigEndpoint for LmsApiClient {
    async fn update(
        &self,
        channel: ChannelCode,
        id: i64,
        payload: &UpdatePayload,
    ) -> Result<(), ApiError> {
        let url = self.record_url(channel, id);
        let resp = self
            .authorized(self.http.put(&url))
            .json(payload)
            .send()
            .await?;
        check_status(resp).await?;
        Ok(())
    }

    async fn delete(&self, channel: ChannelCode, id: i64) -> Result<(), ApiError> {
        let url = self.record_url(channel, id);
        let resp = self.authorized(self.http.delete(&url)).send().await?;
        check_status(resp).await?;
        Ok(())
    }
}

/// Turn a non-2xx response into [`ApiError::Status`].
async fn check_status(resp: Response) -> Result<Response, ApiError> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status().as_u16();
    let body = resp
        .text()
        .await
        .unwrap_or_else(|_| "<no body>".to_string());
    Err(ApiError::Status { status, body })
}

//! Config card deck: one display card per configuration record.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::IntegrationError;
use super::policy::CallerContext;
use super::remediation::{self, Remediation};
use crate::models::integration::{Action, ChannelCode, ConfigStatus, IntegrationConfig};

/// View model for one configuration card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigCard {
    pub id: i64,
    pub channel_code: ChannelCode,
    pub channel_label: String,
    pub display_name: String,
    pub status: ConfigStatus,
    pub status_label: String,
    /// Present only for incomplete configurations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remediation: Option<Remediation>,
    pub actions: BTreeSet<Action>,
}

/// Build the card for one record.
pub fn build_card(
    config: &IntegrationConfig,
    ctx: &CallerContext,
) -> Result<ConfigCard, IntegrationError> {
    let status = config.status()?;
    let remediation = match (status, &config.validation) {
        (ConfigStatus::Incomplete, Some(v)) => {
            Some(remediation::build(&v.missing_fields, &v.incorrect_fields))
        }
        _ => None,
    };

    Ok(ConfigCard {
        id: config.id,
        channel_code: config.channel_code,
        channel_label: config.channel_code.label().to_string(),
        display_name: config.display_name.clone(),
        status,
        status_label: status.label().to_string(),
        remediation,
        actions: ctx.permitted_actions(status),
    })
}

/// Build cards for a listing, keeping its order.
///
/// Fails on the first record without a validation result.
pub fn build_deck(
    configs: &[IntegrationConfig],
    ctx: &CallerContext,
) -> Result<Vec<ConfigCard>, IntegrationError> {
    configs.iter().map(|c| build_card(c, ctx)).collect()
}

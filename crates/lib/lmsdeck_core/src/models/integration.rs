//! LMS integration configuration domain models.
//!
//! Shapes of the configuration records returned by the enterprise
//! integrated-channels API, plus the derived status and action enums used
//! by the card deck.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// Enums
// =============================================================================

/// Supported LMS integration channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ChannelCode {
    #[serde(rename = "BLACKBOARD")]
    Blackboard,
    #[serde(rename = "CANVAS")]
    Canvas,
    #[serde(rename = "CSOD")]
    Cornerstone,
    #[serde(rename = "DEGREED2")]
    Degreed2,
    #[serde(rename = "MOODLE")]
    Moodle,
    #[serde(rename = "SAP")]
    SapSuccessFactors,
}

impl ChannelCode {
    /// Every channel, in listing order.
    pub const ALL: [ChannelCode; 6] = [
        ChannelCode::Blackboard,
        ChannelCode::Canvas,
        ChannelCode::Cornerstone,
        ChannelCode::Degreed2,
        ChannelCode::Moodle,
        ChannelCode::SapSuccessFactors,
    ];

    /// Wire code, as carried in `channelCode`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChannelCode::Blackboard => "BLACKBOARD",
            ChannelCode::Canvas => "CANVAS",
            ChannelCode::Cornerstone => "CSOD",
            ChannelCode::Degreed2 => "DEGREED2",
            ChannelCode::Moodle => "MOODLE",
            ChannelCode::SapSuccessFactors => "SAP",
        }
    }

    /// Path segment of the channel's configuration endpoint.
    pub fn path_segment(&self) -> &'static str {
        match self {
            ChannelCode::Blackboard => "blackboard",
            ChannelCode::Canvas => "canvas",
            ChannelCode::Cornerstone => "cornerstone",
            ChannelCode::Degreed2 => "degreed2",
            ChannelCode::Moodle => "moodle",
            ChannelCode::SapSuccessFactors => "sap_success_factors",
        }
    }

    /// Human-readable provider name.
    pub fn label(&self) -> &'static str {
        match self {
            ChannelCode::Blackboard => "Blackboard",
            ChannelCode::Canvas => "Canvas",
            ChannelCode::Cornerstone => "Cornerstone",
            ChannelCode::Degreed2 => "Degreed",
            ChannelCode::Moodle => "Moodle",
            ChannelCode::SapSuccessFactors => "SAP SuccessFactors",
        }
    }
}

impl fmt::Display for ChannelCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognised channel code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown LMS channel code: {0}")]
pub struct UnknownChannel(pub String);

impl FromStr for ChannelCode {
    type Err = UnknownChannel;

    /// Accepts the wire code or the path segment, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ChannelCode::ALL
            .into_iter()
            .find(|c| {
                c.as_str().eq_ignore_ascii_case(wanted)
                    || c.path_segment().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| UnknownChannel(s.to_string()))
    }
}

/// Derived operational status of a configuration. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigStatus {
    Active,
    Disabled,
    Incomplete,
}

impl ConfigStatus {
    /// Badge text shown on the card.
    pub fn label(&self) -> &'static str {
        match self {
            ConfigStatus::Active => "Active",
            ConfigStatus::Disabled => "Disabled",
            ConfigStatus::Incomplete => "Incomplete",
        }
    }
}

impl fmt::Display for ConfigStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// User-triggered lifecycle action.
///
/// Declaration order is the display order of an action set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Action {
    Configure,
    Enable,
    Disable,
    Delete,
    ViewSyncHistory,
}

impl Action {
    /// Menu text for the action.
    pub fn label(&self) -> &'static str {
        match self {
            Action::Configure => "Configure",
            Action::Enable => "Enable",
            Action::Disable => "Disable",
            Action::Delete => "Delete",
            Action::ViewSyncHistory => "View sync history",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Records
// =============================================================================

/// Missing and incorrect required fields of one configuration.
///
/// Computed by the external validator. Deserializes from either the portal
/// form `[{"missing": [..]}, {"incorrect": [..]}]` or a flat object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ValidationWire")]
pub struct ValidationResult {
    #[serde(rename = "missing")]
    pub missing_fields: BTreeSet<String>,
    #[serde(rename = "incorrect")]
    pub incorrect_fields: BTreeSet<String>,
}

impl ValidationResult {
    pub fn new<M, I>(missing: M, incorrect: I) -> Self
    where
        M: IntoIterator,
        M::Item: Into<String>,
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            missing_fields: missing.into_iter().map(Into::into).collect(),
            incorrect_fields: incorrect.into_iter().map(Into::into).collect(),
        }
    }

    /// A configuration is complete iff nothing is missing or incorrect.
    pub fn is_complete(&self) -> bool {
        self.missing_fields.is_empty() && self.incorrect_fields.is_empty()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ValidationWire {
    Entries(Vec<ValidationEntry>),
    Flat {
        #[serde(default)]
        missing: BTreeSet<String>,
        #[serde(default)]
        incorrect: BTreeSet<String>,
    },
}

#[derive(Deserialize)]
struct ValidationEntry {
    #[serde(default)]
    missing: BTreeSet<String>,
    #[serde(default)]
    incorrect: BTreeSet<String>,
}

impl From<ValidationWire> for ValidationResult {
    fn from(wire: ValidationWire) -> Self {
        match wire {
            ValidationWire::Flat { missing, incorrect } => Self {
                missing_fields: missing,
                incorrect_fields: incorrect,
            },
            ValidationWire::Entries(entries) => {
                let mut result = Self::default();
                for entry in entries {
                    result.missing_fields.extend(entry.missing);
                    result.incorrect_fields.extend(entry.incorrect);
                }
                result
            }
        }
    }
}

/// Deserialize an optional `isValid` field.
///
/// `null`, a missing field and an empty entry list all mean the validator
/// attached nothing, so the record's status cannot be derived.
pub(crate) fn deserialize_validation<'de, D>(
    deserializer: D,
) -> Result<Option<ValidationResult>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let wire = Option::<ValidationWire>::deserialize(deserializer)?;
    Ok(match wire {
        None => None,
        Some(ValidationWire::Entries(entries)) if entries.is_empty() => None,
        Some(wire) => Some(wire.into()),
    })
}

/// One stored connection between the enterprise and an external LMS.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationConfig {
    pub id: i64,
    #[serde(alias = "channel_code")]
    pub channel_code: ChannelCode,
    #[serde(default, alias = "display_name")]
    pub display_name: String,
    #[serde(default)]
    pub active: bool,
    /// `None` when the listing carried no validation result.
    #[serde(
        default,
        rename = "isValid",
        alias = "is_valid",
        deserialize_with = "deserialize_validation"
    )]
    pub validation: Option<ValidationResult>,
}

impl IntegrationConfig {
    pub fn key(&self) -> ConfigKey {
        ConfigKey {
            channel: self.channel_code,
            id: self.id,
        }
    }
}

/// Identity of a configuration across all channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigKey {
    pub channel: ChannelCode,
    pub id: i64,
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.channel, self.id)
    }
}

// =============================================================================
// Mutation payloads
// =============================================================================

/// Body of the enable/disable update mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatePayload {
    pub active: bool,
    pub enterprise_customer: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_portal_validation_entries() {
        let config: IntegrationConfig = serde_json::from_value(json!({
            "channelCode": "BLACKBOARD",
            "id": 2,
            "isValid": [
                { "missing": ["client_id", "refresh_token"] },
                { "incorrect": ["blackboard_base_url"] }
            ],
            "active": false,
            "displayName": "barfoo"
        }))
        .unwrap();

        let validation = config.validation.unwrap();
        assert_eq!(
            validation.missing_fields,
            BTreeSet::from(["client_id".to_string(), "refresh_token".to_string()])
        );
        assert_eq!(
            validation.incorrect_fields,
            BTreeSet::from(["blackboard_base_url".to_string()])
        );
        assert_eq!(config.channel_code, ChannelCode::Blackboard);
        assert_eq!(config.display_name, "barfoo");
    }

    #[test]
    fn deserializes_entries_in_any_order() {
        let validation: ValidationResult =
            serde_json::from_value(json!([{ "incorrect": ["x"] }, { "missing": [] }])).unwrap();
        assert!(validation.missing_fields.is_empty());
        assert_eq!(validation.incorrect_fields.len(), 1);
    }

    #[test]
    fn deserializes_flat_validation_object() {
        let validation: ValidationResult =
            serde_json::from_value(json!({ "missing": ["client_id"] })).unwrap();
        assert_eq!(validation, ValidationResult::new(["client_id"], Vec::<String>::new()));
    }

    #[test]
    fn absent_validation_is_none() {
        let config: IntegrationConfig = serde_json::from_value(json!({
            "channelCode": "CANVAS",
            "id": 7,
            "active": true,
            "isValid": null
        }))
        .unwrap();
        assert!(config.validation.is_none());
    }

    #[test]
    fn empty_validation_list_is_none() {
        let config: IntegrationConfig = serde_json::from_value(json!({
            "channelCode": "BLACKBOARD",
            "id": 4,
            "active": true,
            "isValid": []
        }))
        .unwrap();
        assert!(config.validation.is_none());
    }

    #[test]
    fn accepts_snake_case_listing_fields() {
        let config: IntegrationConfig = serde_json::from_value(json!({
            "channel_code": "SAP",
            "id": 3,
            "display_name": "sap",
            "active": true,
            "is_valid": { "missing": [], "incorrect": [] }
        }))
        .unwrap();
        assert_eq!(config.channel_code, ChannelCode::SapSuccessFactors);
        assert!(config.validation.unwrap().is_complete());
    }

    #[test]
    fn channel_parses_code_or_segment() {
        assert_eq!("csod".parse::<ChannelCode>().unwrap(), ChannelCode::Cornerstone);
        assert_eq!(
            "sap_success_factors".parse::<ChannelCode>().unwrap(),
            ChannelCode::SapSuccessFactors
        );
        assert!("workday".parse::<ChannelCode>().is_err());
    }

    #[test]
    fn update_payload_uses_wire_field_names() {
        let payload = UpdatePayload {
            active: true,
            enterprise_customer: "test-enterprise-id".into(),
        };
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({ "active": true, "enterprise_customer": "test-enterprise-id" })
        );
    }

    #[test]
    fn action_order_follows_declaration() {
        let actions: BTreeSet<Action> =
            [Action::ViewSyncHistory, Action::Delete, Action::Configure].into();
        let ordered: Vec<_> = actions.into_iter().collect();
        assert_eq!(
            ordered,
            vec![Action::Configure, Action::Delete, Action::ViewSyncHistory]
        );
    }
}

//! Configuration status resolution.

use std::collections::BTreeSet;

use super::IntegrationError;
use crate::models::integration::{ConfigStatus, IntegrationConfig};

/// Derive the operational status from the active flag and validation sets.
///
/// Completeness dominates: any missing or incorrect field yields
/// `Incomplete` whatever `active` says.
pub fn resolve(
    active: bool,
    missing_fields: &BTreeSet<String>,
    incorrect_fields: &BTreeSet<String>,
) -> ConfigStatus {
    if !missing_fields.is_empty() || !incorrect_fields.is_empty() {
        ConfigStatus::Incomplete
    } else if active {
        ConfigStatus::Active
    } else {
        ConfigStatus::Disabled
    }
}

impl IntegrationConfig {
    /// Status of this record. Fails when no validation result is attached.
    pub fn status(&self) -> Result<ConfigStatus, IntegrationError> {
        let validation = self
            .validation
            .as_ref()
            .ok_or(IntegrationError::ValidationAbsent { key: self.key() })?;
        Ok(resolve(
            self.active,
            &validation.missing_fields,
            &validation.incorrect_fields,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::integration::{ChannelCode, ValidationResult};

    fn set(fields: &[&str]) -> BTreeSet<String> {
        fields.iter().map(|f| f.to_string()).collect()
    }

    #[test]
    fn complete_and_active_is_active() {
        assert_eq!(resolve(true, &set(&[]), &set(&[])), ConfigStatus::Active);
    }

    #[test]
    fn complete_and_inactive_is_disabled() {
        assert_eq!(resolve(false, &set(&[]), &set(&[])), ConfigStatus::Disabled);
    }

    #[test]
    fn any_invalid_field_is_incomplete_regardless_of_active() {
        let cases = [
            (set(&["client_id"]), set(&[])),
            (set(&[]), set(&["blackboard_base_url"])),
            (set(&["client_id", "refresh_token"]), set(&["blackboard_base_url"])),
        ];
        for (missing, incorrect) in &cases {
            for active in [true, false] {
                assert_eq!(
                    resolve(active, missing, incorrect),
                    ConfigStatus::Incomplete,
                    "active={active} missing={missing:?} incorrect={incorrect:?}"
                );
            }
        }
    }

    #[test]
    fn record_without_validation_fails_loudly() {
        let config = IntegrationConfig {
            id: 9,
            channel_code: ChannelCode::Moodle,
            display_name: "moodle".into(),
            active: true,
            validation: None,
        };
        let err = config.status().unwrap_err();
        assert!(matches!(err, IntegrationError::ValidationAbsent { key } if key.id == 9));
    }

    #[test]
    fn empty_validation_list_fails_loudly() {
        let config: IntegrationConfig = serde_json::from_value(serde_json::json!({
            "channelCode": "CANVAS",
            "id": 11,
            "active": true,
            "isValid": []
        }))
        .unwrap();
        let err = config.status().unwrap_err();
        assert!(matches!(err, IntegrationError::ValidationAbsent { key } if key.id == 11));
    }

    #[test]
    fn record_status_uses_attached_validation() {
        let config = IntegrationConfig {
            id: 1,
            channel_code: ChannelCode::Blackboard,
            display_name: "foobar".into(),
            active: true,
            validation: Some(ValidationResult::new(["refresh_token"], Vec::<String>::new())),
        };
        assert_eq!(config.status().unwrap(), ConfigStatus::Incomplete);
    }
}

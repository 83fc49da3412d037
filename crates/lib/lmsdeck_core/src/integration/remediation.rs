//! "Next steps" guidance for incomplete configurations.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Field holding the OAuth refresh credential.
pub const REFRESH_TOKEN_FIELD: &str = "refresh_token";

/// Title of the remediation popover.
pub const NEXT_STEPS_TITLE: &str = "Next Steps";

/// Remediation message for an incomplete configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Remediation {
    pub title: String,
    pub headline: String,
    /// Distinct missing or incorrect fields.
    pub field_count: usize,
    pub uses_authorization_phrasing: bool,
}

/// Render a field count with the matching noun: "1 field", "3 fields".
pub fn field_count_label(count: usize) -> String {
    if count == 1 {
        "1 field".to_string()
    } else {
        format!("{count} fields")
    }
}

/// Build the remediation message from the validation sets.
pub fn build(missing_fields: &BTreeSet<String>, incorrect_fields: &BTreeSet<String>) -> Remediation {
    let field_count = missing_fields.union(incorrect_fields).count();

    // Only the refresh token is missing: the LMS must be re-authorized through
    // its OAuth flow, the field cannot be typed in by hand.
    if incorrect_fields.is_empty()
        && missing_fields.len() == 1
        && missing_fields.contains(REFRESH_TOKEN_FIELD)
    {
        return Remediation {
            title: NEXT_STEPS_TITLE.to_string(),
            headline: "Select Configure to authorize your LMS.".to_string(),
            field_count,
            uses_authorization_phrasing: true,
        };
    }

    Remediation {
        title: NEXT_STEPS_TITLE.to_string(),
        headline: format!(
            "Select Configure to complete {} before enabling this integration.",
            field_count_label(field_count)
        ),
        field_count,
        uses_authorization_phrasing: false,
    }
}

//! Integration configuration status and lifecycle.
//!
//! Pure rules (status, remediation, action policy) plus the controller that
//! issues enable/disable/delete mutations against a [`ConfigEndpoint`].
//!
//! [`ConfigEndpoint`]: crate::api::ConfigEndpoint

pub mod deck;
pub mod lifecycle;
pub mod policy;
pub mod remediation;
pub mod status;

use thiserror::Error;

use crate::api::ApiError;
use crate::models::integration::{Action, ConfigKey, ConfigStatus};

pub use deck::{ConfigCard, build_card, build_deck};
pub use lifecycle::LifecycleController;
pub use policy::{CallerContext, permitted_actions};
pub use remediation::Remediation;
pub use status::resolve;

/// Integration lifecycle errors.
#[derive(Debug, Error)]
pub enum IntegrationError {
    #[error("Validation result absent for configuration {key}")]
    ValidationAbsent { key: ConfigKey },

    #[error("Action '{action}' is not permitted for {status} configuration {key}")]
    PolicyViolation {
        key: ConfigKey,
        action: Action,
        status: ConfigStatus,
    },

    #[error("A lifecycle action is already in flight for configuration {key}")]
    InFlight { key: ConfigKey },

    #[error("Lifecycle action failed: {cause}")]
    Lifecycle {
        #[from]
        cause: ApiError,
    },
}

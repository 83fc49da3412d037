//! Lifecycle controller: enable, disable and delete mutations.
//!
//! Contract with the caller is "act, then refresh": a successful call means
//! the caller's copy of the record is stale and the listing must be fetched
//! again. No local state is updated, rolled back or retried here.
//!
//! Calls are mutually exclusive per `(channel, id)`: while one is outstanding
//! a second call for the same record is refused with
//! [`IntegrationError::InFlight`].

use std::sync::Arc;

use dashmap::DashSet;
use tracing::{error, info, warn};

use super::IntegrationError;
use super::policy::CallerContext;
use crate::api::ConfigEndpoint;
use crate::models::integration::{Action, ConfigKey, ConfigStatus, IntegrationConfig, UpdatePayload};

/// Issues lifecycle mutations for one enterprise.
pub struct LifecycleController {
    endpoint: Arc<dyn ConfigEndpoint>,
    enterprise_customer: String,
    caller: CallerContext,
    in_flight: DashSet<ConfigKey>,
}

/// Marks a record busy until dropped.
struct InFlightGuard<'a> {
    set: &'a DashSet<ConfigKey>,
    key: ConfigKey,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.set.remove(&self.key);
    }
}

impl LifecycleController {
    pub fn new(
        endpoint: Arc<dyn ConfigEndpoint>,
        enterprise_customer: impl Into<String>,
        caller: CallerContext,
    ) -> Self {
        Self {
            endpoint,
            enterprise_customer: enterprise_customer.into(),
            caller,
            in_flight: DashSet::new(),
        }
    }

    pub fn enterprise_customer(&self) -> &str {
        &self.enterprise_customer
    }

    /// Whether a call for this record is outstanding.
    pub fn is_in_flight(&self, key: &ConfigKey) -> bool {
        self.in_flight.contains(key)
    }

    /// Activate a disabled configuration.
    pub async fn enable(&self, config: &IntegrationConfig) -> Result<(), IntegrationError> {
        self.set_active(config, Action::Enable, true).await
    }

    /// Deactivate an active configuration.
    pub async fn disable(&self, config: &IntegrationConfig) -> Result<(), IntegrationError> {
        self.set_active(config, Action::Disable, false).await
    }

    /// Discard an incomplete configuration.
    pub async fn delete(&self, config: &IntegrationConfig) -> Result<(), IntegrationError> {
        let key = config.key();
        self.authorize(config, Action::Delete)?;
        let _guard = self.begin(key)?;

        match self.endpoint.delete(key.channel, key.id).await {
            Ok(()) => {
                info!(channel = %key.channel, id = key.id, "Deleted LMS configuration");
                Ok(())
            }
            Err(e) => {
                error!(channel = %key.channel, id = key.id, "Failed to delete LMS configuration: {e}");
                Err(e.into())
            }
        }
    }

    async fn set_active(
        &self,
        config: &IntegrationConfig,
        action: Action,
        active: bool,
    ) -> Result<(), IntegrationError> {
        let key = config.key();
        self.authorize(config, action)?;
        let _guard = self.begin(key)?;

        let payload = UpdatePayload {
            active,
            enterprise_customer: self.enterprise_customer.clone(),
        };
        match self.endpoint.update(key.channel, key.id, &payload).await {
            Ok(()) => {
                info!(channel = %key.channel, id = key.id, active, "Updated LMS configuration");
                Ok(())
            }
            Err(e) => {
                error!(channel = %key.channel, id = key.id, "Failed to {action} LMS configuration: {e}");
                Err(e.into())
            }
        }
    }

    /// Refuse actions the current status does not permit.
    fn authorize(
        &self,
        config: &IntegrationConfig,
        action: Action,
    ) -> Result<ConfigStatus, IntegrationError> {
        let status = config.status()?;
        if !self.caller.permitted_actions(status).contains(&action) {
            let key = config.key();
            warn!(channel = %key.channel, id = key.id, %status, "Refused '{action}'");
            return Err(IntegrationError::PolicyViolation {
                key,
                action,
                status,
            });
        }
        Ok(status)
    }

    fn begin(&self, key: ConfigKey) -> Result<InFlightGuard<'_>, IntegrationError> {
        if !self.in_flight.insert(key) {
            warn!(channel = %key.channel, id = key.id, "Lifecycle action already in flight");
            return Err(IntegrationError::InFlight { key });
        }
        Ok(InFlightGuard {
            set: &self.in_flight,
            key,
        })
    }
}

//! Action policy: which lifecycle actions a status permits.

use std::collections::BTreeSet;

use crate::models::integration::{Action, ConfigStatus};

/// Who is looking at the deck and which features are switched on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallerContext {
    /// From the authenticated-user context.
    pub is_administrator: bool,
    /// `FEATURE_INTEGRATION_REPORTING`.
    pub sync_history_enabled: bool,
}

impl CallerContext {
    pub fn permitted_actions(&self, status: ConfigStatus) -> BTreeSet<Action> {
        permitted_actions(status, self.is_administrator, self.sync_history_enabled)
    }
}

/// Permitted actions for a status, in display order.
///
/// `Configure` is always present. Enable and Disable are mutually exclusive.
/// Sync history needs an active configuration, an administrator and the
/// reporting feature, all three.
pub fn permitted_actions(
    status: ConfigStatus,
    is_administrator: bool,
    sync_history_enabled: bool,
) -> BTreeSet<Action> {
    let mut actions = BTreeSet::from([Action::Configure]);
    match status {
        ConfigStatus::Active => {
            actions.insert(Action::Disable);
            if is_administrator && sync_history_enabled {
                actions.insert(Action::ViewSyncHistory);
            }
        }
        ConfigStatus::Disabled => {
            actions.insert(Action::Enable);
        }
        // Complete configurations are disabled, never deleted outright.
        ConfigStatus::Incomplete => {
            actions.insert(Action::Delete);
        }
    }
    actions
}

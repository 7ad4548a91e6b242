//! Engine configuration.

use serde::{Deserialize, Serialize};

/// Mode switches for the reassignment service.
///
/// Both switches default to off: rebalancing then only happens through an
/// explicitly confirmed plan and new tasks stay unassigned unless the caller
/// names an assignee.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Apply rebalancing plans without confirmation, once per detected
    /// overload condition.
    pub auto_reassign: bool,
    /// Assign unassigned tasks to the least-loaded member when they are
    /// created.
    pub auto_assign_on_create: bool,
}

impl EngineConfig {
    /// Returns a configuration with both automatic behaviours enabled.
    #[must_use]
    pub const fn automatic() -> Self {
        Self {
            auto_reassign: true,
            auto_assign_on_create: true,
        }
    }

    /// Sets whether plans are applied automatically.
    #[must_use]
    pub const fn with_auto_reassign(mut self, enabled: bool) -> Self {
        self.auto_reassign = enabled;
        self
    }

    /// Sets whether new tasks are auto-assigned.
    #[must_use]
    pub const fn with_auto_assign_on_create(mut self, enabled: bool) -> Self {
        self.auto_assign_on_create = enabled;
        self
    }
}

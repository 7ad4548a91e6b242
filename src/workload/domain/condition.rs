//! Fingerprints of overload conditions.

use super::OverloadReport;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// SHA-256 digest identifying one overload condition of a team.
///
/// The digest covers the team, each overloaded member's load and capacity,
/// and the identity and version of every movable task. Any assignment or
/// status change that touches the condition therefore yields a new
/// fingerprint, while re-observing unchanged state yields the same one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OverloadFingerprint(String);

impl OverloadFingerprint {
    /// Computes the fingerprint of `report`.
    #[must_use]
    pub fn of(report: &OverloadReport) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(report.team_id().to_string());
        for overloaded in report.overloaded() {
            let load = &overloaded.load;
            hasher.update(format!(
                "|{}:{}/{}",
                load.member_id, load.active_load, load.capacity
            ));
            for task in &overloaded.movable_tasks {
                hasher.update(format!(";{}@{}", task.task_id, task.version.value()));
            }
        }
        let digest = hasher.finalize();
        Self(digest.iter().map(|byte| format!("{byte:02x}")).collect())
    }

    /// Returns the hex-encoded digest.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OverloadFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

//! Per-move results of applying a reassignment plan.

use super::{ActivityEntryId, Capacity, MemberId, ProposedMove, TaskVersion};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A move that was persisted together with its activity entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedMove {
    /// The move as planned.
    pub proposed: ProposedMove,
    /// Task version after the assignee change.
    pub version: TaskVersion,
    /// Activity entry recording the move.
    pub entry_id: ActivityEntryId,
}

/// Why a planned move was not applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    /// The task no longer exists.
    TaskMissing,
    /// The task is no longer held by the planned source member.
    ReassignedAway {
        /// Current holder, if any.
        current: Option<MemberId>,
    },
    /// The task is done or high priority and may not be moved automatically.
    ProtectedTask,
    /// The destination is no longer a member of the team.
    TargetMissing,
    /// The destination has no spare capacity any more.
    TargetAtCapacity {
        /// Destination's active load at validation time.
        load: u32,
        /// Destination's capacity.
        capacity: Capacity,
    },
    /// Another writer changed the task between validation and update.
    Conflict {
        /// Version found in the store.
        current: TaskVersion,
    },
    /// The activity entry could not be written; the assignee change was
    /// rolled back.
    ActivityLogFailed {
        /// Rendered persistence error.
        message: String,
    },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TaskMissing => f.write_str("task no longer exists"),
            Self::ReassignedAway { current: Some(member) } => {
                write!(f, "task was reassigned to {member}")
            }
            Self::ReassignedAway { current: None } => f.write_str("task was unassigned"),
            Self::ProtectedTask => f.write_str("task is done or high priority"),
            Self::TargetMissing => f.write_str("destination is not a team member"),
            Self::TargetAtCapacity { load, capacity } => {
                write!(f, "destination holds {load} of {capacity} tasks")
            }
            Self::Conflict { current } => write!(f, "task changed concurrently ({current})"),
            Self::ActivityLogFailed { message } => {
                write!(f, "activity log rejected the entry: {message}")
            }
        }
    }
}

/// A planned move that was left unapplied, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedMove {
    /// The move as planned.
    pub proposed: ProposedMove,
    /// Why it was skipped.
    pub reason: SkipReason,
}

/// Aggregated outcome of applying a plan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedResult {
    /// Moves that took effect, in plan order.
    pub applied: Vec<AppliedMove>,
    /// Moves that were skipped, in plan order.
    pub skipped: Vec<SkippedMove>,
}

impl AppliedResult {
    /// Returns `true` when every planned move took effect.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

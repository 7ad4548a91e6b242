//! Activity log entries recording every assignee change.

use super::{ActivityEntryId, Member, ProposedMove, Task, TaskId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Why an assignee changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    /// A user explicitly moved the task.
    ManualEdit,
    /// The task was auto-assigned when it was created.
    AutoAssign,
    /// The reassignment engine moved the task to relieve an overload.
    Rebalance,
}

impl ActivityKind {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ManualEdit => "manual_edit",
            Self::AutoAssign => "auto_assign",
            Self::Rebalance => "rebalance",
        }
    }
}

/// Immutable record of one assignee change.
///
/// Titles and names are copied into the entry so the record stays readable
/// after the task or members are deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityLogEntry {
    id: ActivityEntryId,
    timestamp: DateTime<Utc>,
    task_id: TaskId,
    task_title: String,
    from_member_name: Option<String>,
    to_member_name: String,
    kind: ActivityKind,
}

impl ActivityLogEntry {
    /// Records a move performed by the reassignment engine.
    #[must_use]
    pub fn rebalance(proposed: &ProposedMove, clock: &impl Clock) -> Self {
        Self {
            id: ActivityEntryId::new(),
            timestamp: clock.utc(),
            task_id: proposed.task_id,
            task_title: proposed.task_title.clone(),
            from_member_name: Some(proposed.from_member_name.clone()),
            to_member_name: proposed.to_member_name.clone(),
            kind: ActivityKind::Rebalance,
        }
    }

    /// Records a creation-time auto-assignment.
    #[must_use]
    pub fn auto_assign(task: &Task, to: &Member, clock: &impl Clock) -> Self {
        Self {
            id: ActivityEntryId::new(),
            timestamp: clock.utc(),
            task_id: task.id(),
            task_title: task.title().to_owned(),
            from_member_name: None,
            to_member_name: to.name().to_owned(),
            kind: ActivityKind::AutoAssign,
        }
    }

    /// Records an explicit user reassignment.
    #[must_use]
    pub fn manual_edit(
        task: &Task,
        from: Option<&Member>,
        to: &Member,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: ActivityEntryId::new(),
            timestamp: clock.utc(),
            task_id: task.id(),
            task_title: task.title().to_owned(),
            from_member_name: from.map(|member| member.name().to_owned()),
            to_member_name: to.name().to_owned(),
            kind: ActivityKind::ManualEdit,
        }
    }

    /// Returns the entry identifier.
    #[must_use]
    pub const fn id(&self) -> ActivityEntryId {
        self.id
    }

    /// Returns when the change happened.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Returns the moved task.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the task title at the time of the change.
    #[must_use]
    pub fn task_title(&self) -> &str {
        &self.task_title
    }

    /// Returns the previous assignee's name, if the task was assigned.
    #[must_use]
    pub fn from_member_name(&self) -> Option<&str> {
        self.from_member_name.as_deref()
    }

    /// Returns the new assignee's name.
    #[must_use]
    pub fn to_member_name(&self) -> &str {
        &self.to_member_name
    }

    /// Returns why the change happened.
    #[must_use]
    pub const fn kind(&self) -> ActivityKind {
        self.kind
    }
}

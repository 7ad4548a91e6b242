//! Capacity evaluation: per-member load and overload detection.

use super::{Capacity, MemberId, Task, TaskId, TaskPriority, TaskVersion, TeamId, WorkloadSnapshot};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Active load of a single member compared with its capacity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberLoad {
    /// Member identifier.
    pub member_id: MemberId,
    /// Member display name.
    pub member_name: String,
    /// Number of active tasks held.
    pub active_load: u32,
    /// Declared capacity.
    pub capacity: Capacity,
}

impl MemberLoad {
    /// Returns `true` when the active load exceeds capacity.
    #[must_use]
    pub const fn is_overloaded(&self) -> bool {
        self.capacity.is_exceeded_by(self.active_load)
    }

    /// Number of tasks above capacity.
    #[must_use]
    pub const fn excess(&self) -> u32 {
        self.active_load.saturating_sub(self.capacity.value())
    }
}

/// A task that automatic rebalancing may move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovableTask {
    /// Task identifier.
    pub task_id: TaskId,
    /// Task title at evaluation time.
    pub title: String,
    /// Task priority (never `High`).
    pub priority: TaskPriority,
    /// Creation timestamp, used for ordering.
    pub created_at: DateTime<Utc>,
    /// Version observed at evaluation time.
    pub version: TaskVersion,
}

impl From<&Task> for MovableTask {
    fn from(task: &Task) -> Self {
        Self {
            task_id: task.id(),
            title: task.title().to_owned(),
            priority: task.priority(),
            created_at: task.created_at(),
            version: task.version(),
        }
    }
}

/// An overloaded member together with the tasks offered for reassignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverloadedMember {
    /// Load summary for the member.
    pub load: MemberLoad,
    /// Movable tasks, lowest priority first, then oldest first.
    pub movable_tasks: Vec<MovableTask>,
}

/// Result of evaluating a team snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverloadReport {
    team_id: TeamId,
    member_loads: Vec<MemberLoad>,
    overloaded: Vec<OverloadedMember>,
}

impl OverloadReport {
    /// Returns the evaluated team.
    #[must_use]
    pub const fn team_id(&self) -> TeamId {
        self.team_id
    }

    /// Load of every member, in team declaration order.
    #[must_use]
    pub fn member_loads(&self) -> &[MemberLoad] {
        &self.member_loads
    }

    /// Overloaded members, in team declaration order.
    #[must_use]
    pub fn overloaded(&self) -> &[OverloadedMember] {
        &self.overloaded
    }

    /// Number of overloaded members.
    #[must_use]
    pub fn overloaded_count(&self) -> usize {
        self.overloaded.len()
    }

    /// Returns `true` when nobody is above capacity.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.overloaded.is_empty()
    }
}

/// Evaluates member loads for a snapshot.
///
/// Pure: the same snapshot always yields the same report.
#[must_use]
pub fn evaluate(snapshot: &WorkloadSnapshot) -> OverloadReport {
    let ledger = snapshot.ledger();
    let mut member_loads = Vec::with_capacity(snapshot.team().members().len());
    let mut overloaded = Vec::new();

    for member in snapshot.team().members() {
        let load = MemberLoad {
            member_id: member.id(),
            member_name: member.name().to_owned(),
            active_load: ledger.load_of(member.id()),
            capacity: member.capacity(),
        };
        if load.is_overloaded() {
            let mut movable: Vec<&Task> = snapshot
                .active_tasks_of(member.id())
                .filter(|task| task.is_movable())
                .collect();
            movable.sort_by(|left, right| {
                left.priority()
                    .cmp(&right.priority())
                    .then_with(|| left.created_at().cmp(&right.created_at()))
                    .then_with(|| left.id().cmp(&right.id()))
            });
            overloaded.push(OverloadedMember {
                load: load.clone(),
                movable_tasks: movable.into_iter().map(MovableTask::from).collect(),
            });
        }
        member_loads.push(load);
    }

    OverloadReport {
        team_id: snapshot.team_id(),
        member_loads,
        overloaded,
    }
}

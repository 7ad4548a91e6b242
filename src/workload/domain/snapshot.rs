//! Point-in-time view of one team's members and tasks.

use super::{MemberId, Task, Team, TeamId};
use std::collections::HashMap;

/// Read-only planning input: a team and the tasks of the projects it staffs.
///
/// Tasks assigned to someone outside the team break the data model
/// invariant; they are dropped at construction and reported through
/// [`WorkloadSnapshot::foreign_assignments`] so callers can log them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkloadSnapshot {
    team: Team,
    tasks: Vec<Task>,
    foreign_assignments: usize,
}

impl WorkloadSnapshot {
    /// Builds a snapshot, discarding tasks assigned outside the team.
    #[must_use]
    pub fn new(team: Team, tasks: Vec<Task>) -> Self {
        let total = tasks.len();
        let kept: Vec<Task> = tasks
            .into_iter()
            .filter(|task| task.assignee().is_none_or(|member| team.has_member(member)))
            .collect();
        let foreign_assignments = total.saturating_sub(kept.len());
        Self {
            team,
            tasks: kept,
            foreign_assignments,
        }
    }

    /// Returns the team.
    #[must_use]
    pub const fn team(&self) -> &Team {
        &self.team
    }

    /// Returns the team identifier.
    #[must_use]
    pub const fn team_id(&self) -> TeamId {
        self.team.id()
    }

    /// Returns the retained tasks.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Number of tasks dropped because their assignee is not a team member.
    #[must_use]
    pub const fn foreign_assignments(&self) -> usize {
        self.foreign_assignments
    }

    /// Returns the active tasks currently held by `member`.
    pub fn active_tasks_of(&self, member: MemberId) -> impl Iterator<Item = &Task> {
        self.tasks
            .iter()
            .filter(move |task| task.is_active() && task.assignee() == Some(member))
    }

    /// Counts active tasks per team member.
    #[must_use]
    pub fn ledger(&self) -> LoadLedger {
        let mut ledger = LoadLedger::default();
        for member in self.team.members() {
            ledger.loads.insert(member.id(), 0);
        }
        for task in self.tasks.iter().filter(|task| task.is_active()) {
            if let Some(member) = task.assignee() {
                ledger.increment(member);
            }
        }
        ledger
    }
}

/// Mutable active-load counters used while planning or applying moves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadLedger {
    loads: HashMap<MemberId, u32>,
}

impl LoadLedger {
    /// Returns the active load recorded for `member` (zero when unknown).
    #[must_use]
    pub fn load_of(&self, member: MemberId) -> u32 {
        self.loads.get(&member).copied().unwrap_or_default()
    }

    /// Records one more active task for `member`.
    pub fn increment(&mut self, member: MemberId) {
        let load = self.loads.entry(member).or_default();
        *load = load.saturating_add(1);
    }

    /// Records one fewer active task for `member`.
    pub fn decrement(&mut self, member: MemberId) {
        if let Some(load) = self.loads.get_mut(&member) {
            *load = load.saturating_sub(1);
        }
    }

    /// Moves one unit of load from `from` to `to`.
    pub fn transfer(&mut self, from: MemberId, to: MemberId) {
        self.decrement(from);
        self.increment(to);
    }
}

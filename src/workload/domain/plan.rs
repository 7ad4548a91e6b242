//! Reassignment planning.

use super::{
    MemberId, OverloadFingerprint, OverloadReport, TaskId, TaskVersion, TeamId, WorkloadSnapshot,
    select_target,
};
use serde::{Deserialize, Serialize};

/// One proposed task move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposedMove {
    /// Task to move.
    pub task_id: TaskId,
    /// Task title at planning time.
    pub task_title: String,
    /// Current holder.
    pub from_member_id: MemberId,
    /// Current holder's name.
    pub from_member_name: String,
    /// Destination member.
    pub to_member_id: MemberId,
    /// Destination member's name.
    pub to_member_name: String,
    /// Task version observed while planning.
    pub expected_version: TaskVersion,
}

/// Ordered, unapplied list of proposed moves for one team.
///
/// A plan carries the fingerprint of the overload condition it was derived
/// from; discarding a plan has no effect on persisted state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReassignmentPlan {
    team_id: TeamId,
    condition: OverloadFingerprint,
    moves: Vec<ProposedMove>,
}

impl ReassignmentPlan {
    /// Returns the team the plan was computed for.
    #[must_use]
    pub const fn team_id(&self) -> TeamId {
        self.team_id
    }

    /// Returns the fingerprint of the overload condition behind the plan.
    #[must_use]
    pub const fn condition(&self) -> &OverloadFingerprint {
        &self.condition
    }

    /// Returns the moves in application order.
    #[must_use]
    pub fn moves(&self) -> &[ProposedMove] {
        &self.moves
    }

    /// Returns the number of proposed moves.
    #[must_use]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// Returns `true` when the plan proposes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

/// Computes the moves that relieve every overloaded member in `report`.
///
/// Overloaded members are handled in report order and their movable tasks in
/// the evaluator's fixed order. A member stops shedding tasks once its
/// working load is back within capacity. The working ledger is updated after
/// every accepted move so one plan never overfills a destination. Tasks with
/// no eligible destination stay where they are.
#[must_use]
pub fn plan(report: &OverloadReport, snapshot: &WorkloadSnapshot) -> ReassignmentPlan {
    let team = snapshot.team();
    let mut ledger = snapshot.ledger();
    let mut moves = Vec::new();

    for overloaded in report.overloaded() {
        let source = &overloaded.load;
        for task in &overloaded.movable_tasks {
            if !source.capacity.is_exceeded_by(ledger.load_of(source.member_id)) {
                break;
            }
            let Some(target) = select_target(team, &ledger, Some(source.member_id)) else {
                continue;
            };
            moves.push(ProposedMove {
                task_id: task.task_id,
                task_title: task.title.clone(),
                from_member_id: source.member_id,
                from_member_name: source.member_name.clone(),
                to_member_id: target.id(),
                to_member_name: target.name().to_owned(),
                expected_version: task.version,
            });
            ledger.transfer(source.member_id, target.id());
        }
    }

    ReassignmentPlan {
        team_id: report.team_id(),
        condition: OverloadFingerprint::of(report),
        moves,
    }
}

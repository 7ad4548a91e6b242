//! Applies reassignment plans move by move.

use crate::workload::{
    domain::{
        ActivityEntryId, ActivityLogEntry, AppliedMove, AppliedResult, MemberId, ProposedMove,
        ReassignmentPlan, SkipReason, SkippedMove, Task, TaskVersion, TeamId, WorkloadSnapshot,
    },
    ports::{
        ActivityLog, ActivityLogError, AssigneeUpdate, WorkloadStore, WorkloadStoreError,
        WorkloadStoreResult,
    },
};
use mockable::Clock;
use tracing::{error, info, warn};

/// Result of writing one assignee change together with its activity entry.
pub(super) enum CommitOutcome {
    /// Both the assignee change and the entry were persisted.
    Committed {
        version: TaskVersion,
        entry_id: ActivityEntryId,
    },
    /// The task version moved on; nothing was written.
    Conflict { current: TaskVersion },
    /// The task disappeared before the update.
    TaskMissing,
    /// The entry was rejected and the assignee change was rolled back.
    LogFailed(ActivityLogError),
}

/// Changes `task`'s assignee to `assignee` and appends `entry`.
///
/// The update is a compare-and-set against `expected`. When the activity
/// log rejects the entry the previous assignee is restored so no unlogged
/// move stays visible.
pub(super) async fn commit_assignment<S, L>(
    store: &S,
    activity_log: &L,
    task: &Task,
    assignee: MemberId,
    expected: TaskVersion,
    entry: &ActivityLogEntry,
) -> WorkloadStoreResult<CommitOutcome>
where
    S: WorkloadStore + ?Sized,
    L: ActivityLog + ?Sized,
{
    let update = match store
        .set_task_assignee(task.id(), Some(assignee), expected)
        .await
    {
        Ok(update) => update,
        Err(WorkloadStoreError::TaskNotFound(_)) => return Ok(CommitOutcome::TaskMissing),
        Err(err) => return Err(err),
    };
    let version = match update {
        AssigneeUpdate::Applied { version } => version,
        AssigneeUpdate::Conflict { current } => return Ok(CommitOutcome::Conflict { current }),
    };

    match activity_log.append(entry).await {
        Ok(entry_id) => Ok(CommitOutcome::Committed { version, entry_id }),
        Err(log_err) => {
            warn!(
                task_id = %task.id(),
                error = %log_err,
                "activity log append failed; restoring previous assignee"
            );
            match store
                .set_task_assignee(task.id(), task.assignee(), version)
                .await
            {
                Ok(AssigneeUpdate::Applied { .. }) => {}
                Ok(AssigneeUpdate::Conflict { current }) => {
                    error!(
                        task_id = %task.id(),
                        %current,
                        "could not restore assignee: task changed concurrently"
                    );
                }
                Err(restore_err) => {
                    error!(
                        task_id = %task.id(),
                        error = %restore_err,
                        "could not restore assignee"
                    );
                }
            }
            Ok(CommitOutcome::LogFailed(log_err))
        }
    }
}

enum MoveOutcome {
    Applied(AppliedMove),
    Skipped(SkipReason),
}

/// Applies plans against current persisted state.
pub(super) struct PlanExecutor<'svc, S: ?Sized, L: ?Sized, C> {
    pub(super) store: &'svc S,
    pub(super) activity_log: &'svc L,
    pub(super) clock: &'svc C,
}

impl<S, L, C> PlanExecutor<'_, S, L, C>
where
    S: WorkloadStore + ?Sized,
    L: ActivityLog + ?Sized,
    C: Clock + Send + Sync,
{
    /// Re-validates and applies every move of `plan` in order.
    ///
    /// Every move is checked against state read right before its write, so
    /// work that lands on a destination during the run is taken into
    /// account. Moves that no longer make sense are skipped with a reason;
    /// only failures to read the team or reach the store abort the run.
    pub(super) async fn apply(&self, plan: &ReassignmentPlan) -> WorkloadStoreResult<AppliedResult> {
        let mut result = AppliedResult::default();

        for proposed in plan.moves() {
            match self.apply_move(plan.team_id(), proposed).await? {
                MoveOutcome::Applied(applied) => {
                    info!(
                        team_id = %plan.team_id(),
                        task_id = %proposed.task_id,
                        from = %proposed.from_member_name,
                        to = %proposed.to_member_name,
                        "task reassigned"
                    );
                    result.applied.push(applied);
                }
                MoveOutcome::Skipped(reason) => {
                    warn!(
                        team_id = %plan.team_id(),
                        task_id = %proposed.task_id,
                        %reason,
                        "skipping planned move"
                    );
                    result.skipped.push(SkippedMove {
                        proposed: proposed.clone(),
                        reason,
                    });
                }
            }
        }
        Ok(result)
    }

    async fn apply_move(
        &self,
        team_id: TeamId,
        proposed: &ProposedMove,
    ) -> WorkloadStoreResult<MoveOutcome> {
        let Some(task) = self.store.find_task(proposed.task_id).await? else {
            return Ok(MoveOutcome::Skipped(SkipReason::TaskMissing));
        };
        if task.assignee() != Some(proposed.from_member_id) {
            return Ok(MoveOutcome::Skipped(SkipReason::ReassignedAway {
                current: task.assignee(),
            }));
        }
        if !task.is_movable() {
            return Ok(MoveOutcome::Skipped(SkipReason::ProtectedTask));
        }
        if task.version() != proposed.expected_version {
            return Ok(MoveOutcome::Skipped(SkipReason::Conflict {
                current: task.version(),
            }));
        }

        let team = self.store.team_with_members(team_id).await?;
        let tasks = self.store.active_tasks_for_team(team_id).await?;
        let current = WorkloadSnapshot::new(team, tasks);
        let Some(target) = current.team().member(proposed.to_member_id) else {
            return Ok(MoveOutcome::Skipped(SkipReason::TargetMissing));
        };
        let load = current.ledger().load_of(target.id());
        if !target.capacity().admits_one_more(load) {
            return Ok(MoveOutcome::Skipped(SkipReason::TargetAtCapacity {
                load,
                capacity: target.capacity(),
            }));
        }

        let entry = ActivityLogEntry::rebalance(proposed, self.clock);
        let outcome = commit_assignment(
            self.store,
            self.activity_log,
            &task,
            target.id(),
            proposed.expected_version,
            &entry,
        )
        .await?;
        Ok(match outcome {
            CommitOutcome::Committed { version, entry_id } => MoveOutcome::Applied(AppliedMove {
                proposed: proposed.clone(),
                version,
                entry_id,
            }),
            CommitOutcome::Conflict { current } => {
                MoveOutcome::Skipped(SkipReason::Conflict { current })
            }
            CommitOutcome::TaskMissing => MoveOutcome::Skipped(SkipReason::TaskMissing),
            CommitOutcome::LogFailed(err) => MoveOutcome::Skipped(SkipReason::ActivityLogFailed {
                message: err.to_string(),
            }),
        })
    }
}

//! Service layer for workload evaluation, rebalancing and auto-assignment.

use crate::workload::{
    domain::{
        ActivityEntryId, ActivityLogEntry, AppliedResult, Capacity, Member, MemberId,
        OverloadFingerprint, OverloadReport, ReassignmentPlan, Task, TaskId, TaskVersion, TeamId,
        WorkloadSnapshot, evaluate, plan, select_target,
    },
    ports::{ActivityLog, ActivityLogError, WorkloadStore, WorkloadStoreError},
    services::{
        EngineConfig,
        executor::{CommitOutcome, PlanExecutor, commit_assignment},
    },
};
use mockable::Clock;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Service-level errors for reassignment operations.
#[derive(Debug, Error)]
pub enum ReassignmentError {
    /// Store operation failed or referenced data does not exist.
    #[error(transparent)]
    Store(#[from] WorkloadStoreError),
    /// Activity log operation failed.
    #[error(transparent)]
    ActivityLog(#[from] ActivityLogError),
    /// The member does not belong to the team.
    #[error("member {member_id} is not part of team {team_id}")]
    MemberNotFound {
        /// Team that was searched.
        team_id: TeamId,
        /// Missing member.
        member_id: MemberId,
    },
    /// The destination is at or above capacity and the caller did not
    /// confirm the assignment.
    #[error("member {member_id} holds {load} tasks with capacity {capacity}; confirmation required")]
    OverCapacityNotConfirmed {
        /// Destination member.
        member_id: MemberId,
        /// Destination's active load.
        load: u32,
        /// Destination's capacity.
        capacity: Capacity,
    },
    /// The task changed while it was being reassigned.
    #[error("task {task_id} changed concurrently (now {current})")]
    Conflict {
        /// Task being reassigned.
        task_id: TaskId,
        /// Version found in the store.
        current: TaskVersion,
    },
}

/// Result type for reassignment service operations.
pub type ReassignmentResult<T> = Result<T, ReassignmentError>;

/// Outcome of an automatic rebalancing run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutomaticRunOutcome {
    /// Automatic reassignment is switched off.
    Disabled,
    /// No member is overloaded.
    Balanced,
    /// This overload condition was already handled in this session.
    AlreadyApplied {
        /// Fingerprint of the recognised condition.
        condition: OverloadFingerprint,
    },
    /// A plan was computed and applied.
    Applied {
        /// Plan that was applied.
        plan: ReassignmentPlan,
        /// Per-move outcome.
        result: AppliedResult,
    },
}

/// Outcome of auto-assigning a newly created task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutoAssignOutcome {
    /// Auto-assignment on create is switched off.
    Disabled,
    /// The task already has an assignee.
    AlreadyAssigned,
    /// No member has spare capacity; the task stays unassigned.
    NoEligibleMember,
    /// The task was assigned.
    Assigned {
        /// Chosen member.
        member: Member,
        /// Activity entry recording the assignment.
        entry_id: ActivityEntryId,
    },
}

/// Whether a member can take another task without exceeding capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapacityCheck {
    /// The member has room for one more task.
    Available {
        /// Current active load.
        load: u32,
        /// Declared capacity.
        capacity: Capacity,
    },
    /// The member is already at or above capacity.
    AtOrOverCapacity {
        /// Current active load.
        load: u32,
        /// Declared capacity.
        capacity: Capacity,
    },
}

/// Request payload for an explicit user reassignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReassignTaskRequest {
    task_id: TaskId,
    member_id: MemberId,
    confirm_over_capacity: bool,
}

impl ReassignTaskRequest {
    /// Creates a request moving `task_id` to `member_id`.
    #[must_use]
    pub const fn new(task_id: TaskId, member_id: MemberId) -> Self {
        Self {
            task_id,
            member_id,
            confirm_over_capacity: false,
        }
    }

    /// Confirms the move even when the destination is at or above capacity.
    #[must_use]
    pub const fn confirm_over_capacity(mut self) -> Self {
        self.confirm_over_capacity = true;
        self
    }
}

/// Workload reassignment orchestration service.
///
/// Planning operations only read from the store. Applying operations write
/// assignee changes with a version check and append one activity entry per
/// change. The service also holds the session state for automatic mode: the
/// fingerprint of the last overload condition handled per team.
#[derive(Clone)]
pub struct ReassignmentService<S, L, C>
where
    S: WorkloadStore,
    L: ActivityLog,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    activity_log: Arc<L>,
    clock: Arc<C>,
    config: EngineConfig,
    handled_conditions: Arc<Mutex<HashMap<TeamId, HandledCondition>>>,
}

/// Per-team automatic-mode guard holding the last handled condition.
type HandledCondition = Arc<Mutex<Option<OverloadFingerprint>>>;

impl<S, L, C> ReassignmentService<S, L, C>
where
    S: WorkloadStore,
    L: ActivityLog,
    C: Clock + Send + Sync,
{
    /// Creates a service with the default (manual) configuration.
    #[must_use]
    pub fn new(store: Arc<S>, activity_log: Arc<L>, clock: Arc<C>) -> Self {
        Self {
            store,
            activity_log,
            clock,
            config: EngineConfig::default(),
            handled_conditions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Replaces the configuration.
    #[must_use]
    pub const fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> EngineConfig {
        self.config
    }

    async fn handled_condition(&self, team_id: TeamId) -> HandledCondition {
        let mut guards = self.handled_conditions.lock().await;
        Arc::clone(guards.entry(team_id).or_default())
    }

    fn executor(&self) -> PlanExecutor<'_, S, L, C> {
        PlanExecutor {
            store: &*self.store,
            activity_log: &*self.activity_log,
            clock: &*self.clock,
        }
    }

    async fn snapshot(&self, team_id: TeamId) -> ReassignmentResult<WorkloadSnapshot> {
        let team = self.store.team_with_members(team_id).await?;
        let tasks = self.store.active_tasks_for_team(team_id).await?;
        let snapshot = WorkloadSnapshot::new(team, tasks);
        if snapshot.foreign_assignments() > 0 {
            warn!(
                %team_id,
                ignored = snapshot.foreign_assignments(),
                "ignoring tasks assigned to members outside the team"
            );
        }
        Ok(snapshot)
    }

    /// Evaluates the team's current load.
    ///
    /// # Errors
    ///
    /// Returns [`ReassignmentError::Store`] when the team does not exist or
    /// the store fails.
    pub async fn compute_overloads(&self, team_id: TeamId) -> ReassignmentResult<OverloadReport> {
        let snapshot = self.snapshot(team_id).await?;
        Ok(evaluate(&snapshot))
    }

    /// Computes, without applying, the moves that would relieve overloads.
    ///
    /// # Errors
    ///
    /// Returns [`ReassignmentError::Store`] when the team does not exist or
    /// the store fails.
    pub async fn compute_reassignment_plan(
        &self,
        team_id: TeamId,
    ) -> ReassignmentResult<ReassignmentPlan> {
        let snapshot = self.snapshot(team_id).await?;
        let report = evaluate(&snapshot);
        let proposal = plan(&report, &snapshot);
        debug!(
            %team_id,
            overloaded = report.overloaded_count(),
            moves = proposal.len(),
            "computed reassignment plan"
        );
        Ok(proposal)
    }

    /// Applies a plan the user confirmed earlier.
    ///
    /// Each move is checked against current state first; moves whose task
    /// vanished, left the planned source member, or whose destination lost
    /// its spare capacity are reported as skipped while the others proceed.
    ///
    /// # Errors
    ///
    /// Returns [`ReassignmentError::Store`] when the plan's team no longer
    /// exists or the store fails.
    pub async fn apply_plan_manually(
        &self,
        plan: &ReassignmentPlan,
    ) -> ReassignmentResult<AppliedResult> {
        let result = self.executor().apply(plan).await?;
        info!(
            team_id = %plan.team_id(),
            applied = result.applied.len(),
            skipped = result.skipped.len(),
            "applied confirmed reassignment plan"
        );
        Ok(result)
    }

    /// Rebalances the team without confirmation, at most once per overload
    /// condition.
    ///
    /// Concurrent calls for one team are serialised so the same condition is
    /// never applied twice; runs for different teams do not wait on each
    /// other. After a run the fingerprint of the resulting state is
    /// remembered, so re-observing it is a no-op until something changes.
    ///
    /// # Errors
    ///
    /// Returns [`ReassignmentError::Store`] when the team does not exist or
    /// the store fails. The condition is not marked as handled in that case.
    pub async fn apply_plan_automatically(
        &self,
        team_id: TeamId,
    ) -> ReassignmentResult<AutomaticRunOutcome> {
        if !self.config.auto_reassign {
            return Ok(AutomaticRunOutcome::Disabled);
        }
        let guard = self.handled_condition(team_id).await;
        let mut handled = guard.lock().await;

        let snapshot = self.snapshot(team_id).await?;
        let report = evaluate(&snapshot);
        if report.is_balanced() {
            *handled = None;
            return Ok(AutomaticRunOutcome::Balanced);
        }
        let condition = OverloadFingerprint::of(&report);
        if handled.as_ref() == Some(&condition) {
            debug!(%team_id, %condition, "overload condition already handled");
            return Ok(AutomaticRunOutcome::AlreadyApplied { condition });
        }

        let proposal = plan(&report, &snapshot);
        let result = self.executor().apply(&proposal).await?;
        let settled = if result.applied.is_empty() {
            condition
        } else {
            OverloadFingerprint::of(&evaluate(&self.snapshot(team_id).await?))
        };
        *handled = Some(settled);
        info!(
            %team_id,
            applied = result.applied.len(),
            skipped = result.skipped.len(),
            "applied automatic reassignment"
        );
        Ok(AutomaticRunOutcome::Applied {
            plan: proposal,
            result,
        })
    }

    /// Forgets the handled overload condition of a team, so the next
    /// automatic run re-applies even if nothing changed.
    pub async fn reset_automatic_guard(&self, team_id: TeamId) {
        *self.handled_condition(team_id).await.lock().await = None;
    }

    /// Returns the least-loaded member with spare capacity.
    ///
    /// # Errors
    ///
    /// Returns [`ReassignmentError::Store`] when the team does not exist or
    /// the store fails.
    pub async fn select_auto_assignee(
        &self,
        team_id: TeamId,
        exclude: Option<MemberId>,
    ) -> ReassignmentResult<Option<Member>> {
        let snapshot = self.snapshot(team_id).await?;
        let ledger = snapshot.ledger();
        Ok(select_target(snapshot.team(), &ledger, exclude).cloned())
    }

    /// Assigns a freshly created, unassigned task to the least-loaded member
    /// of its project's team.
    ///
    /// # Errors
    ///
    /// Returns [`ReassignmentError::Store`] when the task or its team does
    /// not exist, [`ReassignmentError::Conflict`] when the task changed
    /// concurrently, or [`ReassignmentError::ActivityLog`] when the entry
    /// could not be written (the assignment is then rolled back).
    pub async fn auto_assign_created_task(
        &self,
        task_id: TaskId,
    ) -> ReassignmentResult<AutoAssignOutcome> {
        if !self.config.auto_assign_on_create {
            return Ok(AutoAssignOutcome::Disabled);
        }
        let task = self
            .store
            .find_task(task_id)
            .await?
            .ok_or(WorkloadStoreError::TaskNotFound(task_id))?;
        if task.assignee().is_some() {
            return Ok(AutoAssignOutcome::AlreadyAssigned);
        }
        let team_id = self.store.team_for_task(task_id).await?;
        let snapshot = self.snapshot(team_id).await?;
        let ledger = snapshot.ledger();
        let Some(member) = select_target(snapshot.team(), &ledger, None).cloned() else {
            debug!(%task_id, %team_id, "no member has spare capacity; leaving task unassigned");
            return Ok(AutoAssignOutcome::NoEligibleMember);
        };

        let entry = ActivityLogEntry::auto_assign(&task, &member, &*self.clock);
        let entry_id = self.commit(&task, member.id(), &entry).await?;
        info!(%task_id, member = %member.name(), "auto-assigned new task");
        Ok(AutoAssignOutcome::Assigned { member, entry_id })
    }

    /// Reports whether a member can take another task within capacity.
    ///
    /// # Errors
    ///
    /// Returns [`ReassignmentError::MemberNotFound`] when the member is not
    /// part of the team, or [`ReassignmentError::Store`] when the team does
    /// not exist or the store fails.
    pub async fn check_capacity(
        &self,
        team_id: TeamId,
        member_id: MemberId,
    ) -> ReassignmentResult<CapacityCheck> {
        let snapshot = self.snapshot(team_id).await?;
        let member = snapshot
            .team()
            .member(member_id)
            .ok_or(ReassignmentError::MemberNotFound { team_id, member_id })?;
        let load = snapshot.ledger().load_of(member_id);
        let capacity = member.capacity();
        Ok(if capacity.admits_one_more(load) {
            CapacityCheck::Available { load, capacity }
        } else {
            CapacityCheck::AtOrOverCapacity { load, capacity }
        })
    }

    /// Moves a task on explicit user request.
    ///
    /// Unlike automatic rebalancing this accepts high-priority tasks, and it
    /// accepts a destination at or above capacity when the request carries
    /// the over-capacity confirmation. Returns `None` when the task already
    /// belongs to the requested member.
    ///
    /// # Errors
    ///
    /// Returns [`ReassignmentError::MemberNotFound`] when the destination is
    /// outside the task's team,
    /// [`ReassignmentError::OverCapacityNotConfirmed`] when confirmation is
    /// missing, [`ReassignmentError::Conflict`] on a concurrent change, and
    /// store or activity log errors otherwise.
    pub async fn reassign_task(
        &self,
        request: ReassignTaskRequest,
    ) -> ReassignmentResult<Option<ActivityLogEntry>> {
        let ReassignTaskRequest {
            task_id,
            member_id,
            confirm_over_capacity,
        } = request;

        let team_id = self.store.team_for_task(task_id).await?;
        let task = self
            .store
            .find_task(task_id)
            .await?
            .ok_or(WorkloadStoreError::TaskNotFound(task_id))?;
        if task.assignee() == Some(member_id) {
            return Ok(None);
        }
        let snapshot = self.snapshot(team_id).await?;
        let team = snapshot.team();
        let target = team
            .member(member_id)
            .ok_or(ReassignmentError::MemberNotFound { team_id, member_id })?;
        let load = snapshot.ledger().load_of(member_id);
        if task.is_active() && !target.capacity().admits_one_more(load) && !confirm_over_capacity
        {
            return Err(ReassignmentError::OverCapacityNotConfirmed {
                member_id,
                load,
                capacity: target.capacity(),
            });
        }

        let previous = task.assignee().and_then(|holder| team.member(holder));
        let entry = ActivityLogEntry::manual_edit(&task, previous, target, &*self.clock);
        self.commit(&task, member_id, &entry).await?;
        info!(%task_id, to = %target.name(), "task reassigned manually");
        Ok(Some(entry))
    }

    async fn commit(
        &self,
        task: &Task,
        member_id: MemberId,
        entry: &ActivityLogEntry,
    ) -> ReassignmentResult<ActivityEntryId> {
        let outcome = commit_assignment(
            &*self.store,
            &*self.activity_log,
            task,
            member_id,
            task.version(),
            entry,
        )
        .await?;
        match outcome {
            CommitOutcome::Committed { entry_id, .. } => Ok(entry_id),
            CommitOutcome::Conflict { current } => Err(ReassignmentError::Conflict {
                task_id: task.id(),
                current,
            }),
            CommitOutcome::TaskMissing => Err(WorkloadStoreError::TaskNotFound(task.id()).into()),
            CommitOutcome::LogFailed(err) => Err(err.into()),
        }
    }

    /// Returns up to `limit` activity entries, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`ReassignmentError::ActivityLog`] when the log fails.
    pub async fn recent_activity(&self, limit: usize) -> ReassignmentResult<Vec<ActivityLogEntry>> {
        Ok(self.activity_log.recent(limit).await?)
    }

    /// Returns up to `limit` activity entries for one task, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`ReassignmentError::ActivityLog`] when the log fails.
    pub async fn task_activity(
        &self,
        task_id: TaskId,
        limit: usize,
    ) -> ReassignmentResult<Vec<ActivityLogEntry>> {
        Ok(self.activity_log.for_task(task_id, limit).await?)
    }
}

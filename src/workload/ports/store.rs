//! Store port through which the engine reads teams and tasks and changes
//! task assignees.

use crate::workload::domain::{MemberId, ProjectId, Task, TaskId, TaskVersion, Team, TeamId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for workload store operations.
pub type WorkloadStoreResult<T> = Result<T, WorkloadStoreError>;

/// Outcome of a compare-and-set assignee update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssigneeUpdate {
    /// The assignee changed; the task now carries `version`.
    Applied {
        /// Version after the update.
        version: TaskVersion,
    },
    /// The stored version did not match; nothing changed.
    Conflict {
        /// Version currently stored.
        current: TaskVersion,
    },
}

/// Team and task persistence contract used by the reassignment engine.
///
/// Implementations own serialisation of concurrent writers. The engine only
/// relies on [`WorkloadStore::set_task_assignee`] being an atomic
/// compare-and-set on the task version.
#[async_trait]
pub trait WorkloadStore: Send + Sync {
    /// Loads a team with its members in declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`WorkloadStoreError::TeamNotFound`] when the team does not
    /// exist.
    async fn team_with_members(&self, team_id: TeamId) -> WorkloadStoreResult<Team>;

    /// Returns the active tasks of every project assigned to the team.
    ///
    /// # Errors
    ///
    /// Returns [`WorkloadStoreError::TeamNotFound`] when the team does not
    /// exist.
    async fn active_tasks_for_team(&self, team_id: TeamId) -> WorkloadStoreResult<Vec<Task>>;

    /// Finds a task by identifier, whatever its status.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_task(&self, task_id: TaskId) -> WorkloadStoreResult<Option<Task>>;

    /// Returns the team staffing the task's project.
    ///
    /// # Errors
    ///
    /// Returns [`WorkloadStoreError::TaskNotFound`] when the task does not
    /// exist.
    async fn team_for_task(&self, task_id: TaskId) -> WorkloadStoreResult<TeamId>;

    /// Sets the task's assignee if its version still equals `expected`.
    ///
    /// # Errors
    ///
    /// Returns [`WorkloadStoreError::TaskNotFound`] when the task does not
    /// exist. A version mismatch is reported as
    /// [`AssigneeUpdate::Conflict`], not as an error.
    async fn set_task_assignee(
        &self,
        task_id: TaskId,
        assignee: Option<MemberId>,
        expected: TaskVersion,
    ) -> WorkloadStoreResult<AssigneeUpdate>;
}

/// Errors returned by workload store implementations.
#[derive(Debug, Clone, Error)]
pub enum WorkloadStoreError {
    /// The team was not found.
    #[error("team not found: {0}")]
    TeamNotFound(TeamId),

    /// The task was not found.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The project was not found.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl WorkloadStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

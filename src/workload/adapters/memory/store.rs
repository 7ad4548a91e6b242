//! In-memory workload store for tests and embedding.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::workload::{
    domain::{
        MemberId, Project, ProjectId, Task, TaskId, TaskPriority, TaskStatus, TaskVersion, Team,
        TeamId,
    },
    ports::{AssigneeUpdate, WorkloadStore, WorkloadStoreError, WorkloadStoreResult},
};

/// Thread-safe in-memory team, project and task store.
///
/// Besides the [`WorkloadStore`] port it exposes the plain mutations the
/// surrounding application performs (seeding, deleting tasks, changing
/// status or priority) so tests can change state between planning and applying.
#[derive(Debug, Clone, Default)]
pub struct InMemoryWorkloadStore {
    state: Arc<RwLock<InMemoryWorkloadState>>,
}

#[derive(Debug, Default)]
struct InMemoryWorkloadState {
    teams: HashMap<TeamId, Team>,
    projects: HashMap<ProjectId, Project>,
    tasks: HashMap<TaskId, Task>,
}

fn lock_error(err: impl ToString) -> WorkloadStoreError {
    WorkloadStoreError::persistence(std::io::Error::other(err.to_string()))
}

impl InMemoryWorkloadStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a team.
    ///
    /// # Errors
    ///
    /// Returns [`WorkloadStoreError::Persistence`] when the lock is poisoned.
    pub fn insert_team(&self, team: Team) -> WorkloadStoreResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.teams.insert(team.id(), team);
        Ok(())
    }

    /// Inserts a project.
    ///
    /// # Errors
    ///
    /// Returns [`WorkloadStoreError::TeamNotFound`] when the project's team is
    /// unknown.
    pub fn insert_project(&self, project: Project) -> WorkloadStoreResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if !state.teams.contains_key(&project.team_id()) {
            return Err(WorkloadStoreError::TeamNotFound(project.team_id()));
        }
        state.projects.insert(project.id(), project);
        Ok(())
    }

    /// Inserts or replaces a task.
    ///
    /// # Errors
    ///
    /// Returns [`WorkloadStoreError::ProjectNotFound`] when the task's
    /// project is unknown.
    pub fn insert_task(&self, task: Task) -> WorkloadStoreResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if !state.projects.contains_key(&task.project_id()) {
            return Err(WorkloadStoreError::ProjectNotFound(task.project_id()));
        }
        state.tasks.insert(task.id(), task);
        Ok(())
    }

    /// Deletes a task, returning it when it existed.
    ///
    /// # Errors
    ///
    /// Returns [`WorkloadStoreError::Persistence`] when the lock is poisoned.
    pub fn remove_task(&self, task_id: TaskId) -> WorkloadStoreResult<Option<Task>> {
        let mut state = self.state.write().map_err(lock_error)?;
        Ok(state.tasks.remove(&task_id))
    }

    /// Changes a task's status, bumping its version.
    ///
    /// # Errors
    ///
    /// Returns [`WorkloadStoreError::TaskNotFound`] when the task does not
    /// exist.
    pub fn set_task_status(
        &self,
        task_id: TaskId,
        status: TaskStatus,
    ) -> WorkloadStoreResult<TaskVersion> {
        let mut state = self.state.write().map_err(lock_error)?;
        let task = state
            .tasks
            .get_mut(&task_id)
            .ok_or(WorkloadStoreError::TaskNotFound(task_id))?;
        Ok(task.set_status(status))
    }

    /// Changes a task's priority, bumping its version.
    ///
    /// # Errors
    ///
    /// Returns [`WorkloadStoreError::TaskNotFound`] when the task does not
    /// exist.
    pub fn set_task_priority(
        &self,
        task_id: TaskId,
        priority: TaskPriority,
    ) -> WorkloadStoreResult<TaskVersion> {
        let mut state = self.state.write().map_err(lock_error)?;
        let task = state
            .tasks
            .get_mut(&task_id)
            .ok_or(WorkloadStoreError::TaskNotFound(task_id))?;
        Ok(task.set_priority(priority))
    }
}

#[async_trait]
impl WorkloadStore for InMemoryWorkloadStore {
    async fn team_with_members(&self, team_id: TeamId) -> WorkloadStoreResult<Team> {
        let state = self.state.read().map_err(lock_error)?;
        state
            .teams
            .get(&team_id)
            .cloned()
            .ok_or(WorkloadStoreError::TeamNotFound(team_id))
    }

    async fn active_tasks_for_team(&self, team_id: TeamId) -> WorkloadStoreResult<Vec<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        if !state.teams.contains_key(&team_id) {
            return Err(WorkloadStoreError::TeamNotFound(team_id));
        }
        let mut tasks: Vec<Task> = state
            .tasks
            .values()
            .filter(|task| task.is_active())
            .filter(|task| {
                state
                    .projects
                    .get(&task.project_id())
                    .is_some_and(|project| project.team_id() == team_id)
            })
            .cloned()
            .collect();
        tasks.sort_by(|left, right| {
            left.created_at()
                .cmp(&right.created_at())
                .then_with(|| left.id().cmp(&right.id()))
        });
        Ok(tasks)
    }

    async fn find_task(&self, task_id: TaskId) -> WorkloadStoreResult<Option<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.tasks.get(&task_id).cloned())
    }

    async fn team_for_task(&self, task_id: TaskId) -> WorkloadStoreResult<TeamId> {
        let state = self.state.read().map_err(lock_error)?;
        let task = state
            .tasks
            .get(&task_id)
            .ok_or(WorkloadStoreError::TaskNotFound(task_id))?;
        state
            .projects
            .get(&task.project_id())
            .map(Project::team_id)
            .ok_or(WorkloadStoreError::ProjectNotFound(task.project_id()))
    }

    async fn set_task_assignee(
        &self,
        task_id: TaskId,
        assignee: Option<MemberId>,
        expected: TaskVersion,
    ) -> WorkloadStoreResult<AssigneeUpdate> {
        let mut state = self.state.write().map_err(lock_error)?;
        let task = state
            .tasks
            .get_mut(&task_id)
            .ok_or(WorkloadStoreError::TaskNotFound(task_id))?;
        if task.version() != expected {
            return Ok(AssigneeUpdate::Conflict {
                current: task.version(),
            });
        }
        let version = task.reassign(assignee);
        Ok(AssigneeUpdate::Applied { version })
    }
}

//! Task aggregate and its priority and status types.

use super::{
    MemberId, ParseTaskPriorityError, ParseTaskStatusError, ProjectId, TaskId, TaskVersion,
    WorkloadDomainError,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Task priority.
///
/// Variants are declared in ascending order so that `Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TaskPriority {
    /// Low priority; offered for reassignment first.
    Low,
    /// Medium priority.
    Medium,
    /// High priority; never moved automatically.
    High,
}

impl TaskPriority {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl TryFrom<&str> for TaskPriority {
    type Error = ParseTaskPriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(ParseTaskPriorityError(value.to_owned())),
        }
    }
}

/// Task progress status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Not started.
    Pending,
    /// Being worked on.
    InProgress,
    /// Finished; no longer counts towards load.
    Done,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Done => "done",
        }
    }

    /// Returns `true` for every status except [`TaskStatus::Done`].
    #[must_use]
    pub const fn is_active(self) -> bool {
        !matches!(self, Self::Done)
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "in_progress" | "inprogress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    project_id: ProjectId,
    title: String,
    description: String,
    priority: TaskPriority,
    status: TaskStatus,
    assignee: Option<MemberId>,
    created_at: DateTime<Utc>,
    version: TaskVersion,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Owning project.
    pub project_id: ProjectId,
    /// Persisted title.
    pub title: String,
    /// Persisted description.
    pub description: String,
    /// Persisted priority.
    pub priority: TaskPriority,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted assignee, if any.
    pub assignee: Option<MemberId>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted concurrency version.
    pub version: TaskVersion,
}

impl Task {
    /// Creates a pending, unassigned task.
    ///
    /// # Errors
    ///
    /// Returns [`WorkloadDomainError::EmptyTaskTitle`] when the title is
    /// blank.
    pub fn new(
        project_id: ProjectId,
        title: impl Into<String>,
        priority: TaskPriority,
        clock: &impl Clock,
    ) -> Result<Self, WorkloadDomainError> {
        let raw_title = title.into();
        let trimmed = raw_title.trim();
        if trimmed.is_empty() {
            return Err(WorkloadDomainError::EmptyTaskTitle);
        }
        Ok(Self {
            id: TaskId::new(),
            project_id,
            title: trimmed.to_owned(),
            description: String::new(),
            priority,
            status: TaskStatus::Pending,
            assignee: None,
            created_at: clock.utc(),
            version: TaskVersion::INITIAL,
        })
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            project_id: data.project_id,
            title: data.title,
            description: data.description,
            priority: data.priority,
            status: data.status,
            assignee: data.assignee,
            created_at: data.created_at,
            version: data.version,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the initial assignee.
    #[must_use]
    pub const fn with_assignee(mut self, assignee: MemberId) -> Self {
        self.assignee = Some(assignee);
        self
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the assigned member, if any.
    #[must_use]
    pub const fn assignee(&self) -> Option<MemberId> {
        self.assignee
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the concurrency version.
    #[must_use]
    pub const fn version(&self) -> TaskVersion {
        self.version
    }

    /// Returns `true` when the task counts towards its assignee's load.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Returns `true` when the task may be moved by automatic rebalancing.
    #[must_use]
    pub fn is_movable(&self) -> bool {
        self.is_active() && self.priority != TaskPriority::High
    }

    /// Replaces the assignee and bumps the version.
    ///
    /// Only stores call this; the engine goes through the store's
    /// compare-and-set operation.
    pub const fn reassign(&mut self, assignee: Option<MemberId>) -> TaskVersion {
        self.assignee = assignee;
        self.version = self.version.next();
        self.version
    }

    /// Changes the status and bumps the version.
    pub const fn set_status(&mut self, status: TaskStatus) -> TaskVersion {
        self.status = status;
        self.version = self.version.next();
        self.version
    }

    /// Changes the priority and bumps the version.
    pub const fn set_priority(&mut self, priority: TaskPriority) -> TaskVersion {
        self.priority = priority;
        self.version = self.version.next();
        self.version
    }
}

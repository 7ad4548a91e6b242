//! Projects and their owning team.

use super::{ProjectId, TeamId, WorkloadDomainError};
use serde::{Deserialize, Serialize};

/// A project whose tasks are staffed from exactly one team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    name: String,
    team_id: TeamId,
}

impl Project {
    /// Creates a project assigned to `team_id`.
    ///
    /// # Errors
    ///
    /// Returns [`WorkloadDomainError::EmptyProjectName`] when the name is
    /// blank.
    pub fn new(name: impl Into<String>, team_id: TeamId) -> Result<Self, WorkloadDomainError> {
        let raw_name = name.into();
        let trimmed = raw_name.trim();
        if trimmed.is_empty() {
            return Err(WorkloadDomainError::EmptyProjectName);
        }
        Ok(Self {
            id: ProjectId::new(),
            name: trimmed.to_owned(),
            team_id,
        })
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn id(&self) -> ProjectId {
        self.id
    }

    /// Returns the project name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the team the project draws assignees from.
    #[must_use]
    pub const fn team_id(&self) -> TeamId {
        self.team_id
    }
}

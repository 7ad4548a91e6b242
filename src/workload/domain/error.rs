//! Error types for workload domain validation and parsing.

use super::{MemberId, TeamId};
use thiserror::Error;

/// Errors returned while constructing workload domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WorkloadDomainError {
    /// The team name is empty after trimming.
    #[error("team name must not be empty")]
    EmptyTeamName,

    /// The member name is empty after trimming.
    #[error("member name must not be empty")]
    EmptyMemberName,

    /// The project name is empty after trimming.
    #[error("project name must not be empty")]
    EmptyProjectName,

    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTaskTitle,

    /// The member is already part of the team.
    #[error("member {member_id} already belongs to team {team_id}")]
    DuplicateMember {
        /// Team receiving the duplicate.
        team_id: TeamId,
        /// Member that was added twice.
        member_id: MemberId,
    },
}

/// Error returned while parsing task priorities from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParseTaskPriorityError(pub String);

/// Error returned while parsing task statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

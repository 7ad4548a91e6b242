//! Domain model for workload balancing.
//!
//! Everything here is pure: snapshots go in, reports and plans come out. No
//! type in this module touches persistence or logging.

mod activity;
mod condition;
mod error;
mod evaluation;
mod ids;
mod outcome;
mod plan;
mod project;
mod selection;
mod snapshot;
mod task;
mod team;

pub use activity::{ActivityKind, ActivityLogEntry};
pub use condition::OverloadFingerprint;
pub use error::{ParseTaskPriorityError, ParseTaskStatusError, WorkloadDomainError};
pub use evaluation::{MemberLoad, MovableTask, OverloadReport, OverloadedMember, evaluate};
pub use ids::{ActivityEntryId, MemberId, ProjectId, TaskId, TaskVersion, TeamId};
pub use outcome::{AppliedMove, AppliedResult, SkipReason, SkippedMove};
pub use plan::{ProposedMove, ReassignmentPlan, plan};
pub use project::Project;
pub use selection::select_target;
pub use snapshot::{LoadLedger, WorkloadSnapshot};
pub use task::{PersistedTaskData, Task, TaskPriority, TaskStatus};
pub use team::{Capacity, Member, Team};

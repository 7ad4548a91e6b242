//! Shared fixtures for in-memory integration tests.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use gropius::workload::{
    adapters::memory::{InMemoryActivityLog, InMemoryWorkloadStore},
    domain::{Capacity, Member, MemberId, Project, ProjectId, Task, TaskId, TaskPriority, Team},
    services::{EngineConfig, ReassignmentService},
};
use mockable::Clock;

/// Clock that always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct StaticClock;

impl Clock for StaticClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 3, 8, 30, 0)
            .single()
            .unwrap_or_default()
    }
}

/// Service type used across in-memory tests.
pub type TestService = ReassignmentService<InMemoryWorkloadStore, InMemoryActivityLog, StaticClock>;

/// Store, log and service wired around one team and project.
pub struct Workspace {
    pub store: Arc<InMemoryWorkloadStore>,
    pub activity_log: Arc<InMemoryActivityLog>,
    pub service: TestService,
    pub team: Team,
    pub project_id: ProjectId,
}

impl Workspace {
    /// Creates a workspace for a team with the given `(name, capacity)`
    /// members.
    pub fn with_members(members: &[(&str, u32)], config: EngineConfig) -> Self {
        Self::with_log(members, config, InMemoryActivityLog::new())
    }

    /// Like [`Workspace::with_members`] but with a custom activity log.
    pub fn with_log(
        members: &[(&str, u32)],
        config: EngineConfig,
        activity_log: InMemoryActivityLog,
    ) -> Self {
        let mut team = Team::new("Delivery").expect("valid team");
        for (name, capacity) in members {
            let member =
                Member::new(*name, "developer", Capacity::new(*capacity)).expect("valid member");
            team.add_member(member).expect("unique member");
        }
        let store = Arc::new(InMemoryWorkloadStore::new());
        store.insert_team(team.clone()).expect("insert team");
        let project = Project::new("Website", team.id()).expect("valid project");
        let project_id = project.id();
        store.insert_project(project).expect("insert project");
        let activity_log = Arc::new(activity_log);
        let service = ReassignmentService::new(
            Arc::clone(&store),
            Arc::clone(&activity_log),
            Arc::new(StaticClock),
        )
        .with_config(config);
        Self {
            store,
            activity_log,
            service,
            team,
            project_id,
        }
    }

    /// Returns the identifier of the member called `name`.
    pub fn member_id(&self, name: &str) -> MemberId {
        self.team
            .members()
            .iter()
            .find(|member| member.name() == name)
            .map(Member::id)
            .expect("member exists")
    }

    /// Stores a task for `holder` and returns its identifier.
    pub fn add_task(&self, title: &str, priority: TaskPriority, holder: Option<&str>) -> TaskId {
        let mut task =
            Task::new(self.project_id, title, priority, &StaticClock).expect("valid task");
        if let Some(name) = holder {
            task = task.with_assignee(self.member_id(name));
        }
        let id = task.id();
        self.store.insert_task(task).expect("insert task");
        id
    }
}

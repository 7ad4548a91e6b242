//! Shared world state for workload rebalancing BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use gropius::workload::{
    adapters::memory::{InMemoryActivityLog, InMemoryWorkloadStore},
    domain::{AppliedResult, MemberId, Project, ProjectId, ReassignmentPlan, TaskId, Team},
    services::{AutoAssignOutcome, EngineConfig, ReassignmentService},
};
use mockable::DefaultClock;
use rstest::fixture;

/// Service type used by the BDD world.
pub type TestReassignmentService =
    ReassignmentService<InMemoryWorkloadStore, InMemoryActivityLog, DefaultClock>;

/// Scenario world for workload rebalancing behaviour tests.
pub struct RebalancingWorld {
    pub store: Arc<InMemoryWorkloadStore>,
    pub service: TestReassignmentService,
    pub team: Team,
    pub project_id: ProjectId,
    pub members: HashMap<String, MemberId>,
    pub tasks: HashMap<String, TaskId>,
    pub last_plan: Option<ReassignmentPlan>,
    pub last_applied: Option<AppliedResult>,
    pub last_auto_assign: Option<AutoAssignOutcome>,
}

impl RebalancingWorld {
    /// Creates a world holding an empty team with one project.
    ///
    /// # Panics
    ///
    /// Panics when the empty team or its project cannot be stored.
    #[must_use]
    pub fn new() -> Self {
        let store = Arc::new(InMemoryWorkloadStore::new());
        let team = Team::new("Scenario team").expect("team name is not blank");
        store
            .insert_team(team.clone())
            .expect("empty team should be stored");
        let project = Project::new("Scenario project", team.id()).expect("project name is not blank");
        let project_id = project.id();
        store
            .insert_project(project)
            .expect("project should be stored");
        let service = ReassignmentService::new(
            Arc::clone(&store),
            Arc::new(InMemoryActivityLog::new()),
            Arc::new(DefaultClock),
        )
        .with_config(EngineConfig::automatic());

        Self {
            store,
            service,
            team,
            project_id,
            members: HashMap::new(),
            tasks: HashMap::new(),
            last_plan: None,
            last_applied: None,
            last_auto_assign: None,
        }
    }

    /// Looks up a member declared by an earlier step.
    ///
    /// # Errors
    ///
    /// Returns an error when no member with that name was declared.
    pub fn member_id(&self, name: &str) -> Result<MemberId, eyre::Report> {
        self.members
            .get(name)
            .copied()
            .ok_or_else(|| eyre::eyre!("member {name} was not declared in the scenario"))
    }
}

impl Default for RebalancingWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> RebalancingWorld {
    RebalancingWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

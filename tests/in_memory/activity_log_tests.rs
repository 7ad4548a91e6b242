//! Activity log ordering, retention and per-task history.

use gropius::workload::{
    adapters::memory::InMemoryActivityLog,
    domain::{ActivityLogEntry, TaskPriority},
    ports::ActivityLog,
    services::{EngineConfig, ReassignTaskRequest},
};

use super::helpers::Workspace;

#[tokio::test(flavor = "multi_thread")]
async fn entries_are_returned_newest_first() -> Result<(), eyre::Report> {
    let workspace = Workspace::with_members(&[("Ana", 5), ("Ben", 5)], EngineConfig::default());
    let first = workspace.add_task("first", TaskPriority::Low, Some("Ana"));
    let second = workspace.add_task("second", TaskPriority::Low, Some("Ana"));

    for task_id in [first, second] {
        workspace
            .service
            .reassign_task(ReassignTaskRequest::new(task_id, workspace.member_id("Ben")))
            .await?;
    }

    let titles: Vec<String> = workspace
        .service
        .recent_activity(10)
        .await?
        .iter()
        .map(|entry| entry.task_title().to_owned())
        .collect();
    eyre::ensure!(titles == vec!["second", "first"], "unexpected order {titles:?}");
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn oldest_entries_are_evicted_beyond_retention() -> Result<(), eyre::Report> {
    let workspace = Workspace::with_log(
        &[("Ana", 10), ("Ben", 10)],
        EngineConfig::default(),
        InMemoryActivityLog::with_retention(2),
    );
    let tasks: Vec<_> = (0..3)
        .map(|index| workspace.add_task(&format!("task {index}"), TaskPriority::Low, Some("Ana")))
        .collect();
    for task_id in &tasks {
        workspace
            .service
            .reassign_task(ReassignTaskRequest::new(*task_id, workspace.member_id("Ben")))
            .await?;
    }

    let retained = workspace.activity_log.recent(10).await?;
    let titles: Vec<&str> = retained.iter().map(ActivityLogEntry::task_title).collect();
    eyre::ensure!(titles == vec!["task 2", "task 1"], "unexpected retention {titles:?}");
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn task_history_filters_by_task() -> Result<(), eyre::Report> {
    let workspace = Workspace::with_members(&[("Ana", 5), ("Ben", 5)], EngineConfig::default());
    let tracked = workspace.add_task("tracked", TaskPriority::Medium, Some("Ana"));
    let other = workspace.add_task("other", TaskPriority::Medium, Some("Ana"));

    workspace
        .service
        .reassign_task(ReassignTaskRequest::new(tracked, workspace.member_id("Ben")))
        .await?;
    workspace
        .service
        .reassign_task(ReassignTaskRequest::new(other, workspace.member_id("Ben")))
        .await?;
    workspace
        .service
        .reassign_task(ReassignTaskRequest::new(tracked, workspace.member_id("Ana")))
        .await?;

    let history = workspace.service.task_activity(tracked, 10).await?;
    let moves: Vec<(Option<&str>, &str)> = history
        .iter()
        .map(|entry| (entry.from_member_name(), entry.to_member_name()))
        .collect();
    eyre::ensure!(
        moves == vec![(Some("Ben"), "Ana"), (Some("Ana"), "Ben")],
        "unexpected history {moves:?}"
    );
    Ok(())
}

#[test]
fn default_retention_is_fifty() {
    assert_eq!(InMemoryActivityLog::default().retention(), 50);
}

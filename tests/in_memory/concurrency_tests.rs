//! Competing writers and concurrent automatic runs.

use gropius::workload::{
    domain::{SkipReason, TaskPriority},
    ports::{AssigneeUpdate, WorkloadStore},
    services::{AutomaticRunOutcome, EngineConfig},
};

use super::helpers::Workspace;

#[tokio::test(flavor = "multi_thread")]
async fn concurrent_automatic_runs_apply_once() -> Result<(), eyre::Report> {
    let workspace = Workspace::with_members(
        &[("Ana", 1), ("Ben", 2), ("Cy", 2)],
        EngineConfig::automatic(),
    );
    for index in 0..3 {
        workspace.add_task(&format!("ticket {index}"), TaskPriority::Low, Some("Ana"));
    }
    let team_id = workspace.team.id();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let service = workspace.service.clone();
            tokio::spawn(async move { service.apply_plan_automatically(team_id).await })
        })
        .collect();
    let mut applied_runs = 0;
    for handle in handles {
        if matches!(handle.await??, AutomaticRunOutcome::Applied { .. }) {
            applied_runs += 1;
        }
    }

    eyre::ensure!(applied_runs == 1, "expected one applying run, got {applied_runs}");
    let entries = workspace.service.recent_activity(10).await?;
    eyre::ensure!(entries.len() == 2, "expected two entries, got {}", entries.len());
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn stale_version_is_rejected_by_the_store() -> Result<(), eyre::Report> {
    let workspace = Workspace::with_members(&[("Ana", 5), ("Ben", 5)], EngineConfig::default());
    let task_id = workspace.add_task("shared", TaskPriority::Low, Some("Ana"));
    let task = workspace
        .store
        .find_task(task_id)
        .await?
        .ok_or_else(|| eyre::eyre!("task missing"))?;

    let first = workspace
        .store
        .set_task_assignee(task_id, Some(workspace.member_id("Ben")), task.version())
        .await?;
    let second = workspace
        .store
        .set_task_assignee(task_id, Some(workspace.member_id("Ana")), task.version())
        .await?;

    let AssigneeUpdate::Applied { version } = first else {
        eyre::bail!("first writer should win, got {first:?}");
    };
    eyre::ensure!(
        second == AssigneeUpdate::Conflict { current: version },
        "second writer should conflict, got {second:?}"
    );
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn move_is_skipped_when_holder_changes_after_planning() -> Result<(), eyre::Report> {
    let workspace = Workspace::with_members(
        &[("Ana", 0), ("Ben", 3), ("Cy", 3)],
        EngineConfig::default(),
    );
    workspace.add_task("one", TaskPriority::Low, Some("Ana"));
    workspace.add_task("two", TaskPriority::Low, Some("Ana"));
    let plan = workspace
        .service
        .compute_reassignment_plan(workspace.team.id())
        .await?;
    let stolen = plan
        .moves()
        .first()
        .ok_or_else(|| eyre::eyre!("plan is empty"))?;
    let task = workspace
        .store
        .find_task(stolen.task_id)
        .await?
        .ok_or_else(|| eyre::eyre!("task missing"))?;
    workspace
        .store
        .set_task_assignee(task.id(), Some(workspace.member_id("Cy")), task.version())
        .await?;

    let result = workspace.service.apply_plan_manually(&plan).await?;

    eyre::ensure!(result.applied.len() == 1, "one move should apply");
    let [skipped] = result.skipped.as_slice() else {
        eyre::bail!("expected exactly one skip, got {:?}", result.skipped);
    };
    eyre::ensure!(
        matches!(skipped.reason, SkipReason::ReassignedAway { .. }),
        "unexpected skip reason {:?}",
        skipped.reason
    );
    Ok(())
}

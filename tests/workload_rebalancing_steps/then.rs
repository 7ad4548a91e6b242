//! Then steps for workload rebalancing BDD scenarios.

use super::world::{RebalancingWorld, run_async};
use gropius::workload::{domain::SkipReason, services::AutoAssignOutcome};
use rstest_bdd_macros::then;

#[then(r#"the plan moves exactly one task from "{from}" to "{to}""#)]
fn plan_moves_one_task(
    world: &RebalancingWorld,
    from: String,
    to: String,
) -> Result<(), eyre::Report> {
    let plan = world
        .last_plan
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing plan"))?;
    let [proposed] = plan.moves() else {
        return Err(eyre::eyre!("expected one move, found {}", plan.len()));
    };
    if proposed.from_member_name != from || proposed.to_member_name != to {
        return Err(eyre::eyre!(
            "expected move {from} -> {to}, found {} -> {}",
            proposed.from_member_name,
            proposed.to_member_name
        ));
    }
    Ok(())
}

#[then("the plan is empty")]
fn plan_is_empty(world: &RebalancingWorld) -> Result<(), eyre::Report> {
    let plan = world
        .last_plan
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing plan"))?;
    if !plan.is_empty() {
        return Err(eyre::eyre!("expected an empty plan, found {plan:?}"));
    }
    Ok(())
}

#[then("the activity log holds {count:u64} entries")]
fn activity_log_holds(world: &RebalancingWorld, count: u64) -> Result<(), eyre::Report> {
    let entries = run_async(world.service.recent_activity(100))?;
    if u64::try_from(entries.len())? != count {
        return Err(eyre::eyre!(
            "expected {count} activity entries, found {}",
            entries.len()
        ));
    }
    Ok(())
}

#[then("{applied:u64} moves applied and {skipped:u64} stale move skipped")]
fn moves_applied_and_skipped(
    world: &RebalancingWorld,
    applied: u64,
    skipped: u64,
) -> Result<(), eyre::Report> {
    let result = world
        .last_applied
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing applied result"))?;
    if u64::try_from(result.applied.len())? != applied
        || u64::try_from(result.skipped.len())? != skipped
    {
        return Err(eyre::eyre!("unexpected outcome {result:?}"));
    }
    if !result
        .skipped
        .iter()
        .all(|skip| matches!(skip.reason, SkipReason::ReassignedAway { .. }))
    {
        return Err(eyre::eyre!("skips should be stale moves, got {result:?}"));
    }
    Ok(())
}

#[then(r#"the task is assigned to "{name}""#)]
fn task_is_assigned_to(world: &RebalancingWorld, name: String) -> Result<(), eyre::Report> {
    match world.last_auto_assign.as_ref() {
        Some(AutoAssignOutcome::Assigned { member, .. }) if member.name() == name => Ok(()),
        other => Err(eyre::eyre!("expected assignment to {name}, got {other:?}")),
    }
}

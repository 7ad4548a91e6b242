//! When steps for workload rebalancing BDD scenarios.

use super::world::{RebalancingWorld, run_async};
use eyre::WrapErr;
use gropius::workload::ports::WorkloadStore;
use rstest_bdd_macros::when;

#[when("the reassignment plan is computed")]
fn compute_plan(world: &mut RebalancingWorld) -> Result<(), eyre::Report> {
    let plan = run_async(world.service.compute_reassignment_plan(world.team.id()))
        .wrap_err("compute reassignment plan")?;
    world.last_plan = Some(plan);
    Ok(())
}

#[when(r#"the first planned task is handed to "{name}" out of band"#)]
fn hand_first_planned_task(world: &mut RebalancingWorld, name: String) -> Result<(), eyre::Report> {
    let member_id = world.member_id(&name)?;
    let task_id = world
        .last_plan
        .as_ref()
        .and_then(|plan| plan.moves().first())
        .map(|proposed| proposed.task_id)
        .ok_or_else(|| eyre::eyre!("no planned move in scenario world"))?;
    let task = run_async(world.store.find_task(task_id))?
        .ok_or_else(|| eyre::eyre!("planned task is missing"))?;
    run_async(
        world
            .store
            .set_task_assignee(task_id, Some(member_id), task.version()),
    )
    .wrap_err("reassign task out of band")?;
    Ok(())
}

#[when("the plan is applied after confirmation")]
fn apply_plan(world: &mut RebalancingWorld) -> Result<(), eyre::Report> {
    let plan = world
        .last_plan
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing plan in scenario world"))?;
    let result = run_async(world.service.apply_plan_manually(plan)).wrap_err("apply plan")?;
    world.last_applied = Some(result);
    Ok(())
}

#[when("automatic reassignment runs twice")]
fn automatic_runs_twice(world: &mut RebalancingWorld) -> Result<(), eyre::Report> {
    for _ in 0..2 {
        run_async(world.service.apply_plan_automatically(world.team.id()))
            .wrap_err("automatic reassignment run")?;
    }
    Ok(())
}

#[when(r#"the task "{title}" is auto-assigned"#)]
fn auto_assign_task(world: &mut RebalancingWorld, title: String) -> Result<(), eyre::Report> {
    let task_id = world
        .tasks
        .get(&title)
        .copied()
        .ok_or_else(|| eyre::eyre!("task {title} was not declared in the scenario"))?;
    let outcome = run_async(world.service.auto_assign_created_task(task_id))
        .wrap_err("auto-assign created task")?;
    world.last_auto_assign = Some(outcome);
    Ok(())
}

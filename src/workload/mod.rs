//! Workload balancing for teams.
//!
//! Detects members holding more active tasks than their capacity, plans
//! deterministic moves to members with spare capacity, applies those moves
//! with optimistic concurrency, and records every assignee change in an
//! activity log. The module follows hexagonal architecture:
//!
//! - Domain types and the pure evaluator, selector and planner in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;

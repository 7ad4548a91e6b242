//! Step definitions for workload rebalancing scenarios.

pub mod then;
pub mod when;
pub mod world;

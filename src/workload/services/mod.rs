//! Application services for workload rebalancing.

mod config;
mod executor;
mod reassignment;

pub use config::EngineConfig;
pub use reassignment::{
    AutoAssignOutcome, AutomaticRunOutcome, CapacityCheck, ReassignTaskRequest,
    ReassignmentError, ReassignmentResult, ReassignmentService,
};

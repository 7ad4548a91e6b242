//! Port contracts for workload balancing.
//!
//! Ports define infrastructure-agnostic interfaces used by the reassignment
//! service.

pub mod activity_log;
pub mod store;

pub use activity_log::{ActivityLog, ActivityLogError, ActivityLogResult};
pub use store::{AssigneeUpdate, WorkloadStore, WorkloadStoreError, WorkloadStoreResult};

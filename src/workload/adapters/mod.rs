//! Adapter implementations of the workload ports.

pub mod memory;

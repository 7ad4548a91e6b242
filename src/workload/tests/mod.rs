//! Unit tests for the workload module.

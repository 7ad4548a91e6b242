//! Gropius: workload reassignment for capacity-bound teams.
//!
//! This crate keeps task load balanced against the capacity each team
//! member declares. It evaluates a team's active tasks, proposes moves away
//! from overloaded members, applies them either automatically or after
//! confirmation, and keeps an auditable trail of every move.
//!
//! # Architecture
//!
//! Gropius follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports
//!
//! # Modules
//!
//! - [`workload`]: Capacity evaluation, rebalancing plans and their
//!   application

pub mod workload;

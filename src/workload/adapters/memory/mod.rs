//! In-memory adapters.

mod activity_log;
mod store;

pub use activity_log::InMemoryActivityLog;
pub use store::InMemoryWorkloadStore;

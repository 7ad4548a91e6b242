//! Append-only activity log port.

use crate::workload::domain::{ActivityEntryId, ActivityLogEntry, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for activity log operations.
pub type ActivityLogResult<T> = Result<T, ActivityLogError>;

/// Activity log persistence contract.
///
/// Entries are never updated. How many are retained is the adapter's
/// policy.
#[async_trait]
pub trait ActivityLog: Send + Sync {
    /// Appends one entry and returns its identifier.
    async fn append(&self, entry: &ActivityLogEntry) -> ActivityLogResult<ActivityEntryId>;

    /// Returns up to `limit` entries, newest first.
    async fn recent(&self, limit: usize) -> ActivityLogResult<Vec<ActivityLogEntry>>;

    /// Returns up to `limit` entries for one task, newest first.
    async fn for_task(
        &self,
        task_id: TaskId,
        limit: usize,
    ) -> ActivityLogResult<Vec<ActivityLogEntry>>;
}

/// Errors returned by activity log implementations.
#[derive(Debug, Clone, Error)]
pub enum ActivityLogError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ActivityLogError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

//! Bounded in-memory activity log.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, RwLock};

use crate::workload::{
    domain::{ActivityEntryId, ActivityLogEntry, TaskId},
    ports::{ActivityLog, ActivityLogError, ActivityLogResult},
};

/// Thread-safe activity log keeping at most `retention` entries.
///
/// New entries go to the front; once the bound is reached the oldest entry
/// is evicted.
#[derive(Debug, Clone)]
pub struct InMemoryActivityLog {
    entries: Arc<RwLock<VecDeque<ActivityLogEntry>>>,
    retention: usize,
}

impl InMemoryActivityLog {
    /// Number of entries retained by [`InMemoryActivityLog::new`].
    pub const DEFAULT_RETENTION: usize = 50;

    /// Creates an empty log with the default retention.
    #[must_use]
    pub fn new() -> Self {
        Self::with_retention(Self::DEFAULT_RETENTION)
    }

    /// Creates an empty log retaining at most `retention` entries.
    #[must_use]
    pub fn with_retention(retention: usize) -> Self {
        Self {
            entries: Arc::new(RwLock::new(VecDeque::new())),
            retention,
        }
    }

    /// Returns the retention bound.
    #[must_use]
    pub const fn retention(&self) -> usize {
        self.retention
    }
}

impl Default for InMemoryActivityLog {
    fn default() -> Self {
        Self::new()
    }
}

fn lock_error(err: impl ToString) -> ActivityLogError {
    ActivityLogError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl ActivityLog for InMemoryActivityLog {
    async fn append(&self, entry: &ActivityLogEntry) -> ActivityLogResult<ActivityEntryId> {
        let mut entries = self.entries.write().map_err(lock_error)?;
        entries.push_front(entry.clone());
        entries.truncate(self.retention);
        Ok(entry.id())
    }

    async fn recent(&self, limit: usize) -> ActivityLogResult<Vec<ActivityLogEntry>> {
        let entries = self.entries.read().map_err(lock_error)?;
        Ok(entries.iter().take(limit).cloned().collect())
    }

    async fn for_task(
        &self,
        task_id: TaskId,
        limit: usize,
    ) -> ActivityLogResult<Vec<ActivityLogEntry>> {
        let entries = self.entries.read().map_err(lock_error)?;
        Ok(entries
            .iter()
            .filter(|entry| entry.task_id() == task_id)
            .take(limit)
            .cloned()
            .collect())
    }
}

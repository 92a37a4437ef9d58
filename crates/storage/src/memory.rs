use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::StorageError;
use crate::record::BookingRecord;
use crate::traits::BookingStore;

/// In-memory reference backend.
///
/// Backed by a mutex-guarded vector; every trait method takes the lock once,
/// which gives the per-call atomicity the trait contract requires. Suitable
/// for tests and the CLI; a durable backend lives behind the same trait.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    records: Vec<BookingRecord>,
    next_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Substring match with `LIKE '%needle%'` semantics: ASCII case-insensitive.
/// `needle` must already be lower-cased.
fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_ascii_lowercase().contains(needle)
}

fn now_rfc3339() -> String {
    time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_default()
}

#[async_trait]
impl BookingStore for MemoryStore {
    async fn insert(
        &self,
        resource: &str,
        action: &str,
        details: &str,
        status: &str,
    ) -> Result<i64, StorageError> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        inner.next_id += 1;
        let id = inner.next_id;
        inner.records.push(BookingRecord {
            id,
            resource: resource.to_string(),
            action: action.to_string(),
            details: details.to_string(),
            status: status.to_string(),
            timestamp: now_rfc3339(),
        });
        Ok(id)
    }

    async fn update_latest_status(
        &self,
        resource: &str,
        person_substring: &str,
        new_status: &str,
    ) -> Result<(), StorageError> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        let needle = person_substring.to_ascii_lowercase();
        // Most recent first; ids are monotonic.
        if let Some(record) = inner
            .records
            .iter_mut()
            .rev()
            .find(|r| r.resource == resource && contains_ignore_case(&r.details, &needle))
        {
            record.status = new_status.to_string();
            record.timestamp = now_rfc3339();
        }
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<BookingRecord>, StorageError> {
        let inner = self
            .inner
            .lock()
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        Ok(inner.records.clone())
    }

    async fn count_active(
        &self,
        resource: &str,
        person_substring: &str,
    ) -> Result<u32, StorageError> {
        let inner = self
            .inner
            .lock()
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        let needle = person_substring.to_ascii_lowercase();
        let count = inner
            .records
            .iter()
            .filter(|r| {
                r.resource == resource
                    && contains_ignore_case(&r.details, &needle)
                    && r.status != "Cancelled"
            })
            .count();
        Ok(count as u32)
    }
}

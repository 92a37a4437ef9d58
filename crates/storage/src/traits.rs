use async_trait::async_trait;

use crate::error::StorageError;
use crate::record::BookingRecord;

/// The storage trait for booking backends.
///
/// The dispatcher treats the store as an external transactional resource:
/// each method call must be effectively atomic. In particular
/// [`update_latest_status`](BookingStore::update_latest_status) is a single
/// read-modify-write -- the backend selects the matching record and updates
/// it in one operation, so concurrent callers cannot lose updates.
///
/// Person matching is raw substring matching against the serialized
/// `details` text, mirroring a SQL `LIKE '%person%'` -- ASCII
/// case-insensitive, and a longer name that contains the searched name
/// matches too; callers accept that.
///
/// Implementations must be `Send + Sync + 'static` to cross async task
/// boundaries.
#[async_trait]
pub trait BookingStore: Send + Sync + 'static {
    /// Insert a new booking record, returning its id.
    ///
    /// The store assigns the id and the creation timestamp.
    async fn insert(
        &self,
        resource: &str,
        action: &str,
        details: &str,
        status: &str,
    ) -> Result<i64, StorageError>;

    /// Update the status of the most recently created record whose resource
    /// matches exactly and whose details contain `person_substring`.
    ///
    /// A no-op (still `Ok`) when nothing matches.
    async fn update_latest_status(
        &self,
        resource: &str,
        person_substring: &str,
        new_status: &str,
    ) -> Result<(), StorageError>;

    /// All records in insertion (id) order.
    async fn list_all(&self) -> Result<Vec<BookingRecord>, StorageError>;

    /// Count of non-cancelled records for `resource` whose details contain
    /// `person_substring`.
    async fn count_active(
        &self,
        resource: &str,
        person_substring: &str,
    ) -> Result<u32, StorageError>;
}

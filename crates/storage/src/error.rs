/// All errors that can be returned by a BookingStore implementation.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A backend-specific storage error (DB connection, serialization, etc.).
    #[error("storage backend error: {0}")]
    Backend(String),
}

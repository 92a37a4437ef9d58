use serde::{Deserialize, Serialize};

/// One persisted booking row.
///
/// `details` is an opaque serialized representation of the originating
/// command; the store only ever inspects it for person-substring matching.
/// Records are append-only except for status transitions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRecord {
    pub id: i64,
    /// One of `concert`, `football`, `train`, `airline`.
    pub resource: String,
    /// The action that created the record (e.g. `BOOK`).
    pub action: String,
    pub details: String,
    /// `Reserved`, `Confirmed`, `Paid`, or `Cancelled`.
    pub status: String,
    /// ISO 8601 / RFC 3339 timestamp of creation or last status change.
    pub timestamp: String,
}

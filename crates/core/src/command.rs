//! The typed command AST produced by the parser.
//!
//! A `Command` is created fresh per input line, consumed immediately by
//! validation and dispatch, and discarded; only its derived booking record
//! persists.

use serde::{Deserialize, Serialize};

/// The four bookable resource types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    Concert,
    Football,
    Train,
    Airline,
}

impl Resource {
    pub const ALL: [Resource; 4] = [
        Resource::Concert,
        Resource::Football,
        Resource::Train,
        Resource::Airline,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Concert => "concert",
            Resource::Football => "football",
            Resource::Train => "train",
            Resource::Airline => "airline",
        }
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A status-transition verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusAction {
    Confirm,
    Pay,
    Cancel,
}

impl StatusAction {
    /// The booking status this action transitions a record to.
    pub fn target_status(&self) -> &'static str {
        match self {
            StatusAction::Confirm => "Confirmed",
            StatusAction::Pay => "Paid",
            StatusAction::Cancel => "Cancelled",
        }
    }

    /// Past-tense form used in result text ("Booking confirmed for ...").
    pub fn past_tense(&self) -> &'static str {
        match self {
            StatusAction::Confirm => "confirmed",
            StatusAction::Pay => "paid",
            StatusAction::Cancel => "cancelled",
        }
    }
}

/// One fully parsed booking-language statement.
///
/// Multi-word fields (`origin`, `destination`, `event_name`, `person`) are
/// the space-joined concatenation of consecutive word/quoted-string tokens
/// in original order; the grammar guarantees they are non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    ListEvents {
        resource: Resource,
    },
    BookTransport {
        resource: Resource,
        origin: String,
        destination: String,
        date: String,
        time: String,
        person: String,
    },
    BookEvent {
        resource: Resource,
        event_name: String,
        person: String,
    },
    StatusChange {
        action: StatusAction,
        resource: Resource,
        person: String,
    },
    ViewBookings,
}

//! Semantic validation: date/time sanity and per-person ticket quotas.
//!
//! Only booking commands are validated; list/status/view commands pass
//! through as `Accepted`. A rejection is user-facing and produces no
//! persistence mutation.

use fare_core::Command;
use fare_storage::{BookingStore, StorageError};
use time::macros::format_description;

use crate::advisory::Advisor;
use crate::config::ticket_limit;

/// The outcome of validating a command. Mutually exclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Accepted,
    Rejected(String),
}

/// Checks a `YYYY-MM-DD` date (and optionally an `HH:MM` time) for
/// well-formedness and futurity.
///
/// Returns the rejection message, or `None` when valid. The date must be a
/// real calendar date and must not be before today -- booking for the
/// current day is allowed. The time is checked for format only; no
/// past/future constraint applies to the time of day.
pub fn validate_datetime(date: &str, time_of_day: Option<&str>) -> Option<String> {
    let date_format = format_description!("[year]-[month]-[day]");
    let parsed = match time::Date::parse(date, date_format) {
        Ok(d) => d,
        Err(_) => return Some("Invalid format: use YYYY-MM-DD and HH:MM".to_string()),
    };

    let today = time::OffsetDateTime::now_utc().date();
    if parsed < today {
        return Some("Date cannot be in the past".to_string());
    }

    if let Some(t) = time_of_day {
        let time_format = format_description!("[hour]:[minute]");
        if time::Time::parse(t, time_format).is_err() {
            return Some("Invalid format: use YYYY-MM-DD and HH:MM".to_string());
        }
    }

    None
}

/// Validates a parsed command against business rules.
///
/// Checks run in order: person present, date/time well-formed and not in
/// the past, quota not exceeded. Quota counting consults the store for
/// non-cancelled records of the same resource whose details contain the
/// person name; the warning text comes from the advisory service with a
/// fixed fallback, never a hard failure. Only storage errors propagate.
pub async fn validate<S: BookingStore>(
    cmd: &Command,
    store: &S,
    advisor: &Advisor,
) -> Result<ValidationOutcome, StorageError> {
    let (resource, person, date, time_of_day) = match cmd {
        Command::BookTransport {
            resource,
            person,
            date,
            time,
            ..
        } => (resource, person.as_str(), Some(date.as_str()), Some(time.as_str())),
        Command::BookEvent {
            resource, person, ..
        } => (resource, person.as_str(), None, None),
        // Everything else passes through unconditionally.
        _ => return Ok(ValidationOutcome::Accepted),
    };

    // The grammar already guarantees a non-empty person; this double check
    // also covers commands constructed outside the parser.
    if person.trim().is_empty() {
        return Ok(ValidationOutcome::Rejected(
            "Error: Must specify a person for booking".to_string(),
        ));
    }

    if let Some(date) = date {
        if let Some(message) = validate_datetime(date, time_of_day) {
            return Ok(ValidationOutcome::Rejected(message));
        }
    }

    let resource = resource.as_str();
    let have = store.count_active(resource, person).await?;
    let want = 1u32;
    let limit = ticket_limit(resource);
    if have + want > limit {
        let warning = advisor
            .quota_warning_or_fallback(person, resource, have, want, limit)
            .await;
        return Ok(ValidationOutcome::Rejected(format!("WARNING: {}", warning)));
    }

    Ok(ValidationOutcome::Accepted)
}

//! Quota configuration and user-facing help text.

use fare_core::Resource;

/// Per-person active-booking limit for a resource type.
///
/// Limits apply to non-cancelled records only. The unknown-resource default
/// of 0 (always rejected) cannot currently be reached through the grammar,
/// which only admits the four known types.
pub fn ticket_limit(resource: &str) -> u32 {
    match resource {
        "concert" => 4,
        "football" => 6,
        "train" => 10,
        "airline" => 4,
        _ => 0,
    }
}

/// The command reference shown by the CLI `help` command.
pub fn help_text() -> String {
    let limits = Resource::ALL
        .iter()
        .map(|r| format!("    Max {} {} tickets per person", ticket_limit(r.as_str()), r))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "SUPPORTED COMMANDS:
    - List [concert|football|train|airline] tickets in my area
    - Book train|airline from [location] to [location] on [date] at [time] for [name]
    - Book [event name] concert|football match for [name]
    - Confirm|Pay|Cancel [event type] for [name]
    - View bookings

GENERAL NOTES:
    - Dates must be in YYYY-MM-DD format (e.g., 2025-04-15)
    - Times must be in HH:MM 24-hour format (e.g., 14:30)
    - Names can be in quotes for multi-word names (e.g., \"John Smith\")
    - TICKET LIMITS
{limits}"
    )
}

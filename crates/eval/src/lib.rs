//! Fare evaluator -- accepts a parsed [`Command`](fare_core::Command),
//! checks business rules, and routes it to its effect.
//!
//! The pipeline per input line is strictly sequential:
//!
//! ```text
//! raw text ──fare-core──▶ Command ──validate──▶ Accepted/Rejected ──dispatch──▶ result text
//! ```
//!
//! Rejections (bad date, missing person, quota exceeded) are user-facing and
//! produce no persistence mutation. Advisory-service failures are always
//! recovered locally with fallback text; only storage failures are fatal for
//! a request.

pub mod advisory;
pub mod config;
pub mod dispatch;
pub mod llm;
pub mod validate;

pub use advisory::{Advisor, AdvisoryError, AdvisoryService, NoopAdvisory};
pub use dispatch::{DispatchError, Dispatcher};
pub use validate::ValidationOutcome;

//! Advisory text services: explanations, listings, quota warnings.
//!
//! The advisory service is an optional, best-effort collaborator. It is
//! never authoritative and it may be slow or down; every call site goes
//! through [`Advisor`], which applies a bounded timeout and substitutes
//! fallback text. An advisory failure must never cancel the underlying
//! business operation.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

/// Error type for advisory service operations.
#[derive(Debug)]
pub enum AdvisoryError {
    /// No backing service is configured.
    NotConfigured,
    /// Network or HTTP error.
    Network(String),
    /// The backing API returned an error response.
    Api { status: u16, message: String },
    /// Failed to extract text from the response.
    Parse(String),
}

impl std::fmt::Display for AdvisoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdvisoryError::NotConfigured => write!(f, "advisory service not configured"),
            AdvisoryError::Network(msg) => write!(f, "advisory network error: {}", msg),
            AdvisoryError::Api { status, message } => {
                write!(f, "advisory API error ({}): {}", status, message)
            }
            AdvisoryError::Parse(msg) => write!(f, "advisory parse error: {}", msg),
        }
    }
}

impl std::error::Error for AdvisoryError {}

/// Generates human-readable narrative text around booking operations.
#[async_trait]
pub trait AdvisoryService: Send + Sync {
    /// One plain-language sentence explaining what `raw_command` asks for.
    async fn explain(&self, raw_command: &str) -> Result<String, AdvisoryError>;

    /// A human-readable listing of upcoming events of the given type.
    async fn event_listing(&self, resource: &str) -> Result<String, AdvisoryError>;

    /// A short warning explaining a quota rejection to the customer.
    async fn quota_warning(
        &self,
        person: &str,
        resource: &str,
        have: u32,
        want: u32,
        limit: u32,
    ) -> Result<String, AdvisoryError>;
}

/// Advisory stand-in that always fails, forcing the fallback text.
///
/// The default for tests and for CLI runs without an API key.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAdvisory;

#[async_trait]
impl AdvisoryService for NoopAdvisory {
    async fn explain(&self, _raw_command: &str) -> Result<String, AdvisoryError> {
        Err(AdvisoryError::NotConfigured)
    }

    async fn event_listing(&self, _resource: &str) -> Result<String, AdvisoryError> {
        Err(AdvisoryError::NotConfigured)
    }

    async fn quota_warning(
        &self,
        _person: &str,
        _resource: &str,
        _have: u32,
        _want: u32,
        _limit: u32,
    ) -> Result<String, AdvisoryError> {
        Err(AdvisoryError::NotConfigured)
    }
}

/// An advisory service plus the deadline policy around it.
///
/// Wraps every call in `tokio::time::timeout` and degrades to fixed fallback
/// text on error or timeout, so the dispatch pipeline can never block
/// indefinitely or fail because of the advisory collaborator.
#[derive(Clone)]
pub struct Advisor {
    service: Arc<dyn AdvisoryService>,
    timeout: Duration,
}

impl Advisor {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    pub fn new(service: Arc<dyn AdvisoryService>) -> Self {
        Advisor {
            service,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub async fn explain_or_fallback(&self, raw_command: &str) -> String {
        match tokio::time::timeout(self.timeout, self.service.explain(raw_command)).await {
            Ok(Ok(text)) => text,
            _ => "Sorry, no explanation is available right now.".to_string(),
        }
    }

    pub async fn event_listing_or_fallback(&self, resource: &str) -> String {
        match tokio::time::timeout(self.timeout, self.service.event_listing(resource)).await {
            Ok(Ok(text)) => text,
            _ => format!("Could not retrieve {} event information", resource),
        }
    }

    pub async fn quota_warning_or_fallback(
        &self,
        person: &str,
        resource: &str,
        have: u32,
        want: u32,
        limit: u32,
    ) -> String {
        match tokio::time::timeout(
            self.timeout,
            self.service.quota_warning(person, resource, have, want, limit),
        )
        .await
        {
            Ok(Ok(text)) => text,
            _ => format!(
                "{} already has {} {} ticket(s) and wants {} more, but the limit is {}",
                person, have, resource, want, limit
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn noop_advisory_degrades_to_fallback_text() {
        let advisor = Advisor::new(Arc::new(NoopAdvisory));
        let text = advisor.explain_or_fallback("view bookings").await;
        assert!(text.contains("no explanation"));
        let listing = advisor.event_listing_or_fallback("concert").await;
        assert!(listing.contains("concert"));
    }

    #[tokio::test]
    async fn slow_advisory_is_timed_out() {
        struct SlowAdvisory;

        #[async_trait]
        impl AdvisoryService for SlowAdvisory {
            async fn explain(&self, _raw: &str) -> Result<String, AdvisoryError> {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok("too late".to_string())
            }
            async fn event_listing(&self, _resource: &str) -> Result<String, AdvisoryError> {
                Err(AdvisoryError::NotConfigured)
            }
            async fn quota_warning(
                &self,
                _p: &str,
                _r: &str,
                _h: u32,
                _w: u32,
                _l: u32,
            ) -> Result<String, AdvisoryError> {
                Err(AdvisoryError::NotConfigured)
            }
        }

        let advisor =
            Advisor::new(Arc::new(SlowAdvisory)).with_timeout(Duration::from_millis(10));
        let text = advisor.explain_or_fallback("view bookings").await;
        assert!(text.contains("no explanation"));
    }

    #[tokio::test]
    async fn quota_fallback_names_the_numbers() {
        let advisor = Advisor::new(Arc::new(NoopAdvisory));
        let text = advisor
            .quota_warning_or_fallback("jane", "concert", 4, 1, 4)
            .await;
        assert!(text.contains("jane"));
        assert!(text.contains("limit is 4"));
    }
}

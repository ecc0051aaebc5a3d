//! Normalized view of a catalog service response.
//!
//! The transport layer reduces every HTTP response to a [`Reply`]: status
//! code, status message, the raw `Retry-After` header when present, and
//! either a decoded payload or the error body text. The retry executor and
//! the lookup code reason about this shape instead of transport specifics.

use std::time::Duration;

use tracing::warn;

/// One normalized response from the catalog service.
#[derive(Debug, Clone)]
pub struct Reply<T> {
    /// HTTP status code of the response
    pub status: u16,
    /// Human-readable status message for diagnostics
    pub message: String,
    /// Raw `Retry-After` header value, if the service sent one
    pub retry_after: Option<String>,
    payload: Option<T>,
    error_body: Option<String>,
}

impl<T> Reply<T> {
    /// Creates a successful reply carrying a decoded payload.
    pub fn success(status: u16, payload: T) -> Self {
        Self {
            status,
            message: String::new(),
            retry_after: None,
            payload: Some(payload),
            error_body: None,
        }
    }

    /// Creates a non-success reply, optionally carrying the error body text.
    pub fn failure(status: u16, message: impl Into<String>, error_body: Option<String>) -> Self {
        Self {
            status,
            message: message.into(),
            retry_after: None,
            payload: None,
            error_body,
        }
    }

    /// Attaches a raw `Retry-After` header value.
    pub fn with_retry_after(mut self, value: impl Into<String>) -> Self {
        self.retry_after = Some(value.into());
        self
    }

    /// Returns true for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Returns true when the service signalled "too many requests".
    pub fn is_rate_limited(&self) -> bool {
        self.status == 429
    }

    /// Server-suggested wait before retrying, parsed from `Retry-After`.
    ///
    /// The header carries non-negative whole seconds. Absent, negative or
    /// unparsable values yield `None` so the caller falls back to its own
    /// backoff policy.
    pub fn retry_after_duration(&self) -> Option<Duration> {
        let seconds: i64 = self.retry_after.as_ref()?.trim().parse().ok()?;
        u64::try_from(seconds).ok().map(Duration::from_secs)
    }

    /// Drops the error body without consuming the reply.
    pub(crate) fn release_error_body(&mut self) {
        self.error_body = None;
    }

    /// Unwraps the reply into its payload, or absence.
    ///
    /// On success, yields the payload. Anything else releases the error body,
    /// logs the status and message for diagnostics and yields `None`. Failure
    /// signaling downstream of this point is by absence only; this never
    /// panics and never returns an error.
    pub fn into_payload(mut self, context: &str) -> Option<T> {
        if self.is_success() {
            if let Some(payload) = self.payload.take() {
                return Some(payload);
            }
        }
        self.release_error_body();
        warn!(
            status = self.status,
            message = %self.message,
            context = context,
            "catalog request yielded no usable payload"
        );
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_reply_unwraps_to_payload() {
        let reply = Reply::success(200, "payload".to_string());
        assert_eq!(reply.into_payload("test"), Some("payload".to_string()));
    }

    #[test]
    fn test_failure_reply_unwraps_to_none() {
        let reply: Reply<String> =
            Reply::failure(404, "Not Found", Some("{\"error\":\"missing\"}".to_string()));
        assert_eq!(reply.into_payload("test"), None);
    }

    #[test]
    fn test_rate_limited_reply_unwraps_to_none() {
        let reply: Reply<String> = Reply::failure(429, "Too Many Requests", None);
        assert!(reply.is_rate_limited());
        assert_eq!(reply.into_payload("test"), None);
    }

    #[test]
    fn test_retry_after_parsing() {
        let reply: Reply<()> = Reply::failure(429, "", None).with_retry_after("3");
        assert_eq!(reply.retry_after_duration(), Some(Duration::from_secs(3)));

        let reply: Reply<()> = Reply::failure(429, "", None).with_retry_after(" 0 ");
        assert_eq!(reply.retry_after_duration(), Some(Duration::ZERO));

        let reply: Reply<()> = Reply::failure(429, "", None).with_retry_after("-2");
        assert_eq!(reply.retry_after_duration(), None);

        let reply: Reply<()> = Reply::failure(429, "", None).with_retry_after("soon");
        assert_eq!(reply.retry_after_duration(), None);

        let reply: Reply<()> = Reply::failure(429, "", None);
        assert_eq!(reply.retry_after_duration(), None);
    }
}

//! Retry executor for catalog requests.
//!
//! Wraps a single logical request with the crate's failure-handling policy:
//! every attempt passes through the shared [`RequestThrottle`] first,
//! connection-level failures are retried a bounded number of times with
//! linearly growing delay, and rate-limited replies are retried with
//! server-suggested or policy-driven backoff. Any other reply is returned
//! to the caller untouched.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use thiserror::Error;
use tracing::warn;

use crate::response::Reply;
use crate::throttle::RequestThrottle;

/// Transport-level failure of a single attempt.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection or I/O failure; retried up to the policy's I/O budget
    #[error("connection failure: {0}")]
    Io(String),

    /// Anything the transport did not anticipate; never retried
    #[error("request failed unexpectedly: {0}")]
    Unexpected(String),
}

/// Retry budgets and backoff base for one logical request.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// How many times a rate-limited reply is retried before being returned
    pub max_rate_limit_retries: u32,
    /// How many times a connection failure is retried before propagating
    pub max_io_retries: u32,
    /// Base delay for backoff when the service suggests no wait of its own
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_rate_limit_retries: 4,
            max_io_retries: 2,
            base_delay: Duration::from_millis(1000),
        }
    }
}

/// Executes attempts against the catalog service under the retry policy.
///
/// Holds a shared reference to the throttle so that every attempt, including
/// retries, is spaced out together with every other caller's requests.
pub struct Dispatcher {
    throttle: Arc<RequestThrottle>,
    policy: RetryPolicy,
}

impl Dispatcher {
    /// Creates a dispatcher with the default retry policy.
    pub fn new(throttle: Arc<RequestThrottle>) -> Self {
        Self::with_policy(throttle, RetryPolicy::default())
    }

    /// Creates a dispatcher with a custom retry policy.
    pub fn with_policy(throttle: Arc<RequestThrottle>, policy: RetryPolicy) -> Self {
        Self { throttle, policy }
    }

    /// Runs one logical request, reissuing the attempt per the retry policy.
    ///
    /// `attempt` performs one network round trip. The policy, per attempt:
    ///
    /// * acquire the throttle first, every time;
    /// * on [`TransportError::Io`], sleep `base_delay * failure_count`
    ///   (linear) and reissue, up to the I/O budget, then propagate;
    /// * on a rate-limited reply, sleep for the server-suggested duration
    ///   (falling back to `base_delay * (attempt + 1)`) and reissue; if the
    ///   final attempt is still rate-limited, return that reply as-is —
    ///   persistent rate limiting degrades to "no usable data" downstream
    ///   rather than an error;
    /// * any other reply, success or not, is returned immediately.
    ///
    /// [`TransportError::Unexpected`] propagates without retry.
    pub fn execute<T, F>(&self, mut attempt: F) -> Result<Reply<T>, TransportError>
    where
        F: FnMut() -> Result<Reply<T>, TransportError>,
    {
        let mut io_failures = 0u32;
        let mut attempt_index = 0u32;

        loop {
            self.throttle.acquire();

            let mut reply = match attempt() {
                Ok(reply) => reply,
                Err(TransportError::Io(cause)) => {
                    if io_failures >= self.policy.max_io_retries {
                        return Err(TransportError::Io(cause));
                    }
                    io_failures += 1;
                    let backoff = self.policy.base_delay * io_failures;
                    warn!(
                        cause = %cause,
                        backoff_ms = backoff.as_millis() as u64,
                        "catalog I/O failure, retrying"
                    );
                    thread::sleep(backoff);
                    attempt_index += 1;
                    continue;
                }
                Err(other) => return Err(other),
            };

            if !reply.is_rate_limited() {
                return Ok(reply);
            }

            let backoff = reply
                .retry_after_duration()
                .unwrap_or(self.policy.base_delay * (attempt_index + 1));
            reply.release_error_body();

            if attempt_index >= self.policy.max_rate_limit_retries {
                warn!("catalog still rate limited after max retries");
                return Ok(reply);
            }

            warn!(
                backoff_ms = backoff.as_millis() as u64,
                "catalog rate limited, retrying"
            );
            thread::sleep(backoff);
            attempt_index += 1;
        }
    }
}

// Copyright (c) 2025 Dasql Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Retry classification for the transport boundary.
//!
//! Core components never retry; a transport implementor consults a
//! [`RetryPolicy`] between attempts. [`ColdStartRetry`] adds the one rule
//! specific to this backend: a paused serverless cluster answers with a
//! "Communications link failure" bad request while it wakes up, and that
//! error must be retried even though its status says otherwise.

use crate::client::ApiError;
use std::time::Duration;

/// The message prefix the service returns while a paused cluster is waking.
const COLD_START_PREFIX: &str = "Communications link failure";

/// Decides whether a failed call is worth another attempt, and how long to
/// wait before it.
pub trait RetryPolicy {
    /// True when `err` on attempt number `attempt` (zero-based) should be
    /// retried.
    fn should_retry(&self, err: &ApiError, attempt: u32) -> bool;

    /// The delay to apply before attempt number `attempt`.
    fn backoff(&self, attempt: u32) -> Duration;
}

/// A generic exponential-backoff policy keyed on HTTP status retryability.
#[derive(Debug, Clone)]
pub struct ExponentialBackoff {
    /// Maximum number of retry attempts.
    pub max_retries: u32,
    /// Delay before the first retry; doubles per attempt.
    pub base_delay: Duration,
    /// Upper bound on the computed delay.
    pub max_delay: Duration,
}

impl Default for ExponentialBackoff {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(20),
        }
    }
}

impl RetryPolicy for ExponentialBackoff {
    fn should_retry(&self, err: &ApiError, attempt: u32) -> bool {
        attempt < self.max_retries
            && matches!(err.status_code, 429 | 500 | 502 | 503 | 504)
    }

    fn backoff(&self, attempt: u32) -> Duration {
        let exp = self
            .base_delay
            .saturating_mul(2u32.saturating_pow(attempt.min(31)));
        exp.min(self.max_delay)
    }
}

/// Wraps a generic policy with the cold-start rule.
///
/// An error whose message starts with the cold-start prefix is retryable
/// regardless of its nominal status; anything else defers entirely to the
/// wrapped policy.
#[derive(Debug, Clone, Default)]
pub struct ColdStartRetry<P> {
    inner: P,
}

impl<P> ColdStartRetry<P> {
    /// Wraps the provided policy.
    pub fn new(inner: P) -> Self {
        Self { inner }
    }
}

impl<P: RetryPolicy> RetryPolicy for ColdStartRetry<P> {
    fn should_retry(&self, err: &ApiError, attempt: u32) -> bool {
        if err.message.starts_with(COLD_START_PREFIX) {
            return true;
        }
        self.inner.should_retry(err, attempt)
    }

    fn backoff(&self, attempt: u32) -> Duration {
        self.inner.backoff(attempt)
    }
}

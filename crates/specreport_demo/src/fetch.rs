//! Simulated asynchronous fetches.
//!
//! Every operation sleeps on the tokio timer to stand in for network latency. Latencies are configurable so
//! suites can run fast.

use std::time::Duration;

use chrono::Utc;
use tokio::time::sleep;

use crate::errors::FetchError;

/// Payload returned by a successful fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedData {
    pub data: String,
    /// Milliseconds since the Unix epoch, when the fetch reports one.
    pub timestamp_ms: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Simulated latency for each operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchLatency {
    pub data: Duration,
    pub error: Duration,
    pub user: Duration,
    pub batch_step: Duration,
}

impl Default for FetchLatency {
    fn default() -> Self {
        Self {
            data: Duration::from_millis(100),
            error: Duration::from_millis(50),
            user: Duration::from_millis(50),
            batch_step: Duration::from_millis(10),
        }
    }
}

impl FetchLatency {
    /// No latency at all; useful for tests.
    pub fn instant() -> Self {
        Self {
            data: Duration::ZERO,
            error: Duration::ZERO,
            user: Duration::ZERO,
            batch_step: Duration::ZERO,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FetchService {
    latency: FetchLatency,
}

impl FetchService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_latency(latency: FetchLatency) -> Self {
        Self { latency }
    }

    pub fn latency(&self) -> FetchLatency {
        self.latency
    }

    /// Resolve with `"Success"` after `delay`. `None` uses the configured data latency.
    pub async fn fetch_data(&self, delay: Option<Duration>) -> FetchedData {
        sleep(delay.unwrap_or(self.latency.data)).await;
        FetchedData {
            data: "Success".to_string(),
            timestamp_ms: Some(Utc::now().timestamp_millis()),
        }
    }

    /// Fail with [`FetchError::Failed`] when `should_fail`, otherwise resolve with `"Success"`.
    pub async fn fetch_with_error(&self, should_fail: bool) -> Result<FetchedData, FetchError> {
        sleep(self.latency.error).await;
        if should_fail {
            tracing::debug!("simulated fetch failure");
            return Err(FetchError::Failed);
        }
        Ok(FetchedData {
            data: "Success".to_string(),
            timestamp_ms: None,
        })
    }

    /// Look up a simulated user profile.
    ///
    /// ## Errors
    ///
    /// Returns [`FetchError::MissingUserId`] immediately (before any latency) when `user_id` is empty.
    pub async fn user_data(&self, user_id: &str) -> Result<UserProfile, FetchError> {
        if user_id.is_empty() {
            return Err(FetchError::MissingUserId);
        }
        sleep(self.latency.user).await;
        Ok(UserProfile {
            id: user_id.to_string(),
            name: format!("User {user_id}"),
            email: format!("user{user_id}@example.com"),
        })
    }

    /// Double each item, one at a time, sleeping one batch step per item.
    ///
    /// Doubling saturates at `i64::MIN`/`i64::MAX`.
    pub async fn batch_process(&self, items: &[i64]) -> Vec<i64> {
        let mut results = Vec::with_capacity(items.len());
        for item in items {
            sleep(self.latency.batch_step).await;
            results.push(item.saturating_mul(2));
        }
        results
    }
}

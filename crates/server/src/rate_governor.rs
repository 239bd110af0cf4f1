use chrono::Utc;
use serde::Serialize;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Millisecond wall clock
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

/// System UTC clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Outcome of an admission check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    /// Request recorded; `count` includes it
    Allowed {
        count: usize,
        limit: usize,
        remaining: usize,
    },
    /// Window is full until the oldest entry ages out
    Rejected {
        count: usize,
        limit: usize,
        wait_time_seconds: u64,
    },
}

impl Admission {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed { .. })
    }
}

/// Caller's quota as reported alongside a summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitInfo {
    pub remaining: usize,
    pub count: usize,
    pub limit: usize,
    pub window_seconds: u64,
}

/// Per-caller sliding-window request counter
///
/// Timestamps live only in memory; a restart resets every quota.
/// Prune, decide and append happen under one lock, so concurrent requests
/// from the same caller cannot both take the last slot.
pub struct RateGovernor {
    limit: usize,
    window_ms: i64,
    clock: Arc<dyn Clock>,
    windows: Mutex<HashMap<String, VecDeque<i64>>>,
}

impl RateGovernor {
    pub fn new(limit: usize, window: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            limit,
            window_ms: i64::try_from(window.as_millis()).unwrap_or(i64::MAX),
            clock,
            windows: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_system_clock(limit: usize, window: Duration) -> Self {
        Self::new(limit, window, Arc::new(SystemClock))
    }

    pub fn window_seconds(&self) -> u64 {
        u64::try_from(self.window_ms / 1000).unwrap_or(0)
    }

    /// Check the caller's window and, if there is room, record this request
    pub async fn admit(&self, caller_id: &str) -> Admission {
        // Read under the lock so each caller's timestamps stay in order
        let mut windows = self.windows.lock().await;
        let now = self.clock.now_millis();
        self.prune(&mut windows, now);

        let timestamps = windows.entry(caller_id.to_string()).or_default();
        let count = timestamps.len();

        if count >= self.limit {
            let oldest = timestamps.front().copied().unwrap_or(now);
            // Clamped: a wall clock stepping backwards must not push the wait past the window
            let remaining_ms = (self.window_ms - (now - oldest)).clamp(0, self.window_ms);
            let wait_time_seconds = u64::try_from((remaining_ms + 999) / 1000).unwrap_or(0);

            warn!(
                "Rate limit exceeded: caller={}, count={}, wait={}s",
                caller_id, count, wait_time_seconds
            );
            return Admission::Rejected {
                count,
                limit: self.limit,
                wait_time_seconds,
            };
        }

        timestamps.push_back(now);
        let count = count + 1;
        debug!("Rate limit check passed: caller={}, count={}", caller_id, count);

        Admission::Allowed {
            count,
            limit: self.limit,
            remaining: self.limit - count,
        }
    }

    /// Current quota for the caller; prunes but never records a request
    pub async fn quota(&self, caller_id: &str) -> RateLimitInfo {
        let mut windows = self.windows.lock().await;
        let now = self.clock.now_millis();
        self.prune(&mut windows, now);

        let count = windows.get(caller_id).map_or(0, VecDeque::len);
        RateLimitInfo {
            remaining: self.limit.saturating_sub(count),
            count,
            limit: self.limit,
            window_seconds: self.window_seconds(),
        }
    }

    /// Drop timestamps older than the window and callers left with none
    fn prune(&self, windows: &mut HashMap<String, VecDeque<i64>>, now: i64) {
        windows.retain(|_, timestamps| {
            while timestamps
                .front()
                .is_some_and(|&oldest| now - oldest >= self.window_ms)
            {
                timestamps.pop_front();
            }
            !timestamps.is_empty()
        });
    }
}

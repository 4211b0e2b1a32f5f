use serde::{Deserialize, Serialize};

/// Limit and window applied to every client key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitPolicy {
    pub limit: u32,
    pub window_ms: i64,
}

impl RateLimitPolicy {
    pub fn new(limit: u32, window_secs: u64) -> Self {
        Self {
            limit,
            window_ms: i64::try_from(window_secs)
                .unwrap_or(i64::MAX)
                .saturating_mul(1000),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    Allowed { remaining: u32 },
    Denied { retry_after: u64 },
}

impl RateLimitDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateLimitDecision::Allowed { .. })
    }
}

/// Fixed-window counter for one client key.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CachedRateLimit {
    pub key: String,
    pub count: u32,
    pub reset_at: i64, // unix millis
}

impl CachedRateLimit {
    pub fn open(key: &str, policy: &RateLimitPolicy, now_ms: i64) -> Self {
        Self {
            key: key.to_string(),
            count: 1,
            reset_at: now_ms.saturating_add(policy.window_ms),
        }
    }

    pub fn is_expired(&self, now_ms: i64) -> bool {
        now_ms >= self.reset_at
    }

    /// Applies one request to the record. An expired window is reopened.
    pub fn hit(&mut self, policy: &RateLimitPolicy, now_ms: i64) -> RateLimitDecision {
        if self.is_expired(now_ms) {
            *self = Self::open(&self.key, policy, now_ms);
            return RateLimitDecision::Allowed {
                remaining: policy.limit.saturating_sub(1),
            };
        }

        if self.count >= policy.limit {
            return RateLimitDecision::Denied {
                retry_after: retry_after_secs(self.reset_at - now_ms),
            };
        }

        self.count += 1;
        RateLimitDecision::Allowed {
            remaining: policy.limit - self.count,
        }
    }
}

/// Whole seconds until the window resets, rounded up. Never zero for an active window.
pub fn retry_after_secs(remaining_ms: i64) -> u64 {
    let ms = remaining_ms.max(1) as u64;
    ms.div_ceil(1000)
}

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use redis::Client as RedisClient;
use thiserror::Error;

use crate::cache::keys::rate_limit_key;
use crate::cache::models::rate_limit::{
    CachedRateLimit, RateLimitDecision, RateLimitPolicy, retry_after_secs,
};

#[derive(Debug, Error)]
pub enum RateLimitStoreError {
    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),
}

/// Backing store for fixed-window counters.
#[async_trait]
pub trait RateLimitStore: Send + Sync {
    async fn hit(
        &self,
        key: &str,
        policy: &RateLimitPolicy,
        now_ms: i64,
    ) -> Result<RateLimitDecision, RateLimitStoreError>;
}

/// Process-local store holding at most `capacity` keys.
pub struct MemoryRateLimitStore {
    records: Mutex<HashMap<String, CachedRateLimit>>,
    capacity: usize,
}

impl MemoryRateLimitStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
            capacity: capacity.max(1),
        }
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn hit_at(&self, key: &str, policy: &RateLimitPolicy, now_ms: i64) -> RateLimitDecision {
        let mut records = self.records.lock().unwrap_or_else(|e| e.into_inner());

        if let Some(record) = records.get_mut(key) {
            return record.hit(policy, now_ms);
        }

        if records.len() >= self.capacity {
            make_room(&mut records, self.capacity, now_ms);
        }
        records.insert(key.to_string(), CachedRateLimit::open(key, policy, now_ms));

        RateLimitDecision::Allowed {
            remaining: policy.limit.saturating_sub(1),
        }
    }
}

/// Drops expired records, then the soonest-expiring ones until there is room for one more.
fn make_room(records: &mut HashMap<String, CachedRateLimit>, capacity: usize, now_ms: i64) {
    records.retain(|_, record| !record.is_expired(now_ms));

    while records.len() >= capacity {
        let victim = records
            .iter()
            .min_by_key(|(_, record)| record.reset_at)
            .map(|(key, _)| key.clone());
        match victim {
            Some(key) => {
                tracing::debug!("Evicting rate limit record for {}", key);
                records.remove(&key);
            }
            None => break,
        }
    }
}

#[async_trait]
impl RateLimitStore for MemoryRateLimitStore {
    async fn hit(
        &self,
        key: &str,
        policy: &RateLimitPolicy,
        now_ms: i64,
    ) -> Result<RateLimitDecision, RateLimitStoreError> {
        Ok(self.hit_at(key, policy, now_ms))
    }
}

/// Redis-backed store shared by every instance pointing at the same server.
pub struct RedisRateLimitStore {
    redis: Arc<RedisClient>,
}

impl RedisRateLimitStore {
    pub fn new(redis: RedisClient) -> Self {
        Self {
            redis: Arc::new(redis),
        }
    }
}

#[async_trait]
impl RateLimitStore for RedisRateLimitStore {
    async fn hit(
        &self,
        key: &str,
        policy: &RateLimitPolicy,
        _now_ms: i64,
    ) -> Result<RateLimitDecision, RateLimitStoreError> {
        let mut conn = self.redis.get_multiplexed_async_connection().await?;
        let redis_key = rate_limit_key(key);

        // SET NX opens the window with its TTL; INCR keeps the TTL of an open window.
        let (count, ttl_ms): (u32, i64) = redis::pipe()
            .atomic()
            .cmd("SET")
            .arg(&redis_key)
            .arg(0)
            .arg("PX")
            .arg(policy.window_ms)
            .arg("NX")
            .ignore()
            .incr(&redis_key, 1)
            .pttl(&redis_key)
            .query_async(&mut conn)
            .await?;

        if count > policy.limit {
            let remaining_ms = if ttl_ms > 0 { ttl_ms } else { policy.window_ms };
            return Ok(RateLimitDecision::Denied {
                retry_after: retry_after_secs(remaining_ms),
            });
        }

        Ok(RateLimitDecision::Allowed {
            remaining: policy.limit - count,
        })
    }
}

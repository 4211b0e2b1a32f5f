// Rate-limit records and the stores that hold them

pub mod keys;
pub mod models;
pub mod operations;

pub use models::{CachedRateLimit, RateLimitDecision, RateLimitPolicy};
pub use operations::{MemoryRateLimitStore, RateLimitStore, RedisRateLimitStore};

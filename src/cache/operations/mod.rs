/// Store operations over cached records
pub mod rate_limit;

pub use rate_limit::{
    MemoryRateLimitStore, RateLimitStore, RateLimitStoreError, RedisRateLimitStore,
};

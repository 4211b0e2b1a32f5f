/// Cached record types
pub mod rate_limit;

pub use rate_limit::{CachedRateLimit, RateLimitDecision, RateLimitPolicy};

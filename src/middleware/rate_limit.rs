use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{HeaderMap, HeaderValue, Method, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::{
    cache::{
        MemoryRateLimitStore, RateLimitDecision, RateLimitPolicy, RateLimitStore,
        RedisRateLimitStore,
    },
    config::Config,
    error::AppError,
};

#[derive(Clone)]
pub struct RateLimiter {
    store: Arc<dyn RateLimitStore>,
    policy: RateLimitPolicy,
}

impl RateLimiter {
    pub fn new(store: Arc<dyn RateLimitStore>, policy: RateLimitPolicy) -> Self {
        Self { store, policy }
    }

    /// Redis when `REDIS_URL` is set and valid, otherwise a bounded in-process map.
    pub fn from_config(config: &Config) -> Self {
        let policy = RateLimitPolicy::new(config.rate_limit_requests, config.rate_limit_window_secs);

        if let Some(url) = &config.redis_url {
            match redis::Client::open(url.as_str()) {
                Ok(client) => {
                    tracing::info!("Rate limiting backed by Redis");
                    return Self::new(Arc::new(RedisRateLimitStore::new(client)), policy);
                }
                Err(e) => {
                    tracing::warn!("Invalid REDIS_URL, using in-memory rate limiting: {}", e);
                }
            }
        }

        tracing::info!(
            "Rate limiting in memory (max {} clients)",
            config.rate_limit_max_keys
        );
        Self::new(
            Arc::new(MemoryRateLimitStore::new(config.rate_limit_max_keys)),
            policy,
        )
    }

    pub async fn check(&self, key: &str) -> RateLimitDecision {
        self.check_at(key, chrono::Utc::now().timestamp_millis()).await
    }

    /// Never fails: a store error lets the request through.
    pub async fn check_at(&self, key: &str, now_ms: i64) -> RateLimitDecision {
        match self.store.hit(key, &self.policy, now_ms).await {
            Ok(decision) => decision,
            Err(e) => {
                tracing::warn!("Rate limit store unavailable, allowing request: {}", e);
                RateLimitDecision::Allowed {
                    remaining: self.policy.limit,
                }
            }
        }
    }

    pub async fn check_rate_limit(self: Arc<Self>, req: Request<Body>, next: Next) -> Response {
        if req.method() == Method::OPTIONS {
            return next.run(req).await;
        }

        let peer = req
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ci| ci.0);
        let key = client_key(req.headers(), peer);

        match self.check(&key).await {
            RateLimitDecision::Allowed { remaining } => {
                let mut response = next.run(req).await;
                let headers = response.headers_mut();
                headers.insert("x-ratelimit-limit", HeaderValue::from(self.policy.limit));
                headers.insert("x-ratelimit-remaining", HeaderValue::from(remaining));
                response
            }
            RateLimitDecision::Denied { retry_after } => {
                tracing::warn!("Rate limit exceeded for {} (retry in {}s)", key, retry_after);
                AppError::RateLimited { retry_after }.into_response()
            }
        }
    }
}

/// The client key trusted for limiting: `x-real-ip`, then the first `x-forwarded-for`
/// entry, then the socket peer.
pub fn client_key(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|h| h.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };

    header("x-real-ip")
        .or_else(|| {
            header("x-forwarded-for")
                .and_then(|s| s.split(',').map(str::trim).find(|ip| !ip.is_empty()))
        })
        .map(str::to_string)
        .or_else(|| peer.map(|p| p.ip().to_string()))
        .unwrap_or_else(|| "unknown".to_string())
}

pub async fn rate_limit(
    State(limiter): State<Arc<RateLimiter>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    limiter.check_rate_limit(req, next).await
}

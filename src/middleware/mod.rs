mod error_handler;
mod headers;
mod rate_limit;

pub use error_handler::log_errors;
pub use headers::{cors_layer, method_not_allowed, not_found, preflight, security_headers};
pub use rate_limit::{RateLimiter, client_key, rate_limit};

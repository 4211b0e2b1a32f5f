use std::sync::Arc;

use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::{
    AppState,
    middleware::{RateLimiter, cors_layer, log_errors, not_found, rate_limit, security_headers},
    routes::{analysis, chat, content, endpoint, planning},
};

// 内容生成路由
fn content_routes() -> Router<AppState> {
    Router::new()
        .route("/generate-titles", endpoint(content::generate_titles))
        .route("/generate-hooks", endpoint(content::generate_hooks))
        .route("/generate-hashtags", endpoint(content::generate_hashtags))
        .route("/generate-script", endpoint(content::generate_script))
        .route("/generate-description", endpoint(content::generate_description))
}

// 规划路由
fn planning_routes() -> Router<AppState> {
    Router::new()
        .route("/generate-calendar", endpoint(planning::generate_calendar))
        .route("/find-niches", endpoint(planning::find_niches))
        .route("/find-trends", endpoint(planning::find_trends))
}

// 分析与对话路由
fn analysis_routes() -> Router<AppState> {
    Router::new()
        .route("/analyze-competitor", endpoint(analysis::analyze_competitor))
        .route("/analyze-thumbnail", endpoint(analysis::analyze_thumbnail))
        .route("/chat", endpoint(chat::chat))
}

/// Builds the full application. Only matched routes count against the rate
/// limit; unknown paths fall through to a JSON 404.
pub fn create_router(state: AppState, limiter: Arc<RateLimiter>) -> Router {
    let api = Router::new()
        .merge(content_routes())
        .merge(planning_routes())
        .merge(analysis_routes())
        .route_layer(from_fn_with_state(limiter, rate_limit));

    // nest() rejects an empty or root prefix
    let base = state.config.api_base_uri.trim_matches('/');
    let router = if base.is_empty() {
        Router::new().merge(api)
    } else {
        Router::new().nest(&format!("/{base}"), api)
    };

    router
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(from_fn(security_headers))
                .layer(cors_layer())
                .layer(from_fn(log_errors)),
        )
        .with_state(state)
}

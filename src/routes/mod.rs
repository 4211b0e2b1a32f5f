use axum::{
    handler::Handler,
    routing::{MethodRouter, post},
};

use crate::{
    AppState,
    middleware::{method_not_allowed, preflight},
};

pub mod analysis;
pub mod chat;
pub mod content;
pub mod planning;

/// POST route that answers OPTIONS with an empty 200 and anything else with 405.
pub fn endpoint<H, T>(handler: H) -> MethodRouter<AppState>
where
    H: Handler<T, AppState>,
    T: 'static,
{
    post(handler)
        .options(preflight)
        .fallback(method_not_allowed)
}

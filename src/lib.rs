use std::sync::Arc;

use config::Config;
use llm::ChatCompletion;
use youtube::YoutubeClient;

pub mod cache;
pub mod config;
pub mod error;
pub mod extract;
pub mod llm;
pub mod middleware;
pub mod prompts;
pub mod router;
pub mod routes;
pub mod youtube;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub llm: Arc<dyn ChatCompletion>,
    /// Present only when `YOUTUBE_API_KEY` is configured.
    pub youtube: Option<Arc<YoutubeClient>>,
}

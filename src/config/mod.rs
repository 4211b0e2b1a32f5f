use std::env;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_GROQ_MODEL: &str = "llama-3.3-70b-versatile";
const MAX_WINDOW_SECS: u64 = (i64::MAX / 1000) as u64;

pub const DEFAULT_YOUTUBE_API_URL: &str = "https://www.googleapis.com/youtube/v3";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub api_base_uri: String,
    pub groq_api_key: Option<String>,
    pub groq_api_url: String,
    pub groq_model: String,
    pub llm_timeout_secs: u64,
    pub youtube_api_key: Option<String>,
    pub youtube_api_url: String,
    pub redis_url: Option<String>,
    pub rate_limit_window_secs: u64,
    pub rate_limit_requests: u32,
    pub rate_limit_max_keys: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server_host: "0.0.0.0".into(),
            server_port: 3000,
            api_base_uri: "/api".into(),
            groq_api_key: None,
            groq_api_url: DEFAULT_GROQ_API_URL.into(),
            groq_model: DEFAULT_GROQ_MODEL.into(),
            llm_timeout_secs: 60,
            youtube_api_key: None,
            youtube_api_url: DEFAULT_YOUTUBE_API_URL.into(),
            redis_url: None,
            rate_limit_window_secs: 60,
            rate_limit_requests: 20,
            rate_limit_max_keys: 10_000,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Config::default();

        let config = Config {
            server_host: get("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: parse_or(get("SERVER_PORT"), "SERVER_PORT", defaults.server_port)?,
            api_base_uri: get("API_BASE_URI").unwrap_or(defaults.api_base_uri),
            groq_api_key: get("GROQ_API_KEY"),
            groq_api_url: get("GROQ_API_URL").unwrap_or(defaults.groq_api_url),
            groq_model: get("GROQ_MODEL").unwrap_or(defaults.groq_model),
            llm_timeout_secs: parse_or(
                get("LLM_TIMEOUT_SECS"),
                "LLM_TIMEOUT_SECS",
                defaults.llm_timeout_secs,
            )?,
            youtube_api_key: get("YOUTUBE_API_KEY"),
            youtube_api_url: get("YOUTUBE_API_URL").unwrap_or(defaults.youtube_api_url),
            redis_url: get("REDIS_URL"),
            rate_limit_window_secs: parse_or(
                get("RATE_LIMIT_WINDOW").map(|v| v.trim_end_matches('s').to_string()),
                "RATE_LIMIT_WINDOW",
                defaults.rate_limit_window_secs,
            )?,
            rate_limit_requests: parse_or(
                get("RATE_LIMIT_REQUESTS"),
                "RATE_LIMIT_REQUESTS",
                defaults.rate_limit_requests,
            )?,
            rate_limit_max_keys: parse_or(
                get("RATE_LIMIT_MAX_KEYS"),
                "RATE_LIMIT_MAX_KEYS",
                defaults.rate_limit_max_keys,
            )?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Limiter settings every store can honor: at least one request per window,
    /// and a window whose length in millis fits an `i64`.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.rate_limit_requests == 0 {
            return Err(ConfigError::Invalid {
                key: "RATE_LIMIT_REQUESTS",
                value: self.rate_limit_requests.to_string(),
            });
        }
        if self.rate_limit_window_secs == 0 || self.rate_limit_window_secs > MAX_WINDOW_SECS {
            return Err(ConfigError::Invalid {
                key: "RATE_LIMIT_WINDOW",
                value: self.rate_limit_window_secs.to_string(),
            });
        }
        Ok(())
    }

    pub fn llm_timeout(&self) -> Duration {
        Duration::from_secs(self.llm_timeout_secs)
    }
}

fn parse_or<T: std::str::FromStr>(
    raw: Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}

/// Application configuration module
use crate::errors::{ApiError, ApiResult};
use std::env;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_base_url: String,
    pub page_size: usize,
    pub http_timeout: Duration,
    pub tick_rate: Duration,
    pub log_file: String,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> ApiResult<Self> {
        dotenvy::dotenv().ok();

        let api_base_url = env::var("SPACEX_API_URL")
            .unwrap_or_else(|_| "https://api.spacexdata.com".to_string())
            .trim_end_matches('/')
            .to_string();

        if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
            return Err(ApiError::Config(format!(
                "SPACEX_API_URL must be an http(s) URL, got {api_base_url:?}"
            )));
        }

        let page_size = env_u64("PAGE_SIZE", 10).max(1) as usize;

        Ok(Self {
            api_base_url,
            page_size,
            http_timeout: Duration::from_secs(env_u64("HTTP_TIMEOUT_SECONDS", 30)),
            tick_rate: Duration::from_millis(env_u64("TICK_MILLIS", 250).max(10)),
            log_file: env::var("LOG_FILE").unwrap_or_else(|_| "fleet_board.log".to_string()),
        })
    }
}

fn env_u64(key: &str, default: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

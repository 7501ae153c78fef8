use reqwest::Client;
use std::time::Duration;
use swipeflix_config::HttpConfig;

/// Shared HTTP client; the timeout here is the only deadline any fetch has.
pub fn create_http_client(config: &HttpConfig) -> Client {
    Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_seconds))
        .build()
        .unwrap_or_else(|_| Client::new())
}

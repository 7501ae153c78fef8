use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use swipeflix_config::HttpConfig;
use swipeflix_models::{NewsItem, NewsSource};
use tracing::trace;

use crate::error::SourceError;
use crate::http::create_http_client;
use crate::rss::parser::parse_feed;
use crate::traits::FeedSource;

/// Fetches syndication feeds over HTTP.
#[derive(Clone)]
pub struct RssClient {
    client: Arc<Client>,
}

impl RssClient {
    pub fn new(http: &HttpConfig) -> Self {
        Self {
            client: Arc::new(create_http_client(http)),
        }
    }
}

#[async_trait]
impl FeedSource for RssClient {
    fn source_name(&self) -> &str {
        "rss"
    }

    async fn fetch_feed(&self, source: &NewsSource) -> Result<Vec<NewsItem>, SourceError> {
        trace!("GET {}", source.feed_url);
        let response = self
            .client
            .get(&source.feed_url)
            .header("Accept", "application/rss+xml, application/atom+xml, application/xml, text/xml")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        parse_feed(source, &bytes)
    }
}

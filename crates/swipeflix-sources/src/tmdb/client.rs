use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use swipeflix_config::{HttpConfig, TmdbConfig};
use swipeflix_models::{ContentItem, Details, Logo, MediaKind, SearchResult, Video};

use crate::error::SourceError;
use crate::http::create_http_client;
use crate::tmdb::api::{self, ApiContext};
use crate::traits::{CatalogSource, ListEndpoint};

#[derive(Clone)]
pub struct TmdbClient {
    client: Arc<Client>,
    api_key: String,
    base_url: String,
    language: String,
}

impl TmdbClient {
    pub fn new(api_key: String, tmdb: &TmdbConfig, http: &HttpConfig) -> Result<Self, SourceError> {
        Self::with_client(Arc::new(create_http_client(http)), api_key, tmdb)
    }

    /// Build on an existing HTTP client (shared connection pool).
    pub fn with_client(client: Arc<Client>, api_key: String, tmdb: &TmdbConfig) -> Result<Self, SourceError> {
        if api_key.trim().is_empty() {
            return Err(SourceError::Config("TMDB API key is empty".to_string()));
        }
        Ok(Self {
            client,
            api_key,
            base_url: tmdb.base_url.clone(),
            language: tmdb.language.clone(),
        })
    }

    fn ctx(&self) -> ApiContext<'_> {
        ApiContext {
            client: &self.client,
            base_url: &self.base_url,
            api_key: &self.api_key,
            language: &self.language,
        }
    }
}

#[async_trait]
impl CatalogSource for TmdbClient {
    fn source_name(&self) -> &str {
        "tmdb"
    }

    async fn list_page(&self, endpoint: &ListEndpoint, page: u32) -> Result<Vec<ContentItem>, SourceError> {
        let ctx = self.ctx();
        let path = endpoint.path();
        match endpoint.kind() {
            MediaKind::Movie => {
                let movies = api::get_movie_page(&ctx, &path, page, endpoint.genre_id()).await?;
                Ok(movies.into_iter().map(ContentItem::Movie).collect())
            }
            MediaKind::Show => {
                let shows = api::get_show_page(&ctx, &path, page, endpoint.genre_id()).await?;
                Ok(shows.into_iter().map(ContentItem::Show).collect())
            }
        }
    }

    async fn search(&self, kind: MediaKind, query: &str) -> Result<Vec<ContentItem>, SourceError> {
        let ctx = self.ctx();
        let results: Vec<SearchResult> = match kind {
            MediaKind::Movie => api::search_movies(&ctx, query)
                .await?
                .into_iter()
                .map(SearchResult::from)
                .collect(),
            MediaKind::Show => api::search_shows(&ctx, query)
                .await?
                .into_iter()
                .map(SearchResult::from)
                .collect(),
        };
        Ok(results.into_iter().map(ContentItem::Search).collect())
    }

    async fn details(&self, kind: MediaKind, id: u64) -> Result<Details, SourceError> {
        api::get_details(&self.ctx(), kind.path_segment(), id).await
    }

    async fn videos(&self, kind: MediaKind, id: u64) -> Result<Vec<Video>, SourceError> {
        api::get_videos(&self.ctx(), kind.path_segment(), id).await
    }

    async fn logos(&self, kind: MediaKind, id: u64) -> Result<Vec<Logo>, SourceError> {
        api::get_logos(&self.ctx(), kind.path_segment(), id).await
    }
}

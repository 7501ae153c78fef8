use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use swipeflix_models::{
    ContentItem, Details, Logo, MediaKind, Movie, NewsItem, NewsSource, SearchResult, TvShow, Video,
};
use swipeflix_sources::{CatalogSource, FeedSource, ListEndpoint, SourceError};

pub fn movie(id: u64) -> Movie {
    Movie {
        id,
        title: format!("Movie {}", id),
        overview: String::new(),
        poster_path: Some(format!("/m{}.jpg", id)),
        release_date: Some("2020-01-01".to_string()),
        vote_average: Some(7.0),
        genre_ids: vec![28],
    }
}

pub fn show(id: u64) -> TvShow {
    TvShow {
        id,
        name: format!("Show {}", id),
        overview: String::new(),
        poster_path: None,
        first_air_date: Some("2019-05-01".to_string()),
        vote_average: None,
        genre_ids: vec![],
    }
}

pub fn movies(ids: &[u64]) -> Vec<ContentItem> {
    ids.iter().map(|&id| ContentItem::Movie(movie(id))).collect()
}

pub fn news(title: &str, source: &str, day: Option<u32>) -> NewsItem {
    NewsItem {
        title: title.to_string(),
        description: String::new(),
        image_url: None,
        source: source.to_string(),
        published_at: day.map(|d| Utc.with_ymd_and_hms(2024, 3, d, 12, 0, 0).unwrap()),
        link: None,
    }
}

type Canned = Result<Vec<ContentItem>, String>;

/// In-memory catalog. Unregistered pages fail with a transport error.
#[derive(Default)]
pub struct FakeCatalog {
    pages: HashMap<(ListEndpoint, u32), (Canned, u64)>,
    searches: HashMap<MediaKind, Canned>,
    videos: Vec<Video>,
    pub requests: AtomicUsize,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, endpoint: ListEndpoint, page: u32, items: Vec<ContentItem>) -> Self {
        self.pages.insert((endpoint, page), (Ok(items), 0));
        self
    }

    /// Page that resolves after `delay_ms`.
    pub fn slow_page(mut self, endpoint: ListEndpoint, page: u32, items: Vec<ContentItem>, delay_ms: u64) -> Self {
        self.pages.insert((endpoint, page), (Ok(items), delay_ms));
        self
    }

    pub fn failing_page(mut self, endpoint: ListEndpoint, page: u32) -> Self {
        self.pages
            .insert((endpoint, page), (Err("connection reset".to_string()), 0));
        self
    }

    pub fn search_results(mut self, kind: MediaKind, items: Vec<ContentItem>) -> Self {
        self.searches.insert(kind, Ok(items));
        self
    }

    pub fn failing_search(mut self, kind: MediaKind) -> Self {
        self.searches.insert(kind, Err("timeout".to_string()));
        self
    }

    pub fn videos(mut self, videos: Vec<Video>) -> Self {
        self.videos = videos;
        self
    }

    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogSource for FakeCatalog {
    fn source_name(&self) -> &str {
        "fake"
    }

    async fn list_page(&self, endpoint: &ListEndpoint, page: u32) -> Result<Vec<ContentItem>, SourceError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        match self.pages.get(&(*endpoint, page)) {
            Some((outcome, delay_ms)) => {
                if *delay_ms > 0 {
                    tokio::time::sleep(Duration::from_millis(*delay_ms)).await;
                }
                outcome.clone().map_err(SourceError::Transport)
            }
            None => Err(SourceError::Transport(format!("no page {} for {}", page, endpoint.path()))),
        }
    }

    async fn search(&self, kind: MediaKind, _query: &str) -> Result<Vec<ContentItem>, SourceError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        match self.searches.get(&kind) {
            Some(outcome) => outcome.clone().map_err(SourceError::Transport),
            None => Ok(Vec::new()),
        }
    }

    async fn details(&self, _kind: MediaKind, _id: u64) -> Result<Details, SourceError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        Ok(Details::default())
    }

    async fn videos(&self, _kind: MediaKind, _id: u64) -> Result<Vec<Video>, SourceError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        Ok(self.videos.clone())
    }

    async fn logos(&self, _kind: MediaKind, _id: u64) -> Result<Vec<Logo>, SourceError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        Ok(vec![
            Logo { file_path: "/first.png".to_string(), iso_639_1: Some("en".to_string()) },
            Logo { file_path: "/second.png".to_string(), iso_639_1: None },
        ])
    }
}

pub fn search_hit(item: Movie) -> ContentItem {
    ContentItem::Search(SearchResult::from(item))
}

/// Feeds keyed by source name; unknown names fail.
#[derive(Default)]
pub struct FakeFeeds {
    feeds: HashMap<String, Vec<NewsItem>>,
    pub fetched: Mutex<Vec<String>>,
}

impl FakeFeeds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feed(mut self, name: &str, items: Vec<NewsItem>) -> Self {
        self.feeds.insert(name.to_string(), items);
        self
    }

    pub fn fetched_names(&self) -> Vec<String> {
        let mut names = self.fetched.lock().unwrap().clone();
        names.sort();
        names
    }
}

#[async_trait]
impl FeedSource for FakeFeeds {
    fn source_name(&self) -> &str {
        "fake-rss"
    }

    async fn fetch_feed(&self, source: &NewsSource) -> Result<Vec<NewsItem>, SourceError> {
        self.fetched.lock().unwrap().push(source.name.clone());
        self.feeds
            .get(&source.name)
            .cloned()
            .ok_or_else(|| SourceError::Decode(format!("{} is not a feed", source.name)))
    }
}

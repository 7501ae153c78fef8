use serde::{Deserialize, Serialize};

use crate::content_id::ContentId;
use crate::movie::Movie;
use crate::news::NewsItem;
use crate::search::{SearchHit, SearchResult};
use crate::show::TvShow;

/// Placeholder card for an advertisement in a swipe feed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct AdSlot {
    pub slot: u32,
}

/// Anything that can appear in a result list or swipe stack.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "item", rename_all = "snake_case")]
pub enum ContentItem {
    Movie(Movie),
    Show(TvShow),
    News(NewsItem),
    Search(SearchResult),
    Ad(AdSlot),
}

impl ContentItem {
    pub fn id(&self) -> ContentId {
        match self {
            ContentItem::Movie(m) => m.content_id(),
            ContentItem::Show(s) => s.content_id(),
            ContentItem::News(n) => n.content_id(),
            ContentItem::Search(r) => r.content_id(),
            ContentItem::Ad(ad) => ContentId::Ad(ad.slot),
        }
    }

    pub fn title(&self) -> &str {
        match self {
            ContentItem::Movie(m) => &m.title,
            ContentItem::Show(s) => &s.name,
            ContentItem::News(n) => &n.title,
            ContentItem::Search(r) => r.title(),
            ContentItem::Ad(_) => "Advertisement",
        }
    }

    pub fn synopsis(&self) -> &str {
        match self {
            ContentItem::Movie(m) => &m.overview,
            ContentItem::Show(s) => &s.overview,
            ContentItem::News(n) => &n.description,
            ContentItem::Search(r) => r.overview(),
            ContentItem::Ad(_) => "",
        }
    }

    pub fn image_url(&self) -> Option<String> {
        match self {
            ContentItem::Movie(m) => m.poster_url(),
            ContentItem::Show(s) => s.poster_url(),
            ContentItem::News(n) => n.image_url.clone(),
            ContentItem::Search(r) => r.image_url(),
            ContentItem::Ad(_) => None,
        }
    }

    pub fn rating(&self) -> Option<f64> {
        match self {
            ContentItem::Movie(m) => m.vote_average,
            ContentItem::Show(s) => s.vote_average,
            ContentItem::Search(r) => r.rating(),
            ContentItem::News(_) | ContentItem::Ad(_) => None,
        }
    }

    pub fn release_year(&self) -> Option<String> {
        match self {
            ContentItem::Movie(m) => m.release_year(),
            ContentItem::Show(s) => s.release_year(),
            ContentItem::Search(r) => r.year(),
            ContentItem::News(n) => n.published_at.map(|dt| dt.format("%Y").to_string()),
            ContentItem::Ad(_) => None,
        }
    }

    pub fn genres(&self) -> Vec<&'static str> {
        match self {
            ContentItem::Movie(m) => m.genres(),
            ContentItem::Show(s) => s.genres(),
            ContentItem::Search(SearchResult { hit: SearchHit::Movie(m) }) => m.genres(),
            ContentItem::Search(SearchResult { hit: SearchHit::Show(s) }) => s.genres(),
            ContentItem::News(_) | ContentItem::Ad(_) => Vec::new(),
        }
    }

    pub fn is_ad(&self) -> bool {
        matches!(self, ContentItem::Ad(_))
    }
}

impl From<Movie> for ContentItem {
    fn from(movie: Movie) -> Self {
        ContentItem::Movie(movie)
    }
}

impl From<TvShow> for ContentItem {
    fn from(show: TvShow) -> Self {
        ContentItem::Show(show)
    }
}

impl From<NewsItem> for ContentItem {
    fn from(item: NewsItem) -> Self {
        ContentItem::News(item)
    }
}

impl From<SearchResult> for ContentItem {
    fn from(result: SearchResult) -> Self {
        ContentItem::Search(result)
    }
}

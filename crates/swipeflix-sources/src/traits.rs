use async_trait::async_trait;
use swipeflix_models::{
    genre_name, ContentItem, Details, Logo, MediaKind, MovieCategory, NewsItem, NewsSource,
    ShowCategory, Video,
};

use crate::error::SourceError;

/// A paginated list endpoint of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListEndpoint {
    Movies(MovieCategory),
    Shows(ShowCategory),
    DiscoverMovies { genre_id: u32 },
    DiscoverShows { genre_id: u32 },
}

impl ListEndpoint {
    pub fn kind(&self) -> MediaKind {
        match self {
            ListEndpoint::Movies(_) | ListEndpoint::DiscoverMovies { .. } => MediaKind::Movie,
            ListEndpoint::Shows(_) | ListEndpoint::DiscoverShows { .. } => MediaKind::Show,
        }
    }

    /// Path relative to the API base, e.g. `/movie/top_rated` or `/discover/tv`.
    pub fn path(&self) -> String {
        match self {
            ListEndpoint::Movies(category) => format!("/movie/{}", category.as_path()),
            ListEndpoint::Shows(category) => format!("/tv/{}", category.as_path()),
            ListEndpoint::DiscoverMovies { .. } => "/discover/movie".to_string(),
            ListEndpoint::DiscoverShows { .. } => "/discover/tv".to_string(),
        }
    }

    pub fn genre_id(&self) -> Option<u32> {
        match self {
            ListEndpoint::DiscoverMovies { genre_id } | ListEndpoint::DiscoverShows { genre_id } => {
                Some(*genre_id)
            }
            _ => None,
        }
    }

    /// Human-readable name: the category or genre label.
    pub fn label(&self) -> String {
        match self {
            ListEndpoint::Movies(category) => category.display_name().to_string(),
            ListEndpoint::Shows(category) => category.display_name().to_string(),
            ListEndpoint::DiscoverMovies { genre_id } | ListEndpoint::DiscoverShows { genre_id } => {
                genre_name(self.kind(), *genre_id)
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("genre {}", genre_id))
            }
        }
    }
}

/// Movie/TV metadata provider.
///
/// List and search calls return fully-typed [`ContentItem`]s: `Movie`/`Show`
/// for lists, `Search` for search hits.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    fn source_name(&self) -> &str;

    async fn list_page(&self, endpoint: &ListEndpoint, page: u32) -> Result<Vec<ContentItem>, SourceError>;
    async fn search(&self, kind: MediaKind, query: &str) -> Result<Vec<ContentItem>, SourceError>;

    async fn details(&self, kind: MediaKind, id: u64) -> Result<Details, SourceError>;
    async fn videos(&self, kind: MediaKind, id: u64) -> Result<Vec<Video>, SourceError>;
    async fn logos(&self, kind: MediaKind, id: u64) -> Result<Vec<Logo>, SourceError>;
}

/// Syndication feed reader (RSS / Atom).
#[async_trait]
pub trait FeedSource: Send + Sync {
    fn source_name(&self) -> &str;

    async fn fetch_feed(&self, source: &NewsSource) -> Result<Vec<NewsItem>, SourceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_paths() {
        assert_eq!(ListEndpoint::Movies(MovieCategory::NowPlaying).path(), "/movie/now_playing");
        assert_eq!(ListEndpoint::Shows(ShowCategory::Popular).path(), "/tv/popular");
        assert_eq!(ListEndpoint::DiscoverShows { genre_id: 37 }.path(), "/discover/tv");
        assert_eq!(ListEndpoint::DiscoverShows { genre_id: 37 }.label(), "Western");
        assert_eq!(ListEndpoint::DiscoverMovies { genre_id: 1 }.label(), "genre 1");
        assert_eq!(ListEndpoint::Movies(MovieCategory::TopRated).genre_id(), None);
    }
}

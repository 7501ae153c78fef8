use futures::future::join;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use swipeflix_models::{
    ContentItem, Details, Logo, MediaKind, MovieCategory, ShowCategory, Video, MOVIE_GENRES,
    TV_GENRES,
};
use swipeflix_sources::tmdb::select_trailer;
use swipeflix_sources::{CatalogSource, ListEndpoint, SourceError};
use tracing::{debug, info, warn};

use crate::fanout::{fan_out, fetch_pages, Branch, FanOutReport};
use crate::merge::{dedup_by_id, merge_batches, MergeOrder};
use crate::options::FetchOptions;

/// A merged list plus how many of its requests failed.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Listing {
    pub items: Vec<ContentItem>,
    pub requested: usize,
    pub failed: usize,
}

impl Listing {
    pub(crate) fn from_report(report: FanOutReport<ContentItem>, order: MergeOrder) -> Self {
        let requested = report.requested();
        let failed = report.failed;
        Self {
            items: merge_batches(report.batches, order),
            requested,
            failed,
        }
    }

    /// Every request failed, so the empty list says nothing about the catalog.
    pub fn is_total_failure(&self) -> bool {
        self.requested > 0 && self.failed == self.requested
    }
}

/// Rows of the explore screen. A genre whose request failed has no entry.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExploreRows {
    pub top_rated_movies: Vec<ContentItem>,
    pub movie_genres: BTreeMap<String, Vec<ContentItem>>,
    pub top_rated_shows: Vec<ContentItem>,
    pub show_genres: BTreeMap<String, Vec<ContentItem>>,
    pub failed: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchResults {
    pub movies: Vec<ContentItem>,
    pub shows: Vec<ContentItem>,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.movies.is_empty() && self.shows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.movies.len() + self.shows.len()
    }
}

/// Movie/TV browsing on top of a [`CatalogSource`].
#[derive(Clone)]
pub struct Catalog {
    source: Arc<dyn CatalogSource>,
    options: FetchOptions,
}

impl Catalog {
    pub fn new(source: Arc<dyn CatalogSource>, options: FetchOptions) -> Self {
        Self { source, options }
    }

    pub fn options(&self) -> &FetchOptions {
        &self.options
    }

    pub async fn movies(&self, category: MovieCategory, options: &FetchOptions) -> Listing {
        self.list(ListEndpoint::Movies(category), options).await
    }

    pub async fn shows(&self, category: ShowCategory, options: &FetchOptions) -> Listing {
        self.list(ListEndpoint::Shows(category), options).await
    }

    async fn list(&self, endpoint: ListEndpoint, options: &FetchOptions) -> Listing {
        let report = fetch_pages(self.source.as_ref(), endpoint, options.page_range()).await;
        let listing = Listing::from_report(report, options.list_order());
        info!(
            "{} {}: {} unique items ({} of {} requests failed)",
            endpoint.kind(),
            endpoint.label(),
            listing.items.len(),
            listing.failed,
            listing.requested
        );
        listing
    }

    /// Top-rated plus one row per genre, for both movies and shows.
    pub async fn explore(&self) -> ExploreRows {
        let movie_endpoints = std::iter::once(ListEndpoint::Movies(MovieCategory::TopRated)).chain(
            MOVIE_GENRES
                .iter()
                .map(|(id, _)| ListEndpoint::DiscoverMovies { genre_id: *id }),
        );
        let show_endpoints = std::iter::once(ListEndpoint::Shows(ShowCategory::TopRated)).chain(
            TV_GENRES
                .iter()
                .map(|(id, _)| ListEndpoint::DiscoverShows { genre_id: *id }),
        );

        let (movie_report, show_report) =
            join(self.first_pages(movie_endpoints), self.first_pages(show_endpoints)).await;

        let mut rows = ExploreRows {
            failed: movie_report.failed + show_report.failed,
            ..ExploreRows::default()
        };
        let top_label = MovieCategory::TopRated.display_name();

        for batch in movie_report.batches.into_iter().filter(|b| b.is_ok()) {
            let label = batch.label.clone();
            let items = dedup_by_id(batch.into_items());
            if label == top_label {
                rows.top_rated_movies = items;
            } else {
                rows.movie_genres.insert(label, items);
            }
        }
        for batch in show_report.batches.into_iter().filter(|b| b.is_ok()) {
            let label = batch.label.clone();
            let items = dedup_by_id(batch.into_items());
            if label == ShowCategory::TopRated.display_name() {
                rows.top_rated_shows = items;
            } else {
                rows.show_genres.insert(label, items);
            }
        }

        info!(
            "Explore: {} movie genres, {} show genres ({} requests failed)",
            rows.movie_genres.len(),
            rows.show_genres.len(),
            rows.failed
        );
        rows
    }

    async fn first_pages<I>(&self, endpoints: I) -> FanOutReport<ContentItem>
    where
        I: IntoIterator<Item = ListEndpoint>,
    {
        let source = self.source.as_ref();
        fan_out(endpoints.into_iter().map(|endpoint| {
            Branch::new(endpoint.label(), Some(1), async move {
                source.list_page(&endpoint, 1).await
            })
        }))
        .await
    }

    /// Movie and TV search in parallel. A blank query sends nothing.
    pub async fn search(&self, query: &str) -> SearchResults {
        let query = query.trim();
        if query.is_empty() {
            debug!("Blank search query, skipping request");
            return SearchResults::default();
        }

        let (movies, shows) = join(
            self.source.search(MediaKind::Movie, query),
            self.source.search(MediaKind::Show, query),
        )
        .await;

        SearchResults {
            movies: search_branch(MediaKind::Movie, query, movies),
            shows: search_branch(MediaKind::Show, query, shows),
        }
    }

    pub async fn details(&self, kind: MediaKind, id: u64) -> Result<Details, SourceError> {
        self.source.details(kind, id).await
    }

    pub async fn trailer(&self, kind: MediaKind, id: u64) -> Result<Option<Video>, SourceError> {
        let videos = self.source.videos(kind, id).await?;
        Ok(select_trailer(&videos).cloned())
    }

    pub async fn logo(&self, kind: MediaKind, id: u64) -> Result<Option<Logo>, SourceError> {
        let logos = self.source.logos(kind, id).await?;
        Ok(logos.into_iter().next())
    }
}

fn search_branch(
    kind: MediaKind,
    query: &str,
    outcome: Result<Vec<ContentItem>, SourceError>,
) -> Vec<ContentItem> {
    match outcome {
        Ok(items) => {
            debug!("{} search '{}' returned {} hits", kind, query, items.len());
            dedup_by_id(items)
        }
        Err(e) => {
            warn!("{} search '{}' failed: {}", kind, query, e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{movie, movies, search_hit, show, FakeCatalog};
    use swipeflix_models::ContentId;

    fn catalog(source: FakeCatalog) -> (Catalog, Arc<FakeCatalog>) {
        let source = Arc::new(source);
        (Catalog::new(source.clone(), FetchOptions::default()), source)
    }

    fn ids(items: &[ContentItem]) -> Vec<ContentId> {
        items.iter().map(|i| i.id()).collect()
    }

    #[tokio::test]
    async fn test_movies_merge_overlapping_pages() {
        let top = ListEndpoint::Movies(MovieCategory::TopRated);
        let (catalog, source) = catalog(
            FakeCatalog::new()
                .page(top, 1, movies(&[1, 2, 3]))
                .page(top, 2, movies(&[3, 4, 5]))
                .failing_page(top, 3),
        );

        let listing = catalog.movies(MovieCategory::TopRated, catalog.options()).await;

        assert_eq!(source.request_count(), 3);
        assert_eq!(listing.failed, 1);
        assert!(!listing.is_total_failure());
        let mut got = ids(&listing.items);
        got.sort();
        assert_eq!(got, (1..=5).map(ContentId::Movie).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_unshuffled_pages_keep_page_order() {
        let popular = ListEndpoint::Shows(ShowCategory::Popular);
        let (catalog, _) = catalog(
            FakeCatalog::new()
                .slow_page(popular, 1, vec![ContentItem::Show(show(1))], 30)
                .page(popular, 2, vec![ContentItem::Show(show(2)), ContentItem::Show(show(1))]),
        );

        let options = FetchOptions::default().with_pages(2).with_shuffle(false);
        let listing = catalog.shows(ShowCategory::Popular, &options).await;

        // arrival order: page 2 first, duplicate of show 1 kept from page 2
        assert_eq!(ids(&listing.items), vec![ContentId::Show(2), ContentId::Show(1)]);
    }

    #[tokio::test]
    async fn test_all_pages_failing() {
        let (catalog, _) = catalog(FakeCatalog::new());
        let listing = catalog.movies(MovieCategory::Popular, catalog.options()).await;
        assert!(listing.items.is_empty());
        assert!(listing.is_total_failure());
    }

    #[tokio::test]
    async fn test_explore_rows() {
        let (catalog, source) = catalog(
            FakeCatalog::new()
                .page(ListEndpoint::Movies(MovieCategory::TopRated), 1, movies(&[1, 2]))
                .page(ListEndpoint::DiscoverMovies { genre_id: 28 }, 1, movies(&[3]))
                .page(ListEndpoint::DiscoverMovies { genre_id: 16 }, 1, movies(&[4]))
                .page(ListEndpoint::DiscoverShows { genre_id: 16 }, 1, vec![ContentItem::Show(show(5))]),
        );

        let rows = catalog.explore().await;

        assert_eq!(source.request_count(), 1 + 14 + 1 + 16);
        assert_eq!(ids(&rows.top_rated_movies), vec![ContentId::Movie(1), ContentId::Movie(2)]);
        assert_eq!(rows.movie_genres.keys().collect::<Vec<_>>(), vec!["Action", "Animation"]);
        assert_eq!(rows.show_genres.keys().collect::<Vec<_>>(), vec!["Animation"]);
        assert!(rows.top_rated_shows.is_empty());
        assert_eq!(rows.failed, 14 - 2 + 1 + 16 - 1);
    }

    #[tokio::test]
    async fn test_blank_search_sends_nothing() {
        let (catalog, source) = catalog(FakeCatalog::new());
        assert!(catalog.search("   ").await.is_empty());
        assert!(catalog.search("").await.is_empty());
        assert_eq!(source.request_count(), 0);
    }

    #[tokio::test]
    async fn test_search_one_kind_failing() {
        let (catalog, source) = catalog(
            FakeCatalog::new()
                .search_results(MediaKind::Movie, vec![search_hit(movie(9)), search_hit(movie(8))])
                .failing_search(MediaKind::Show),
        );

        let results = catalog.search(" matrix ").await;
        assert_eq!(source.request_count(), 2);
        assert_eq!(ids(&results.movies), vec![ContentId::Movie(9), ContentId::Movie(8)]);
        assert!(results.shows.is_empty());
        assert_eq!(results.len(), 2);
    }

    #[tokio::test]
    async fn test_trailer_and_logo_selection() {
        let video = |site: &str, kind: &str, key: &str| Video {
            id: key.to_string(),
            key: key.to_string(),
            name: String::new(),
            site: site.to_string(),
            video_type: kind.to_string(),
        };
        let (catalog, _) = catalog(FakeCatalog::new().videos(vec![
            video("YouTube", "Featurette", "a"),
            video("Vimeo", "Trailer", "b"),
            video("YouTube", "trailer", "c"),
        ]));

        let trailer = catalog.trailer(MediaKind::Movie, 1).await.unwrap();
        assert_eq!(trailer.map(|v| v.key), Some("c".to_string()));

        let logo = catalog.logo(MediaKind::Show, 1).await.unwrap();
        assert_eq!(logo.map(|l| l.file_path), Some("/first.png".to_string()));
    }
}

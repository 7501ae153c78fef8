use std::sync::Arc;
use swipeflix_models::{ContentItem, NewsSource};
use swipeflix_sources::FeedSource;
use tracing::{debug, info};

use crate::catalog::Listing;
use crate::fanout::{fan_out, Branch};
use crate::merge::MergeOrder;
use crate::storage::{load_record, save_record, RecordStorage};

pub const ACTIVE_SOURCES_RECORD: &str = "activeNewsSources";

/// Aggregated headlines from the configured feeds.
#[derive(Clone)]
pub struct NewsDesk {
    source: Arc<dyn FeedSource>,
    sources: Vec<NewsSource>,
}

impl NewsDesk {
    /// `sources` are the enabled feeds in configuration order.
    pub fn new(source: Arc<dyn FeedSource>, sources: Vec<NewsSource>) -> Self {
        Self { source, sources }
    }

    pub fn sources(&self) -> &[NewsSource] {
        &self.sources
    }

    /// Feeds to fetch for an `active` name filter.
    ///
    /// An empty filter, or one naming no known feed, selects every feed.
    pub fn select_sources(&self, active: &[String]) -> Vec<NewsSource> {
        if active.is_empty() {
            return self.sources.clone();
        }

        let selected: Vec<NewsSource> = self
            .sources
            .iter()
            .filter(|s| active.iter().any(|name| name.eq_ignore_ascii_case(&s.name)))
            .cloned()
            .collect();

        if selected.is_empty() {
            debug!("Filter {:?} matches no configured feed, using all", active);
            self.sources.clone()
        } else {
            selected
        }
    }

    /// Fetch the selected feeds concurrently, dedup and sort newest first.
    pub async fn fetch(&self, active: &[String]) -> Listing {
        let selected = self.select_sources(active);
        let source = self.source.as_ref();

        let report = fan_out(selected.iter().map(|feed| {
            Branch::new(feed.name.clone(), None, async move {
                source
                    .fetch_feed(feed)
                    .await
                    .map(|items| items.into_iter().map(ContentItem::News).collect::<Vec<_>>())
            })
        }))
        .await;

        let listing = Listing::from_report(report, MergeOrder::NewestFirst);
        info!(
            "News: {} headlines from {} feeds ({} failed)",
            listing.items.len(),
            listing.requested,
            listing.failed
        );
        listing
    }
}

/// The saved feed choice, persisted on every change.
///
/// Empty means every configured feed. Saved names that no longer match a
/// configured feed are dropped on load.
pub struct SourceSelection {
    active: Vec<String>,
    storage: Box<dyn RecordStorage>,
}

impl SourceSelection {
    pub fn load(storage: Box<dyn RecordStorage>, known: &[NewsSource]) -> Self {
        let saved: Vec<String> = load_record(storage.as_ref(), ACTIVE_SOURCES_RECORD);
        let (active, unknown) = match_names(&saved, known);
        let selection = Self { active, storage };
        if !unknown.is_empty() {
            info!("Dropping saved news sources no longer configured: {:?}", unknown);
            selection.persist();
        }
        debug!("Active news sources: {:?}", selection.active);
        selection
    }

    pub fn active(&self) -> &[String] {
        &self.active
    }

    pub fn is_all(&self) -> bool {
        self.active.is_empty()
    }

    /// Save the configured feeds among `names`, in configuration spelling.
    ///
    /// Returns the names matching no feed. When none match, the selection is
    /// left unchanged.
    pub fn set(&mut self, names: &[String], known: &[NewsSource]) -> Vec<String> {
        let (active, unknown) = match_names(names, known);
        if active.is_empty() {
            return unknown;
        }
        self.active = active;
        self.persist();
        unknown
    }

    /// Back to every configured feed.
    pub fn reset(&mut self) {
        self.active.clear();
        self.persist();
    }

    fn persist(&self) {
        save_record(self.storage.as_ref(), ACTIVE_SOURCES_RECORD, &self.active);
    }
}

/// Split `names` into known feed names (deduplicated) and unknown ones.
fn match_names(names: &[String], known: &[NewsSource]) -> (Vec<String>, Vec<String>) {
    let mut active: Vec<String> = Vec::new();
    let mut unknown = Vec::new();
    for name in names {
        match known.iter().find(|s| s.name.eq_ignore_ascii_case(name.trim())) {
            Some(source) if !active.contains(&source.name) => active.push(source.name.clone()),
            Some(_) => {}
            None => unknown.push(name.clone()),
        }
    }
    (active, unknown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use crate::testing::{news, FakeFeeds};

    fn desk(feeds: FakeFeeds) -> (NewsDesk, Arc<FakeFeeds>) {
        let feeds = Arc::new(feeds);
        let sources = ["FirstShowing", "Slashfilm", "Collider"]
            .iter()
            .map(|name| NewsSource::new(*name, format!("https://{}.example/feed", name)))
            .collect();
        (NewsDesk::new(feeds.clone(), sources), feeds)
    }

    fn names(sources: &[NewsSource]) -> Vec<&str> {
        sources.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn test_source_selection() {
        let (desk, _) = desk(FakeFeeds::new());
        assert_eq!(names(&desk.select_sources(&[])).len(), 3);
        assert_eq!(
            names(&desk.select_sources(&["collider".to_string(), "Nope".to_string()])),
            vec!["Collider"]
        );
        assert_eq!(names(&desk.select_sources(&["Nope".to_string()])).len(), 3);
    }

    #[tokio::test]
    async fn test_dedup_and_newest_first() {
        let (desk, feeds) = desk(
            FakeFeeds::new()
                .feed(
                    "FirstShowing",
                    vec![news("Trailer", "FirstShowing", Some(3)), news("Casting", "FirstShowing", Some(1))],
                )
                .feed(
                    "Slashfilm",
                    vec![
                        news("Trailer", "Slashfilm", Some(3)),
                        news("Trailer", "Slashfilm", Some(5)),
                        news("Undated", "Slashfilm", None),
                    ],
                ),
        );

        let listing = desk.fetch(&[]).await;

        assert_eq!(feeds.fetched_names(), vec!["Collider", "FirstShowing", "Slashfilm"]);
        assert_eq!(listing.failed, 1);
        let titles: Vec<(&str, Option<u32>)> = listing
            .items
            .iter()
            .map(|item| match item {
                ContentItem::News(n) => (n.title.as_str(), n.published_at.map(|d| chrono::Datelike::day(&d))),
                _ => panic!("expected news"),
            })
            .collect();
        assert_eq!(
            titles,
            vec![("Trailer", Some(5)), ("Trailer", Some(3)), ("Casting", Some(1)), ("Undated", None)]
        );
    }

    #[tokio::test]
    async fn test_filter_limits_fetches() {
        let (desk, feeds) = desk(FakeFeeds::new().feed("Slashfilm", vec![news("A", "Slashfilm", Some(2))]));
        let listing = desk.fetch(&["Slashfilm".to_string()]).await;
        assert_eq!(feeds.fetched_names(), vec!["Slashfilm"]);
        assert_eq!(listing.items.len(), 1);
        assert_eq!(listing.failed, 0);
    }

    fn known() -> Vec<NewsSource> {
        ["FirstShowing", "Slashfilm", "Collider"]
            .iter()
            .map(|name| NewsSource::new(*name, format!("https://{}.example/feed", name)))
            .collect()
    }

    fn saved(storage: &MemoryStorage) -> Vec<String> {
        storage
            .raw(ACTIVE_SOURCES_RECORD)
            .map(|bytes| serde_json::from_slice(&bytes).unwrap())
            .unwrap_or_default()
    }

    #[test]
    fn test_unknown_saved_sources_dropped_on_load() {
        let storage = Arc::new(
            MemoryStorage::new()
                .with_record(ACTIVE_SOURCES_RECORD, r#"["Slashfilm","Variety","Collider"]"#),
        );
        let selection = SourceSelection::load(Box::new(storage.clone()), &known());

        assert_eq!(selection.active(), ["Slashfilm", "Collider"]);
        assert_eq!(saved(&storage), vec!["Slashfilm", "Collider"]);
    }

    #[test]
    fn test_all_saved_sources_unknown_means_every_feed() {
        let storage = MemoryStorage::new().with_record(ACTIVE_SOURCES_RECORD, r#"["Variety"]"#);
        let selection = SourceSelection::load(Box::new(storage), &known());
        assert!(selection.is_all());
    }

    #[test]
    fn test_corrupt_selection_loads_as_all() {
        let storage = MemoryStorage::new().with_record(ACTIVE_SOURCES_RECORD, "{not json");
        assert!(SourceSelection::load(Box::new(storage), &known()).is_all());
    }

    #[test]
    fn test_set_and_reset_persist() {
        let storage = Arc::new(MemoryStorage::new());
        let mut selection = SourceSelection::load(Box::new(storage.clone()), &known());
        assert!(selection.is_all());

        let unknown = selection.set(
            &["collider".to_string(), "Nope".to_string(), "Collider".to_string()],
            &known(),
        );
        assert_eq!(unknown, vec!["Nope"]);
        assert_eq!(selection.active(), ["Collider"]);
        assert_eq!(saved(&storage), vec!["Collider"]);

        let reloaded = SourceSelection::load(Box::new(storage.clone()), &known());
        assert_eq!(reloaded.active(), ["Collider"]);

        let unknown = selection.set(&["Nope".to_string()], &known());
        assert_eq!(unknown, vec!["Nope"]);
        assert_eq!(selection.active(), ["Collider"]);

        selection.reset();
        assert!(selection.is_all());
        assert!(saved(&storage).is_empty());
    }
}

pub mod catalog;
pub mod fanout;
pub mod merge;
pub mod news;
pub mod options;
pub mod sink;
pub mod storage;
pub mod swipe;
pub mod watchlist;

#[cfg(test)]
pub(crate) mod testing;

pub use catalog::{Catalog, ExploreRows, Listing, SearchResults};
pub use fanout::{fan_out, fetch_pages, Branch, FanOutReport};
pub use merge::{dedup_by_id, interleave_ads, merge_batches, MergeOrder};
pub use news::{NewsDesk, SourceSelection, ACTIVE_SOURCES_RECORD};
pub use options::FetchOptions;
pub use sink::{FeedController, FetchTicket, ResultSink, SinkSnapshot};
pub use storage::{FileStorage, MemoryStorage, RecordStorage, StorageError};
pub use swipe::{Decision, SwipeDeck, SwipeOutcome};
pub use watchlist::{WatchlistStore, MOVIES_RECORD, SHOWS_RECORD};

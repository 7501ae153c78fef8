use std::ops::RangeInclusive;
use swipeflix_config::FeedConfig;
use swipeflix_models::{MovieCategory, ShowCategory};

use crate::merge::MergeOrder;

/// Per-request knobs for list fetches and swipe decks.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchOptions {
    pub pages: u32,
    pub shuffle: bool,
    pub ads_removed: bool,
    pub ad_frequency: usize,
    pub stack_depth: usize,
    pub movie_category: MovieCategory,
    pub show_category: ShowCategory,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self::from(&FeedConfig::default())
    }
}

impl From<&FeedConfig> for FetchOptions {
    fn from(config: &FeedConfig) -> Self {
        Self {
            pages: config.pages,
            shuffle: config.shuffle,
            ads_removed: config.ads_removed,
            ad_frequency: config.ad_frequency,
            stack_depth: config.stack_depth,
            movie_category: config.movie_category,
            show_category: config.show_category,
        }
    }
}

impl FetchOptions {
    /// Pages `1..=pages`; at least one page is always requested.
    pub fn page_range(&self) -> RangeInclusive<u32> {
        1..=self.pages.max(1)
    }

    pub fn list_order(&self) -> MergeOrder {
        if self.shuffle {
            MergeOrder::Shuffle
        } else {
            MergeOrder::Preserve
        }
    }

    pub fn with_pages(mut self, pages: u32) -> Self {
        self.pages = pages;
        self
    }

    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    pub fn with_ads_removed(mut self, ads_removed: bool) -> Self {
        self.ads_removed = ads_removed;
        self
    }
}

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;
use swipeflix_models::{AdSlot, ContentItem, FetchBatch};

/// Presentation order applied after deduplication.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOrder {
    Shuffle,
    NewestFirst,
    Preserve,
}

/// Remove items whose identity was already seen; the first occurrence wins.
pub fn dedup_by_id<I>(items: I) -> Vec<ContentItem>
where
    I: IntoIterator<Item = ContentItem>,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.id()))
        .collect()
}

/// Combine a completed fan-out group into one list.
pub fn merge_batches(batches: Vec<FetchBatch<ContentItem>>, order: MergeOrder) -> Vec<ContentItem> {
    merge_batches_with_rng(batches, order, &mut rand::thread_rng())
}

pub fn merge_batches_with_rng<R: Rng + ?Sized>(
    batches: Vec<FetchBatch<ContentItem>>,
    order: MergeOrder,
    rng: &mut R,
) -> Vec<ContentItem> {
    let items = batches.into_iter().flat_map(FetchBatch::into_items);
    let mut merged = dedup_by_id(items);
    apply_order(&mut merged, order, rng);
    merged
}

pub fn apply_order<R: Rng + ?Sized>(items: &mut [ContentItem], order: MergeOrder, rng: &mut R) {
    match order {
        MergeOrder::Shuffle => items.shuffle(rng),
        MergeOrder::NewestFirst => sort_newest_first(items),
        MergeOrder::Preserve => {}
    }
}

/// Stable sort by publish date descending; undated items go last.
pub fn sort_newest_first(items: &mut [ContentItem]) {
    items.sort_by(|a, b| published_at(b).cmp(&published_at(a)));
}

fn published_at(item: &ContentItem) -> Option<DateTime<Utc>> {
    match item {
        ContentItem::News(news) => news.published_at,
        _ => None,
    }
}

/// Insert an ad before every real item at index `i > 0` with `i % frequency == 0`.
///
/// A frequency of zero or `ads_removed` returns the items untouched.
pub fn interleave_ads(items: Vec<ContentItem>, frequency: usize, ads_removed: bool) -> Vec<ContentItem> {
    if ads_removed || frequency == 0 {
        return items;
    }

    let mut out = Vec::with_capacity(items.len() + items.len() / frequency);
    let mut slot = 0u32;
    for (index, item) in items.into_iter().enumerate() {
        if index > 0 && index % frequency == 0 {
            out.push(ContentItem::Ad(AdSlot { slot }));
            slot += 1;
        }
        out.push(item);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{movie, movies, news, show};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use swipeflix_models::{BatchFailure, ContentId};

    fn ids(items: &[ContentItem]) -> Vec<ContentId> {
        items.iter().map(|i| i.id()).collect()
    }

    #[test]
    fn test_overlapping_pages_with_failure() {
        let batches = vec![
            FetchBatch::ok("Top Rated", Some(1), movies(&[1, 2, 3])),
            FetchBatch::ok("Top Rated", Some(2), movies(&[3, 4, 5])),
            FetchBatch::failed("Top Rated", Some(3), BatchFailure::Transport("reset".to_string())),
        ];

        let merged = merge_batches(batches, MergeOrder::Preserve);
        assert_eq!(
            ids(&merged),
            (1..=5).map(ContentId::Movie).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_first_seen_wins() {
        let mut renamed = movie(2);
        renamed.title = "Renamed".to_string();
        let items = vec![
            ContentItem::Movie(movie(2)),
            ContentItem::Show(show(2)),
            ContentItem::Movie(renamed),
        ];

        let deduped = dedup_by_id(items);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].title(), "Movie 2");
        assert_eq!(deduped[1].id(), ContentId::Show(2));
    }

    #[test]
    fn test_shuffle_preserves_membership() {
        let batches = vec![
            FetchBatch::ok("p1", Some(1), movies(&[1, 2, 3, 4, 5, 6])),
            FetchBatch::ok("p2", Some(2), movies(&[4, 5, 6, 7, 8, 9, 10])),
        ];
        let mut rng = StdRng::seed_from_u64(7);
        let merged = merge_batches_with_rng(batches, MergeOrder::Shuffle, &mut rng);

        let mut got = ids(&merged);
        got.sort();
        assert_eq!(got, (1..=10).map(ContentId::Movie).collect::<Vec<_>>());
    }

    #[test]
    fn test_newest_first_puts_undated_last() {
        let items = vec![
            ContentItem::News(news("undated", "Collider", None)),
            ContentItem::News(news("old", "Collider", Some(1))),
            ContentItem::News(news("new", "Slashfilm", Some(9))),
            ContentItem::News(news("mid", "Collider", Some(4))),
        ];
        let merged = merge_batches(vec![FetchBatch::ok("all", None, items)], MergeOrder::NewestFirst);
        let titles: Vec<&str> = merged.iter().map(|i| i.title()).collect();
        assert_eq!(titles, vec!["new", "mid", "old", "undated"]);
    }

    #[test]
    fn test_interleave_every_third() {
        let out = interleave_ads(movies(&[0, 1, 2, 3, 4, 5, 6]), 3, false);
        let expected = vec![
            ContentId::Movie(0),
            ContentId::Movie(1),
            ContentId::Movie(2),
            ContentId::Ad(0),
            ContentId::Movie(3),
            ContentId::Movie(4),
            ContentId::Movie(5),
            ContentId::Ad(1),
            ContentId::Movie(6),
        ];
        assert_eq!(ids(&out), expected);
    }

    #[test]
    fn test_interleave_disabled() {
        let items = movies(&[0, 1, 2, 3, 4, 5, 6]);
        let removed = interleave_ads(items.clone(), 3, true);
        assert!(removed.iter().all(|i| !i.is_ad()));
        assert_eq!(removed.len(), 7);

        let zero = interleave_ads(items, 0, false);
        assert_eq!(zero.len(), 7);
    }

    #[test]
    fn test_interleave_short_lists() {
        assert!(interleave_ads(Vec::new(), 3, false).is_empty());
        // no ad after the final item
        assert_eq!(interleave_ads(movies(&[0, 1, 2]), 3, false).len(), 3);
        assert_eq!(
            ids(&interleave_ads(movies(&[0, 1]), 1, false)),
            vec![ContentId::Movie(0), ContentId::Ad(0), ContentId::Movie(1)]
        );
    }
}

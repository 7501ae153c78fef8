use std::future::Future;
use swipeflix_models::ContentItem;
use tracing::debug;

use crate::merge::interleave_ads;
use crate::options::FetchOptions;
use crate::sink::{FeedController, FetchTicket};
use crate::watchlist::WatchlistStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Swipe right: save to the watchlist
    Like,
    /// Swipe left: discard
    Pass,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwipeOutcome {
    pub card: ContentItem,
    /// The card was newly added to the watchlist
    pub saved: bool,
}

/// A card stack consumed from the front, with likes saved to the watchlist.
pub struct SwipeDeck {
    controller: FeedController,
    watchlist: WatchlistStore,
    options: FetchOptions,
}

impl SwipeDeck {
    pub fn new(watchlist: WatchlistStore, options: FetchOptions) -> Self {
        Self {
            controller: FeedController::new(),
            watchlist,
            options,
        }
    }

    /// Call before fetching the items for a new stack. Any load started
    /// earlier and still in flight becomes stale.
    pub fn begin_load(&self) -> FetchTicket {
        self.controller.begin_fetch()
    }

    /// Replace the stack with `items`, with ad cards interleaved.
    ///
    /// Returns the number of cards in the new stack, or `None` when a newer
    /// load began after `ticket` and the items were discarded.
    pub async fn load(&self, ticket: FetchTicket, items: Vec<ContentItem>) -> Option<usize> {
        let cards = interleave_ads(items, self.options.ad_frequency, self.options.ads_removed);
        let count = cards.len();
        if self.controller.complete(ticket, cards).await {
            Some(count)
        } else {
            None
        }
    }

    /// Begin a load, await `fetch`, then load its items.
    pub async fn refresh<F>(&self, fetch: F) -> Option<usize>
    where
        F: Future<Output = Vec<ContentItem>>,
    {
        let ticket = self.begin_load();
        let items = fetch.await;
        self.load(ticket, items).await
    }

    /// Consume the front card. `None` once the stack is empty.
    pub async fn swipe(&mut self, decision: Decision) -> Option<SwipeOutcome> {
        let card = self.controller.pop_front().await?;
        let saved = match decision {
            Decision::Like if !card.is_ad() => self.watchlist.add(&card),
            _ => false,
        };
        debug!("{:?} on {} (saved: {})", decision, card.id(), saved);
        Some(SwipeOutcome { card, saved })
    }

    /// Cards currently rendered on the stack, front first.
    pub async fn visible(&self) -> Vec<ContentItem> {
        self.controller.peek_prefix(self.options.stack_depth).await
    }

    pub async fn remaining(&self) -> usize {
        self.controller.len().await
    }

    pub fn watchlist(&self) -> &WatchlistStore {
        &self.watchlist
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use crate::testing::movies;
    use std::time::Duration;
    use swipeflix_models::ContentId;

    fn deck(options: FetchOptions) -> SwipeDeck {
        SwipeDeck::new(WatchlistStore::load(Box::new(MemoryStorage::new())), options)
    }

    #[tokio::test]
    async fn test_like_saves_and_ads_are_skipped() {
        let mut deck = deck(FetchOptions::default());
        assert_eq!(deck.refresh(async { movies(&[1, 2, 3, 4]) }).await, Some(5));

        let visible: Vec<ContentId> = deck.visible().await.iter().map(|c| c.id()).collect();
        assert_eq!(
            visible,
            vec![
                ContentId::Movie(1),
                ContentId::Movie(2),
                ContentId::Movie(3),
                ContentId::Ad(0),
                ContentId::Movie(4)
            ]
        );

        let first = deck.swipe(Decision::Like).await.unwrap();
        assert!(first.saved);
        let second = deck.swipe(Decision::Pass).await.unwrap();
        assert!(!second.saved);
        let third = deck.swipe(Decision::Like).await.unwrap();
        assert_eq!(third.card.id(), ContentId::Movie(3));
        let ad = deck.swipe(Decision::Like).await.unwrap();
        assert!(ad.card.is_ad());
        assert!(!ad.saved);

        assert_eq!(deck.remaining().await, 1);
        assert_eq!(deck.watchlist().movies().len(), 2);
        assert!(!deck.watchlist().contains_id(&ContentId::Movie(2)));
    }

    #[tokio::test]
    async fn test_empty_deck_and_relike() {
        let mut deck = deck(FetchOptions::default().with_ads_removed(true));
        assert!(deck.swipe(Decision::Like).await.is_none());

        deck.refresh(async { movies(&[1]) }).await;
        assert!(deck.swipe(Decision::Like).await.unwrap().saved);
        deck.refresh(async { movies(&[1]) }).await;
        assert!(!deck.swipe(Decision::Like).await.unwrap().saved);
        assert!(deck.swipe(Decision::Pass).await.is_none());
    }

    #[tokio::test]
    async fn test_visible_respects_stack_depth() {
        let mut options = FetchOptions::default().with_ads_removed(true);
        options.stack_depth = 2;
        let deck = deck(options);
        deck.refresh(async { movies(&[1, 2, 3]) }).await;
        assert_eq!(deck.visible().await.len(), 2);
    }

    fn visible_ids(cards: Vec<ContentItem>) -> Vec<ContentId> {
        cards.iter().map(|c| c.id()).collect()
    }

    #[tokio::test]
    async fn test_slow_earlier_load_loses_to_later_one() {
        let deck = deck(FetchOptions::default().with_ads_removed(true));

        let slow = async {
            let ticket = deck.begin_load();
            tokio::time::sleep(Duration::from_millis(50)).await;
            deck.load(ticket, movies(&[100, 101])).await
        };
        let fast = async {
            tokio::time::sleep(Duration::from_millis(5)).await;
            deck.refresh(async { movies(&[1, 2]) }).await
        };
        let (slow, fast) = tokio::join!(slow, fast);

        assert_eq!(fast, Some(2));
        assert_eq!(slow, None);
        assert_eq!(
            visible_ids(deck.visible().await),
            vec![ContentId::Movie(1), ContentId::Movie(2)]
        );
    }

    #[tokio::test]
    async fn test_load_with_outdated_ticket_is_discarded() {
        let deck = deck(FetchOptions::default().with_ads_removed(true));
        let first = deck.begin_load();
        let second = deck.begin_load();

        assert_eq!(deck.load(second, movies(&[7])).await, Some(1));
        assert_eq!(deck.load(first, movies(&[8, 9])).await, None);
        assert_eq!(visible_ids(deck.visible().await), vec![ContentId::Movie(7)]);
    }
}

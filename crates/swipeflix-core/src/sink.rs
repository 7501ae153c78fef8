use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use swipeflix_models::ContentItem;
use tokio::sync::{watch, Mutex};
use tracing::{debug, info};

/// What observers see after each mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SinkSnapshot {
    /// Bumped on every mutation
    pub revision: u64,
    pub len: usize,
    /// Fetch generation that produced the current contents
    pub generation: u64,
}

/// Ordered, observable collection a screen binds to. Front is the next card.
#[derive(Debug)]
pub struct ResultSink {
    items: VecDeque<ContentItem>,
    revision: u64,
    generation: u64,
    notify: watch::Sender<SinkSnapshot>,
}

impl Default for ResultSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultSink {
    pub fn new() -> Self {
        let (notify, _) = watch::channel(SinkSnapshot::default());
        Self {
            items: VecDeque::new(),
            revision: 0,
            generation: 0,
            notify,
        }
    }

    /// Swap the whole collection.
    pub fn replace(&mut self, items: Vec<ContentItem>) {
        self.items = VecDeque::from(items);
        self.publish();
    }

    fn replace_for_generation(&mut self, items: Vec<ContentItem>, generation: u64) {
        self.generation = generation;
        self.replace(items);
    }

    pub fn pop_front(&mut self) -> Option<ContentItem> {
        let item = self.items.pop_front()?;
        self.publish();
        Some(item)
    }

    /// Up to `n` items from the front, without consuming them.
    pub fn peek_prefix(&self, n: usize) -> Vec<ContentItem> {
        self.items.iter().take(n).cloned().collect()
    }

    pub fn front(&self) -> Option<&ContentItem> {
        self.items.front()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn subscribe(&self) -> watch::Receiver<SinkSnapshot> {
        self.notify.subscribe()
    }

    pub fn snapshot(&self) -> SinkSnapshot {
        SinkSnapshot {
            revision: self.revision,
            len: self.items.len(),
            generation: self.generation,
        }
    }

    fn publish(&mut self) {
        self.revision += 1;
        self.notify.send_replace(self.snapshot());
    }
}

/// Proof that a fetch was started; completing with an outdated ticket is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
}

impl FetchTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Sole owner of a [`ResultSink`]. All mutations go through its mutex.
#[derive(Debug, Clone, Default)]
pub struct FeedController {
    sink: Arc<Mutex<ResultSink>>,
    generation: Arc<AtomicU64>,
}

impl FeedController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fetch, superseding any fetch still in flight.
    pub fn begin_fetch(&self) -> FetchTicket {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        debug!("Fetch generation {} started", generation);
        FetchTicket { generation }
    }

    pub fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Replace the sink with `items` if `ticket` is still current.
    ///
    /// Returns `false` when a newer fetch has started since.
    pub async fn complete(&self, ticket: FetchTicket, items: Vec<ContentItem>) -> bool {
        let mut sink = self.sink.lock().await;
        let current = self.current_generation();
        if ticket.generation != current {
            info!(
                "Discarding stale fetch (generation {} superseded by {})",
                ticket.generation, current
            );
            return false;
        }
        sink.replace_for_generation(items, ticket.generation);
        true
    }

    pub async fn pop_front(&self) -> Option<ContentItem> {
        self.sink.lock().await.pop_front()
    }

    pub async fn peek_prefix(&self, n: usize) -> Vec<ContentItem> {
        self.sink.lock().await.peek_prefix(n)
    }

    pub async fn len(&self) -> usize {
        self.sink.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sink.lock().await.is_empty()
    }

    pub async fn subscribe(&self) -> watch::Receiver<SinkSnapshot> {
        self.sink.lock().await.subscribe()
    }
}

use futures::stream::{FuturesUnordered, StreamExt};
use std::future::Future;
use std::ops::RangeInclusive;
use std::time::Instant;
use swipeflix_models::{ContentItem, FetchBatch};
use swipeflix_sources::{CatalogSource, ListEndpoint, SourceError};
use tracing::{debug, info, warn};

/// One outbound request of a fan-out group.
pub struct Branch<F> {
    pub label: String,
    pub page: Option<u32>,
    pub request: F,
}

impl<F> Branch<F> {
    pub fn new(label: impl Into<String>, page: Option<u32>, request: F) -> Self {
        Self {
            label: label.into(),
            page,
            request,
        }
    }
}

/// Every batch of a completed group, in arrival order.
#[derive(Debug)]
pub struct FanOutReport<T> {
    pub batches: Vec<FetchBatch<T>>,
    pub failed: usize,
}

impl<T> FanOutReport<T> {
    pub fn requested(&self) -> usize {
        self.batches.len()
    }

    pub fn succeeded(&self) -> usize {
        self.batches.len() - self.failed
    }

    pub fn all_failed(&self) -> bool {
        !self.batches.is_empty() && self.failed == self.batches.len()
    }

    /// Items of all successful batches concatenated in arrival order.
    pub fn into_items(self) -> Vec<T> {
        self.batches.into_iter().flat_map(FetchBatch::into_items).collect()
    }
}

/// Run every branch concurrently and wait for all of them to settle.
///
/// A failing branch becomes a failed [`FetchBatch`] and never fails the group.
pub async fn fan_out<T, F, I>(branches: I) -> FanOutReport<T>
where
    I: IntoIterator<Item = Branch<F>>,
    F: Future<Output = Result<Vec<T>, SourceError>>,
{
    let start = Instant::now();
    let mut pending: FuturesUnordered<_> = branches
        .into_iter()
        .map(|branch| async move {
            let Branch { label, page, request } = branch;
            match request.await {
                Ok(items) => {
                    debug!("Branch '{}' (page {:?}) returned {} items", label, page, items.len());
                    FetchBatch::ok(label, page, items)
                }
                Err(e) => {
                    warn!("Branch '{}' (page {:?}) failed: {}", label, page, e);
                    FetchBatch::failed(label, page, e.to_batch_failure())
                }
            }
        })
        .collect();

    let mut batches = Vec::with_capacity(pending.len());
    let mut failed = 0;
    while let Some(batch) = pending.next().await {
        if !batch.is_ok() {
            failed += 1;
        }
        batches.push(batch);
    }

    info!(
        "Fan-out complete: {}/{} branches succeeded in {:?}",
        batches.len() - failed,
        batches.len(),
        start.elapsed()
    );

    FanOutReport { batches, failed }
}

/// Fetch `pages` of one list endpoint concurrently.
pub async fn fetch_pages(
    source: &dyn CatalogSource,
    endpoint: ListEndpoint,
    pages: RangeInclusive<u32>,
) -> FanOutReport<ContentItem> {
    let label = endpoint.label();
    debug!("Fetching {} pages {:?} from {}", label, pages, source.source_name());
    fan_out(pages.map(|page| {
        Branch::new(label.clone(), Some(page), async move {
            source.list_page(&endpoint, page).await
        })
    }))
    .await
}

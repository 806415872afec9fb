use std::future::Future;
use std::time::Duration;

use log::debug;

/// Runs work over fixed-size batches with a pause between consecutive
/// batches to honor upstream rate limits. Batches execute strictly
/// sequentially; no pause follows the last one.
#[derive(Debug, Clone, Copy)]
pub struct PacedBatches {
    batch_size: usize,
    delay: Duration,
}

impl PacedBatches {
    pub fn new(batch_size: usize, delay: Duration) -> Self {
        assert!(batch_size > 0, "batch size must be positive");

        Self { batch_size, delay }
    }

    /// Number of batches needed for `total` items
    pub fn batch_count(&self, total: usize) -> usize {
        total.div_ceil(self.batch_size)
    }

    /// Feeds `items` to `fetch` one batch at a time, collecting whatever
    /// each batch yields. The pacing delay sits between batches only.
    pub async fn run<T, R, F, Fut>(&self, items: &[T], mut fetch: F) -> Vec<R>
    where
        T: Clone,
        F: FnMut(Vec<T>) -> Fut,
        Fut: Future<Output = Vec<R>>,
    {
        let total = self.batch_count(items.len());
        let mut collected = Vec::new();

        for (index, chunk) in items.chunks(self.batch_size).enumerate() {
            debug!("Running batch {}/{} ({} items)", index + 1, total, chunk.len());
            collected.extend(fetch(chunk.to_vec()).await);

            if index + 1 < total {
                tokio::time::sleep(self.delay).await;
            }
        }

        collected
    }
}

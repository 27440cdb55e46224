// Copyright 2025 Pageflow (https://github.com/pageflow-rs/pageflow)
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Incremental record fetching.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use parking_lot::RwLock;
use tokio::sync::Mutex;
use tracing::{debug, info};

use pageflow_core::{PageflowError, PagerConfig, Record, Result};

use crate::source::{RecordSource, SourceError};

/// Stateful incremental puller over a lazy record source.
///
/// The buffer is append-only: it is never reordered or truncated in place,
/// and pipeline stages work on snapshot copies of it. Once the source is
/// exhausted the fetcher stays exhausted; further fetch calls are cheap
/// no-ops.
///
/// **Concurrency.** The source sits behind a `tokio::sync::Mutex`, so
/// concurrent `fetch_more` calls on one fetcher are serialized. That is
/// mutual exclusion, not deduplication: each serialized call still performs
/// its own independent batch pull. The buffer's own lock is held only per
/// append or per snapshot; a snapshot taken while a fetch is mid-batch will
/// observe a partial batch. Callers that need a complete batch in view must
/// sequence reads after fetches themselves.
pub struct Fetcher<T> {
    batch_size: usize,
    source: Mutex<Box<dyn RecordSource<T>>>,
    records: RwLock<Vec<Record<T>>>,
    alive: AtomicBool,
    average_page_size: AtomicUsize,
}

impl<T> Fetcher<T> {
    /// Create a fetcher pulling `batch_size` records per `fetch_more` call.
    ///
    /// A `batch_size` of 0 is treated as 1; a zero-record batch could never
    /// observe exhaustion and `fetch_all` would not terminate.
    pub fn new(batch_size: usize, source: impl RecordSource<T> + 'static) -> Self {
        Self {
            batch_size: batch_size.max(1),
            source: Mutex::new(Box::new(source)),
            records: RwLock::new(Vec::new()),
            alive: AtomicBool::new(true),
            average_page_size: AtomicUsize::new(0),
        }
    }

    /// Create a fetcher using the batch size from `config`.
    pub fn from_config(config: &PagerConfig, source: impl RecordSource<T> + 'static) -> Self {
        Self::new(config.batch_size, source)
    }

    /// Pull one batch from the source and append it to the buffer.
    ///
    /// End-of-sequence and a reentrant advance ([`SourceError::Busy`]) both
    /// mark the fetcher permanently exhausted and return `Ok(())`;
    /// exhaustion is normal termination, not failure. Any other source error
    /// propagates and leaves `alive` untouched: the source is not presumed
    /// dead.
    pub async fn fetch_more(&self) -> Result<()> {
        if !self.alive.load(Ordering::Acquire) {
            return Ok(());
        }

        let mut source = self.source.lock().await;
        for pulled in 0..self.batch_size {
            match source.next_record().await {
                Ok(Some(record)) => self.records.write().push(record),
                Ok(None) => {
                    self.mark_exhausted("end of sequence");
                    return Ok(());
                }
                Err(SourceError::Busy) => {
                    self.mark_exhausted("reentrant advance");
                    return Ok(());
                }
                Err(SourceError::Other(cause)) => {
                    debug!(pulled, "source failed mid-batch");
                    return Err(PageflowError::Source(cause));
                }
            }
        }
        debug!(pulled = self.batch_size, total = self.len(), "batch complete");
        Ok(())
    }

    /// Fetch until the source is exhausted. A no-op after exhaustion.
    pub async fn fetch_all(&self) -> Result<()> {
        while self.alive.load(Ordering::Acquire) {
            self.fetch_more().await?;
        }
        Ok(())
    }

    /// Estimated number of pages the buffer would currently fill, based on
    /// the rolling average page size. `None` until a page book has been
    /// built.
    pub fn fetched_pages(&self) -> Option<usize> {
        let average = self.average_page_size()?;
        Some(self.len().div_ceil(average))
    }

    /// Whether the source has been exhausted.
    pub fn all_fetched(&self) -> bool {
        !self.alive.load(Ordering::Acquire)
    }

    /// Snapshot copy of the buffer.
    ///
    /// Taken under the buffer lock, so the copy itself is consistent; but a
    /// snapshot taken while a fetch is in flight may contain a partial
    /// batch. Sequence reads after fetches when that matters.
    pub fn records(&self) -> Vec<Record<T>>
    where
        T: Clone,
    {
        self.records.read().clone()
    }

    /// Number of records fetched so far.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Whether nothing has been fetched yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current average-page-size forecast. `None` until the first non-empty
    /// page book feeds one back.
    pub fn average_page_size(&self) -> Option<usize> {
        match self.average_page_size.load(Ordering::Acquire) {
            0 => None,
            n => Some(n),
        }
    }

    // Storing 0 resets the forecast to "unknown"; that happens when a book
    // averages less than one record per page.
    pub(crate) fn store_average_page_size(&self, average: usize) {
        self.average_page_size.store(average, Ordering::Release);
    }

    fn mark_exhausted(&self, reason: &str) {
        if self.alive.swap(false, Ordering::AcqRel) {
            info!(reason, records = self.len(), "record source exhausted");
        }
    }
}

impl<T> std::fmt::Debug for Fetcher<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fetcher")
            .field("batch_size", &self.batch_size)
            .field("records", &self.len())
            .field("alive", &!self.all_fetched())
            .field("average_page_size", &self.average_page_size())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::IterSource;
    use std::sync::Arc;

    fn numbered(upto: i64) -> impl Iterator<Item = Record<i64>> + Send {
        (1..=upto).map(|i| Record::new(i.to_string(), 2, i))
    }

    struct FailingSource {
        yielded: i64,
        fail_after: i64,
    }

    #[async_trait::async_trait]
    impl RecordSource<i64> for FailingSource {
        async fn next_record(&mut self) -> std::result::Result<Option<Record<i64>>, SourceError> {
            if self.yielded >= self.fail_after {
                return Err(SourceError::Other("backend went away".into()));
            }
            self.yielded += 1;
            Ok(Some(Record::new(
                self.yielded.to_string(),
                2,
                self.yielded,
            )))
        }
    }

    struct BusySource;

    #[async_trait::async_trait]
    impl RecordSource<i64> for BusySource {
        async fn next_record(&mut self) -> std::result::Result<Option<Record<i64>>, SourceError> {
            Err(SourceError::Busy)
        }
    }

    #[tokio::test]
    async fn fetch_more_pulls_exactly_one_batch() {
        let fetcher = Fetcher::new(100, IterSource::new(numbered(250)));
        fetcher.fetch_more().await.unwrap();
        assert_eq!(fetcher.len(), 100);
        assert!(!fetcher.all_fetched());

        fetcher.fetch_more().await.unwrap();
        assert_eq!(fetcher.len(), 200);
    }

    #[tokio::test]
    async fn short_final_batch_marks_exhaustion() {
        let fetcher = Fetcher::new(100, IterSource::new(numbered(250)));
        for _ in 0..3 {
            fetcher.fetch_more().await.unwrap();
        }
        assert_eq!(fetcher.len(), 250);
        assert!(fetcher.all_fetched());
    }

    #[tokio::test]
    async fn fetch_after_exhaustion_is_a_no_op() {
        let fetcher = Fetcher::new(10, IterSource::new(numbered(5)));
        fetcher.fetch_more().await.unwrap();
        assert!(fetcher.all_fetched());
        assert_eq!(fetcher.len(), 5);

        fetcher.fetch_more().await.unwrap();
        fetcher.fetch_all().await.unwrap();
        assert_eq!(fetcher.len(), 5);
        assert!(fetcher.all_fetched());
    }

    #[tokio::test]
    async fn fetch_all_drains_the_source() {
        let fetcher = Fetcher::new(32, IterSource::new(numbered(1000)));
        fetcher.fetch_all().await.unwrap();
        assert_eq!(fetcher.len(), 1000);
        assert!(fetcher.all_fetched());
        let metas: Vec<i64> = fetcher.records().iter().map(|r| r.meta).collect();
        assert_eq!(metas[0], 1);
        assert_eq!(metas[999], 1000);
    }

    #[tokio::test]
    async fn busy_source_counts_as_exhaustion() {
        let fetcher = Fetcher::new(10, BusySource);
        fetcher.fetch_more().await.unwrap();
        assert!(fetcher.all_fetched());
        assert!(fetcher.is_empty());
    }

    #[tokio::test]
    async fn fatal_source_error_propagates_and_keeps_alive() {
        let fetcher = Fetcher::new(10, FailingSource {
            yielded: 0,
            fail_after: 3,
        });
        let err = fetcher.fetch_more().await.unwrap_err();
        assert!(matches!(err, PageflowError::Source(_)));
        // The three records pulled before the failure stay in the buffer,
        // and the fetcher is not presumed exhausted.
        assert_eq!(fetcher.len(), 3);
        assert!(!fetcher.all_fetched());
    }

    #[tokio::test]
    async fn concurrent_fetches_serialize_without_coalescing() {
        let fetcher = Arc::new(Fetcher::new(100, IterSource::new(numbered(500))));
        let (a, b) = tokio::join!(fetcher.fetch_more(), fetcher.fetch_more());
        a.unwrap();
        b.unwrap();
        // Two callers, two independent batch pulls.
        assert_eq!(fetcher.len(), 200);
    }

    #[tokio::test]
    async fn zero_batch_size_is_clamped() {
        let fetcher = Fetcher::new(0, IterSource::new(numbered(2)));
        fetcher.fetch_all().await.unwrap();
        assert_eq!(fetcher.len(), 2);
        assert!(fetcher.all_fetched());
    }

    #[tokio::test]
    async fn fetched_pages_needs_a_forecast() {
        let fetcher = Fetcher::new(10, IterSource::new(numbered(95)));
        fetcher.fetch_all().await.unwrap();
        assert_eq!(fetcher.fetched_pages(), None);

        fetcher.store_average_page_size(10);
        assert_eq!(fetcher.fetched_pages(), Some(10));

        fetcher.store_average_page_size(7);
        assert_eq!(fetcher.fetched_pages(), Some(14));
    }
}

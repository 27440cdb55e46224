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

//! Record-to-page orchestration.

use std::sync::Arc;

use tracing::debug;

use pageflow_core::{Page, PageBook, QualityFlag, Result, ANY_ORDERING};

use crate::builder::PageBuilder;
use crate::fetcher::Fetcher;
use crate::filter::filter_by_quality;
use crate::settings::PagerSettings;

/// Orchestrator of the record-to-page pipeline.
///
/// Runs filter → optional ordering → chunking → page building over a
/// snapshot of its fetcher's buffer, then feeds the resulting average page
/// size back into the fetcher's forecast. The fetcher is shared: growing the
/// buffer between builds is the caller's move.
pub struct RecordManager<T> {
    fetcher: Arc<Fetcher<T>>,
    settings: PagerSettings<T>,
}

impl<T> RecordManager<T>
where
    T: Clone + Send + Sync,
{
    pub fn new(fetcher: Arc<Fetcher<T>>, settings: PagerSettings<T>) -> Self {
        Self { fetcher, settings }
    }

    /// The fetcher this manager builds from.
    pub fn fetcher(&self) -> &Arc<Fetcher<T>> {
        &self.fetcher
    }

    /// Build the page book for one filter/ordering request against the
    /// current buffer snapshot.
    ///
    /// `asked_ordering` other than [`ANY_ORDERING`] is offered to the
    /// builder's `order_by`; the unsupported marker leaves the filtered
    /// order untouched. The book may come back empty; callers typically
    /// answer that with [`Self::get_empty_page`].
    pub async fn build_page_book<Q>(
        &self,
        asked_quality: u32,
        asked_ordering: u32,
        builder: &dyn PageBuilder<T>,
    ) -> Result<PageBook>
    where
        Q: QualityFlag,
    {
        let snapshot = self.fetcher.records();
        let mut filtered = filter_by_quality::<T, Q>(&snapshot, asked_quality);

        if asked_ordering != ANY_ORDERING {
            if let Some(ordered) = builder.order_by(&filtered, asked_ordering).await {
                filtered = ordered;
            }
        }

        let filtered_count = filtered.len();
        let chunks = self.settings.page_sizer.split(filtered);
        let mut book: PageBook = Vec::with_capacity(chunks.len());
        for chunk in chunks {
            if let Some(page) = builder.build_page(&chunk).await? {
                book.push(page);
            }
        }

        // The forecast only updates on a non-empty book; an empty build
        // keeps whatever estimate the previous build produced.
        if !book.is_empty() {
            self.fetcher
                .store_average_page_size(filtered_count / book.len());
        }

        debug!(
            pager = %self.settings.config.name,
            total = snapshot.len(),
            filtered = filtered_count,
            pages = book.len(),
            "page book built"
        );

        Ok(book)
    }

    /// The builder's empty page, for answering a request whose book came
    /// back empty.
    pub async fn get_empty_page(&self, builder: &dyn PageBuilder<T>) -> Result<Page> {
        builder.empty_page().await
    }
}

impl<T> std::fmt::Debug for RecordManager<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordManager")
            .field("fetcher", &self.fetcher)
            .field("settings", &self.settings)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::NaivePageBuilder;
    use crate::source::IterSource;
    use async_trait::async_trait;
    use pageflow_core::{
        FlagSet, InvalidFlagBits, Language, NoQuality, PagerConfig, Record, ANY_QUALITY,
    };

    bitflags::bitflags! {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        struct Parity: u32 {
            const EVEN = 2;
            const UNEVEN = 4;
        }
    }

    impl FlagSet for Parity {
        fn try_from_bits(bits: u32) -> std::result::Result<Self, InvalidFlagBits> {
            Parity::from_bits(bits).ok_or(InvalidFlagBits { bits })
        }

        fn bits(self) -> u32 {
            Parity::bits(&self)
        }
    }

    impl QualityFlag for Parity {
        fn shown_name(self, _language: Language) -> String {
            format!("{self:?}")
        }
    }

    async fn manager_over(count: i64, per_page: usize) -> RecordManager<i64> {
        let records = (1..=count).map(|i| {
            let quality = if i % 2 == 0 {
                Parity::EVEN.bits()
            } else {
                Parity::UNEVEN.bits()
            };
            Record::new(i.to_string(), quality, i)
        });
        let fetcher = Arc::new(Fetcher::new(1000, IterSource::new(records)));
        fetcher.fetch_all().await.unwrap();
        let settings = PagerSettings::new(PagerConfig::custom("test", 1000, per_page));
        RecordManager::new(fetcher, settings)
    }

    #[tokio::test]
    async fn nonempty_book_updates_the_average() {
        let manager = manager_over(10, 3).await;
        let builder = NaivePageBuilder::new("Results:");
        let book = manager
            .build_page_book::<NoQuality>(ANY_QUALITY, ANY_ORDERING, &builder)
            .await
            .unwrap();
        // 10 records in chunks of 3 -> 4 pages, forecast 10 / 4 = 2.
        assert_eq!(book.len(), 4);
        assert_eq!(manager.fetcher().average_page_size(), Some(2));
        assert_eq!(manager.fetcher().fetched_pages(), Some(5));
    }

    #[tokio::test]
    async fn empty_book_leaves_the_average_untouched() {
        let manager = manager_over(10, 3).await;
        let builder = NaivePageBuilder::new("Results:");
        manager
            .build_page_book::<NoQuality>(ANY_QUALITY, ANY_ORDERING, &builder)
            .await
            .unwrap();
        let before = manager.fetcher().average_page_size();

        // An asked quality with undeclared bits matches nothing.
        let book = manager
            .build_page_book::<Parity>(9, ANY_ORDERING, &builder)
            .await
            .unwrap();
        assert!(book.is_empty());
        assert_eq!(manager.fetcher().average_page_size(), before);
    }

    #[tokio::test]
    async fn filtering_halves_the_parity_records() {
        let manager = manager_over(10, 100).await;
        let builder = NaivePageBuilder::new("Even:");
        let book = manager
            .build_page_book::<Parity>(Parity::EVEN.bits(), ANY_ORDERING, &builder)
            .await
            .unwrap();
        assert_eq!(book.len(), 1);
        assert_eq!(book[0].text, "Even:\n2\n4\n6\n8\n10");
    }

    #[tokio::test]
    async fn unsupported_ordering_keeps_filtered_order() {
        let manager = manager_over(6, 100).await;
        // NaivePageBuilder keeps the default order_by, so asking for an
        // ordering falls through without reordering.
        let builder = NaivePageBuilder::new("All:");
        let book = manager
            .build_page_book::<NoQuality>(ANY_QUALITY, 2, &builder)
            .await
            .unwrap();
        assert_eq!(book[0].text, "All:\n1\n2\n3\n4\n5\n6");
    }

    #[tokio::test]
    async fn supported_ordering_replaces_filtered_order() {
        struct Reversing(NaivePageBuilder);

        #[async_trait]
        impl PageBuilder<i64> for Reversing {
            async fn build_page(&self, records: &[Record<i64>]) -> Result<Option<Page>> {
                self.0.build_page(records).await
            }

            async fn empty_page(&self) -> Result<Page> {
                <NaivePageBuilder as PageBuilder<i64>>::empty_page(&self.0).await
            }

            async fn order_by(
                &self,
                records: &[Record<i64>],
                _asked_ordering: u32,
            ) -> Option<Vec<Record<i64>>> {
                let mut ordered = records.to_vec();
                ordered.reverse();
                Some(ordered)
            }
        }

        let manager = manager_over(4, 100).await;
        let builder = Reversing(NaivePageBuilder::new("All:"));
        let book = manager
            .build_page_book::<NoQuality>(ANY_QUALITY, 2, &builder)
            .await
            .unwrap();
        assert_eq!(book[0].text, "All:\n4\n3\n2\n1");
    }

    #[tokio::test]
    async fn get_empty_page_delegates_to_the_builder() {
        let manager = manager_over(0, 10).await;
        let builder = NaivePageBuilder::new("Nothing here yet.");
        let page = manager.get_empty_page(&builder).await.unwrap();
        assert_eq!(page.text, "Nothing here yet.");
    }
}

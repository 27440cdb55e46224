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

//! Pageflow Pager
//!
//! The incremental fetch engine and record-to-page pipeline. A [`Fetcher`]
//! pulls records from a lazy [`RecordSource`] in bounded batches under a
//! single-flight lock; a [`RecordManager`] filters the accumulated records by
//! quality, optionally reorders them through a [`PageBuilder`], chunks them
//! with a [`PageSizer`], and feeds the resulting average page size back into
//! the fetcher's capacity forecast.
//!
//! Data flows one way: source → fetcher buffer → manager pipeline → builder
//! → page book. Control flows the other way: a consumer grows the buffer
//! with [`Fetcher::fetch_more`] / [`Fetcher::fetch_all`], then materializes
//! pages from the current snapshot with [`RecordManager::build_page_book`].

pub mod builder;
pub mod fetcher;
pub mod filter;
pub mod manager;
pub mod settings;
pub mod sizer;
pub mod source;

pub use builder::{FormattingPageBuilder, NaivePageBuilder, PageBuilder};
pub use fetcher::Fetcher;
pub use filter::filter_by_quality;
pub use manager::RecordManager;
pub use settings::PagerSettings;
pub use sizer::{FixedCountSizer, PageSizer};
pub use source::{
    IterSource, RecordSource, SharedStreamSource, SourceError, StreamSource, TryStreamSource,
};

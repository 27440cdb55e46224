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

//! Pipeline settings for one pagination session.

use std::sync::Arc;

use pageflow_core::PagerConfig;

use crate::sizer::{FixedCountSizer, PageSizer};

/// Configuration handed to a [`crate::RecordManager`]: tuning knobs plus the
/// page-sizing strategy.
pub struct PagerSettings<T> {
    /// Tuning knobs shared with the fetcher.
    pub config: PagerConfig,
    /// Strategy partitioning filtered snapshots into chunks. Defaults to
    /// [`FixedCountSizer`] over `config.records_per_page`.
    pub page_sizer: Arc<dyn PageSizer<T>>,
}

impl<T> PagerSettings<T> {
    pub fn new(config: PagerConfig) -> Self {
        let page_sizer = Arc::new(FixedCountSizer::new(config.records_per_page));
        Self { config, page_sizer }
    }

    /// Replace the sizing strategy.
    pub fn with_page_sizer(mut self, sizer: impl PageSizer<T> + 'static) -> Self {
        self.page_sizer = Arc::new(sizer);
        self
    }
}

impl<T> Default for PagerSettings<T> {
    fn default() -> Self {
        Self::new(PagerConfig::default())
    }
}

impl<T> Clone for PagerSettings<T> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            page_sizer: Arc::clone(&self.page_sizer),
        }
    }
}

impl<T> std::fmt::Debug for PagerSettings<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PagerSettings")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

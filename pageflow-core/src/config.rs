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

//! Configuration for pager behavior.

use serde::{Deserialize, Serialize};

/// Default number of records pulled from the source per `fetch_more` call.
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Default number of records per page for the stock sizing strategy.
pub const DEFAULT_RECORDS_PER_PAGE: usize = 10;

/// Tuning knobs for one pagination session.
///
/// Batch size trades source round-trips against latency of the first page;
/// records-per-page only matters when the stock fixed-count sizing strategy
/// is in use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagerConfig {
    /// Name of this pager, used in log events to tell sessions apart.
    pub name: String,

    /// Records pulled from the source per `fetch_more` call. Values below 1
    /// are treated as 1.
    pub batch_size: usize,

    /// Records per page for the stock sizing strategy.
    pub records_per_page: usize,
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            name: "pageflow".to_owned(),
            batch_size: DEFAULT_BATCH_SIZE,
            records_per_page: DEFAULT_RECORDS_PER_PAGE,
        }
    }
}

impl PagerConfig {
    /// Config for interactive surfaces: small batches, first page fast.
    pub fn interactive(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            batch_size: 20,
            records_per_page: DEFAULT_RECORDS_PER_PAGE,
        }
    }

    /// Config for `fetch_all`-heavy flows: large batches, fewer lock trips.
    pub fn bulk(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            batch_size: 500,
            records_per_page: DEFAULT_RECORDS_PER_PAGE,
        }
    }

    /// Config with explicit sizes.
    pub fn custom(name: impl Into<String>, batch_size: usize, records_per_page: usize) -> Self {
        Self {
            name: name.into(),
            batch_size,
            records_per_page,
        }
    }
}

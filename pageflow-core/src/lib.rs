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

//! Pageflow Core
//!
//! Fundamental data structures and contracts for the pageflow pagination
//! pipeline: records, pages, bit-flag qualities and orderings, errors and
//! configuration.

pub mod config;
pub mod error;
pub mod flag;
pub mod language;
pub mod record;

pub use config::{PagerConfig, DEFAULT_BATCH_SIZE, DEFAULT_RECORDS_PER_PAGE};
pub use error::{BoxError, PageflowError, Result};
pub use flag::{
    FlagSet, InvalidFlagBits, NoQuality, OrderingFlag, QualityFlag, ANY_ORDERING, ANY_QUALITY,
    FIRST_FLAG_BIT,
};
pub use language::Language;
pub use record::{Page, PageBook, Record};

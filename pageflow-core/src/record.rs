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

//! Record and page value types.
//!
//! A [`Record`] is one displayable text item with a quality bitmask and an
//! opaque `meta` payload. The core pipeline never inspects `meta`; it exists
//! for user-supplied ordering policies. A [`Page`] is a rendered unit of
//! display, and a [`PageBook`] is the ordered sequence of pages produced for
//! one filter/ordering request.

use serde::{Deserialize, Serialize};

/// One text record flowing through the pagination pipeline.
///
/// Immutable once produced. Pipeline stages (filtering, ordering) operate on
/// snapshot copies and never mutate a fetcher's buffer in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record<T> {
    /// Display text for this record.
    pub text: String,
    /// Quality bitmask used for filtering. Declared flag bits start at
    /// [`crate::flag::FIRST_FLAG_BIT`].
    pub quality: u32,
    /// Opaque payload consumed only by user-supplied ordering logic.
    pub meta: T,
}

impl<T> Record<T> {
    /// Create a record from its parts.
    pub fn new(text: impl Into<String>, quality: u32, meta: T) -> Self {
        Self {
            text: text.into(),
            quality,
            meta,
        }
    }
}

/// A rendered, displayable page.
///
/// Produced by a page builder. "No page" (`Option::None` at the builder
/// boundary) is a distinct outcome from a page whose text is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Rendered page text.
    pub text: String,
}

impl Page {
    /// Create a page from rendered text.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Ordered sequence of pages for one filter/ordering request, one entry per
/// non-empty chunk, in chunk order.
pub type PageBook = Vec<Page>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_construction() {
        let record = Record::new("42", 2, 42_i64);
        assert_eq!(record.text, "42");
        assert_eq!(record.quality, 2);
        assert_eq!(record.meta, 42);
    }

    #[test]
    fn empty_page_text_is_a_page() {
        // An empty-text page is a valid value, distinct from "no page".
        let page = Page::new("");
        assert_eq!(page.text, "");
    }
}

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

//! Page builders.
//!
//! A [`PageBuilder`] renders a chunk of records into a page, and optionally
//! implements an ordering policy. Ordering is the odd one out among the
//! capabilities: it runs once over the whole filtered snapshot, before
//! chunking, not per page.

use async_trait::async_trait;

use pageflow_core::{Page, PageflowError, Record, Result};

/// Capability set turning record chunks into pages.
#[async_trait]
pub trait PageBuilder<T: Send + Sync>: Send + Sync {
    /// Render one chunk into a page.
    ///
    /// Must return `Ok(None)` for an empty chunk: "nothing to show" is a
    /// distinct outcome from a page whose text is empty.
    async fn build_page(&self, records: &[Record<T>]) -> Result<Option<Page>>;

    /// Page shown when the book for some quality came back empty.
    async fn empty_page(&self) -> Result<Page>;

    /// Reorder the filtered snapshot according to `asked_ordering`.
    ///
    /// `None` is the "ordering unsupported" marker and is treated
    /// differently from an identity reordering: the orchestrator keeps the
    /// filtered order untouched. Implementations that recognize the asked
    /// value return a reordered copy; unrecognized values should fall
    /// through without reordering (return the records as they came).
    async fn order_by(&self, records: &[Record<T>], asked_ordering: u32) -> Option<Vec<Record<T>>> {
        let _ = (records, asked_ordering);
        None
    }
}

/// Builder joining record texts under a fixed header line.
#[derive(Debug, Clone)]
pub struct NaivePageBuilder {
    base_text: String,
}

impl NaivePageBuilder {
    pub fn new(base_text: impl Into<String>) -> Self {
        Self {
            base_text: base_text.into(),
        }
    }
}

#[async_trait]
impl<T: Send + Sync> PageBuilder<T> for NaivePageBuilder {
    async fn build_page(&self, records: &[Record<T>]) -> Result<Option<Page>> {
        if records.is_empty() {
            return Ok(None);
        }
        let mut text = self.base_text.clone();
        for record in records {
            text.push('\n');
            text.push_str(&record.text);
        }
        Ok(Some(Page::new(text)))
    }

    async fn empty_page(&self) -> Result<Page> {
        Ok(Page::new(self.base_text.clone()))
    }
}

/// Builder substituting record texts into a `{placeholder}` template.
///
/// ```
/// # use pageflow_pager::FormattingPageBuilder;
/// let builder = FormattingPageBuilder::new("Results:\n{body}", "body")
///     .expect("template names its placeholder")
///     .with_empty_text("nothing found");
/// ```
#[derive(Debug, Clone)]
pub struct FormattingPageBuilder {
    template: String,
    token: String,
    empty_text: Option<String>,
}

impl FormattingPageBuilder {
    /// Create a builder over `template`, which must contain the placeholder
    /// in `{placeholder}` form.
    pub fn new(template: impl Into<String>, placeholder: impl Into<String>) -> Result<Self> {
        let template = template.into();
        let placeholder = placeholder.into();
        let token = format!("{{{placeholder}}}");
        if !template.contains(&token) {
            return Err(PageflowError::Template { placeholder });
        }
        Ok(Self {
            template,
            token,
            empty_text: None,
        })
    }

    /// Text substituted by `empty_page`. Without it the placeholder is
    /// replaced by the empty string.
    pub fn with_empty_text(mut self, text: impl Into<String>) -> Self {
        self.empty_text = Some(text.into());
        self
    }

    fn render(&self, body: &str) -> Page {
        Page::new(self.template.replace(&self.token, body))
    }
}

#[async_trait]
impl<T: Send + Sync> PageBuilder<T> for FormattingPageBuilder {
    async fn build_page(&self, records: &[Record<T>]) -> Result<Option<Page>> {
        if records.is_empty() {
            return Ok(None);
        }
        let body = records
            .iter()
            .map(|record| record.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        Ok(Some(self.render(&body)))
    }

    async fn empty_page(&self) -> Result<Page> {
        Ok(self.render(self.empty_text.as_deref().unwrap_or_default()))
    }
}

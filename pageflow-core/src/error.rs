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

//! Error types for the pagination pipeline.
//!
//! Only three conditions are ever recovered locally: source exhaustion
//! (including a reentrant advance), invalid quality bits on a record during
//! filtering, and the "ordering unsupported" marker. Everything below is the
//! fatal remainder that propagates to the caller.

use thiserror::Error;

use crate::flag::InvalidFlagBits;

/// Boxed error payload for failures originating outside the core.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Fatal pipeline failure.
#[derive(Debug, Error)]
pub enum PageflowError {
    /// A flag value was rejected outside the filter's recovery path, e.g.
    /// while translating user input into an asked quality.
    #[error(transparent)]
    Flag(#[from] InvalidFlagBits),

    /// The record source failed with something other than exhaustion or a
    /// reentrant advance.
    #[error("record source failed")]
    Source(#[source] BoxError),

    /// A page builder failed while rendering.
    #[error("page builder failed")]
    Builder(#[source] BoxError),

    /// A formatting template does not contain its placeholder.
    #[error("template is missing the {{{placeholder}}} placeholder")]
    Template {
        /// Placeholder name the template was expected to contain.
        placeholder: String,
    },
}

/// Result alias used across the pageflow crates.
pub type Result<T> = std::result::Result<T, PageflowError>;

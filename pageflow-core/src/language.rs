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

//! Display-language support.
//!
//! Chat platforms report a user's locale as an IETF/ISO code ("en", "ru",
//! "pt-BR"). Flag display names are keyed by [`Language`] so presentation
//! layers can translate filter and ordering labels; the core pipeline itself
//! never consults it.

use serde::{Deserialize, Serialize};

/// Languages supported for flag display names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    /// English (default)
    English,
    /// Russian
    Russian,
    /// Ukrainian
    Ukrainian,
    /// Spanish
    Spanish,
    /// German
    German,
    /// Portuguese
    Portuguese,
}

impl Default for Language {
    fn default() -> Self {
        Self::English
    }
}

impl Language {
    /// ISO 639-1 code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Russian => "ru",
            Self::Ukrainian => "uk",
            Self::Spanish => "es",
            Self::German => "de",
            Self::Portuguese => "pt",
        }
    }

    /// Parse a locale code as reported by a chat platform.
    ///
    /// Region subtags are ignored ("pt-BR" parses as Portuguese). Unknown
    /// codes return `None`; callers usually fall back to the default.
    pub fn from_code(code: &str) -> Option<Self> {
        let primary = code
            .split(['-', '_'])
            .next()
            .unwrap_or(code)
            .to_ascii_lowercase();
        match primary.as_str() {
            "en" => Some(Self::English),
            "ru" => Some(Self::Russian),
            "uk" => Some(Self::Ukrainian),
            "es" => Some(Self::Spanish),
            "de" => Some(Self::German),
            "pt" => Some(Self::Portuguese),
            _ => None,
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

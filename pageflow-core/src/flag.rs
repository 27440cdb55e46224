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

//! Bit-flag value model for qualities and orderings.
//!
//! Qualities classify records for filtering; orderings select a sort policy
//! interpreted by a page builder. Both are small bitmask sets declared by the
//! application, typically with `bitflags::bitflags!`, and wired into the
//! pipeline through [`FlagSet`]:
//!
//! ```
//! use pageflow_core::{FlagSet, InvalidFlagBits, Language, QualityFlag};
//!
//! bitflags::bitflags! {
//!     #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//!     pub struct Parity: u32 {
//!         const EVEN = 2;
//!         const UNEVEN = 4;
//!     }
//! }
//!
//! impl FlagSet for Parity {
//!     fn try_from_bits(bits: u32) -> Result<Self, InvalidFlagBits> {
//!         Parity::from_bits(bits).ok_or(InvalidFlagBits { bits })
//!     }
//!
//!     fn bits(self) -> u32 {
//!         Parity::bits(&self)
//!     }
//! }
//!
//! impl QualityFlag for Parity {
//!     fn shown_name(self, _language: Language) -> String {
//!         match self.bits() {
//!             2 => "Even".to_owned(),
//!             4 => "Uneven".to_owned(),
//!             _ => "Mixed".to_owned(),
//!         }
//!     }
//! }
//! ```
//!
//! Declared bits start at [`FIRST_FLAG_BIT`]; the values `0` and `1` are
//! reserved for the [`ANY_QUALITY`] and [`ANY_ORDERING`] sentinels, so a
//! sentinel can never collide with a real flag value under strict
//! construction.

use thiserror::Error;

use crate::language::Language;

/// Sentinel asking the pipeline to skip quality filtering entirely.
pub const ANY_QUALITY: u32 = 0;

/// Sentinel asking the pipeline to skip the ordering step entirely.
pub const ANY_ORDERING: u32 = 1;

/// Lowest bit value a declared flag may use; `0` and `1` are reserved for
/// the sentinels above.
pub const FIRST_FLAG_BIT: u32 = 2;

/// Rejection of a raw integer that does not form a valid flag value.
///
/// The quality filter catches exactly this error and treats the offending
/// record as "no match"; nothing else is ever swallowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("value {bits:#x} contains bits outside the declared flag set")]
pub struct InvalidFlagBits {
    /// The rejected raw value.
    pub bits: u32,
}

/// A validated small-integer bitmask set.
///
/// `try_from_bits` is strict: any undeclared bit in the input is a
/// [`InvalidFlagBits`] error, never a silently truncated value.
pub trait FlagSet: Sized + Copy + Send + Sync + 'static {
    /// Validating constructor from a raw bitmask.
    fn try_from_bits(bits: u32) -> Result<Self, InvalidFlagBits>;

    /// Raw bitmask of this value.
    fn bits(self) -> u32;

    /// Whether `other` is bitwise contained in `self`.
    fn contains(self, other: Self) -> bool {
        self.bits() & other.bits() == other.bits()
    }
}

/// A flag set classifying records for filtering.
pub trait QualityFlag: FlagSet {
    /// Human-readable name of this quality, for presentation surfaces.
    fn shown_name(self, language: Language) -> String;
}

/// A flag set selecting a sort policy, interpreted by a page builder.
pub trait OrderingFlag: FlagSet {
    /// Human-readable name of this ordering, for presentation surfaces.
    fn shown_name(self, language: Language) -> String;
}

/// Quality for pagers whose records carry no classification.
///
/// Construction never fails and every asked value matches every record, so
/// filtering degenerates to a pass-through for any asked quality, not just
/// [`ANY_QUALITY`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoQuality;

impl FlagSet for NoQuality {
    fn try_from_bits(_bits: u32) -> Result<Self, InvalidFlagBits> {
        Ok(Self)
    }

    fn bits(self) -> u32 {
        0
    }
}

impl QualityFlag for NoQuality {
    fn shown_name(self, _language: Language) -> String {
        String::new()
    }
}

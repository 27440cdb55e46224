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

//! Quality filtering.

use tracing::debug;

use pageflow_core::{QualityFlag, Record, ANY_QUALITY};

/// Filter a record snapshot by an asked quality bitmask.
///
/// [`ANY_QUALITY`] passes the input through unchanged. Otherwise both the
/// asked value and each record's stored bitmask go through `Q`'s strict
/// constructor; a record whose bits do not form a valid `Q` value is
/// silently excluded, and a record is kept iff the asked value is bitwise
/// contained in its quality. Output order always matches input order.
pub fn filter_by_quality<T, Q>(records: &[Record<T>], asked_quality: u32) -> Vec<Record<T>>
where
    T: Clone,
    Q: QualityFlag,
{
    if asked_quality == ANY_QUALITY {
        return records.to_vec();
    }

    let asked = match Q::try_from_bits(asked_quality) {
        Ok(asked) => asked,
        Err(_) => {
            debug!(bits = asked_quality, "asked quality has undeclared bits, nothing matches");
            return Vec::new();
        }
    };

    records
        .iter()
        .filter(|record| match Q::try_from_bits(record.quality) {
            Ok(quality) => quality.contains(asked),
            Err(_) => false,
        })
        .cloned()
        .collect()
}

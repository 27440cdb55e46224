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

//! Page-sizing strategies.

use pageflow_core::Record;

/// Strategy partitioning a filtered snapshot into page-sized chunks.
///
/// Pure: chunk order and intra-chunk order are the strategy's contract with
/// the builder; the pipeline imposes no constraint on chunk sizes. Any
/// `Fn(Vec<Record<T>>) -> Vec<Vec<Record<T>>>` closure qualifies.
pub trait PageSizer<T>: Send + Sync {
    fn split(&self, records: Vec<Record<T>>) -> Vec<Vec<Record<T>>>;
}

impl<T, F> PageSizer<T> for F
where
    F: Fn(Vec<Record<T>>) -> Vec<Vec<Record<T>>> + Send + Sync,
{
    fn split(&self, records: Vec<Record<T>>) -> Vec<Vec<Record<T>>> {
        self(records)
    }
}

/// Stock strategy: a fixed number of records per chunk, last chunk short.
#[derive(Debug, Clone, Copy)]
pub struct FixedCountSizer {
    per_page: usize,
}

impl FixedCountSizer {
    /// A `per_page` of 0 is treated as 1.
    pub fn new(per_page: usize) -> Self {
        Self {
            per_page: per_page.max(1),
        }
    }
}

impl<T> PageSizer<T> for FixedCountSizer {
    fn split(&self, records: Vec<Record<T>>) -> Vec<Vec<Record<T>>> {
        let mut chunks = Vec::with_capacity(records.len().div_ceil(self.per_page));
        let mut rest = records.into_iter();
        loop {
            let chunk: Vec<Record<T>> = rest.by_ref().take(self.per_page).collect();
            if chunk.is_empty() {
                break;
            }
            chunks.push(chunk);
        }
        chunks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(upto: usize) -> Vec<Record<usize>> {
        (1..=upto).map(|i| Record::new(i.to_string(), 2, i)).collect()
    }

    #[test]
    fn splits_into_even_chunks() {
        let chunks = FixedCountSizer::new(5).split(numbered(10));
        assert_eq!(chunks.len(), 2);
        assert!(chunks.iter().all(|c| c.len() == 5));
    }

    #[test]
    fn last_chunk_holds_the_remainder() {
        let chunks = FixedCountSizer::new(4).split(numbered(10));
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[2].len(), 2);
        assert_eq!(chunks[2][1].meta, 10);
    }

    #[test]
    fn empty_input_yields_no_chunks() {
        let chunks = FixedCountSizer::new(4).split(numbered(0));
        assert!(chunks.is_empty());
    }

    #[test]
    fn chunk_order_preserves_record_order() {
        let chunks = FixedCountSizer::new(3).split(numbered(7));
        let flattened: Vec<usize> = chunks.into_iter().flatten().map(|r| r.meta).collect();
        assert_eq!(flattened, (1..=7).collect::<Vec<_>>());
    }

    #[test]
    fn closures_are_sizers_too() {
        let one_page = |records: Vec<Record<usize>>| vec![records];
        let chunks = one_page.split(numbered(3));
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].len(), 3);
    }
}

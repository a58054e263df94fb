//! Sorted chunk frequency table.
//!
//! Entries are kept in ascending order of their packed patterns (compared
//! byte by byte, then by width) with no duplicates. Lookup is a binary
//! search; a new pattern is inserted at the index the search ends on, and
//! the entries after it move up by one slot.
//!
//! Capacity is managed explicitly: it starts at one entry and doubles each
//! time the table is full, so reallocation is amortized O(1) per insert.

use crate::error::{FreqError, Result};
use log::{debug, warn};
use shcomp_core::chunk::final_byte_mask;
use shcomp_core::config::packed_len;
use shcomp_core::{Chunk, MAX_CHUNK_WIDTH, ShcompError};
use std::borrow::Cow;

/// One distinct chunk value and how often it was seen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyEntry {
    chunk: Chunk,
    count: u32,
}

impl FrequencyEntry {
    /// The chunk value.
    pub fn chunk(&self) -> &Chunk {
        &self.chunk
    }

    /// Packed pattern bytes.
    pub fn pattern(&self) -> &[u8] {
        self.chunk.as_bytes()
    }

    /// Pattern width in bits.
    pub fn width(&self) -> u16 {
        self.chunk.width()
    }

    /// Number of observations (at least 1).
    pub fn count(&self) -> u32 {
        self.count
    }
}

/// Ordered table of distinct chunks and their occurrence counts.
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    /// Entries in ascending pattern order. Growth goes through
    /// `try_reserve_exact`, so the vector's own capacity is the table's.
    entries: Vec<FrequencyEntry>,
}

impl FrequencyTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one observation of a packed pattern.
    ///
    /// `pattern` must hold `ceil(width / 8)` bytes; padding bits in its
    /// final byte are ignored. An existing entry has its count incremented,
    /// otherwise a new entry with count 1 is inserted in order.
    ///
    /// # Returns
    ///
    /// The pattern's count after this observation.
    pub fn add_or_increment(&mut self, pattern: &[u8], width: u16) -> Result<u32> {
        if width == 0 {
            return Err(ShcompError::invalid_width(width, MAX_CHUNK_WIDTH).into());
        }

        let expected = packed_len(width);
        if pattern.len() != expected {
            return Err(ShcompError::pattern_length(width, expected, pattern.len()).into());
        }

        let pattern = normalize(pattern, width);
        match self.locate(&pattern, width) {
            Ok(index) => Ok(self.bump(index)),
            Err(index) => {
                let chunk = Chunk::new(pattern.into_owned(), width)?;
                self.insert_at(index, chunk)?;
                Ok(1)
            }
        }
    }

    /// Record one observation of `chunk`.
    pub fn add(&mut self, chunk: Chunk) -> Result<u32> {
        match self.locate(chunk.as_bytes(), chunk.width()) {
            Ok(index) => Ok(self.bump(index)),
            Err(index) => {
                self.insert_at(index, chunk)?;
                Ok(1)
            }
        }
    }

    /// Count recorded for a pattern, `None` if it was never seen.
    pub fn get(&self, pattern: &[u8], width: u16) -> Option<u32> {
        if width == 0 || pattern.len() != packed_len(width) {
            return None;
        }
        let pattern = normalize(pattern, width);
        self.locate(&pattern, width)
            .ok()
            .map(|index| self.entries[index].count)
    }

    /// Count recorded for `chunk`, `0` if it was never seen.
    pub fn count_of(&self, chunk: &Chunk) -> u32 {
        self.locate(chunk.as_bytes(), chunk.width())
            .map(|index| self.entries[index].count)
            .unwrap_or(0)
    }

    /// Entries in ascending pattern order.
    pub fn entries(&self) -> std::slice::Iter<'_, FrequencyEntry> {
        self.entries.iter()
    }

    /// Alias for [`entries`](Self::entries).
    pub fn iter(&self) -> std::slice::Iter<'_, FrequencyEntry> {
        self.entries()
    }

    /// Entries by descending count; equal counts keep ascending pattern order.
    pub fn by_frequency(&self) -> Vec<&FrequencyEntry> {
        let mut ranked: Vec<&FrequencyEntry> = self.entries.iter().collect();
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked
    }

    /// Number of distinct patterns.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no pattern has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entry slots currently reserved.
    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    /// Total number of observations.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|e| e.count as u64).sum()
    }

    /// Shannon entropy of the distribution, in bits per chunk.
    ///
    /// Returns 0.0 if the table is empty.
    pub fn entropy(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let total = total as f64;
        self.entries
            .iter()
            .map(|e| {
                let prob = e.count as f64 / total;
                -prob * prob.log2()
            })
            .sum()
    }

    fn locate(&self, pattern: &[u8], width: u16) -> std::result::Result<usize, usize> {
        self.entries
            .binary_search_by(|entry| entry.chunk.cmp_packed(pattern, width))
    }

    fn bump(&mut self, index: usize) -> u32 {
        let entry = &mut self.entries[index];
        if entry.count == u32::MAX {
            warn!("count for pattern {} saturated at {}", entry.chunk, u32::MAX);
        }
        entry.count = entry.count.saturating_add(1);
        entry.count
    }

    fn insert_at(&mut self, index: usize, chunk: Chunk) -> Result<()> {
        if self.entries.len() == self.entries.capacity() {
            self.grow()?;
        }
        self.entries.insert(index, FrequencyEntry { chunk, count: 1 });
        Ok(())
    }

    /// Double the reserved capacity, starting from one slot.
    fn grow(&mut self) -> Result<()> {
        let requested = next_capacity(self.entries.capacity())?;
        reserve_slots(&mut self.entries, requested)?;
        debug!("frequency table capacity grown to {} entries", requested);
        Ok(())
    }
}

/// Capacity after one growth step from `current`.
fn next_capacity(current: usize) -> Result<usize> {
    match current {
        0 => Ok(1),
        n => n
            .checked_mul(2)
            .ok_or(FreqError::ResourceExhausted { requested: n }),
    }
}

/// Reserve room for exactly `requested` entries in total.
fn reserve_slots<T>(entries: &mut Vec<T>, requested: usize) -> Result<()> {
    let additional = requested.saturating_sub(entries.len());
    entries
        .try_reserve_exact(additional)
        .map_err(|_| FreqError::ResourceExhausted { requested })
}

impl<'a> IntoIterator for &'a FrequencyTable {
    type Item = &'a FrequencyEntry;
    type IntoIter = std::slice::Iter<'a, FrequencyEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries()
    }
}

/// Clear the padding bits of a packed pattern, copying only when needed.
fn normalize(pattern: &[u8], width: u16) -> Cow<'_, [u8]> {
    let mask = final_byte_mask(width);
    match pattern.last() {
        Some(&last) if last & !mask != 0 => {
            let mut owned = pattern.to_vec();
            if let Some(last) = owned.last_mut() {
                *last &= mask;
            }
            Cow::Owned(owned)
        }
        _ => Cow::Borrowed(pattern),
    }
}

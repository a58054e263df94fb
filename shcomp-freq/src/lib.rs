//! # shcomp-freq: Chunk Frequency Tables
//!
//! This crate counts the fixed-width chunks of a stream. The result is the
//! symbol statistics a Shannon-Fano or Huffman stage turns into a prefix
//! code.
//!
//! ## Features
//!
//! - **Sorted table**: distinct patterns in ascending packed-byte order,
//!   found by binary search and inserted in place
//! - **Any width**: 1 to 65535 bits per chunk, byte-aligned or not
//! - **Truncated tails**: a short final chunk is counted with its own width,
//!   or dropped on request
//! - **Reports**: ordered `(pattern, width, count)` rows plus entropy;
//!   JSON output behind the `serde` feature
//!
//! The JSON tests only build with the feature enabled:
//! `cargo test -p shcomp-freq --features serde`.
//!
//! ## Example
//!
//! ```rust
//! use shcomp_freq::{ChunkConfig, analyze};
//! use std::io::Cursor;
//!
//! // 10110010 01001111 -> 1011 0010 0100 1111
//! let analysis = analyze(Cursor::new(vec![0xB2, 0x4F]), ChunkConfig::NIBBLE).unwrap();
//!
//! let patterns: Vec<String> = analysis
//!     .table
//!     .entries()
//!     .map(|e| e.chunk().to_string())
//!     .collect();
//! assert_eq!(patterns, ["0010", "0100", "1011", "1111"]);
//! assert!(analysis.table.entries().all(|e| e.count() == 1));
//! ```
//!
//! ## Incremental use
//!
//! ```rust
//! use shcomp_freq::FrequencyTable;
//!
//! let mut table = FrequencyTable::new();
//! table.add_or_increment(&[0xAB, 0xC0], 12).unwrap();
//! table.add_or_increment(&[0xAB, 0xC0], 12).unwrap();
//! assert_eq!(table.get(&[0xAB, 0xC0], 12), Some(2));
//! assert_eq!(table.len(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod analyze;
mod error;
mod report;
mod table;

pub use analyze::{Analysis, analyze, analyze_path};
pub use error::{FreqError, Result};
pub use report::{FrequencyReport, ReportRow};
pub use shcomp_core::{Chunk, ChunkConfig};
pub use table::{FrequencyEntry, FrequencyTable};

/// Count the chunks of an in-memory buffer.
///
/// This is equivalent to `analyze(data, config)` over a byte slice.
///
/// # Example
///
/// ```rust
/// use shcomp_freq::{ChunkConfig, count_chunks};
///
/// let table = count_chunks(b"abracadabra", ChunkConfig::BYTE).unwrap();
/// assert_eq!(table.get(b"a", 8), Some(5));
/// assert_eq!(table.len(), 5);
/// ```
pub fn count_chunks(data: &[u8], config: ChunkConfig) -> Result<FrequencyTable> {
    Ok(analyze(data, config)?.table)
}

/// Count the chunks of `data` and build a report.
///
/// # Example
///
/// ```rust
/// use shcomp_freq::{ChunkConfig, report};
///
/// let report = report(&[0xFF, 0x00], ChunkConfig::BYTE).unwrap();
/// assert_eq!(report.distinct, 2);
/// assert!((report.entropy - 1.0).abs() < 1e-9);
/// ```
pub fn report(data: &[u8], config: ChunkConfig) -> Result<FrequencyReport> {
    let table = count_chunks(data, config)?;
    Ok(FrequencyReport::from_table(&table, config.width))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_histogram() {
        let table = count_chunks(b"mississippi", ChunkConfig::BYTE).unwrap();
        assert_eq!(table.len(), 4);
        assert_eq!(table.get(b"s", 8), Some(4));
        assert_eq!(table.get(b"i", 8), Some(4));
        assert_eq!(table.get(b"p", 8), Some(2));
        assert_eq!(table.get(b"m", 8), Some(1));
        assert_eq!(table.total(), 11);
    }

    #[test]
    fn test_single_bit_chunks() {
        let table = count_chunks(&[0b1110_0000], ChunkConfig::new(1)).unwrap();
        assert_eq!(table.get(&[0x00], 1), Some(5));
        assert_eq!(table.get(&[0x80], 1), Some(3));
    }

    #[test]
    fn test_report_matches_table() {
        let report = report(b"aab", ChunkConfig::BYTE).unwrap();
        assert_eq!(report.total, 3);
        assert_eq!(report.rows[0].pattern, "01100001");
        assert_eq!(report.rows[0].count, 2);
    }
}

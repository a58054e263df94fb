//! The analysis pass: cut a stream into chunks and count them.

use crate::error::Result;
use crate::table::FrequencyTable;
use log::{debug, trace};
use shcomp_core::config::packed_len;
use shcomp_core::{BitReader, ChunkCodec, ChunkConfig, ShcompError};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Outcome of one analysis pass.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Distinct chunks and their counts.
    pub table: FrequencyTable,
    /// Configuration the pass ran with.
    pub config: ChunkConfig,
    /// Chunks read, including a truncated final chunk.
    pub chunks_read: u64,
    /// Whether the input ended partway through the final chunk.
    pub truncated_final: bool,
    /// Bits consumed from the input.
    pub bits_read: u64,
}

impl Analysis {
    /// Whether a truncated final chunk was left out of the table.
    pub fn dropped_truncated(&self) -> bool {
        self.truncated_final && !self.config.keep_truncated
    }
}

/// Count the chunks of `reader`.
///
/// The width is validated before the first read. A truncated final chunk is
/// counted with its shorter width when `config.keep_truncated` is set and
/// skipped otherwise.
pub fn analyze<R: Read>(reader: R, config: ChunkConfig) -> Result<Analysis> {
    let codec = ChunkCodec::new(config)?;
    let mut reader = BitReader::new(reader);
    let mut table = FrequencyTable::new();
    let mut buf = vec![0u8; config.packed_len()];
    let mut chunks_read = 0u64;
    let mut truncated_final = false;

    debug!("analysis started: {}-bit chunks", config.width);

    loop {
        let bits = codec.read_chunk(&mut reader, &mut buf)?;
        if bits == 0 {
            break;
        }
        chunks_read += 1;

        if bits < config.width {
            truncated_final = true;
            trace!(
                "truncated chunk at bit {}: {} of {} bits",
                reader.position() - bits as u64,
                bits,
                config.width
            );
            if !config.keep_truncated {
                continue;
            }
        }

        let len = packed_len(bits);
        table.add_or_increment(&buf[..len], bits)?;
    }

    let bits_read = reader.position();
    debug!(
        "analysis finished: {} chunks, {} distinct, {} bits",
        chunks_read,
        table.len(),
        bits_read
    );

    Ok(Analysis {
        table,
        config,
        chunks_read,
        truncated_final,
        bits_read,
    })
}

/// Count the chunks of the file at `path`.
pub fn analyze_path(path: impl AsRef<Path>, config: ChunkConfig) -> Result<Analysis> {
    config.validate()?;
    let path = path.as_ref();
    debug!("opening {}", path.display());
    let file = File::open(path).map_err(ShcompError::from)?;
    analyze(BufReader::new(file), config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_nibbles() {
        let analysis = analyze(Cursor::new(vec![0xB2, 0x4F]), ChunkConfig::NIBBLE).unwrap();
        assert_eq!(analysis.chunks_read, 4);
        assert!(!analysis.truncated_final);
        assert_eq!(analysis.bits_read, 16);
        assert_eq!(analysis.table.len(), 4);
    }

    #[test]
    fn test_truncated_kept() {
        // 16 bits with 6-bit chunks: 6 + 6 + 4
        let analysis = analyze(Cursor::new(vec![0xFF, 0xFF]), ChunkConfig::new(6)).unwrap();
        assert_eq!(analysis.chunks_read, 3);
        assert!(analysis.truncated_final);
        assert_eq!(analysis.table.total(), 3);
        assert_eq!(analysis.table.get(&[0xFC], 6), Some(2));
        assert_eq!(analysis.table.get(&[0xF0], 4), Some(1));
        assert!(!analysis.dropped_truncated());
    }

    #[test]
    fn test_truncated_dropped() {
        let config = ChunkConfig::new(6).with_keep_truncated(false);
        let analysis = analyze(Cursor::new(vec![0xFF, 0xFF]), config).unwrap();
        assert_eq!(analysis.chunks_read, 3);
        assert_eq!(analysis.table.total(), 2);
        assert_eq!(analysis.table.len(), 1);
        assert!(analysis.dropped_truncated());
    }

    #[test]
    fn test_empty_input() {
        let analysis = analyze(Cursor::new(Vec::<u8>::new()), ChunkConfig::BYTE).unwrap();
        assert_eq!(analysis.chunks_read, 0);
        assert!(analysis.table.is_empty());
    }

    #[test]
    fn test_invalid_width() {
        let result = analyze(Cursor::new(vec![0u8; 4]), ChunkConfig::new(0));
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_file() {
        let result = analyze_path("/nonexistent/shcomp/input.bin", ChunkConfig::BYTE);
        assert!(matches!(result, Err(crate::FreqError::Core(ShcompError::Io(_)))));
    }

    #[test]
    fn test_open_and_read_failures_share_a_variant() {
        struct BrokenPipe;

        impl Read for BrokenPipe {
            fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::from(std::io::ErrorKind::BrokenPipe))
            }
        }

        let read_err = analyze(BrokenPipe, ChunkConfig::BYTE).unwrap_err();
        let open_err =
            analyze_path("/nonexistent/shcomp/input.bin", ChunkConfig::BYTE).unwrap_err();
        for err in [read_err, open_err] {
            assert!(matches!(err, crate::FreqError::Core(ShcompError::Io(_))));
        }
    }
}

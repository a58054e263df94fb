//! Chunking configuration.

use crate::error::{Result, ShcompError};

/// Widest chunk a configuration can describe, in bits.
pub const MAX_CHUNK_WIDTH: u16 = u16::MAX;

/// Chunking parameters for one analysis pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkConfig {
    /// Chunk width in bits.
    pub width: u16,
    /// Largest width this configuration accepts.
    ///
    /// Bounds the packed comparison buffer every table entry carries.
    pub max_width: u16,
    /// Whether a truncated final chunk is counted.
    pub keep_truncated: bool,
}

impl ChunkConfig {
    /// Byte-sized chunks: the classic order-0 byte histogram.
    pub const BYTE: Self = Self {
        width: 8,
        max_width: MAX_CHUNK_WIDTH,
        keep_truncated: true,
    };

    /// Nibble-sized chunks.
    pub const NIBBLE: Self = Self {
        width: 4,
        max_width: MAX_CHUNK_WIDTH,
        keep_truncated: true,
    };

    /// Create a configuration for `width`-bit chunks.
    pub fn new(width: u16) -> Self {
        Self {
            width,
            ..Self::BYTE
        }
    }

    /// Lower the largest accepted width.
    pub fn with_max_width(mut self, max_width: u16) -> Self {
        self.max_width = max_width;
        self
    }

    /// Choose whether a truncated final chunk is counted.
    pub fn with_keep_truncated(mut self, keep: bool) -> Self {
        self.keep_truncated = keep;
        self
    }

    /// Check the width against `1..=max_width`.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.width > self.max_width {
            return Err(ShcompError::invalid_width(self.width, self.max_width));
        }
        Ok(())
    }

    /// Bytes needed for one packed chunk.
    pub fn packed_len(&self) -> usize {
        packed_len(self.width)
    }
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self::BYTE
    }
}

/// Bytes needed to pack `width` bits.
#[inline]
pub fn packed_len(width: u16) -> usize {
    (width as usize).div_ceil(8)
}

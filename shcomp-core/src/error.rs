//! Error types for shcomp operations.
//!
//! Short reads are not errors: a chunk cut off by the end of the stream is
//! reported through the bit count returned by the codec. The variants below
//! cover the conditions that stop a transfer outright.

use std::io;
use thiserror::Error;

/// The main error type for bit channel and chunk codec operations.
#[derive(Debug, Error)]
pub enum ShcompError {
    /// I/O error from the underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Chunk width is zero or above the configured maximum.
    #[error("Invalid chunk width: {width} (must be 1-{max})")]
    InvalidWidth {
        /// The rejected width in bits.
        width: u16,
        /// Largest width accepted by the configuration.
        max: u16,
    },

    /// A single bit-level transfer asked for more than 8 bits.
    #[error("Invalid bit count: {0} (a single transfer moves at most 8 bits)")]
    InvalidBitCount(u8),

    /// Caller-supplied buffer cannot hold a packed chunk.
    #[error("Buffer too small: need {needed} bytes, have {available}")]
    BufferTooSmall {
        /// Number of bytes needed.
        needed: usize,
        /// Number of bytes available.
        available: usize,
    },

    /// Packed bytes do not match the declared width.
    #[error("Packed pattern of {found} bytes does not fit width {width} (expected {expected} bytes)")]
    PatternLength {
        /// Declared width in bits.
        width: u16,
        /// Byte length implied by the width.
        expected: usize,
        /// Byte length actually supplied.
        found: usize,
    },

    /// A bit string contained something other than `0` and `1`.
    #[error("Invalid bit string: unexpected {found:?} at position {position}")]
    InvalidBitString {
        /// Character index of the offending character.
        position: usize,
        /// The offending character.
        found: char,
    },

    /// A bit string has more characters than the widest chunk.
    #[error("Bit string of {length} bits exceeds the maximum chunk width {max}")]
    BitStringTooLong {
        /// Number of characters in the string.
        length: usize,
        /// Widest chunk in bits.
        max: u16,
    },
}

/// Result type alias for shcomp core operations.
pub type Result<T> = std::result::Result<T, ShcompError>;

impl ShcompError {
    /// Create an invalid width error.
    pub fn invalid_width(width: u16, max: u16) -> Self {
        Self::InvalidWidth { width, max }
    }

    /// Create a buffer too small error.
    pub fn buffer_too_small(needed: usize, available: usize) -> Self {
        Self::BufferTooSmall { needed, available }
    }

    /// Create a pattern length error.
    pub fn pattern_length(width: u16, expected: usize, found: usize) -> Self {
        Self::PatternLength {
            width,
            expected,
            found,
        }
    }
}

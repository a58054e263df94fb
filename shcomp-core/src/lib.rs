//! # shcomp Core
//!
//! Core components for the shcomp chunk-frequency front-end.
//!
//! This crate provides the bit-precision building blocks:
//!
//! - [`bitchannel`]: MSB-first bit reader/writer moving at most 8 bits per transfer
//! - [`chunk`]: fixed-width chunk values and the codec that cuts a stream into them
//! - [`config`]: chunk width configuration
//! - [`error`]: Error types
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ Frequency (shcomp-freq)                                 │
//! │     FrequencyTable, analysis pass, report              │
//! ├─────────────────────────────────────────────────────────┤
//! │ ChunkCodec (this crate)                                 │
//! │     W-bit chunks, truncated trailing chunk             │
//! ├─────────────────────────────────────────────────────────┤
//! │ BitChannel (this crate)                                 │
//! │     BitReader/BitWriter, per-instance cursor state     │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use shcomp_core::{BitReader, BitWriter, ChunkCodec, ChunkConfig};
//! use std::io::Cursor;
//!
//! let codec = ChunkCodec::new(ChunkConfig::new(12)).unwrap();
//!
//! let mut output = Vec::new();
//! {
//!     let mut writer = BitWriter::new(&mut output);
//!     codec.write_chunk(&mut writer, &[0xAB, 0xC0]).unwrap();
//!     codec.write_chunk(&mut writer, &[0xDE, 0xF0]).unwrap();
//!     writer.finish().unwrap();
//! }
//! assert_eq!(output, vec![0xAB, 0xCD, 0xEF]);
//!
//! let mut reader = BitReader::new(Cursor::new(output));
//! let mut buf = [0u8; 2];
//! assert_eq!(codec.read_chunk(&mut reader, &mut buf).unwrap(), 12);
//! assert_eq!(buf, [0xAB, 0xC0]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod bitchannel;
pub mod chunk;
pub mod config;
pub mod error;

// Re-exports for convenience
pub use bitchannel::{BitReader, BitWriter};
pub use chunk::{Chunk, ChunkCodec, ChunkIter};
pub use config::{ChunkConfig, MAX_CHUNK_WIDTH};
pub use error::{Result, ShcompError};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bitchannel::{BitReader, BitWriter};
    pub use crate::chunk::{Chunk, ChunkCodec};
    pub use crate::config::ChunkConfig;
    pub use crate::error::{Result, ShcompError};
}

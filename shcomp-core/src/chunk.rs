//! Fixed-width chunks and the codec that moves them through a bit channel.
//!
//! A chunk of width `W` is stored as `ceil(W / 8)` bytes, most significant
//! bit first, with the unused low-order bits of the final byte cleared.
//! The codec cuts a stream into such chunks with a sequence of at most
//! 8-bit transfers, and writes them back the same way.
//!
//! # Example
//!
//! ```
//! use shcomp_core::{BitReader, ChunkCodec, ChunkConfig};
//! use std::io::Cursor;
//!
//! let codec = ChunkCodec::new(ChunkConfig::NIBBLE).unwrap();
//! let mut reader = BitReader::new(Cursor::new(vec![0xB2, 0x4F]));
//!
//! let chunks: Vec<String> = codec
//!     .chunks(&mut reader)
//!     .map(|chunk| chunk.unwrap().to_string())
//!     .collect();
//! assert_eq!(chunks, ["1011", "0010", "0100", "1111"]);
//! ```

use crate::bitchannel::{BitReader, BitWriter, high_mask};
use crate::config::{ChunkConfig, MAX_CHUNK_WIDTH, packed_len};
use crate::error::{Result, ShcompError};
use std::cmp::Ordering;
use std::fmt;
use std::io::{Read, Write};
use std::str::FromStr;

/// Mask of the bits of the final packed byte that belong to a `width`-bit chunk.
#[inline]
pub fn final_byte_mask(width: u16) -> u8 {
    match width % 8 {
        0 => 0xFF,
        used => high_mask(used as u8),
    }
}

/// An immutable bit pattern of a declared width.
///
/// Ordering compares the packed bytes lexicographically, then the width.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Chunk {
    /// Packed bits, MSB-first, padding cleared.
    bytes: Box<[u8]>,
    /// Width in bits.
    width: u16,
}

impl Chunk {
    /// Create a chunk from packed bytes.
    ///
    /// `bytes` must hold exactly `ceil(width / 8)` bytes. Padding bits in the
    /// final byte are cleared.
    pub fn new(mut bytes: Vec<u8>, width: u16) -> Result<Self> {
        if width == 0 {
            return Err(ShcompError::invalid_width(width, MAX_CHUNK_WIDTH));
        }

        let expected = packed_len(width);
        if bytes.len() != expected {
            return Err(ShcompError::pattern_length(width, expected, bytes.len()));
        }

        if let Some(last) = bytes.last_mut() {
            *last &= final_byte_mask(width);
        }

        Ok(Self {
            bytes: bytes.into_boxed_slice(),
            width,
        })
    }

    /// Packed representation.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Width in bits.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Bit `index` (0 = most significant), `None` past the width.
    pub fn bit(&self, index: u16) -> Option<bool> {
        if index >= self.width {
            return None;
        }
        let byte = self.bytes[index as usize / 8];
        Some(byte & (0x80 >> (index % 8)) != 0)
    }

    /// Compare against a packed pattern without building a `Chunk`.
    pub fn cmp_packed(&self, bytes: &[u8], width: u16) -> Ordering {
        self.bytes
            .as_ref()
            .cmp(bytes)
            .then(self.width.cmp(&width))
    }
}

impl fmt::Display for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.width {
            let bit = self.bit(i).unwrap_or(false);
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromStr for Chunk {
    type Err = ShcompError;

    /// Parse a string of `0`/`1` characters, first character = MSB.
    fn from_str(s: &str) -> Result<Self> {
        let width = u16::try_from(s.len()).map_err(|_| ShcompError::BitStringTooLong {
            length: s.len(),
            max: MAX_CHUNK_WIDTH,
        })?;
        let mut bytes = vec![0u8; packed_len(width)];

        for (position, c) in s.chars().enumerate() {
            match c {
                '0' => {}
                '1' => bytes[position / 8] |= 0x80 >> (position % 8),
                found => return Err(ShcompError::InvalidBitString { position, found }),
            }
        }

        Self::new(bytes, width)
    }
}

/// Reads and writes fixed-width chunks through a bit channel.
#[derive(Debug, Clone, Copy)]
pub struct ChunkCodec {
    config: ChunkConfig,
}

impl ChunkCodec {
    /// Create a codec, rejecting an invalid width before any I/O happens.
    pub fn new(config: ChunkConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Chunk width in bits.
    pub fn width(&self) -> u16 {
        self.config.width
    }

    /// Get the configuration.
    pub fn config(&self) -> &ChunkConfig {
        &self.config
    }

    /// Read one chunk into `buf`.
    ///
    /// Issues transfers of `min(remaining, 8)` bits until the chunk is
    /// complete or a transfer comes back short. The first
    /// `ceil(width / 8)` bytes of `buf` are overwritten; bits that were not
    /// read are zero.
    ///
    /// # Returns
    ///
    /// Bits read: the full width, fewer for a truncated final chunk, or `0`
    /// once the stream is exhausted.
    pub fn read_chunk<R: Read>(&self, reader: &mut BitReader<R>, buf: &mut [u8]) -> Result<u16> {
        let len = self.config.packed_len();
        if buf.len() < len {
            return Err(ShcompError::buffer_too_small(len, buf.len()));
        }

        let buf = &mut buf[..len];
        buf.fill(0);

        let mut remaining = self.config.width;
        let mut bits_read = 0u16;

        for slot in buf.iter_mut() {
            let request = remaining.min(8) as u8;
            let (delivered, byte) = reader.read_bits(request)?;

            *slot = byte;
            bits_read += delivered as u16;
            remaining -= delivered as u16;

            if delivered < request {
                break;
            }
        }

        Ok(bits_read)
    }

    /// Read the next chunk, `None` at end of stream.
    ///
    /// A truncated final chunk is returned with its shorter width.
    pub fn next_chunk<R: Read>(&self, reader: &mut BitReader<R>) -> Result<Option<Chunk>> {
        let mut buf = vec![0u8; self.config.packed_len()];
        let bits = self.read_chunk(reader, &mut buf)?;
        if bits == 0 {
            return Ok(None);
        }

        buf.truncate(packed_len(bits));
        Ok(Some(Chunk {
            bytes: buf.into_boxed_slice(),
            width: bits,
        }))
    }

    /// Iterate over the remaining chunks of `reader`.
    pub fn chunks<'a, R: Read>(&self, reader: &'a mut BitReader<R>) -> ChunkIter<'a, R> {
        ChunkIter {
            codec: *self,
            reader,
            done: false,
        }
    }

    /// Write one chunk from `buf`.
    ///
    /// Does not flush the writer: the caller finishes the stream once the
    /// last chunk has been written.
    ///
    /// # Returns
    ///
    /// Bits written, always the configured width on success.
    pub fn write_chunk<W: Write>(&self, writer: &mut BitWriter<W>, buf: &[u8]) -> Result<u16> {
        let len = self.config.packed_len();
        if buf.len() < len {
            return Err(ShcompError::buffer_too_small(len, buf.len()));
        }
        write_packed(writer, &buf[..len], self.config.width)
    }

    /// Write a chunk value no wider than the configured width.
    pub fn write_value<W: Write>(&self, writer: &mut BitWriter<W>, chunk: &Chunk) -> Result<u16> {
        if chunk.width > self.config.width {
            return Err(ShcompError::invalid_width(chunk.width, self.config.width));
        }
        write_packed(writer, &chunk.bytes, chunk.width)
    }
}

fn write_packed<W: Write>(writer: &mut BitWriter<W>, bytes: &[u8], width: u16) -> Result<u16> {
    let mut remaining = width;
    let mut bits_written = 0u16;

    for &byte in bytes {
        if remaining == 0 {
            break;
        }
        let count = remaining.min(8) as u8;
        writer.write_bits(count, byte)?;
        bits_written += count as u16;
        remaining -= count as u16;
    }

    Ok(bits_written)
}

/// Iterator over the chunks of a stream, see [`ChunkCodec::chunks`].
///
/// Ends after the first error.
#[derive(Debug)]
pub struct ChunkIter<'a, R: Read> {
    codec: ChunkCodec,
    reader: &'a mut BitReader<R>,
    done: bool,
}

impl<R: Read> Iterator for ChunkIter<'_, R> {
    type Item = Result<Chunk>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.codec.next_chunk(self.reader) {
            Ok(Some(chunk)) => Some(Ok(chunk)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

//! MSB-first bit channel over byte-oriented streams.
//!
//! Chunks are cut from the input most-significant-bit first: the first bit
//! of a stream is bit 7 of its first byte. A transfer moves at most 8 bits
//! and always uses the high-order end of the byte it returns or consumes.
//!
//! Both halves keep their cursor state in the instance. Two readers (or a
//! reader and a writer) over different streams never interfere.
//!
//! # Example
//!
//! ```
//! use shcomp_core::bitchannel::{BitReader, BitWriter};
//! use std::io::Cursor;
//!
//! let mut output = Vec::new();
//! {
//!     let mut writer = BitWriter::new(&mut output);
//!     writer.write_bits(3, 0b1010_0000).unwrap(); // 101
//!     writer.write_bits(4, 0b1100_0000).unwrap(); // 1100
//!     writer.finish().unwrap();
//! }
//! assert_eq!(output, vec![0b1011_1000]);
//!
//! let mut reader = BitReader::new(Cursor::new(&output));
//! assert_eq!(reader.read_bits(3).unwrap(), (3, 0b1010_0000));
//! assert_eq!(reader.read_bits(4).unwrap(), (4, 0b1100_0000));
//! ```

use crate::error::{Result, ShcompError};
use std::io::{ErrorKind, Read, Write};

/// Largest number of bits moved by a single transfer.
pub const MAX_TRANSFER_BITS: u8 = 8;

/// Mask selecting the `count` high-order bits of a byte.
#[inline]
pub(crate) fn high_mask(count: u8) -> u8 {
    debug_assert!(count <= 8);
    (0xFF00u16 >> count) as u8
}

/// A forward-only bit reader that wraps any `Read` implementation.
///
/// The reader holds at most one partially consumed byte. The bit cursor only
/// moves forward, by exactly the number of bits each call delivers.
#[derive(Debug)]
pub struct BitReader<R: Read> {
    /// Underlying reader.
    reader: R,
    /// Unconsumed bits of the current byte, left-aligned.
    held: u8,
    /// Number of valid bits in `held`.
    held_bits: u8,
    /// Bit cursor: total bits delivered so far.
    position: u64,
}

impl<R: Read> BitReader<R> {
    /// Create a new `BitReader` positioned at bit 0 of `reader`.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            held: 0,
            held_bits: 0,
            position: 0,
        }
    }

    /// Get a reference to the underlying reader.
    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    /// Consume this `BitReader` and return the underlying reader.
    ///
    /// Bits of a partially consumed byte are discarded.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Current bit cursor.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Byte offset of the cursor in the underlying stream.
    pub fn byte_offset(&self) -> u64 {
        self.position / 8
    }

    /// Bit index of the cursor within the current byte (0 = MSB).
    pub fn bit_offset(&self) -> u8 {
        (self.position % 8) as u8
    }

    /// Pull the next byte from the stream, `None` at end of stream.
    fn next_byte(&mut self) -> Result<Option<u8>> {
        let mut byte = [0u8; 1];
        loop {
            match self.reader.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Read up to 8 bits from the cursor.
    ///
    /// # Arguments
    ///
    /// * `count` - Number of bits to read (0-8)
    ///
    /// # Returns
    ///
    /// `(delivered, byte)`: the bits are left-packed into `byte` and the
    /// low `8 - delivered` bits are zero. `delivered < count` only when the
    /// stream ended first; `0` means the stream is exhausted.
    pub fn read_bits(&mut self, count: u8) -> Result<(u8, u8)> {
        if count > MAX_TRANSFER_BITS {
            return Err(ShcompError::InvalidBitCount(count));
        }

        let mut out = 0u8;
        let mut delivered = 0u8;

        while delivered < count {
            if self.held_bits == 0 {
                match self.next_byte()? {
                    Some(byte) => {
                        self.held = byte;
                        self.held_bits = 8;
                    }
                    None => break,
                }
            }

            let take = (count - delivered).min(self.held_bits);
            let bits = self.held >> (8 - take);
            out |= bits << (8 - delivered - take);

            self.held = ((self.held as u16) << take) as u8;
            self.held_bits -= take;
            delivered += take;
        }

        self.position += delivered as u64;
        Ok((delivered, out))
    }

    /// Read a single bit, `None` at end of stream.
    pub fn read_bit(&mut self) -> Result<Option<bool>> {
        match self.read_bits(1)? {
            (0, _) => Ok(None),
            (_, byte) => Ok(Some(byte & 0x80 != 0)),
        }
    }
}

/// A bit writer that wraps any `Write` implementation.
///
/// Bits accumulate in a sub-byte register and reach the writer one full byte
/// at a time. Call [`finish`](Self::finish) (or `write_bits(0, _)`) before
/// releasing the writer; dropping it performs a best-effort flush.
#[derive(Debug)]
pub struct BitWriter<W: Write> {
    /// Underlying writer.
    writer: W,
    /// Accumulated bits, left-aligned, unused low bits zero.
    pending: u8,
    /// Number of valid bits in `pending` (0-7).
    pending_count: u8,
    /// Total bits accepted so far.
    position: u64,
}

impl<W: Write> BitWriter<W> {
    /// Create a new `BitWriter` wrapping the given writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            pending: 0,
            pending_count: 0,
            position: 0,
        }
    }

    /// Get a reference to the underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Total number of bits accepted so far (flushed or pending).
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Number of bits waiting for a full byte or a flush.
    pub fn pending_bits(&self) -> u8 {
        self.pending_count
    }

    fn emit(&mut self, byte: u8) -> Result<()> {
        self.writer.write_all(&[byte])?;
        Ok(())
    }

    /// Write up to 8 bits taken from the high-order end of `byte`.
    ///
    /// # Arguments
    ///
    /// * `count` - Number of bits to write (0-8); `0` flushes
    /// * `byte` - Source bits, left-aligned; bits past `count` are ignored
    ///
    /// # Returns
    ///
    /// `8` if a byte reached the underlying writer during this call, else `0`.
    pub fn write_bits(&mut self, count: u8, byte: u8) -> Result<u8> {
        if count > MAX_TRANSFER_BITS {
            return Err(ShcompError::InvalidBitCount(count));
        }

        if count == 0 {
            return self.flush_pending();
        }

        let incoming = byte & high_mask(count);
        let combined =
            ((self.pending as u16) << 8) | ((incoming as u16) << (8 - self.pending_count));
        let total = self.pending_count + count;
        self.position += count as u64;

        if total >= 8 {
            self.emit((combined >> 8) as u8)?;
            self.pending = (combined & 0xFF) as u8;
            self.pending_count = total - 8;
            Ok(8)
        } else {
            self.pending = (combined >> 8) as u8;
            self.pending_count = total;
            Ok(0)
        }
    }

    /// Write one bit.
    pub fn write_bit(&mut self, bit: bool) -> Result<u8> {
        self.write_bits(1, if bit { 0x80 } else { 0 })
    }

    /// Pad pending bits with zeros and write them as a final byte.
    fn flush_pending(&mut self) -> Result<u8> {
        if self.pending_count == 0 {
            return Ok(0);
        }

        let byte = self.pending;
        self.pending = 0;
        self.pending_count = 0;
        self.emit(byte)?;
        Ok(8)
    }

    /// Flush pending bits and the underlying writer.
    ///
    /// Returns `8` if a padded partial byte was written.
    pub fn finish(&mut self) -> Result<u8> {
        let flushed = self.flush_pending()?;
        self.writer.flush()?;
        Ok(flushed)
    }
}

impl<W: Write> Drop for BitWriter<W> {
    fn drop(&mut self) {
        // Best-effort flush on drop
        let _ = self.finish();
    }
}

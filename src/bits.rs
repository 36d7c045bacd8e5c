//! Bit-cursor primitives for the data report payload.
//!
//! Values in an input data report live at arbitrary bit offsets and may
//! straddle byte boundaries, so the payload is treated as a continuous bit
//! stream rather than a byte array. Bit offset `b` addresses bit `7 - (b % 8)`
//! of byte `b / 8`, matching the `msb0` bit numbering used by the packed wire
//! structures in [crate::value].

use thiserror::Error;

/// Error returned when a read or write would run past the end of the buffer.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("bit range {start}..{end} is out of bounds for a buffer of {len} bits")]
pub struct BitRangeError {
    pub start: usize,
    pub end: usize,
    pub len: usize,
}

/// [BitReader] reads values from arbitrary bit offsets in a borrowed buffer
/// without copying it.
#[derive(Debug)]
pub struct BitReader<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Total length of the underlying buffer in bits.
    pub fn len_bits(&self) -> usize {
        self.data.len() * 8
    }

    /// Current cursor position in bits.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Move the cursor to an absolute bit offset. Seeking past the end is
    /// allowed; the next read will fail instead.
    pub fn seek(&mut self, bit: usize) {
        self.position = bit;
    }

    fn check(&self, bits: usize) -> Result<(), BitRangeError> {
        let end = self.position + bits;
        if end > self.len_bits() {
            return Err(BitRangeError {
                start: self.position,
                end,
                len: self.len_bits(),
            });
        }
        Ok(())
    }

    /// Read a single bit at the cursor and advance.
    pub fn read_bit(&mut self) -> Result<bool, BitRangeError> {
        self.check(1)?;
        let byte = self.data[self.position / 8];
        let bit = 7 - (self.position % 8);
        self.position += 1;
        Ok(byte & (1 << bit) != 0)
    }

    /// Read `out.len()` bytes worth of bits starting at the cursor and
    /// advance. When the cursor is byte-aligned this is identical to a slice
    /// copy; otherwise each output byte is stitched from two adjacent input
    /// bytes.
    pub fn read_bytes(&mut self, out: &mut [u8]) -> Result<(), BitRangeError> {
        let bits = out.len() * 8;
        self.check(bits)?;

        let base = self.position / 8;
        let shift = self.position % 8;
        if shift == 0 {
            out.copy_from_slice(&self.data[base..base + out.len()]);
        } else {
            for (i, byte) in out.iter_mut().enumerate() {
                let hi = self.data[base + i] << shift;
                let lo = self.data[base + i + 1] >> (8 - shift);
                *byte = hi | lo;
            }
        }

        self.position += bits;
        Ok(())
    }
}

/// [BitWriter] places values at arbitrary bit offsets in a mutable buffer.
///
/// Writes are masked, so bits outside the written range are left untouched.
#[derive(Debug)]
pub struct BitWriter<'a> {
    data: &'a mut [u8],
    position: usize,
}

impl<'a> BitWriter<'a> {
    pub fn new(data: &'a mut [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Total length of the underlying buffer in bits.
    pub fn len_bits(&self) -> usize {
        self.data.len() * 8
    }

    /// Current cursor position in bits.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Move the cursor to an absolute bit offset.
    pub fn seek(&mut self, bit: usize) {
        self.position = bit;
    }

    fn check(&self, bits: usize) -> Result<(), BitRangeError> {
        let end = self.position + bits;
        if end > self.len_bits() {
            return Err(BitRangeError {
                start: self.position,
                end,
                len: self.len_bits(),
            });
        }
        Ok(())
    }

    /// Write a single bit at the cursor and advance.
    pub fn write_bit(&mut self, value: bool) -> Result<(), BitRangeError> {
        self.check(1)?;
        let byte = self.position / 8;
        let bit = 7 - (self.position % 8);
        if value {
            self.data[byte] |= 1 << bit;
        } else {
            self.data[byte] &= !(1 << bit);
        }
        self.position += 1;
        Ok(())
    }

    /// Write `src` starting at the cursor and advance. The inverse of
    /// [BitReader::read_bytes].
    pub fn write_bytes(&mut self, src: &[u8]) -> Result<(), BitRangeError> {
        let bits = src.len() * 8;
        self.check(bits)?;

        let base = self.position / 8;
        let shift = self.position % 8;
        if shift == 0 {
            self.data[base..base + src.len()].copy_from_slice(src);
        } else {
            // The low 8-shift bits of the first byte and the high shift bits
            // of the byte after it receive each source byte.
            let low_mask = 0xffu8 >> shift;
            for (i, &b) in src.iter().enumerate() {
                self.data[base + i] = (self.data[base + i] & !low_mask) | (b >> shift);
                self.data[base + i + 1] =
                    (self.data[base + i + 1] & low_mask) | (b << (8 - shift));
            }
        }

        self.position += bits;
        Ok(())
    }
}

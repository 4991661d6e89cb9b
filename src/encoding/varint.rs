//! Unsigned LEB128-style variable-length integers.
//!
//! Seven data bits per byte, least-significant group first; the high bit
//! of each byte flags that another byte follows. A `u32` takes at most
//! five bytes.

use smallvec::SmallVec;
use thiserror::Error;

/// Maximum encoded length of a `u32`.
pub const MAX_VARINT_LEN: usize = 5;

/// Errors produced while reading a varint stream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VarIntError {
    /// The stream ended while a continuation bit was set.
    #[error("varint truncated at byte {offset}")]
    Truncated {
        /// Offset of the varint's first byte.
        offset: usize,
    },

    /// The encoded value does not fit in a `u32`.
    #[error("varint at byte {offset} overflows u32")]
    Overflow {
        /// Offset of the varint's first byte.
        offset: usize,
    },
}

/// Encode a value into its varint bytes.
///
/// ```
/// use deckcode::encoding::varint::encode_u32;
///
/// assert_eq!(encode_u32(1).as_slice(), &[0x01]);
/// assert_eq!(encode_u32(300).as_slice(), &[0xAC, 0x02]);
/// ```
#[must_use]
pub fn encode_u32(mut value: u32) -> SmallVec<[u8; MAX_VARINT_LEN]> {
    let mut out = SmallVec::new();
    loop {
        let byte = (value & 0x7F) as u8;
        value >>= 7;
        if value == 0 {
            out.push(byte);
            return out;
        }
        out.push(byte | 0x80);
    }
}

/// Append the varint encoding of `value` to `buf`.
pub fn write_u32(buf: &mut Vec<u8>, value: u32) {
    buf.extend_from_slice(&encode_u32(value));
}

/// Cursor over a byte slice of concatenated varints.
#[derive(Debug, Clone)]
pub struct VarIntReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> VarIntReader<'a> {
    /// Create a reader positioned at the start of `data`.
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Returns true once every byte has been consumed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Read the next varint.
    pub fn read_u32(&mut self) -> Result<u32, VarIntError> {
        let offset = self.pos;
        let mut result = 0u32;
        for shift in (0..35).step_by(7) {
            let Some(&byte) = self.data.get(self.pos) else {
                return Err(VarIntError::Truncated { offset });
            };
            self.pos += 1;

            let bits = u32::from(byte & 0x7F);
            // The fifth byte may only carry the top four bits of a u32.
            if shift == 28 && bits > 0x0F {
                return Err(VarIntError::Overflow { offset });
            }
            result |= bits << shift;

            if byte & 0x80 == 0 {
                return Ok(result);
            }
        }
        Err(VarIntError::Overflow { offset })
    }
}

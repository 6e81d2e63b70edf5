//! # Primitive Encoding Helpers
//!
//! Byte-level building blocks shared by the encoder, the decoder and the
//! statistics walker.
//!
//! ## Varint
//!
//! Unsigned 32-bit values are written 7 bits per byte, low bits first. The
//! high bit of each byte is set when more bytes follow. Values below 128 take
//! one byte, the full `u32` range takes at most five.
//!
//! ## Length + Opcode Shuffle
//!
//! A verbose instruction header is `LLLL LLLL LLLL LLLL OOOO OOOO OOOO OOOO`
//! (L = word count, O = opcode). Before varint encoding it is shuffled into:
//!
//! ```text
//! LLLL LLLL LLLO OOOO OOOL LLLL OOOO OOOO
//! ```
//!
//! so that typical lengths (< 32) and opcodes (< 256) fit in 13 bits, which
//! is two varint bytes.

use crate::error::{FormatError, Result};
use crate::opcode::Opcode;

// ============================================================================
// Constants
// ============================================================================

/// Size of a fixed-width word in bytes
pub const WORD_SIZE: usize = 4;

/// Longest varint encoding of a `u32`
pub const MAX_VARINT_BYTES: usize = 5;

/// Payload bits per varint byte
const VARINT_PAYLOAD_MASK: u8 = 0x7F;

/// Continuation flag in a varint byte
const VARINT_CONTINUE: u8 = 0x80;

// ============================================================================
// Writers
// ============================================================================

/// Append a little-endian 32-bit word
#[inline]
pub fn write_word(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_le_bytes());
}

/// Append a varint-encoded value (1-5 bytes)
#[inline]
pub fn write_varint(out: &mut Vec<u8>, mut value: u32) {
    while value > VARINT_PAYLOAD_MASK as u32 {
        out.push((value as u8 & VARINT_PAYLOAD_MASK) | VARINT_CONTINUE);
        value >>= 7;
    }
    out.push(value as u8);
}

/// Number of bytes [`write_varint`] emits for `value`
#[inline]
pub const fn varint_len(value: u32) -> usize {
    let bits = 32 - value.leading_zeros() as usize;
    if bits == 0 {
        1
    } else {
        (bits + 6) / 7
    }
}

/// Append a shuffled (length, opcode) instruction header as a varint
#[inline]
pub fn write_length_op(out: &mut Vec<u8>, length: u16, opcode: Opcode) {
    write_varint(out, pack_length_op(length, opcode.to_u16()));
}

// ============================================================================
// Zigzag
// ============================================================================

/// Map a signed value to unsigned so small magnitudes stay small:
/// 0, -1, 1, -2, 2, ... become 0, 1, 2, 3, 4, ...
#[inline]
pub const fn zigzag_encode(value: i32) -> u32 {
    ((value << 1) ^ (value >> 31)) as u32
}

/// Inverse of [`zigzag_encode`]
#[inline]
pub const fn zigzag_decode(value: u32) -> i32 {
    ((value >> 1) as i32) ^ -((value & 1) as i32)
}

// ============================================================================
// Length + Opcode Shuffle
// ============================================================================

/// Shuffle an instruction's word count and opcode into one value
#[inline]
pub const fn pack_length_op(length: u16, opcode: u16) -> u32 {
    let length = length as u32;
    let opcode = opcode as u32;
    ((length >> 5) << 21) | ((opcode >> 8) << 13) | ((length & 0x1F) << 8) | (opcode & 0xFF)
}

/// Undo [`pack_length_op`], returning `(length, opcode)`
#[inline]
pub const fn unpack_length_op(value: u32) -> (u16, u16) {
    let length = ((value >> 21) << 5) | ((value >> 8) & 0x1F);
    let opcode = (((value >> 13) & 0xFF) << 8) | (value & 0xFF);
    (length as u16, opcode as u16)
}

// ============================================================================
// Reader
// ============================================================================

/// Bounds-checked cursor over a byte buffer
#[derive(Clone, Debug)]
pub struct ByteReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Current byte offset
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    /// Read a little-endian 32-bit word
    pub fn read_word(&mut self) -> Result<u32> {
        let end = self.pos + WORD_SIZE;
        let chunk = self
            .bytes
            .get(self.pos..end)
            .ok_or(FormatError::UnexpectedEof { offset: self.pos })?;
        self.pos = end;
        Ok(u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
    }

    /// Read a varint. Fails if the buffer ends before the terminating byte
    /// or if the encoding runs past five bytes.
    pub fn read_varint(&mut self) -> Result<u32> {
        let start = self.pos;
        let mut value = 0u32;
        for i in 0..MAX_VARINT_BYTES {
            let Some(&byte) = self.bytes.get(self.pos) else {
                return Err(FormatError::UnexpectedEof { offset: self.pos });
            };
            self.pos += 1;
            value |= ((byte & VARINT_PAYLOAD_MASK) as u32) << (7 * i);
            if byte & VARINT_CONTINUE == 0 {
                return Ok(value);
            }
        }
        Err(FormatError::VarintOverflow { offset: start })
    }

    /// Read a shuffled instruction header, returning `(length, opcode)`
    pub fn read_length_op(&mut self) -> Result<(u16, Opcode)> {
        let (length, opcode) = unpack_length_op(self.read_varint()?);
        Ok((length, Opcode(opcode)))
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_varint_roundtrip(value in any::<u32>()) {
            let mut out = Vec::new();
            write_varint(&mut out, value);
            prop_assert_eq!(out.len(), varint_len(value));
            let mut reader = ByteReader::new(&out);
            prop_assert_eq!(reader.read_varint().unwrap(), value);
            prop_assert!(reader.is_empty());
        }

        #[test]
        fn test_zigzag_roundtrip(value in any::<i32>()) {
            prop_assert_eq!(zigzag_decode(zigzag_encode(value)), value);
        }

        #[test]
        fn test_zigzag_inverse_on_unsigned(value in any::<u32>()) {
            prop_assert_eq!(zigzag_encode(zigzag_decode(value)), value);
        }

        #[test]
        fn test_length_op_roundtrip(length in 1u16.., opcode in 0u16..(1 << 13)) {
            prop_assert_eq!(unpack_length_op(pack_length_op(length, opcode)), (length, opcode));
        }

        #[test]
        fn test_length_op_roundtrip_full_opcode_range(length in 1u16.., opcode in any::<u16>()) {
            prop_assert_eq!(unpack_length_op(pack_length_op(length, opcode)), (length, opcode));
        }
    }
}

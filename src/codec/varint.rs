//! Variable-length unsigned integers
//!
//! Values are split into 7-bit groups, least significant group first. Every
//! byte except the last has its high bit set. Encodings are always minimal,
//! and the decoder rejects anything that is not.

use super::error::{DecodeError, DecodeResult};

/// Maximum bytes a u64 varint can occupy
pub const MAX_VARINT_LEN: usize = 10;

const CONTINUATION: u8 = 0x80;
const PAYLOAD_MASK: u8 = 0x7f;

/// Encode `value` into a freshly allocated buffer
pub fn encode(value: u64) -> Vec<u8> {
    let mut buf = Vec::with_capacity(length(value));
    encode_into(value, &mut buf);
    buf
}

/// Append the encoding of `value` to `buf`
#[inline]
pub fn encode_into(value: u64, buf: &mut Vec<u8>) {
    let mut value = value;
    while value >= u64::from(CONTINUATION) {
        buf.push((value as u8 & PAYLOAD_MASK) | CONTINUATION);
        value >>= 7;
    }
    buf.push(value as u8);
}

/// Number of bytes `encode(value)` produces
#[inline]
pub fn length(value: u64) -> usize {
    let significant_bits = 64 - value.leading_zeros() as usize;
    significant_bits.div_ceil(7).max(1)
}

/// Decode a varint starting at `offset`
///
/// Returns `(value, bytes_consumed)`.
pub fn decode(bytes: &[u8], offset: usize) -> DecodeResult<(u64, usize)> {
    let mut result = 0u64;
    let mut shift = 0u32;
    let mut pos = offset;

    loop {
        let Some(&byte) = bytes.get(pos) else {
            return Err(DecodeError::MalformedVarint { offset });
        };
        pos += 1;

        let chunk = u64::from(byte & PAYLOAD_MASK);
        if shift >= 64 || (shift == 63 && chunk > 1) {
            return Err(DecodeError::VarintOverflow { offset });
        }
        result |= chunk << shift;

        if byte & CONTINUATION == 0 {
            // A zero final group after the first byte means a shorter form exists
            if byte == 0 && pos - offset > 1 {
                return Err(DecodeError::NonCanonicalVarint { offset });
            }
            return Ok((result, pos - offset));
        }

        shift += 7;
    }
}

//! Module: codec::int
//! Responsibility: sign-flipped big-endian encoding of signed 64-bit ids.
//! Does not own: length policy for composite keys.
//! Boundary: consumed by key parsing, column decoding and the handle heuristic.

use thiserror::Error as ThisError;

/// Encoded width of one ordered `i64`.
pub const I64_ENCODED_LEN: usize = 8;

const SIGN_FLIP_MASK: u64 = 1u64 << 63;

///
/// IntDecodeError
///
/// Caller-contract failure: a fixed-width read was given too few bytes.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, ThisError)]
pub enum IntDecodeError {
    #[error("ordered i64 needs {needed} bytes, found {available}")]
    InsufficientBytes { needed: usize, available: usize },
}

/// Encode `value` so unsigned byte order matches signed numeric order.
#[must_use]
pub const fn encode_i64(value: i64) -> [u8; I64_ENCODED_LEN] {
    (value.cast_unsigned() ^ SIGN_FLIP_MASK).to_be_bytes()
}

/// Inverse of [`encode_i64`] over an exact window.
#[must_use]
pub const fn decode_i64_array(bytes: &[u8; I64_ENCODED_LEN]) -> i64 {
    (u64::from_be_bytes(*bytes) ^ SIGN_FLIP_MASK).cast_signed()
}

/// Decode the leading eight bytes of `bytes`; anything after them is ignored.
pub fn decode_i64(bytes: &[u8]) -> Result<i64, IntDecodeError> {
    let Some(window) = bytes.first_chunk::<I64_ENCODED_LEN>() else {
        return Err(IntDecodeError::InsufficientBytes {
            needed: I64_ENCODED_LEN,
            available: bytes.len(),
        });
    };

    Ok(decode_i64_array(window))
}

///
/// TESTS
///

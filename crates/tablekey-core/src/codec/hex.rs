//! Hex helpers.
//!
//! Raw keys and values cross the text boundary (CLI arguments, dump files,
//! rendered output) as hex. Only token encoding/decoding lives here.

use std::fmt::Write as _;
use thiserror::Error as ThisError;

///
/// HexDecodeError
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, ThisError)]
pub enum HexDecodeError {
    #[error("hex input is empty")]
    Empty,

    #[error("hex input must have an even number of digits")]
    OddLength,

    #[error("invalid hex character at position {position}")]
    InvalidHex { position: usize },
}

/// Encode bytes as contiguous lowercase hex.
#[must_use]
pub fn encode_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        let _ = write!(out, "{byte:02x}");
    }

    out
}

/// Encode bytes as space-separated lowercase hex pairs (`74 80 00 2e`).
#[must_use]
pub fn encode_hex_spaced(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 3);
    for (idx, byte) in bytes.iter().enumerate() {
        if idx > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{byte:02x}");
    }

    out
}

/// Decode hex text into raw bytes.
///
/// Surrounding whitespace, interior spaces and a leading `0x` are ignored;
/// case is not significant. Positions in errors are 1-based over the digits
/// that remain after that cleanup.
pub fn decode_hex(text: &str) -> Result<Vec<u8>, HexDecodeError> {
    let text = text.trim();
    let text = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);

    let digits: Vec<u8> = text.bytes().filter(|b| !b.is_ascii_whitespace()).collect();
    if digits.is_empty() {
        return Err(HexDecodeError::Empty);
    }

    if !digits.len().is_multiple_of(2) {
        return Err(HexDecodeError::OddLength);
    }

    let mut out = Vec::with_capacity(digits.len() / 2);
    for idx in (0..digits.len()).step_by(2) {
        let hi = decode_hex_nibble(digits[idx])
            .ok_or(HexDecodeError::InvalidHex { position: idx + 1 })?;

        let lo = decode_hex_nibble(digits[idx + 1])
            .ok_or(HexDecodeError::InvalidHex { position: idx + 2 })?;

        out.push((hi << 4) | lo);
    }

    Ok(out)
}

const fn decode_hex_nibble(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

///
/// TESTS
///

//! Module: codec::chunk
//! Responsibility: the "8 data bytes + 1 marker" memcomparable byte-string
//! format, in both directions.
//! Does not own: what the unwrapped bytes mean.
//! Boundary: raw-mode key normalization and byte-string index columns.

use crate::error::{CodecError, ErrorClass, ErrorOrigin};
use serde::Serialize;

/// Payload bytes carried by one group.
pub const CHUNK_DATA_LEN: usize = 8;

/// Payload plus marker.
pub const CHUNK_GROUP_LEN: usize = CHUNK_DATA_LEN + 1;

/// Marker for a full group with more groups following.
pub const MARKER_MORE: u8 = 0xFF;

///
/// ChunkTermination
///
/// How a chunked decode stopped. Only `Terminal` is a clean decode; the
/// other two keep the lenient partial result so probing callers can still
/// report what was recovered.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChunkTermination {
    /// A terminal marker (`0xF7..=0xFE`) ended the value.
    Terminal,

    /// A marker below `0xF7` claimed more than eight pad bytes. `offset` is
    /// the position of the marker byte in the input.
    MalformedMarker { marker: u8, offset: usize },

    /// Input ran out before any terminal group.
    Exhausted,
}

///
/// ChunkDecoded
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ChunkDecoded {
    pub bytes: Vec<u8>,
    /// Input bytes consumed, always a multiple of [`CHUNK_GROUP_LEN`].
    pub consumed: usize,
    pub termination: ChunkTermination,
}

impl ChunkDecoded {
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self.termination, ChunkTermination::Terminal)
    }

    /// Strict view over the lenient decode: anything but a terminal group
    /// is a malformed encoding.
    pub fn into_terminal(self) -> Result<Vec<u8>, CodecError> {
        match self.termination {
            ChunkTermination::Terminal => Ok(self.bytes),
            ChunkTermination::MalformedMarker { marker, offset } => Err(CodecError::new(
                ErrorClass::Malformed,
                ErrorOrigin::Chunk,
                format!("malformed chunk marker 0x{marker:02x} at offset {offset}"),
            )),
            ChunkTermination::Exhausted => Err(CodecError::new(
                ErrorClass::Malformed,
                ErrorOrigin::Chunk,
                format!(
                    "chunked bytes ended without a terminal group after {} bytes",
                    self.consumed
                ),
            )),
        }
    }
}

/// Encoded size for `data_len` payload bytes.
#[must_use]
pub const fn chunked_len(data_len: usize) -> usize {
    (data_len / CHUNK_DATA_LEN + 1) * CHUNK_GROUP_LEN
}

/// Encode `data` into the chunked memcomparable form.
#[must_use]
pub fn encode_chunked(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(chunked_len(data.len()));
    push_chunked(&mut out, data);

    out
}

/// Append the chunked form of `data` to `out`.
///
/// Input whose length is a multiple of eight still ends with an all-pad
/// terminal group, so every encoding carries exactly one terminal marker.
pub fn push_chunked(out: &mut Vec<u8>, data: &[u8]) {
    let mut groups = data.chunks_exact(CHUNK_DATA_LEN);
    for group in groups.by_ref() {
        out.extend_from_slice(group);
        out.push(MARKER_MORE);
    }

    let tail = groups.remainder();
    let mut padded = [0u8; CHUNK_DATA_LEN];
    padded[..tail.len()].copy_from_slice(tail);

    out.extend_from_slice(&padded);
    out.push(terminal_marker(tail.len()));
}

/// Decode the chunked value at the start of `encoded`.
///
/// Never fails: malformed markers and short input are reported through
/// [`ChunkTermination`] together with the bytes recovered so far. Bytes
/// after the terminal group are left for the caller (`consumed` tells
/// where they start).
#[must_use]
pub fn decode_chunked(encoded: &[u8]) -> ChunkDecoded {
    let mut bytes = Vec::with_capacity(encoded.len() / CHUNK_GROUP_LEN * CHUNK_DATA_LEN);
    let mut consumed = 0;

    for group in encoded.chunks_exact(CHUNK_GROUP_LEN) {
        let (payload, marker) = group.split_at(CHUNK_DATA_LEN);
        let marker = marker[0];
        let marker_offset = consumed + CHUNK_DATA_LEN;
        consumed += CHUNK_GROUP_LEN;

        if marker == MARKER_MORE {
            bytes.extend_from_slice(payload);
            continue;
        }

        let pad = usize::from(MARKER_MORE - marker);
        if pad > CHUNK_DATA_LEN {
            tracing::debug!(
                marker,
                offset = marker_offset,
                recovered = bytes.len(),
                "malformed chunk marker"
            );

            return ChunkDecoded {
                bytes,
                consumed,
                termination: ChunkTermination::MalformedMarker {
                    marker,
                    offset: marker_offset,
                },
            };
        }

        bytes.extend_from_slice(&payload[..CHUNK_DATA_LEN - pad]);

        return ChunkDecoded {
            bytes,
            consumed,
            termination: ChunkTermination::Terminal,
        };
    }

    ChunkDecoded {
        bytes,
        consumed,
        termination: ChunkTermination::Exhausted,
    }
}

// `real` is the payload count of the final group, always below eight.
#[expect(clippy::cast_possible_truncation)]
const fn terminal_marker(real: usize) -> u8 {
    MARKER_MORE - (CHUNK_DATA_LEN - real) as u8
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::{
        CHUNK_GROUP_LEN, ChunkTermination, MARKER_MORE, chunked_len, decode_chunked, encode_chunked,
    };
    use crate::error::{ErrorClass, ErrorOrigin};

    #[test]
    fn empty_input_encodes_as_single_all_pad_group() {
        assert_eq!(encode_chunked(&[]), vec![0, 0, 0, 0, 0, 0, 0, 0, 0xF7]);
    }

    #[test]
    fn golden_vectors_freeze_marker_arithmetic() {
        assert_eq!(
            encode_chunked(b"abc"),
            vec![b'a', b'b', b'c', 0, 0, 0, 0, 0, 0xFA]
        );

        let seven = encode_chunked(b"1234567");
        assert_eq!(seven.len(), CHUNK_GROUP_LEN);
        assert_eq!(seven[8], 0xFE);

        let eight = encode_chunked(b"12345678");
        assert_eq!(eight.len(), 2 * CHUNK_GROUP_LEN);
        assert_eq!(eight[8], MARKER_MORE);
        assert_eq!(&eight[9..], &[0, 0, 0, 0, 0, 0, 0, 0, 0xF7]);
    }

    #[test]
    fn encoded_len_is_always_whole_groups() {
        for len in [0usize, 1, 7, 8, 9, 16, 17, 64] {
            let data = vec![0xAB; len];
            let encoded = encode_chunked(&data);

            assert_eq!(encoded.len(), chunked_len(len), "len {len}");
            assert_eq!(encoded.len() % CHUNK_GROUP_LEN, 0, "len {len}");
        }
    }

    #[test]
    fn decode_reports_consumed_bytes_and_leaves_trailer() {
        let mut encoded = encode_chunked(b"table-row");
        let value_len = encoded.len();
        encoded.extend_from_slice(&[0xF9, 0x01, 0x02]);

        let decoded = decode_chunked(&encoded);

        assert_eq!(decoded.bytes, b"table-row");
        assert_eq!(decoded.consumed, value_len);
        assert_eq!(decoded.termination, ChunkTermination::Terminal);
        assert_eq!(encoded.len() - decoded.consumed, 3);
    }

    #[test]
    fn malformed_marker_stops_without_payload_or_panic() {
        let group = [b'x', b'y', 0, 0, 0, 0, 0, 0, 0x00];

        let decoded = decode_chunked(&group);

        assert!(decoded.bytes.is_empty());
        assert_eq!(decoded.consumed, CHUNK_GROUP_LEN);
        assert_eq!(
            decoded.termination,
            ChunkTermination::MalformedMarker {
                marker: 0x00,
                offset: 8,
            }
        );
    }

    #[test]
    fn malformed_marker_keeps_bytes_recovered_before_it() {
        let mut encoded = b"abcdefgh".to_vec();
        encoded.push(MARKER_MORE);
        encoded.extend_from_slice(&[1, 2, 3, 4, 5, 6, 7, 8, 0xF0]);

        let decoded = decode_chunked(&encoded);

        assert_eq!(decoded.bytes, b"abcdefgh");
        assert_eq!(decoded.consumed, 18);
        assert_eq!(
            decoded.termination,
            ChunkTermination::MalformedMarker {
                marker: 0xF0,
                offset: 17,
            }
        );

        let err = decoded.into_terminal().expect_err("not terminal");
        assert_eq!(err.class, ErrorClass::Malformed);
        assert_eq!(err.origin, ErrorOrigin::Chunk);
    }

    #[test]
    fn short_input_is_exhausted_not_terminal() {
        let decoded = decode_chunked(&[b't', 0x80, 0, 0]);

        assert!(decoded.bytes.is_empty());
        assert_eq!(decoded.consumed, 0);
        assert_eq!(decoded.termination, ChunkTermination::Exhausted);
        assert!(!decoded.is_terminal());

        let mut unterminated = b"abcdefgh".to_vec();
        unterminated.push(MARKER_MORE);
        let decoded = decode_chunked(&unterminated);

        assert_eq!(decoded.bytes, b"abcdefgh");
        assert_eq!(decoded.termination, ChunkTermination::Exhausted);
        assert!(decoded.into_terminal().is_err());
    }

    #[test]
    fn terminal_decode_converts_to_bytes() {
        let bytes = decode_chunked(&encode_chunked(b"ok"))
            .into_terminal()
            .expect("clean encoding should be terminal");

        assert_eq!(bytes, b"ok");
    }
}

//! Module: codec
//! Responsibility: byte-level memcomparable primitives (ordered i64, chunked
//! byte strings) and the hex helpers used to move raw bytes across text.
//! Does not own: the table-key grammar or index column framing.

mod chunk;
mod hex;
mod int;


pub use chunk::{
    CHUNK_DATA_LEN, CHUNK_GROUP_LEN, ChunkDecoded, ChunkTermination, MARKER_MORE, chunked_len,
    decode_chunked, encode_chunked, push_chunked,
};
pub use hex::{HexDecodeError, decode_hex, encode_hex, encode_hex_spaced};
pub use int::{I64_ENCODED_LEN, IntDecodeError, decode_i64, decode_i64_array, encode_i64};

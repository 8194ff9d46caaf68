//! Module: column
//! Responsibility: the tagged value sequence that trails an index key's
//! fixed-width prefix.
//! Does not own: index schemas; values are reported positionally only.

mod decode;
mod encode;


pub use decode::decode_column_values;
pub use encode::{ColumnEncodeError, encode_column_values};

use crate::codec::{ChunkTermination, encode_hex};
use derive_more::{Deref, IntoIterator};
use serde::{Serialize, Serializer, ser::SerializeStruct};
use std::fmt;

///
/// ColumnTag
///
/// Type flags that prefix each index column value.
///
/// IMPORTANT:
/// Tag values are fixed by the store's key format.
///

#[repr(u8)]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ColumnTag {
    Bytes = 0x01,
    Int = 0x03,
}

impl ColumnTag {
    #[must_use]
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub const fn from_u8(tag: u8) -> Option<Self> {
        match tag {
            0x01 => Some(Self::Bytes),
            0x03 => Some(Self::Int),
            _ => None,
        }
    }
}

///
/// ColumnValue
///
/// One positional index column. `TruncatedInt`, `TruncatedBytes` and
/// `Unknown` end a sequence; nothing after them is interpreted.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ColumnValue {
    Int(i64),
    TruncatedInt,
    Bytes(#[serde(serialize_with = "serialize_column_bytes")] Vec<u8>),

    /// Byte string whose chunk groups did not end in a terminal marker.
    /// `bytes` holds what was recovered before decoding stopped.
    TruncatedBytes {
        #[serde(serialize_with = "serialize_column_bytes")]
        bytes: Vec<u8>,
        termination: ChunkTermination,
    },

    Unknown(u8),
}

impl ColumnValue {
    /// Text view of a byte-string column when it decodes cleanly as UTF-8.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Bytes(bytes) => clean_text(bytes),
            _ => None,
        }
    }

    /// Whether this value stops column decoding.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::TruncatedInt | Self::TruncatedBytes { .. } | Self::Unknown(_)
        )
    }

    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Int(_) => "int",
            Self::TruncatedInt => "truncated_int",
            Self::Bytes(_) => "bytes",
            Self::TruncatedBytes { .. } => "truncated_bytes",
            Self::Unknown(_) => "unknown",
        }
    }
}

impl fmt::Display for ColumnValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "int={value}"),
            Self::TruncatedInt => write!(f, "int=<truncated>"),
            Self::Bytes(bytes) => match clean_text(bytes) {
                Some(text) => write!(f, "str={text:?}"),
                None => write!(f, "bytes=<{} bytes>", bytes.len()),
            },
            Self::TruncatedBytes { bytes, termination } => match termination {
                ChunkTermination::MalformedMarker { marker, .. } => write!(
                    f,
                    "bytes=<malformed marker 0x{marker:02x}, {} bytes recovered>",
                    bytes.len()
                ),
                _ => write!(f, "bytes=<truncated, {} bytes recovered>", bytes.len()),
            },
            Self::Unknown(tag) => write!(f, "unknown_type=0x{tag:02x}"),
        }
    }
}

///
/// ColumnValues
///

#[derive(Clone, Debug, Default, Deref, Eq, IntoIterator, PartialEq, Serialize)]
#[into_iterator(owned, ref)]
#[serde(transparent)]
pub struct ColumnValues(Vec<ColumnValue>);

impl ColumnValues {
    #[must_use]
    pub const fn new(values: Vec<ColumnValue>) -> Self {
        Self(values)
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<ColumnValue> {
        self.0
    }
}

impl From<Vec<ColumnValue>> for ColumnValues {
    fn from(values: Vec<ColumnValue>) -> Self {
        Self(values)
    }
}

impl fmt::Display for ColumnValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, value) in self.0.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{value}")?;
        }

        Ok(())
    }
}

// Valid UTF-8 that does not already carry replacement characters.
fn clean_text(bytes: &[u8]) -> Option<&str> {
    std::str::from_utf8(bytes)
        .ok()
        .filter(|text| !text.contains(char::REPLACEMENT_CHARACTER))
}

fn serialize_column_bytes<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut state = serializer.serialize_struct("ColumnBytes", 2)?;
    state.serialize_field("hex", &encode_hex(bytes))?;
    state.serialize_field("text", &clean_text(bytes))?;
    state.end()
}

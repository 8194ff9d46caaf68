//! Module: key
//! Responsibility: the table-store key grammar (`t{table_id}{_r|_i}{id}...`)
//! in both directions, for logical and chunk-wrapped raw keys.
//! Does not own: byte-level primitives (see `codec`) or index column
//! framing (see `column`).

mod build;
mod parse;
mod range;

#[cfg(test)]
mod tests;

pub use build::{
    encode_index_key, encode_key_prefix, encode_logical_prefix, encode_record_key,
    encode_table_prefix,
};
pub use parse::{DecodedKey, NormalizedKey, decode_key, is_index_key, parse_logical};
pub use range::ScanRange;

use crate::{codec::I64_ENCODED_LEN, column::ColumnValues};
use serde::{Serialize, Serializer};
use std::{fmt, str::FromStr};

///
/// CONSTANTS
///

/// First byte of every table key.
pub const TABLE_PREFIX: u8 = b't';

/// First byte after the table key space; used as an open upper bound.
pub const TABLE_SPACE_END: u8 = b'u';

pub const TAG_LEN: usize = 2;

/// `t` + table id.
pub const TABLE_KEY_LEN: usize = 1 + I64_ENCODED_LEN;

/// `t` + table id + tag.
pub const TAGGED_PREFIX_LEN: usize = TABLE_KEY_LEN + TAG_LEN;

/// `t` + table id + tag + row/index id.
pub const ENTITY_KEY_LEN: usize = TAGGED_PREFIX_LEN + I64_ENCODED_LEN;

const TABLE_KEY_TOO_SHORT: &str = "table key too short";

///
/// KeyMode
///
/// How a key was retrieved. Keys are not self-describing; the caller must
/// know whether the store handed back chunk-wrapped or logical bytes.
///

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyMode {
    /// Whole key passed through the chunk encoder (raw KV client).
    #[default]
    Raw,

    /// Plain concatenation of tag bytes and fixed-width ids (transactional client).
    Logical,
}

impl KeyMode {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Raw => "raw",
            Self::Logical => "logical",
        }
    }
}

impl fmt::Display for KeyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for KeyMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "raw" => Ok(Self::Raw),
            "logical" | "txn" => Ok(Self::Logical),
            other => Err(format!("unknown key mode '{other}' (expected raw|logical)")),
        }
    }
}

///
/// EntityTag
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityTag {
    Record,
    Index,
}

impl EntityTag {
    const RECORD_BYTES: [u8; TAG_LEN] = *b"_r";
    const INDEX_BYTES: [u8; TAG_LEN] = *b"_i";

    #[must_use]
    pub const fn bytes(self) -> [u8; TAG_LEN] {
        match self {
            Self::Record => Self::RECORD_BYTES,
            Self::Index => Self::INDEX_BYTES,
        }
    }

    #[must_use]
    pub const fn from_bytes(bytes: [u8; TAG_LEN]) -> Option<Self> {
        match bytes {
            Self::RECORD_BYTES => Some(Self::Record),
            Self::INDEX_BYTES => Some(Self::Index),
            _ => None,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Record => "record",
            Self::Index => "index",
        }
    }
}

impl FromStr for EntityTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "record" | "r" => Ok(Self::Record),
            "index" | "i" => Ok(Self::Index),
            other => Err(format!(
                "unknown entity tag '{other}' (expected record|index)"
            )),
        }
    }
}

///
/// KeyStructure
///
/// Result of probing one logical key against the table-key grammar. Every
/// branch of the grammar is a variant: truncation and unrecognized tags are
/// ordinary outcomes, because keys from other key spaces get probed too.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum KeyStructure {
    NotATableKey,

    Truncated { reason: &'static str, len: usize },

    TablePrefix { table_id: i64 },

    /// `row_id` is `None` when the key stops before the row id.
    Record { table_id: i64, row_id: Option<i64> },

    /// `index_id` is `None` when the key stops before the index id.
    Index {
        table_id: i64,
        index_id: Option<i64>,
        columns: ColumnValues,
    },

    UnknownTag {
        table_id: i64,
        #[serde(serialize_with = "serialize_tag")]
        tag: [u8; TAG_LEN],
    },
}

impl KeyStructure {
    #[must_use]
    pub const fn table_id(&self) -> Option<i64> {
        match self {
            Self::TablePrefix { table_id }
            | Self::Record { table_id, .. }
            | Self::Index { table_id, .. }
            | Self::UnknownTag { table_id, .. } => Some(*table_id),
            Self::NotATableKey | Self::Truncated { .. } => None,
        }
    }

    #[must_use]
    pub const fn entity_tag(&self) -> Option<EntityTag> {
        match self {
            Self::Record { .. } => Some(EntityTag::Record),
            Self::Index { .. } => Some(EntityTag::Index),
            _ => None,
        }
    }

    /// Index columns, if this is an index key that carried any.
    #[must_use]
    pub fn columns(&self) -> Option<&ColumnValues> {
        match self {
            Self::Index { columns, .. } if !columns.is_empty() => Some(columns),
            _ => None,
        }
    }

    // Variants that reached the tag position.
    const fn has_tag(&self) -> bool {
        matches!(
            self,
            Self::Record { .. } | Self::Index { .. } | Self::UnknownTag { .. }
        )
    }
}

impl fmt::Display for KeyStructure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotATableKey => f.write_str("not a table key"),
            Self::Truncated { reason, len } => write!(f, "{reason} ({len} bytes)"),
            Self::TablePrefix { table_id } => write!(f, "table_id={table_id}"),
            Self::Record {
                table_id,
                row_id: Some(row_id),
            } => write!(f, "table_id={table_id}, record, row_id={row_id}"),
            Self::Record {
                table_id,
                row_id: None,
            } => write!(f, "table_id={table_id}, record (row_id truncated)"),
            Self::Index {
                table_id,
                index_id: Some(index_id),
                ..
            } => write!(f, "table_id={table_id}, index_id={index_id}"),
            Self::Index {
                table_id,
                index_id: None,
                ..
            } => write!(f, "table_id={table_id}, index (index_id truncated)"),
            Self::UnknownTag { table_id, tag } => write!(
                f,
                "table_id={table_id}, unknown tag {:02x}{:02x}",
                tag[0], tag[1]
            ),
        }
    }
}

fn serialize_tag<S>(tag: &[u8; TAG_LEN], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&crate::codec::encode_hex(tag))
}

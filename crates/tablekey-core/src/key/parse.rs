use crate::{
    codec::{ChunkTermination, decode_chunked, decode_i64},
    column::{ColumnValues, decode_column_values},
    key::{
        ENTITY_KEY_LEN, EntityTag, KeyMode, KeyStructure, TABLE_KEY_LEN, TABLE_KEY_TOO_SHORT,
        TABLE_PREFIX, TAG_LEN, TAGGED_PREFIX_LEN,
    },
};
use serde::Serialize;
use std::{borrow::Cow, fmt};

///
/// NormalizedKey
///
/// Logical key bytes after the mode-specific unwrapping step. The grammar
/// only ever sees this form.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NormalizedKey<'a> {
    pub logical: Cow<'a, [u8]>,
    /// Raw mode only: input bytes left after the chunk-encoded key.
    pub trailing: Option<usize>,
    /// Raw mode only: how chunk unwrapping ended.
    pub chunk: Option<ChunkTermination>,
}

impl KeyMode {
    /// Unwrap `input` into logical key bytes for this mode.
    #[must_use]
    pub fn normalize(self, input: &[u8]) -> NormalizedKey<'_> {
        match self {
            Self::Logical => NormalizedKey {
                logical: Cow::Borrowed(input),
                trailing: None,
                chunk: None,
            },
            Self::Raw => {
                let decoded = decode_chunked(input);

                NormalizedKey {
                    trailing: Some(input.len() - decoded.consumed),
                    chunk: Some(decoded.termination),
                    logical: Cow::Owned(decoded.bytes),
                }
            }
        }
    }
}

///
/// DecodedKey
///
/// One key probed in a given mode. `trailing` counts raw-mode bytes after
/// the chunk-encoded key (versioning metadata appended by the store); they
/// are reported, never interpreted.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct DecodedKey {
    pub mode: KeyMode,
    pub structure: KeyStructure,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trailing: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chunk: Option<ChunkTermination>,
}

impl DecodedKey {
    #[must_use]
    pub const fn is_index(&self) -> bool {
        matches!(self.structure, KeyStructure::Index { .. })
    }

    /// Trailing raw bytes, when there are any.
    #[must_use]
    pub fn trailing_bytes(&self) -> Option<usize> {
        self.trailing.filter(|&n| n > 0)
    }
}

impl fmt::Display for DecodedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.structure, self.mode) {
            (KeyStructure::Truncated { reason, len }, KeyMode::Raw) => {
                write!(f, "{reason} ({len} decoded bytes)")?;
            }
            (structure, _) => write!(f, "{structure}")?,
        }

        if self.structure.has_tag()
            && let Some(trailing) = self.trailing_bytes()
        {
            write!(f, " (+ {trailing} bytes mvcc)")?;
        }

        Ok(())
    }
}

/// Decode `input` as a table-store key retrieved in `mode`.
#[must_use]
pub fn decode_key(input: &[u8], mode: KeyMode) -> DecodedKey {
    let normalized = mode.normalize(input);
    let structure = parse_logical(&normalized.logical);

    DecodedKey {
        mode,
        structure,
        trailing: normalized.trailing,
        chunk: normalized.chunk,
    }
}

/// Run the table-key grammar over logical key bytes.
#[must_use]
pub fn parse_logical(key: &[u8]) -> KeyStructure {
    if key.first() != Some(&TABLE_PREFIX) {
        return KeyStructure::NotATableKey;
    }

    let Some(table_id) = read_id(key, 1) else {
        return KeyStructure::Truncated {
            reason: TABLE_KEY_TOO_SHORT,
            len: key.len(),
        };
    };

    let Some(tag) = read_tag(key) else {
        return KeyStructure::TablePrefix { table_id };
    };

    match EntityTag::from_bytes(tag) {
        Some(EntityTag::Record) => KeyStructure::Record {
            table_id,
            row_id: read_id(key, TAGGED_PREFIX_LEN),
        },
        Some(EntityTag::Index) => {
            let index_id = read_id(key, TAGGED_PREFIX_LEN);
            let columns = match (index_id, key.get(ENTITY_KEY_LEN..)) {
                (Some(_), Some(rest)) if !rest.is_empty() => decode_column_values(rest),
                _ => ColumnValues::default(),
            };

            KeyStructure::Index {
                table_id,
                index_id,
                columns,
            }
        }
        None => {
            tracing::debug!(
                table_id,
                tag0 = tag[0],
                tag1 = tag[1],
                "unknown table key tag"
            );
            KeyStructure::UnknownTag { table_id, tag }
        }
    }
}

/// Whether `input` is an index key once unwrapped for `mode`.
#[must_use]
pub fn is_index_key(input: &[u8], mode: KeyMode) -> bool {
    let normalized = mode.normalize(input);
    let key = normalized.logical.as_ref();

    key.first() == Some(&TABLE_PREFIX) && read_tag(key) == Some(EntityTag::Index.bytes())
}

// Fixed-width id at `offset`; `None` when the key ends first.
fn read_id(key: &[u8], offset: usize) -> Option<i64> {
    key.get(offset..).and_then(|window| decode_i64(window).ok())
}

fn read_tag(key: &[u8]) -> Option<[u8; TAG_LEN]> {
    key.get(TABLE_KEY_LEN..TAGGED_PREFIX_LEN)
        .and_then(|tag| tag.try_into().ok())
}

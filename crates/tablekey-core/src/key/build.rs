use crate::{
    codec::{encode_chunked, encode_i64},
    column::{ColumnValue, encode_column_values},
    error::CodecError,
    key::{ENTITY_KEY_LEN, EntityTag, KeyMode, TABLE_PREFIX, TAGGED_PREFIX_LEN},
};

/// `'t' + table_id [+ tag]` in logical form.
#[must_use]
pub fn encode_logical_prefix(table_id: i64, tag: Option<EntityTag>) -> Vec<u8> {
    let mut out = Vec::with_capacity(TAGGED_PREFIX_LEN);
    out.push(TABLE_PREFIX);
    out.extend_from_slice(&encode_i64(table_id));
    if let Some(tag) = tag {
        out.extend_from_slice(&tag.bytes());
    }

    out
}

/// Prefix of every key under `table_id`, in `mode`.
#[must_use]
pub fn encode_table_prefix(table_id: i64, mode: KeyMode) -> Vec<u8> {
    encode_key_prefix(table_id, None, mode)
}

/// Prefix of `table_id` keys, optionally narrowed to one entity kind.
#[must_use]
pub fn encode_key_prefix(table_id: i64, tag: Option<EntityTag>, mode: KeyMode) -> Vec<u8> {
    apply_mode(encode_logical_prefix(table_id, tag), mode)
}

/// Full record key for one row.
#[must_use]
pub fn encode_record_key(table_id: i64, row_id: i64, mode: KeyMode) -> Vec<u8> {
    let mut logical = encode_logical_prefix(table_id, Some(EntityTag::Record));
    logical.extend_from_slice(&encode_i64(row_id));

    apply_mode(logical, mode)
}

/// Full index key, with its column values appended after the index id.
pub fn encode_index_key(
    table_id: i64,
    index_id: i64,
    columns: &[ColumnValue],
    mode: KeyMode,
) -> Result<Vec<u8>, CodecError> {
    let column_bytes = encode_column_values(columns)?;

    let mut logical = Vec::with_capacity(ENTITY_KEY_LEN + column_bytes.len());
    logical.extend_from_slice(&encode_logical_prefix(table_id, Some(EntityTag::Index)));
    logical.extend_from_slice(&encode_i64(index_id));
    logical.extend_from_slice(&column_bytes);

    Ok(apply_mode(logical, mode))
}

pub(super) fn apply_mode(logical: Vec<u8>, mode: KeyMode) -> Vec<u8> {
    match mode {
        KeyMode::Raw => encode_chunked(&logical),
        KeyMode::Logical => logical,
    }
}

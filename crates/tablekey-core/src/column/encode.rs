use crate::{
    codec::{encode_i64, push_chunked},
    column::{ColumnTag, ColumnValue},
};
use thiserror::Error as ThisError;

///
/// ColumnEncodeError
///
/// Decode-only markers have no wire form.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, ThisError)]
pub enum ColumnEncodeError {
    #[error("column kind '{kind}' at position {position} has no encoding")]
    NotEncodable { kind: &'static str, position: usize },
}

/// Encode a column sequence as it appears after an index key prefix.
pub fn encode_column_values(values: &[ColumnValue]) -> Result<Vec<u8>, ColumnEncodeError> {
    let mut out = Vec::new();
    for (position, value) in values.iter().enumerate() {
        push_column_value(&mut out, value)
            .map_err(|kind| ColumnEncodeError::NotEncodable { kind, position })?;
    }

    Ok(out)
}

// Append one tagged column value; returns the value kind when it has no
// wire form.
fn push_column_value(out: &mut Vec<u8>, value: &ColumnValue) -> Result<(), &'static str> {
    match value {
        ColumnValue::Int(v) => {
            out.push(ColumnTag::Int.to_u8());
            out.extend_from_slice(&encode_i64(*v));
            Ok(())
        }
        ColumnValue::Bytes(bytes) => {
            out.push(ColumnTag::Bytes.to_u8());
            push_chunked(out, bytes);
            Ok(())
        }
        ColumnValue::TruncatedInt
        | ColumnValue::TruncatedBytes { .. }
        | ColumnValue::Unknown(_) => Err(value.kind()),
    }
}

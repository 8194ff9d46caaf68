use crate::{
    codec::{I64_ENCODED_LEN, decode_chunked, decode_i64},
    column::{ColumnTag, ColumnValue, ColumnValues},
};

/// Decode the column values that follow an index key's fixed-width prefix.
///
/// Scanning stops at the end of input, after a truncated integer or byte
/// string, or at the first unrecognized type tag. A byte string without a
/// terminal group keeps the bytes recovered before the damage.
#[must_use]
pub fn decode_column_values(data: &[u8]) -> ColumnValues {
    let mut values = Vec::new();
    let mut pos = 0;

    while let Some(&tag) = data.get(pos) {
        pos += 1;

        match ColumnTag::from_u8(tag) {
            Some(ColumnTag::Int) => {
                if let Ok(value) = decode_i64(&data[pos..]) {
                    values.push(ColumnValue::Int(value));
                    pos += I64_ENCODED_LEN;
                } else {
                    tracing::debug!(
                        offset = pos,
                        remaining = data.len() - pos,
                        "truncated int column"
                    );
                    values.push(ColumnValue::TruncatedInt);
                    break;
                }
            }
            Some(ColumnTag::Bytes) => {
                let decoded = decode_chunked(&data[pos..]);
                pos += decoded.consumed;

                if decoded.is_terminal() {
                    values.push(ColumnValue::Bytes(decoded.bytes));
                } else {
                    tracing::debug!(
                        offset = pos,
                        recovered = decoded.bytes.len(),
                        "unterminated byte-string column"
                    );
                    values.push(ColumnValue::TruncatedBytes {
                        bytes: decoded.bytes,
                        termination: decoded.termination,
                    });
                    break;
                }
            }
            None => {
                tracing::debug!(tag, offset = pos - 1, "unknown column type tag");
                values.push(ColumnValue::Unknown(tag));
                break;
            }
        }
    }

    ColumnValues::new(values)
}

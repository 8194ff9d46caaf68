use crate::{
    codec::encode_hex_spaced,
    key::{EntityTag, KeyMode, TABLE_PREFIX, TABLE_SPACE_END, build::apply_mode, encode_key_prefix},
};
use serde::Serialize;
use std::fmt;

///
/// ScanRange
///
/// Half-open `[start, end)` byte range for a store scan.
///
/// The end bound of a table scan is the prefix of the next table id: the
/// ordered integer and chunk encodings put every key of table N strictly
/// below the bare prefix of table N + 1.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ScanRange {
    pub start: Vec<u8>,
    pub end: Vec<u8>,
}

impl ScanRange {
    /// All keys of `table_id`, optionally only records or only indexes.
    #[must_use]
    pub fn for_table(table_id: i64, tag: Option<EntityTag>, mode: KeyMode) -> Self {
        let start = encode_key_prefix(table_id, tag, mode);
        let end = match table_id.checked_add(1) {
            Some(next) => encode_key_prefix(next, None, mode),
            // No table after i64::MAX; close the range at the end of the table space.
            None => apply_mode(vec![TABLE_SPACE_END], mode),
        };

        Self { start, end }
    }

    /// Every table key. Chunk-wrapped table keys also begin with `t`, so the
    /// bare bounds hold in both modes.
    #[must_use]
    pub fn all_tables() -> Self {
        Self {
            start: vec![TABLE_PREFIX],
            end: vec![TABLE_SPACE_END],
        }
    }

    #[must_use]
    pub fn contains(&self, key: &[u8]) -> bool {
        self.start.as_slice() <= key && key < self.end.as_slice()
    }
}

impl fmt::Display for ScanRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "start_key (hex): {}\nend_key   (hex): {}",
            encode_hex_spaced(&self.start),
            encode_hex_spaced(&self.end)
        )
    }
}

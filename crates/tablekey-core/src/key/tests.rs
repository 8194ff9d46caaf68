use crate::{
    codec::{ChunkTermination, encode_chunked, encode_i64},
    column::{ColumnTag, ColumnValue, ColumnValues},
    key::{
        DecodedKey, EntityTag, KeyMode, KeyStructure, ScanRange, decode_key, encode_index_key,
        encode_key_prefix, encode_logical_prefix, encode_record_key, encode_table_prefix,
        is_index_key, parse_logical,
    },
};
use proptest::prelude::*;

const TABLE_ID: i64 = 11_875;

fn logical_record_key(table_id: i64, row_id: i64) -> Vec<u8> {
    let mut key = vec![b't'];
    key.extend_from_slice(&encode_i64(table_id));
    key.extend_from_slice(b"_r");
    key.extend_from_slice(&encode_i64(row_id));
    key
}

//
// Grammar
//

#[test]
fn record_key_scenario_decodes_table_and_row() {
    let key = logical_record_key(TABLE_ID, 42);

    assert_eq!(
        parse_logical(&key),
        KeyStructure::Record {
            table_id: TABLE_ID,
            row_id: Some(42),
        }
    );
}

#[test]
fn logical_prefix_round_trips_then_extends_to_full_record() {
    let mut key = encode_logical_prefix(TABLE_ID, Some(EntityTag::Record));

    let decoded = decode_key(&key, KeyMode::Logical);
    assert_eq!(
        decoded.structure,
        KeyStructure::Record {
            table_id: TABLE_ID,
            row_id: None,
        }
    );
    assert_eq!(decoded.trailing, None);

    key.extend_from_slice(&encode_i64(-99));
    assert_eq!(
        decode_key(&key, KeyMode::Logical).structure,
        KeyStructure::Record {
            table_id: TABLE_ID,
            row_id: Some(-99),
        }
    );
}

#[test]
fn non_table_and_empty_keys_are_not_table_keys() {
    assert_eq!(parse_logical(&[]), KeyStructure::NotATableKey);
    assert_eq!(parse_logical(b"m_meta"), KeyStructure::NotATableKey);
    assert_eq!(
        decode_key(&[], KeyMode::Raw).structure,
        KeyStructure::NotATableKey
    );
}

#[test]
fn short_table_key_is_truncated_with_length() {
    let structure = parse_logical(&[b't', 0x80, 0x00, 0x00, 0x00]);

    assert_eq!(
        structure,
        KeyStructure::Truncated {
            reason: "table key too short",
            len: 5,
        }
    );
    assert_eq!(structure.to_string(), "table key too short (5 bytes)");
}

#[test]
fn table_id_without_tag_is_a_table_prefix() {
    let mut key = encode_logical_prefix(-3, None);
    assert_eq!(
        parse_logical(&key),
        KeyStructure::TablePrefix { table_id: -3 }
    );

    // One tag byte is still not a tag.
    key.push(b'_');
    assert_eq!(
        parse_logical(&key),
        KeyStructure::TablePrefix { table_id: -3 }
    );
}

#[test]
fn unknown_tag_keeps_raw_tag_bytes() {
    let mut key = encode_logical_prefix(7, None);
    key.extend_from_slice(b"_x");
    key.extend_from_slice(&encode_i64(1));

    let structure = parse_logical(&key);

    assert_eq!(
        structure,
        KeyStructure::UnknownTag {
            table_id: 7,
            tag: *b"_x",
        }
    );
    assert_eq!(structure.to_string(), "table_id=7, unknown tag 5f78");
}

#[test]
fn index_key_without_columns_has_empty_column_list() {
    let mut key = encode_logical_prefix(TABLE_ID, Some(EntityTag::Index));
    key.extend_from_slice(&encode_i64(3));

    let structure = parse_logical(&key);

    assert_eq!(
        structure,
        KeyStructure::Index {
            table_id: TABLE_ID,
            index_id: Some(3),
            columns: ColumnValues::default(),
        }
    );
    assert!(structure.columns().is_none());
    assert_eq!(structure.to_string(), "table_id=11875, index_id=3");
}

#[test]
fn index_key_with_one_string_column_decodes_column() {
    let mut key = encode_logical_prefix(TABLE_ID, Some(EntityTag::Index));
    key.extend_from_slice(&encode_i64(1));
    key.push(ColumnTag::Bytes.to_u8());
    key.extend_from_slice(&encode_chunked(b"abc"));

    let structure = parse_logical(&key);
    let columns = structure.columns().expect("index columns");

    assert_eq!(columns.len(), 1);
    assert_eq!(columns[0].as_str(), Some("abc"));
}

#[test]
fn truncated_index_id_reports_no_columns() {
    let mut key = encode_logical_prefix(TABLE_ID, Some(EntityTag::Index));
    key.extend_from_slice(&[0x80, 0x00]);

    let structure = parse_logical(&key);

    assert_eq!(
        structure,
        KeyStructure::Index {
            table_id: TABLE_ID,
            index_id: None,
            columns: ColumnValues::default(),
        }
    );
    assert_eq!(
        structure.to_string(),
        "table_id=11875, index (index_id truncated)"
    );
}

//
// Modes
//

#[test]
fn raw_mode_unwraps_chunks_and_counts_trailing_bytes() {
    let mut raw = encode_record_key(TABLE_ID, 42, KeyMode::Raw);
    raw.extend_from_slice(&[0xF9, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01]);

    let decoded = decode_key(&raw, KeyMode::Raw);

    assert_eq!(
        decoded.structure,
        KeyStructure::Record {
            table_id: TABLE_ID,
            row_id: Some(42),
        }
    );
    assert_eq!(decoded.trailing, Some(8));
    assert_eq!(decoded.chunk, Some(ChunkTermination::Terminal));
    assert_eq!(
        decoded.to_string(),
        "table_id=11875, record, row_id=42 (+ 8 bytes mvcc)"
    );
}

#[test]
fn raw_mode_without_trailer_has_no_suffix() {
    let raw = encode_record_key(TABLE_ID, 42, KeyMode::Raw);
    let decoded = decode_key(&raw, KeyMode::Raw);

    assert_eq!(decoded.trailing, Some(0));
    assert_eq!(decoded.trailing_bytes(), None);
    assert_eq!(decoded.to_string(), "table_id=11875, record, row_id=42");
}

#[test]
fn same_logical_bytes_parse_identically_in_both_modes() {
    let logical = encode_index_key(
        TABLE_ID,
        2,
        &[ColumnValue::Int(10), ColumnValue::Bytes(b"k".to_vec())],
        KeyMode::Logical,
    )
    .expect("index key should encode");
    let raw = encode_chunked(&logical);

    let from_logical = decode_key(&logical, KeyMode::Logical);
    let from_raw = decode_key(&raw, KeyMode::Raw);

    assert_eq!(from_logical.structure, from_raw.structure);
    assert!(from_raw.is_index());
}

#[test]
fn raw_truncated_key_wording_mentions_decoded_bytes() {
    let raw = encode_chunked(&[b't', 0x80]);
    let decoded = decode_key(&raw, KeyMode::Raw);

    assert_eq!(decoded.to_string(), "table key too short (2 decoded bytes)");
}

#[test]
fn logical_key_read_in_raw_mode_is_not_a_table_key() {
    // The last table-id byte (0x01) lands in the marker slot.
    let decoded = decode_key(&encode_logical_prefix(1, None), KeyMode::Raw);

    assert_eq!(decoded.structure, KeyStructure::NotATableKey);
    assert_eq!(
        decoded.chunk,
        Some(ChunkTermination::MalformedMarker {
            marker: 0x01,
            offset: 8,
        })
    );
    assert_eq!(decoded.trailing, Some(0));

    let short = decode_key(&[b't', 0x80, 0x00], KeyMode::Raw);
    assert_eq!(short.chunk, Some(ChunkTermination::Exhausted));
    assert_eq!(short.trailing, Some(3));
}

#[test]
fn index_classification_follows_mode() {
    let logical = encode_key_prefix(5, Some(EntityTag::Index), KeyMode::Logical);
    let raw = encode_key_prefix(5, Some(EntityTag::Index), KeyMode::Raw);
    let record = encode_record_key(5, 1, KeyMode::Logical);

    assert!(is_index_key(&logical, KeyMode::Logical));
    assert!(is_index_key(&raw, KeyMode::Raw));
    assert!(!is_index_key(&raw, KeyMode::Logical));
    assert!(!is_index_key(&record, KeyMode::Logical));
}

#[test]
fn mode_and_tag_parse_from_cli_words() {
    assert_eq!("raw".parse::<KeyMode>(), Ok(KeyMode::Raw));
    assert_eq!(" Logical ".parse::<KeyMode>(), Ok(KeyMode::Logical));
    assert_eq!("txn".parse::<KeyMode>(), Ok(KeyMode::Logical));
    assert!("chunked".parse::<KeyMode>().is_err());

    assert_eq!("record".parse::<EntityTag>(), Ok(EntityTag::Record));
    assert_eq!("INDEX".parse::<EntityTag>(), Ok(EntityTag::Index));
    assert!("row".parse::<EntityTag>().is_err());
}

#[test]
fn decoded_key_json_uses_kind_tags() {
    let decoded = DecodedKey {
        mode: KeyMode::Logical,
        structure: KeyStructure::UnknownTag {
            table_id: 1,
            tag: *b"_z",
        },
        trailing: None,
        chunk: None,
    };

    let json = serde_json::to_value(&decoded).expect("decoded key should serialize");

    assert_eq!(json["mode"], "logical");
    assert_eq!(json["structure"]["kind"], "unknown_tag");
    assert_eq!(json["structure"]["tag"], "5f7a");
    assert!(json.get("trailing").is_none());
}

//
// Ranges
//

#[test]
fn table_range_matches_prefix_layout() {
    let range = ScanRange::for_table(TABLE_ID, Some(EntityTag::Record), KeyMode::Logical);

    assert_eq!(
        range.start,
        encode_logical_prefix(TABLE_ID, Some(EntityTag::Record))
    );
    assert_eq!(
        range.end,
        encode_table_prefix(TABLE_ID + 1, KeyMode::Logical)
    );
    assert!(range.contains(&logical_record_key(TABLE_ID, 0)));
    assert!(range.contains(&logical_record_key(TABLE_ID, i64::MAX)));
    assert!(!range.contains(&logical_record_key(TABLE_ID + 1, i64::MIN)));
}

#[test]
fn max_table_range_is_closed_by_table_space_end() {
    for mode in [KeyMode::Raw, KeyMode::Logical] {
        let range = ScanRange::for_table(i64::MAX, None, mode);
        let key = encode_record_key(i64::MAX, i64::MAX, mode);

        assert!(range.contains(&key), "mode {mode}");
    }
}

#[test]
fn all_tables_range_covers_both_modes() {
    let range = ScanRange::all_tables();
    let lowest_raw = encode_record_key(i64::MIN, 0, KeyMode::Raw);
    let highest_logical = encode_record_key(i64::MAX, 0, KeyMode::Logical);

    assert!(range.contains(&lowest_raw));
    assert!(range.contains(&highest_logical));
    assert!(!range.contains(b"m_meta"));

    let rendered = range.to_string();
    assert_eq!(rendered, "start_key (hex): 74\nend_key   (hex): 75");
}

#[test]
fn next_table_prefix_bounds_sweep_including_negative_ids() {
    for table_id in -300i64..300 {
        let end = encode_table_prefix(table_id + 1, KeyMode::Raw);
        let keys = [
            encode_table_prefix(table_id, KeyMode::Raw),
            encode_key_prefix(table_id, Some(EntityTag::Index), KeyMode::Raw),
            encode_record_key(table_id, i64::MAX, KeyMode::Raw),
            encode_index_key(
                table_id,
                i64::MAX,
                &[ColumnValue::Bytes(vec![0xFF; 20])],
                KeyMode::Raw,
            )
            .expect("bytes column should encode"),
        ];

        for key in keys {
            assert!(key < end, "table {table_id}: key sorts past next table");
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1024))]

    #[test]
    fn raw_next_table_prefix_bounds_every_key_property(
        table_id in (i64::MIN..i64::MAX),
        row_id in any::<i64>(),
        trailer in proptest::collection::vec(any::<u8>(), 0..12),
    ) {
        let end = encode_table_prefix(table_id + 1, KeyMode::Raw);
        let mut key = encode_record_key(table_id, row_id, KeyMode::Raw);
        key.extend_from_slice(&trailer);

        prop_assert!(key < end);
        prop_assert!(ScanRange::for_table(table_id, None, KeyMode::Raw).contains(&key));
    }

    #[test]
    fn record_key_round_trip_property(
        table_id in any::<i64>(),
        row_id in any::<i64>(),
        raw in any::<bool>(),
    ) {
        let mode = if raw { KeyMode::Raw } else { KeyMode::Logical };
        let key = encode_record_key(table_id, row_id, mode);

        prop_assert_eq!(
            decode_key(&key, mode).structure,
            KeyStructure::Record { table_id, row_id: Some(row_id) }
        );
    }
}

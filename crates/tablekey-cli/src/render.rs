//! Reports printed by the inspector, as text lines or as JSON.

use crate::config::InspectConfig;
use serde::Serialize;
use std::io::{self, Write};
use tablekey_core::{
    codec::{encode_hex, encode_hex_spaced},
    key::{DecodedKey, EntityTag, KeyMode, ScanRange, decode_key, is_index_key},
    value::{HandleCandidates, extract_ascii_strings},
};

///
/// KeyReport
///

#[derive(Debug, Serialize)]
pub(crate) struct KeyReport {
    pub hex: String,
    pub decoded: DecodedKey,
    #[serde(skip)]
    bytes: Vec<u8>,
}

impl KeyReport {
    pub(crate) fn build(key: &[u8], mode: KeyMode) -> Self {
        Self {
            hex: encode_hex(key),
            decoded: decode_key(key, mode),
            bytes: key.to_vec(),
        }
    }

    fn write_text(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "  key (hex):  {}", encode_hex_spaced(&self.bytes))?;
        writeln!(out, "  key (tidb): {}", self.decoded)?;
        if let Some(columns) = self.decoded.structure.columns() {
            writeln!(out, "  key (index): {columns}")?;
        }

        Ok(())
    }
}

///
/// ValueReport
///

#[derive(Debug, Serialize)]
pub(crate) struct ValueReport {
    pub hex: String,
    pub len: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handle_candidates: Option<HandleCandidates>,
    pub strings: Vec<String>,
    #[serde(skip)]
    bytes: Vec<u8>,
}

impl ValueReport {
    /// `probe_handles` is false for values whose key is not an index key.
    pub(crate) fn build(value: &[u8], probe_handles: bool, config: &InspectConfig) -> Self {
        Self {
            hex: encode_hex(value),
            len: value.len(),
            handle_candidates: probe_handles.then(|| config.probes.probe(value)),
            strings: extract_ascii_strings(value, config.min_string_len),
            bytes: value.to_vec(),
        }
    }

    fn write_text(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "  val (hex):  {}", encode_hex_spaced(&self.bytes))?;
        writeln!(out, "  val (len):  {} bytes", self.len)?;

        if let Some(candidates) = &self.handle_candidates
            && let Some(preferred) = candidates.preferred()
        {
            let listed: Vec<String> = candidates.iter().map(ToString::to_string).collect();
            writeln!(
                out,
                "  val (parsed): handle_candidates=[{}]",
                listed.join(", ")
            )?;
            writeln!(
                out,
                "  val (handle): _tidb_rowid={} (at offset {})",
                preferred.value, preferred.offset
            )?;
        }

        if !self.strings.is_empty() {
            writeln!(out, "  val (strings): {}", self.strings.join(" | "))?;
        }

        Ok(())
    }
}

///
/// PairReport
///

#[derive(Debug, Serialize)]
pub(crate) struct PairReport {
    pub index: usize,
    pub key: KeyReport,
    pub value: ValueReport,
}

impl PairReport {
    pub(crate) fn build(index: usize, key: &[u8], value: &[u8], config: &InspectConfig) -> Self {
        let probe = is_index_key(key, config.mode);

        Self {
            index,
            key: KeyReport::build(key, config.mode),
            value: ValueReport::build(value, probe, config),
        }
    }

    pub(crate) fn write_text(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "--- [{}] ---", self.index)?;
        self.key.write_text(out)?;
        self.value.write_text(out)?;
        writeln!(out)
    }
}

///
/// RangeReport
///

#[derive(Debug, Serialize)]
pub(crate) struct RangeReport {
    pub mode: KeyMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity: Option<EntityTag>,
    pub start: String,
    pub end: String,
    #[serde(skip)]
    range: ScanRange,
}

impl RangeReport {
    pub(crate) fn build(table_id: Option<i64>, entity: Option<EntityTag>, mode: KeyMode) -> Self {
        let range = match table_id {
            Some(table_id) => ScanRange::for_table(table_id, entity, mode),
            None => ScanRange::all_tables(),
        };

        Self {
            mode,
            table_id,
            entity,
            start: encode_hex(&range.start),
            end: encode_hex(&range.end),
            range,
        }
    }

    pub(crate) fn write_text(&self, out: &mut impl Write) -> io::Result<()> {
        match (self.table_id, self.entity) {
            (Some(table_id), Some(entity)) => {
                writeln!(
                    out,
                    "range: table_id={table_id}, {} ({})",
                    entity.label(),
                    self.mode
                )?;
            }
            (Some(table_id), None) => {
                writeln!(out, "range: table_id={table_id} ({})", self.mode)?;
            }
            (None, _) => writeln!(out, "range: all tables")?,
        }
        writeln!(out, "{}", self.range)
    }
}

/// Write the key lines of each report, one blank line after each.
pub(crate) fn write_keys_text(reports: &[KeyReport], out: &mut impl Write) -> io::Result<()> {
    for report in reports {
        report.write_text(out)?;
        writeln!(out)?;
    }

    Ok(())
}

pub(crate) fn write_value_text(report: &ValueReport, out: &mut impl Write) -> io::Result<()> {
    report.write_text(out)
}

/// Pretty JSON followed by a newline.
pub(crate) fn write_json<T: Serialize>(report: &T, out: &mut impl Write) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)
}

///
/// TESTS
///

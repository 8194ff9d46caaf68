//! Reads `KEY_HEX VALUE_HEX` lines and turns them into pair reports. A
//! value of `-` stands for an empty value.

use crate::{config::InspectConfig, render::PairReport};
use anyhow::{Context, bail};
use std::io::BufRead;
use tablekey_core::codec::decode_hex;

const EMPTY_VALUE: &str = "-";

/// Decode every well-formed line of `input`. Pairs are numbered from 0 in
/// the order they are accepted; malformed lines are logged and skipped.
pub(crate) fn read_pairs(
    input: impl BufRead,
    config: &InspectConfig,
) -> anyhow::Result<Vec<PairReport>> {
    let mut reports = Vec::new();

    for (line_idx, line) in input.lines().enumerate() {
        let line = line.with_context(|| format!("read input line {}", line_idx + 1))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        match parse_line(trimmed) {
            Ok((key, value)) => {
                reports.push(PairReport::build(reports.len(), &key, &value, config));
            }
            Err(err) => {
                let error = format!("{err:#}");
                tracing::warn!(line = line_idx + 1, %error, "skipping input line");
            }
        }
    }

    tracing::debug!(pairs = reports.len(), "dump input read");

    Ok(reports)
}

fn parse_line(line: &str) -> anyhow::Result<(Vec<u8>, Vec<u8>)> {
    let mut fields = line.split_whitespace();
    let (Some(key), Some(value), None) = (fields.next(), fields.next(), fields.next()) else {
        bail!("expected `KEY_HEX VALUE_HEX`");
    };

    let key = decode_hex(key).context("key")?;
    let value = if value == EMPTY_VALUE {
        Vec::new()
    } else {
        decode_hex(value).context("value")?
    };

    Ok((key, value))
}

///
/// TESTS
///

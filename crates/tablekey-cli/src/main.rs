//! `tablekey`: offline inspector for table-store keys and values.

mod config;
mod dump;
mod render;

use anyhow::Context;
use clap::Parser;
use config::{Cli, Command, InspectConfig, OutputFormat};
use render::{KeyReport, RangeReport, ValueReport};
use std::io::{self, BufRead, BufWriter, IsTerminal, Write};
use tablekey_core::codec::decode_hex;
use tracing_subscriber::EnvFilter;

/// Parse CLI args, initialize logging, and run the requested subcommand.
fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let mut out = BufWriter::new(io::stdout().lock());
    run(&cli, io::stdin().lock(), &mut out)?;
    out.flush().context("flush stdout")?;

    Ok(())
}

// Logs go to stderr so stdout stays machine-readable.
fn init_tracing(verbose: bool) -> anyhow::Result<()> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_env_filter(rust_log.as_deref(), verbose)?;
    let ansi = io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_ansi(ansi)
        .with_env_filter(filter)
        .init();

    Ok(())
}

/// `RUST_LOG` wins when set; otherwise `--verbose` picks `debug` over `warn`.
fn build_env_filter(rust_log: Option<&str>, verbose: bool) -> anyhow::Result<EnvFilter> {
    let directives = match rust_log {
        Some(directives) if !directives.trim().is_empty() => directives,
        _ if verbose => "debug",
        _ => "warn",
    };

    EnvFilter::try_new(directives).with_context(|| format!("invalid log filter '{directives}'"))
}

fn run(cli: &Cli, input: impl BufRead, out: &mut impl Write) -> anyhow::Result<()> {
    let config = cli.inspect_config();
    tracing::debug!(mode = %config.mode, format = ?cli.format, "resolved options");

    match &cli.command {
        Command::Key { keys } => run_key(keys, &config, cli.format, out),
        Command::Value { value } => run_value(value, &config, cli.format, out),
        Command::Range { table_id, entity } => {
            let report = RangeReport::build(*table_id, *entity, config.mode);
            let written = match cli.format {
                OutputFormat::Text => report.write_text(out),
                OutputFormat::Json => render::write_json(&report, out),
            };
            written.context("write range")
        }
        Command::Dump => {
            let reports = dump::read_pairs(input, &config)?;
            let written = match cli.format {
                OutputFormat::Text => {
                    reports.iter().try_for_each(|report| report.write_text(out))
                }
                OutputFormat::Json => render::write_json(&reports, out),
            };
            written.context("write pairs")
        }
    }
}

fn run_key(
    keys: &[String],
    config: &InspectConfig,
    format: OutputFormat,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let reports = keys
        .iter()
        .map(|hex| {
            let key = decode_hex(hex).with_context(|| format!("decode key '{hex}'"))?;
            Ok(KeyReport::build(&key, config.mode))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let written = match format {
        OutputFormat::Text => render::write_keys_text(&reports, out),
        OutputFormat::Json => render::write_json(&reports, out),
    };
    written.context("write keys")
}

fn run_value(
    hex: &str,
    config: &InspectConfig,
    format: OutputFormat,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let value = decode_hex(hex).with_context(|| format!("decode value '{hex}'"))?;
    let report = ValueReport::build(&value, true, config);

    let written = match format {
        OutputFormat::Text => render::write_value_text(&report, out),
        OutputFormat::Json => render::write_json(&report, out),
    };
    written.context("write value")
}

///
/// TESTS
///

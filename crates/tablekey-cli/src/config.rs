use clap::{Parser, Subcommand, ValueEnum};
use tablekey_core::{
    key::{EntityTag, KeyMode},
    value::{DEFAULT_HANDLE_UPPER_BOUND, HandleProbeSet},
};

///
/// Cli
///

#[derive(Debug, Parser)]
#[command(name = "tablekey")]
#[command(about = "Decode table-store keys and values offline")]
#[command(long_about = None)]
pub(crate) struct Cli {
    /// How the keys were retrieved: `raw` (chunk-wrapped) or `logical`.
    #[arg(long, global = true, env = "TABLEKEY_MODE", default_value = "raw")]
    pub mode: KeyMode,

    /// Shortest printable run reported from values.
    #[arg(
        long,
        global = true,
        env = "TABLEKEY_MIN_STRING_LEN",
        default_value_t = 4
    )]
    pub min_string_len: usize,

    /// Exclusive upper bound for a plausible row handle.
    #[arg(
        long,
        global = true,
        env = "TABLEKEY_HANDLE_MAX",
        default_value_t = DEFAULT_HANDLE_UPPER_BOUND
    )]
    pub handle_max: i64,

    #[arg(
        long,
        global = true,
        env = "TABLEKEY_FORMAT",
        value_enum,
        default_value_t = OutputFormat::Text
    )]
    pub format: OutputFormat,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(long, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub(crate) fn inspect_config(&self) -> InspectConfig {
        InspectConfig {
            mode: self.mode,
            min_string_len: self.min_string_len,
            probes: HandleProbeSet::with_upper_bound(self.handle_max),
        }
    }
}

///
/// Command
///

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Decode one or more hex-encoded keys.
    Key {
        #[arg(required = true, value_name = "HEX")]
        keys: Vec<String>,
    },

    /// Probe a hex-encoded value for row handles and readable text.
    Value {
        #[arg(value_name = "HEX")]
        value: String,
    },

    /// Print the scan bounds for a table, or for the whole table space.
    Range {
        #[arg(long)]
        table_id: Option<i64>,

        #[arg(long = "type", value_name = "record|index", requires = "table_id")]
        entity: Option<EntityTag>,
    },

    /// Decode `KEY_HEX VALUE_HEX` lines read from stdin.
    Dump,
}

///
/// OutputFormat
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Text,
    Json,
}

///
/// InspectConfig
///
/// Settings shared by every subcommand once arguments are resolved.
///

#[derive(Clone, Debug)]
pub(crate) struct InspectConfig {
    pub mode: KeyMode,
    pub min_string_len: usize,
    pub probes: HandleProbeSet,
}

impl Default for InspectConfig {
    fn default() -> Self {
        Self {
            mode: KeyMode::default(),
            min_string_len: 4,
            probes: HandleProbeSet::default(),
        }
    }
}

///
/// TESTS
///

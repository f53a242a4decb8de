//! CLI argument definitions for the tabstream binary.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use tracing::level_filters::LevelFilter;

use tabstream_cli::commands::{DEFAULT_HEAD_ROWS, InputConfig};
use tabstream_cli::logging::LogFormat;
use tabstream_core::{DEFAULT_CHUNK_SIZE, DEFAULT_HEADER_ROWS};

#[derive(Parser)]
#[command(
    name = "tabstream",
    version,
    about = "Stream delimited files through a schema-aware row model",
    long_about = "Read delimited text files one chunk at a time.\n\n\
                  Header rows are merged into column names, ragged rows are\n\
                  padded, and wide rows grow the schema."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the resolved column names.
    Columns(InputArgs),

    /// Print the first rows as a table.
    Head(HeadArgs),

    /// Write rows as JSON lines.
    Rows(RowsArgs),

    /// Count data rows and columns.
    Count(InputArgs),
}

#[derive(Args)]
pub struct InputArgs {
    /// Path to the delimited file.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Field delimiter.
    #[arg(long = "delimiter", short = 'd', default_value_t = ',')]
    pub delimiter: char,

    /// Number of leading rows merged into column names.
    #[arg(long = "header-rows", default_value_t = DEFAULT_HEADER_ROWS, allow_negative_numbers = true)]
    pub header_rows: i64,

    /// Keep rows whose cells are all blank.
    #[arg(long = "keep-empty-rows")]
    pub keep_empty_rows: bool,

    /// Rows read per chunk.
    #[arg(long = "chunk-size", default_value_t = DEFAULT_CHUNK_SIZE)]
    pub chunk_size: usize,

    /// Records dropped from the end of the file.
    #[arg(long = "skip-footer-rows", default_value_t = 0)]
    pub skip_footer_rows: usize,
}

impl From<&InputArgs> for InputConfig {
    fn from(args: &InputArgs) -> Self {
        Self {
            path: args.file.clone(),
            delimiter: args.delimiter,
            header_rows: args.header_rows,
            keep_empty_rows: args.keep_empty_rows,
            chunk_size: args.chunk_size,
            skip_footer_rows: args.skip_footer_rows,
        }
    }
}

#[derive(Args)]
pub struct HeadArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Number of rows to print.
    #[arg(short = 'n', long = "lines", default_value_t = DEFAULT_HEAD_ROWS)]
    pub lines: usize,
}

#[derive(Args)]
pub struct RowsArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Stop after this many rows.
    #[arg(long = "limit", value_name = "N")]
    pub limit: Option<usize>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogLevelArg> for LevelFilter {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Error => Self::ERROR,
            LogLevelArg::Warn => Self::WARN,
            LogLevelArg::Info => Self::INFO,
            LogLevelArg::Debug => Self::DEBUG,
            LogLevelArg::Trace => Self::TRACE,
        }
    }
}

impl From<LogFormatArg> for LogFormat {
    fn from(format: LogFormatArg) -> Self {
        match format {
            LogFormatArg::Pretty => Self::Pretty,
            LogFormatArg::Compact => Self::Compact,
            LogFormatArg::Json => Self::Json,
        }
    }
}

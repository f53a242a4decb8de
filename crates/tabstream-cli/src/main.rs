//! tabstream CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use tabstream_cli::commands::{InputConfig, run_columns, run_count, run_head, write_rows};
use tabstream_cli::logging::{LogConfig, init_logging};
use tracing::level_filters::LevelFilter;

mod cli;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(&cli.command) {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(command: &Command) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match command {
        Command::Columns(args) => run_columns(&InputConfig::from(args), &mut out),
        Command::Head(args) => run_head(&InputConfig::from(&args.input), args.lines, &mut out),
        Command::Rows(args) => {
            write_rows(&InputConfig::from(&args.input), args.limit, &mut out).map(|_| ())
        }
        Command::Count(args) => run_count(&InputConfig::from(args), &mut out).map(|_| ()),
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let level_filter = cli
        .log_level
        .map_or_else(|| cli.verbosity.tracing_level_filter(), LevelFilter::from);
    let mut config = LogConfig::default()
        .with_level_filter(level_filter)
        .with_format(cli.log_format.into())
        .with_log_file(cli.log_file.clone());
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}

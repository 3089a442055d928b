//! Insight compliance tracker CLI.

use clap::{ColorChoice, Parser};
use insight_cli::logging::{LogConfig, LogFormat, init_logging};
use std::io::{self, IsTerminal};

mod cli;
mod commands;
mod config;
mod render;

use crate::cli::{Cli, Command, LogFormatArg};
use crate::commands::{run_compliance, run_participant, run_report, run_send};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    init_logging(&log_config_from_cli(&cli));

    let result = match &cli.command {
        Command::Participant { action } => run_participant(action),
        Command::Compliance {
            participant_id,
            as_of,
        } => run_compliance(*participant_id, *as_of),
        Command::Report { date, as_of } => run_report(*date, *as_of),
        Command::Send {
            participant_id,
            message,
        } => run_send(*participant_id, message),
    };

    if let Err(error) = result {
        eprintln!("error: {error:#}");
        std::process::exit(1);
    }
}

fn log_config_from_cli(cli: &Cli) -> LogConfig {
    LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        use_env_filter: !cli.verbosity.is_present(),
        format: match cli.log_format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        },
        with_ansi: match cli.color.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => io::stderr().is_terminal(),
        },
    }
}

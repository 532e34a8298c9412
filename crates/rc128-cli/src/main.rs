//! RC 128 navigator CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use tracing::level_filters::LevelFilter;

use rc128_cli::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use rc128_cli::commands::{load_config, run_articles, run_check, run_lookup, run_toc};
use rc128_cli::logging::{LogConfig, LogFormat, init_logging};
use rc128_cli::summary::{print_articles, print_check, print_lookup, print_toc};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    std::process::exit(run(&cli));
}

fn run(cli: &Cli) -> i32 {
    match dispatch(cli) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    }
}

fn dispatch(cli: &Cli) -> anyhow::Result<i32> {
    let config = || load_config(cli.config.as_deref());
    match &cli.command {
        Command::Toc(args) => {
            print_toc(&run_toc(args, &config()?)?);
            Ok(0)
        }
        Command::Articles(args) => {
            print_articles(&run_articles(args, &config()?)?);
            Ok(0)
        }
        Command::Check(args) => {
            let result = run_check(args, &config()?)?;
            print_check(&result);
            Ok(if result.has_errors { 1 } else { 0 })
        }
        Command::Lookup(args) => {
            print_lookup(&run_lookup(args)?);
            Ok(0)
        }
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let level_filter = match cli.log_level {
        Some(LogLevelArg::Error) => LevelFilter::ERROR,
        Some(LogLevelArg::Warn) => LevelFilter::WARN,
        Some(LogLevelArg::Info) => LevelFilter::INFO,
        Some(LogLevelArg::Debug) => LevelFilter::DEBUG,
        Some(LogLevelArg::Trace) => LevelFilter::TRACE,
        None => cli.verbosity.tracing_level_filter(),
    };
    let format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    let mut config = LogConfig::default()
        .with_level_filter(level_filter)
        .with_format(format)
        .with_log_file(cli.log_file.clone());
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}

//! CLI argument definitions for the RC 128 navigator.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use rc128_model::Locale;

#[derive(Parser)]
#[command(
    name = "rc128",
    version,
    about = "Browse GTPL RC 128 articles as a Part/Chapter/Article outline",
    long_about = "Build the Part -> Chapter -> Article outline of GTPL RC 128 from an \
                  exported article file (CSV or JSON), drive the navigator with \
                  selection and toggle events, and inspect the claim lookup tables."
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

    /// Navigator config file (default: $RC128_CONFIG when set).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the outline after applying navigation events.
    Toc(TocArgs),

    /// List the articles visible in one language.
    Articles(ArticlesArgs),

    /// Report outline build diagnostics for every language.
    Check(CheckArgs),

    /// Show a claim, response or record lookup table.
    Lookup(LookupArgs),
}

#[derive(Parser)]
pub struct TocArgs {
    /// Article file (.csv or .json). Defaults to `records` from the config.
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Outline language (default: `default_locale` from the config).
    #[arg(long = "lang", value_enum)]
    pub lang: Option<LangArg>,

    /// Article id to resolve as if it came from the URL fragment.
    #[arg(long = "deep-link", value_name = "ID")]
    pub deep_link: Option<String>,

    /// Expand every part and chapter before other events.
    #[arg(long = "expand-all")]
    pub expand_all: bool,

    /// Article id to select.
    #[arg(long = "select", value_name = "ID")]
    pub select: Option<String>,

    /// Part or chapter id to toggle. Applied in order after --select.
    #[arg(long = "toggle", value_name = "ID")]
    pub toggle: Vec<String>,

    /// Show node ids next to titles.
    #[arg(long = "show-ids")]
    pub show_ids: bool,
}

#[derive(Parser)]
pub struct ArticlesArgs {
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    #[arg(long = "lang", value_enum)]
    pub lang: Option<LangArg>,

    /// Case-insensitive filter on article number, title and body.
    #[arg(long = "search", value_name = "TERM")]
    pub search: Option<String>,
}

#[derive(Parser)]
pub struct CheckArgs {
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,
}

#[derive(Parser)]
pub struct LookupArgs {
    #[arg(value_enum)]
    pub table: LookupTableArg,

    /// Show a single entry by code.
    #[arg(value_name = "CODE")]
    pub code: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LangArg {
    En,
    Ar,
}

impl From<LangArg> for Locale {
    fn from(value: LangArg) -> Self {
        match value {
            LangArg::En => Locale::En,
            LangArg::Ar => Locale::Ar,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LookupTableArg {
    Claims,
    Responses,
    Records,
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

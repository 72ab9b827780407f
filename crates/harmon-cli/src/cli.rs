//! CLI argument definitions for the harmonizer.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "harmonize",
    version,
    about = "Harmonize public construction datasets into canonical operations records",
    long_about = "Project heterogeneous public datasets (NYCHA work orders, USAspending\n\
                  federal construction contracts, GSA CALC labor rates) onto one canonical\n\
                  construction-operations schema.\n\n\
                  Inputs are already-downloaded delimited exports; no network access is\n\
                  performed."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
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
    /// Harmonize one source file into canonical records.
    Run(RunArgs),

    /// List the registered sources and their natural keys.
    Sources,
}

#[derive(Parser)]
pub struct RunArgs {
    /// Source dataset the input file came from.
    #[arg(long = "source", value_enum)]
    pub source: SourceArg,

    /// Path to the downloaded delimited export.
    #[arg(long = "in", value_name = "PATH")]
    pub input: PathBuf,

    /// Output file for harmonized records.
    #[arg(long = "out", value_name = "PATH")]
    pub output: PathBuf,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "csv")]
    pub format: OutputFormatArg,

    /// Emit one ProgressBilling record per obligation event instead of one
    /// record per award row (USAspending only).
    #[arg(long = "time-series")]
    pub time_series: bool,

    /// Abort with exit code 1 when the malformed-row fraction exceeds this.
    #[arg(long = "max-error-rate", value_name = "RATE", default_value_t = 0.05)]
    pub max_error_rate: f64,

    /// How to handle rows whose record id was already seen.
    #[arg(long = "duplicate-policy", value_enum, default_value = "reject")]
    pub duplicate_policy: DuplicatePolicyArg,

    /// Also write the run summary as JSON.
    #[arg(long = "summary-json", value_name = "PATH")]
    pub summary_json: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum SourceArg {
    Nycha,
    Usaspending,
    Gsa,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Csv,
    Jsonl,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum DuplicatePolicyArg {
    /// First write wins; both occurrences are logged.
    Reject,
    /// First write wins silently.
    KeepFirst,
    /// Later rows supersede earlier ones.
    KeepLast,
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

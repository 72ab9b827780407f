use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::warn;

use harmon_ingest::{IngestError, ReaderOptions, RowStream};
use harmon_model::{RunSummary, SourceName};
use harmon_registry::natural_key_columns;
use harmon_report::{CsvSink, JsonlSink, RecordSink, write_summary_json};
use harmon_transform::DuplicatePolicy;

use crate::cli::{DuplicatePolicyArg, OutputFormatArg, RunArgs, SourceArg};
use crate::pipeline::{PipelineOptions, run_pipeline};
use crate::summary::apply_table_style;

/// Everything the summary printer needs about a finished run.
#[derive(Debug)]
pub struct RunOutcome {
    pub source: SourceName,
    pub input: PathBuf,
    pub output: PathBuf,
    pub summary: RunSummary,
    /// Malformed-row fraction exceeded `--max-error-rate`.
    pub error_rate_exceeded: bool,
    /// Sink failure that aborted the run mid-stream. The summary still
    /// covers everything processed up to the abort, so it is printed
    /// either way.
    pub failure: Option<anyhow::Error>,
}

pub fn run(args: &RunArgs, cancel: Option<Arc<AtomicBool>>) -> Result<RunOutcome> {
    let source = source_from_arg(args.source);
    if args.time_series && source != SourceName::Usaspending {
        warn!(%source, "--time-series only applies to usaspending; ignoring");
    }

    // Validate the input before touching the output path, so a missing
    // input never leaves a stray empty output file behind.
    let stream = RowStream::open(&args.input, &ReaderOptions::default())?;

    let mut sink: Box<dyn RecordSink> = match args.format {
        OutputFormatArg::Csv => Box::new(
            CsvSink::create(&args.output)
                .with_context(|| format!("create output {}", args.output.display()))?,
        ),
        OutputFormatArg::Jsonl => Box::new(
            JsonlSink::create(&args.output)
                .with_context(|| format!("create output {}", args.output.display()))?,
        ),
    };

    let options = PipelineOptions {
        source,
        time_series: args.time_series && source == SourceName::Usaspending,
        duplicate_policy: policy_from_arg(args.duplicate_policy),
        cancel,
    };
    let run = run_pipeline(stream, sink.as_mut(), &options);

    // The summary is written even when the run aborted mid-stream.
    if let Some(path) = &args.summary_json {
        write_summary_json(path, &run.summary)
            .with_context(|| format!("write summary {}", path.display()))?;
    }

    let error_rate_exceeded = run.summary.malformed_rate() > args.max_error_rate;
    Ok(RunOutcome {
        source,
        input: args.input.clone(),
        output: args.output.clone(),
        summary: run.summary,
        error_rate_exceeded,
        failure: run.error,
    })
}

pub fn run_sources() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Source", "CLI name", "Natural key"]);
    apply_table_style(&mut table);
    for source in SourceName::all() {
        table.add_row(vec![
            source.as_str().to_string(),
            cli_name(source).to_string(),
            natural_key_columns(source).join(" + "),
        ]);
    }
    println!("{table}");
    Ok(())
}

/// Exit code for a failed run: 2 when the input could not be opened or
/// read at all, 1 for everything else.
pub fn exit_code_for_error(error: &anyhow::Error) -> i32 {
    match error.downcast_ref::<IngestError>() {
        Some(IngestError::Open { .. } | IngestError::EmptyHeader { .. }) => 2,
        _ => 1,
    }
}

pub fn source_from_arg(arg: SourceArg) -> SourceName {
    match arg {
        SourceArg::Nycha => SourceName::Nycha,
        SourceArg::Usaspending => SourceName::Usaspending,
        SourceArg::Gsa => SourceName::GsaCalc,
    }
}

fn policy_from_arg(arg: DuplicatePolicyArg) -> DuplicatePolicy {
    match arg {
        DuplicatePolicyArg::Reject => DuplicatePolicy::RejectAndLog,
        DuplicatePolicyArg::KeepFirst => DuplicatePolicy::KeepFirst,
        DuplicatePolicyArg::KeepLast => DuplicatePolicy::KeepLast,
    }
}

fn cli_name(source: SourceName) -> &'static str {
    match source {
        SourceName::Nycha => "nycha",
        SourceName::Usaspending => "usaspending",
        SourceName::GsaCalc => "gsa",
    }
}

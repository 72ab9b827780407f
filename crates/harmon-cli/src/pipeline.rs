//! The streaming pipeline driver.
//!
//! One pass per source file: read row, adapt, normalize, resolve, emit.
//! Every stage handles a single row at a time, so peak memory is constant
//! regardless of input size (the keep-last policy is the exception: it
//! buffers the surviving record per id until the input is exhausted).
//! Cancellation is checked at each row boundary; a record is only ever
//! written fully normalized and resolved.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{info, info_span, warn};

use harmon_ingest::RowStream;
use harmon_model::{HarmonError, Quality, RunSummary, SourceName};
use harmon_registry::{get_rules, status_vocabulary};
use harmon_report::{RecordSink, emit};
use harmon_transform::{DuplicatePolicy, Resolution, Resolver, adapter_for, normalize};

/// Per-run pipeline configuration.
pub struct PipelineOptions {
    pub source: SourceName,
    pub time_series: bool,
    pub duplicate_policy: DuplicatePolicy,
    /// Set externally (Ctrl-C handler) to stop between rows.
    pub cancel: Option<Arc<AtomicBool>>,
}

impl PipelineOptions {
    pub fn new(source: SourceName) -> Self {
        Self {
            source,
            time_series: false,
            duplicate_policy: DuplicatePolicy::default(),
            cancel: None,
        }
    }

    fn cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}

/// A finished (or aborted) pipeline pass. The summary reflects every row
/// processed up to the abort point, so callers can always report it.
pub struct PipelineRun {
    pub summary: RunSummary,
    /// Sink failure that aborted emission mid-run, if any.
    pub error: Option<anyhow::Error>,
}

/// Run the full harmonization pass over an already-opened source stream.
///
/// Per-row errors are accumulated into the summary. A sink failure stops
/// the run but still returns the summary accumulated so far, carried next
/// to the error in [`PipelineRun`].
pub fn run_pipeline(
    mut stream: RowStream,
    sink: &mut dyn RecordSink,
    options: &PipelineOptions,
) -> PipelineRun {
    let span = info_span!("pipeline", source = %options.source);
    let _guard = span.enter();
    info!(
        input = %stream.path().display(),
        columns = stream.headers().len(),
        "input opened"
    );

    let adapter = adapter_for(options.source, options.time_series);
    let rules = get_rules(options.source);
    let vocab = status_vocabulary(options.source);
    let mut resolver = Resolver::new(options.duplicate_policy);
    let mut summary = RunSummary::for_source(options.source);

    let records = std::iter::from_fn(|| {
        loop {
            if options.cancelled() {
                info!("cancellation requested; stopping between rows");
                return None;
            }
            let raw = match stream.next()? {
                Ok(raw) => raw,
                Err(error) => {
                    warn!(%error, "unreadable row dropped");
                    summary.rows_read += 1;
                    summary.malformed += 1;
                    continue;
                }
            };
            summary.rows_read += 1;
            let line = raw.line;
            let outcome = match adapter.parse_row(&raw) {
                Ok(outcome) => outcome,
                Err(error) => {
                    warn!(line, %error, "row dropped");
                    summary.malformed += 1;
                    continue;
                }
            };
            for recovered in &outcome.recovered {
                if matches!(recovered, HarmonError::InvalidDateRange { .. }) {
                    summary.invalid_date_range += 1;
                }
                summary.warnings += 1;
            }
            let normalized = normalize(outcome.record, rules, vocab);
            summary.warnings += normalized.warnings.len();
            match resolver.resolve(normalized.record, line) {
                Resolution::Accept(record) => {
                    if record.quality == Quality::Incomplete {
                        summary.incomplete += 1;
                    }
                    return Some(record);
                }
                Resolution::Duplicate { .. } => {
                    summary.duplicates += 1;
                }
                Resolution::Deferred { superseded } => {
                    if superseded {
                        summary.duplicates += 1;
                    }
                }
            }
        }
    });

    let mut error = None;
    match emit(records, sink) {
        Ok(written) => summary.rows_emitted = written,
        Err(sink_error) => error = Some(sink_error.into()),
    }

    // Keep-last buffered everything; flush the surviving record per id.
    if error.is_none() {
        let deferred = resolver.take_deferred();
        if !deferred.is_empty() {
            summary.incomplete += deferred
                .iter()
                .filter(|record| record.quality == Quality::Incomplete)
                .count();
            match emit(deferred.into_iter(), sink) {
                Ok(written) => summary.rows_emitted += written,
                Err(sink_error) => error = Some(sink_error.into()),
            }
        }
    }

    info!(
        rows_read = summary.rows_read,
        rows_emitted = summary.rows_emitted,
        malformed = summary.malformed,
        duplicates = summary.duplicates,
        aborted = error.is_some(),
        "pipeline finished"
    );
    PipelineRun { summary, error }
}

//! Source adapters: one per registered dataset.
//!
//! An adapter turns a raw delimited row into a mapping-ready intermediate
//! record: it resolves the source tag, hashes the natural key into a stable
//! record id, derives the canonical category, and computes the fields the
//! declarative mapping rules cannot express. Everything after the adapter is
//! source-agnostic.

mod gsa;
mod nycha;
mod usaspending;

pub use gsa::GsaAdapter;
pub use nycha::NychaAdapter;
pub use usaspending::UsaspendingAdapter;

use harmon_ingest::RawRow;
use harmon_model::{HarmonError, IntermediateRecord, Result, SourceName};

/// A parsed row plus any errors that were recovered while parsing it.
///
/// Recovered errors (currently only invalid date ranges) leave the row
/// usable; they are surfaced so the run summary can count them.
#[derive(Debug)]
pub struct AdapterOutcome {
    pub record: IntermediateRecord,
    pub recovered: Vec<HarmonError>,
}

impl AdapterOutcome {
    fn clean(record: IntermediateRecord) -> Self {
        Self {
            record,
            recovered: Vec::new(),
        }
    }
}

/// Per-source row parsing.
pub trait SourceAdapter: Send + Sync {
    fn source(&self) -> SourceName;

    /// Parse one raw row.
    ///
    /// Fails with [`HarmonError::MalformedRow`] when a natural-key column is
    /// absent or blank; the caller drops the row and counts the error.
    fn parse_row(&self, raw: &RawRow) -> Result<AdapterOutcome>;
}

/// Construct the adapter for a source.
///
/// `time_series` switches the USAspending adapter into its per-obligation
/// ProgressBilling view; the other adapters ignore it.
pub fn adapter_for(source: SourceName, time_series: bool) -> Box<dyn SourceAdapter> {
    match source {
        SourceName::Nycha => Box::new(NychaAdapter),
        SourceName::Usaspending => Box::new(UsaspendingAdapter { time_series }),
        SourceName::GsaCalc => Box::new(GsaAdapter),
    }
}

/// First non-blank value of `column`, or a `MalformedRow` naming the column
/// and line when it is required and missing.
fn require_field<'a>(raw: &'a RawRow, column: &str) -> Result<&'a str> {
    raw.fields
        .get(column)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| {
            HarmonError::MalformedRow(format!(
                "line {}: missing natural-key column {column}",
                raw.line
            ))
        })
}

fn optional_field<'a>(raw: &'a RawRow, column: &str) -> Option<&'a str> {
    raw.fields
        .get(column)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
}

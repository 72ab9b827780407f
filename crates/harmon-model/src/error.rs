use chrono::NaiveDate;
use thiserror::Error;

use crate::ids::RecordId;

/// Error taxonomy for the harmonization pipeline.
///
/// Only `UnknownSource` and `Io` abort a run; the per-row variants are
/// accumulated into the run summary and reported at end of run.
#[derive(Debug, Error)]
pub enum HarmonError {
    /// A required natural-key column is absent or blank. The row is dropped
    /// and counted; it is never silently coerced into a record.
    #[error("malformed row: {0}")]
    MalformedRow(String),

    /// Completion precedes creation. Recovered by nulling the duration.
    #[error("invalid date range: completed {completed} precedes created {created}")]
    InvalidDateRange {
        created: NaiveDate,
        completed: NaiveDate,
    },

    /// A record with this id was already accepted in the current run.
    #[error("duplicate record id {0}")]
    Duplicate(RecordId),

    /// The record has neither a temporal nor a financial anchor. The record
    /// is still emitted, quality-flagged as incomplete.
    #[error("record {0} has neither timestamp nor amount")]
    Incomplete(RecordId),

    /// The requested source is not registered. Fatal before any row is read.
    #[error("unknown source: {0}")]
    UnknownSource(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, HarmonError>;

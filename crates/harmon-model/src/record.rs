use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::enums::{Category, Quality, SourceName};
use crate::ids::RecordId;

/// The unified, source-agnostic output row.
///
/// Immutable once built: the pipeline constructs a record exactly once per
/// source row and never touches it after emission. Field order here is the
/// output column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalRecord {
    pub record_id: RecordId,
    pub category: Category,
    pub source_name: SourceName,
    /// Temporal anchor. `None` when the source row carried no usable date.
    pub timestamp: Option<NaiveDate>,
    /// Currency-denominated amount. `None` means unreported, which is
    /// semantically distinct from zero for contract obligations.
    pub amount: Option<f64>,
    /// Derived work-order duration in days. Null when the source has no
    /// duration concept or the date range was invalid.
    pub duration_days: Option<i64>,
    /// Free text: descriptions, labor-category summaries, delay reasons.
    pub text_payload: Option<String>,
    /// Normalized status vocabulary, or an `UNMAPPED:<raw>` sentinel.
    pub status_code: Option<String>,
    pub quality: Quality,
    /// The original row verbatim, preserved even when normalization
    /// partially failed.
    pub raw_fields: BTreeMap<String, String>,
}

impl CanonicalRecord {
    /// True when the record has at least one of a temporal or financial
    /// anchor. Records failing this are quality-flagged by the resolver.
    pub fn is_anchored(&self) -> bool {
        self.timestamp.is_some() || self.amount.is_some()
    }
}

/// A source row after adapter parsing but before field mapping.
///
/// Carries the verbatim row, the resolved source tag, the natural-key hash,
/// the derived category, and any adapter-computed fields the mapping rules
/// cannot express (currently only the work-order duration).
#[derive(Debug, Clone)]
pub struct IntermediateRecord {
    pub source_name: SourceName,
    pub record_id: RecordId,
    pub category: Category,
    pub raw_fields: BTreeMap<String, String>,
    /// Work-order duration in days, when derivable. `None` either because
    /// the source has no duration concept or because the date range was
    /// invalid and recovered.
    pub duration_days: Option<i64>,
}

impl IntermediateRecord {
    /// First non-blank value among the row's columns named `column`.
    pub fn field(&self, column: &str) -> Option<&str> {
        self.raw_fields
            .get(column)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }
}

use serde::{Deserialize, Serialize};

use crate::enums::SourceName;

/// End-of-run accounting: rows read, rows emitted, and per-kind drop and
/// warning counts. Always produced, even on partial failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunSummary {
    pub source: Option<SourceName>,
    pub rows_read: usize,
    pub rows_emitted: usize,
    /// Rows dropped because a natural-key column was missing.
    pub malformed: usize,
    /// Rows whose date range was invalid; recovered with a null duration.
    pub invalid_date_range: usize,
    /// Rows rejected as duplicates under the active policy.
    pub duplicates: usize,
    /// Rows emitted with an incomplete quality flag.
    pub incomplete: usize,
    /// Non-fatal normalization warnings (transform fallbacks, negative
    /// obligations, unmapped vocabulary).
    pub warnings: usize,
}

impl RunSummary {
    pub fn for_source(source: SourceName) -> Self {
        Self {
            source: Some(source),
            ..Self::default()
        }
    }

    /// Fraction of read rows dropped as malformed. Zero when nothing was
    /// read, so an empty input never trips the error-rate gate.
    pub fn malformed_rate(&self) -> f64 {
        if self.rows_read == 0 {
            0.0
        } else {
            self.malformed as f64 / self.rows_read as f64
        }
    }

    pub fn rows_dropped(&self) -> usize {
        self.malformed + self.duplicates
    }

    /// Fold another summary into this one. Used when per-source pipelines
    /// run independently and their accounting is merged at the end.
    pub fn merge(&mut self, other: &RunSummary) {
        if self.source != other.source {
            self.source = None;
        }
        self.rows_read += other.rows_read;
        self.rows_emitted += other.rows_emitted;
        self.malformed += other.malformed;
        self.invalid_date_range += other.invalid_date_range;
        self.duplicates += other.duplicates;
        self.incomplete += other.incomplete;
        self.warnings += other.warnings;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_rate_on_empty_input_is_zero() {
        let summary = RunSummary::default();
        assert_eq!(summary.malformed_rate(), 0.0);
    }

    #[test]
    fn merge_accumulates_counts() {
        let mut a = RunSummary::for_source(SourceName::Nycha);
        a.rows_read = 10;
        a.rows_emitted = 8;
        a.malformed = 2;
        let mut b = RunSummary::for_source(SourceName::GsaCalc);
        b.rows_read = 5;
        b.rows_emitted = 5;
        b.warnings = 1;
        a.merge(&b);
        assert_eq!(a.rows_read, 15);
        assert_eq!(a.rows_emitted, 13);
        assert_eq!(a.malformed, 2);
        assert_eq!(a.warnings, 1);
        // Mixed sources have no single source tag.
        assert!(a.source.is_none());
    }

    #[test]
    fn summary_serializes() {
        let mut summary = RunSummary::for_source(SourceName::Usaspending);
        summary.rows_read = 3;
        let json = serde_json::to_string(&summary).expect("serialize summary");
        let round: RunSummary = serde_json::from_str(&json).expect("deserialize summary");
        assert_eq!(round.rows_read, 3);
        assert_eq!(round.source, Some(SourceName::Usaspending));
    }
}

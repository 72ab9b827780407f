//! USAspending federal contract adapter.
//!
//! Natural key: `Award_ID` plus `Modification_Number`. A missing
//! modification column reads as modification 0 (the base award); a positive
//! modification number marks the row as a change order. The optional
//! time-series view keys each row by `Action_Date` instead, emitting one
//! ProgressBilling record per obligation event.

use harmon_ingest::RawRow;
use harmon_model::{Category, IntermediateRecord, RecordId, Result, SourceName};

use super::{AdapterOutcome, SourceAdapter, optional_field, require_field};

pub struct UsaspendingAdapter {
    /// When set, rows are treated as obligation events keyed by action date
    /// rather than award snapshots.
    pub time_series: bool,
}

impl SourceAdapter for UsaspendingAdapter {
    fn source(&self) -> SourceName {
        SourceName::Usaspending
    }

    fn parse_row(&self, raw: &RawRow) -> Result<AdapterOutcome> {
        let award_id = require_field(raw, "Award_ID")?;
        let modification = optional_field(raw, "Modification_Number").unwrap_or("0");

        let (record_id, category) = if self.time_series {
            let action_date = require_field(raw, "Action_Date")?;
            (
                RecordId::from_natural_key(
                    SourceName::Usaspending,
                    &[award_id, modification, action_date],
                ),
                Category::ProgressBilling,
            )
        } else {
            (
                RecordId::from_natural_key(SourceName::Usaspending, &[award_id, modification]),
                derive_category(modification),
            )
        };

        let record = IntermediateRecord {
            source_name: SourceName::Usaspending,
            record_id,
            category,
            raw_fields: raw.fields.clone(),
            duration_days: None,
        };
        Ok(AdapterOutcome::clean(record))
    }
}

/// Modification number above zero means the row amends an existing award.
/// Unparseable modification values count as base awards.
fn derive_category(modification: &str) -> Category {
    let is_modification = modification
        .parse::<i64>()
        .map(|n| n > 0)
        .unwrap_or_else(|_| {
            // Some exports use "P00001"-style modification ids.
            modification.chars().any(|c| c.is_ascii_digit())
                && !modification.trim_start_matches(['P', 'p', '0']).is_empty()
        });
    if is_modification {
        Category::ChangeOrder
    } else {
        Category::ContractValue
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use harmon_model::HarmonError;

    use super::*;

    fn row(pairs: &[(&str, &str)]) -> RawRow {
        RawRow {
            line: 1,
            fields: pairs
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect::<BTreeMap<_, _>>(),
        }
    }

    fn adapter() -> UsaspendingAdapter {
        UsaspendingAdapter { time_series: false }
    }

    #[test]
    fn base_award_is_contract_value() {
        let raw = row(&[("Award_ID", "W912DY24C0001"), ("Modification_Number", "0")]);
        let outcome = adapter().parse_row(&raw).expect("parse");
        assert_eq!(outcome.record.category, Category::ContractValue);
    }

    #[test]
    fn modification_two_is_change_order() {
        let raw = row(&[("Award_ID", "W912DY24C0001"), ("Modification_Number", "2")]);
        let outcome = adapter().parse_row(&raw).expect("parse");
        assert_eq!(outcome.record.category, Category::ChangeOrder);
    }

    #[test]
    fn p_style_modification_is_change_order() {
        let raw = row(&[
            ("Award_ID", "W912DY24C0001"),
            ("Modification_Number", "P00003"),
        ]);
        let outcome = adapter().parse_row(&raw).expect("parse");
        assert_eq!(outcome.record.category, Category::ChangeOrder);
    }

    #[test]
    fn missing_modification_column_reads_as_base_award() {
        let raw = row(&[("Award_ID", "W912DY24C0001")]);
        let outcome = adapter().parse_row(&raw).expect("parse");
        assert_eq!(outcome.record.category, Category::ContractValue);
    }

    #[test]
    fn time_series_mode_keys_by_action_date() {
        let ts = UsaspendingAdapter { time_series: true };
        let first = row(&[
            ("Award_ID", "A1"),
            ("Modification_Number", "0"),
            ("Action_Date", "2024-01-01"),
        ]);
        let second = row(&[
            ("Award_ID", "A1"),
            ("Modification_Number", "0"),
            ("Action_Date", "2024-02-01"),
        ]);
        let a = ts.parse_row(&first).expect("parse");
        let b = ts.parse_row(&second).expect("parse");
        assert_eq!(a.record.category, Category::ProgressBilling);
        assert_eq!(b.record.category, Category::ProgressBilling);
        // Distinct obligation events, distinct ids.
        assert_ne!(a.record.record_id, b.record.record_id);
    }

    #[test]
    fn time_series_requires_action_date() {
        let ts = UsaspendingAdapter { time_series: true };
        let raw = row(&[("Award_ID", "A1")]);
        let error = ts.parse_row(&raw).unwrap_err();
        assert!(matches!(error, HarmonError::MalformedRow(_)));
    }

    #[test]
    fn missing_award_id_is_malformed() {
        let raw = row(&[("Modification_Number", "1")]);
        let error = adapter().parse_row(&raw).unwrap_err();
        assert!(matches!(error, HarmonError::MalformedRow(_)));
    }
}

//! GSA CALC labor-rate adapter.
//!
//! Natural key: `Labor_Category` plus `Contract_Number`. Every row is a
//! schedule-of-values line item; the mapping rules assemble the traceability
//! text from the labor category, experience, and education columns.

use harmon_ingest::RawRow;
use harmon_model::{Category, IntermediateRecord, RecordId, Result, SourceName};

use super::{AdapterOutcome, SourceAdapter, require_field};

pub struct GsaAdapter;

impl SourceAdapter for GsaAdapter {
    fn source(&self) -> SourceName {
        SourceName::GsaCalc
    }

    fn parse_row(&self, raw: &RawRow) -> Result<AdapterOutcome> {
        let labor_category = require_field(raw, "Labor_Category")?;
        let contract_number = require_field(raw, "Contract_Number")?;
        let record = IntermediateRecord {
            source_name: SourceName::GsaCalc,
            record_id: RecordId::from_natural_key(
                SourceName::GsaCalc,
                &[labor_category, contract_number],
            ),
            category: Category::ScheduleLineItem,
            raw_fields: raw.fields.clone(),
            duration_days: None,
        };
        Ok(AdapterOutcome::clean(record))
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

    #[test]
    fn every_row_is_a_schedule_line_item() {
        let raw = row(&[
            ("Labor_Category", "Journeyman Pipefitter"),
            ("Contract_Number", "GS-21F-0001"),
            ("Price", "74.50"),
        ]);
        let outcome = GsaAdapter.parse_row(&raw).expect("parse");
        assert_eq!(outcome.record.category, Category::ScheduleLineItem);
        assert!(outcome.recovered.is_empty());
    }

    #[test]
    fn both_key_columns_are_required() {
        let missing_contract = row(&[("Labor_Category", "Foreman")]);
        assert!(matches!(
            GsaAdapter.parse_row(&missing_contract).unwrap_err(),
            HarmonError::MalformedRow(_)
        ));
        let missing_category = row(&[("Contract_Number", "GS-21F-0001")]);
        assert!(matches!(
            GsaAdapter.parse_row(&missing_category).unwrap_err(),
            HarmonError::MalformedRow(_)
        ));
    }

    #[test]
    fn same_key_hashes_to_same_id() {
        let raw = row(&[
            ("Labor_Category", "Foreman"),
            ("Contract_Number", "GS-21F-0001"),
        ]);
        let a = GsaAdapter.parse_row(&raw).expect("parse");
        let b = GsaAdapter.parse_row(&raw).expect("parse");
        assert_eq!(a.record.record_id, b.record.record_id);
    }
}

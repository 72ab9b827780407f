//! NYCHA work-order adapter.
//!
//! Natural key: `WO_Number`. The category heuristics follow the proxy
//! mapping for contractor field records: delay annotations proxy RFIs,
//! material-hold statuses proxy material deliveries, inspection and
//! notes-only rows proxy field notes, and everything else is crew labor
//! against a work order.

use harmon_ingest::RawRow;
use harmon_model::{Category, IntermediateRecord, RecordId, Result, SourceName};
use harmon_registry::status_vocabulary;
use tracing::debug;

use super::{AdapterOutcome, SourceAdapter, optional_field, require_field};
use crate::datetime::{duration_days, parse_date};

pub struct NychaAdapter;

const PENDING_MATERIAL: &str = "PENDING_MATERIAL";

impl SourceAdapter for NychaAdapter {
    fn source(&self) -> SourceName {
        SourceName::Nycha
    }

    fn parse_row(&self, raw: &RawRow) -> Result<AdapterOutcome> {
        let wo_number = require_field(raw, "WO_Number")?;
        let record_id = RecordId::from_natural_key(SourceName::Nycha, &[wo_number]);

        let mut recovered = Vec::new();
        let created = optional_field(raw, "Created_Date").and_then(parse_date);
        let completed = optional_field(raw, "Completed_Date").and_then(parse_date);
        let duration = match (created, completed) {
            (Some(created), Some(completed)) => match duration_days(created, completed) {
                Ok(days) => Some(days),
                Err(error) => {
                    debug!(wo_number, %error, "recovered invalid date range");
                    recovered.push(error);
                    None
                }
            },
            _ => None,
        };

        let record = IntermediateRecord {
            source_name: SourceName::Nycha,
            record_id,
            category: derive_category(raw),
            raw_fields: raw.fields.clone(),
            duration_days: duration,
        };
        Ok(AdapterOutcome { record, recovered })
    }
}

/// Category from discriminator fields, in precedence order. Total: every
/// row lands somewhere, with LaborLog as the catch-all.
fn derive_category(raw: &RawRow) -> Category {
    if optional_field(raw, "Delay_Reason").is_some() {
        return Category::Rfi;
    }
    if let Some(status) = optional_field(raw, "WO_Status").or_else(|| optional_field(raw, "Status"))
        && status_vocabulary(SourceName::Nycha).normalize(status) == PENDING_MATERIAL
    {
        return Category::MaterialDelivery;
    }
    let wo_type = optional_field(raw, "WO_Type").unwrap_or_default();
    if wo_type.eq_ignore_ascii_case("Inspection")
        || (optional_field(raw, "Field_Notes").is_some()
            && optional_field(raw, "Description").is_none())
    {
        return Category::FieldNote;
    }
    Category::LaborLog
}

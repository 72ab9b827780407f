pub mod enums;
pub mod error;
pub mod ids;
pub mod mapping;
pub mod record;
pub mod summary;

pub use enums::{Category, Quality, SourceName};
pub use error::{HarmonError, Result};
pub use ids::RecordId;
pub use mapping::{MappingRule, TargetField, Transform};
pub use record::{CanonicalRecord, IntermediateRecord};
pub use summary::RunSummary;

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn record_anchoring() {
        let record = CanonicalRecord {
            record_id: RecordId::from_natural_key(SourceName::Nycha, &["1"]),
            category: Category::LaborLog,
            source_name: SourceName::Nycha,
            timestamp: None,
            amount: None,
            duration_days: None,
            text_payload: Some("Leak".to_string()),
            status_code: None,
            quality: Quality::Complete,
            raw_fields: BTreeMap::new(),
        };
        assert!(!record.is_anchored());
        let anchored = CanonicalRecord {
            amount: Some(100.0),
            ..record
        };
        assert!(anchored.is_anchored());
    }

    #[test]
    fn record_round_trips_through_json() {
        let mut raw = BTreeMap::new();
        raw.insert("WO_Number".to_string(), "123".to_string());
        let record = CanonicalRecord {
            record_id: RecordId::from_natural_key(SourceName::Nycha, &["123"]),
            category: Category::Rfi,
            source_name: SourceName::Nycha,
            timestamp: chrono::NaiveDate::from_ymd_opt(2024, 1, 1),
            amount: None,
            duration_days: Some(2),
            text_payload: None,
            status_code: Some("OPEN".to_string()),
            quality: Quality::Incomplete,
            raw_fields: raw,
        };
        let json = serde_json::to_string(&record).expect("serialize record");
        assert!(json.contains("\"RFI\""));
        assert!(json.contains("\"NYCHA\""));
        let round: CanonicalRecord = serde_json::from_str(&json).expect("deserialize record");
        assert_eq!(round, record);
    }
}

//! Lossless passthrough property: whatever columns a source row carries,
//! the normalized record's `raw_fields` reproduces them exactly.

use std::collections::BTreeMap;

use proptest::prelude::*;

use harmon_ingest::RawRow;
use harmon_model::SourceName;
use harmon_registry::{get_rules, status_vocabulary};
use harmon_transform::{SourceAdapter, NychaAdapter, normalize};

fn arb_fields() -> impl Strategy<Value = BTreeMap<String, String>> {
    proptest::collection::btree_map("[A-Za-z_]{1,12}", ".{0,24}", 0..8)
}

proptest! {
    #[test]
    fn raw_fields_round_trip(mut fields in arb_fields(), wo in "[0-9]{1,8}") {
        fields.insert("WO_Number".to_string(), wo);
        let raw = RawRow { line: 1, fields: fields.clone() };
        let outcome = NychaAdapter.parse_row(&raw).expect("keyed row parses");
        let normalized = normalize(
            outcome.record,
            get_rules(SourceName::Nycha),
            status_vocabulary(SourceName::Nycha),
        );
        prop_assert_eq!(&normalized.record.raw_fields, &fields);
    }
}

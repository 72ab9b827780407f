//! Per-source mapping-rule tables.
//!
//! Candidate columns are listed in priority order; the normalizer takes the
//! first non-blank. Column spellings follow the public portal exports, with
//! the common alternates the portals have shipped over time.

use harmon_model::{MappingRule, TargetField, Transform};

pub fn nycha_rules() -> Vec<MappingRule> {
    vec![
        MappingRule::new(
            TargetField::Timestamp,
            &["Created_Date", "Reported_Date"],
            Transform::ParseDate,
        ),
        MappingRule::new(
            TargetField::TextPayload,
            &["Description", "Field_Notes", "Delay_Reason"],
            Transform::Identity,
        ),
        MappingRule::new(
            TargetField::StatusCode,
            &["WO_Status", "Status"],
            Transform::MapStatus,
        ),
        // NYCHA work orders carry no financial data; no amount rule.
    ]
}

pub fn usaspending_rules() -> Vec<MappingRule> {
    vec![
        MappingRule::new(
            TargetField::Timestamp,
            &["Action_Date", "Period_Of_Performance_Start_Date"],
            Transform::ParseDate,
        ),
        MappingRule::new(
            TargetField::Amount,
            &["Federal_Action_Obligation", "Total_Obligation"],
            Transform::ParseAmount,
        ),
        MappingRule::new(
            TargetField::TextPayload,
            &["Award_Description", "Description"],
            Transform::Identity,
        ),
        MappingRule::new(
            TargetField::StatusCode,
            &["Action_Type"],
            Transform::MapStatus,
        ),
    ]
}

pub fn gsa_rules() -> Vec<MappingRule> {
    vec![
        MappingRule::new(
            TargetField::Timestamp,
            &["Begin_Date", "Contract_Start"],
            Transform::ParseDate,
        ),
        MappingRule::new(
            TargetField::Amount,
            &["Price", "Current_Price"],
            Transform::ParseAmount,
        ),
        MappingRule::new(
            TargetField::TextPayload,
            &["Labor_Category", "Experience", "Education"],
            Transform::Concat {
                separator: ", ".to_string(),
            },
        ),
        // GSA CALC rows have no status column.
    ]
}

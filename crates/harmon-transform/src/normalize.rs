//! The normalizer: declarative rule evaluation over intermediate records.
//!
//! Each rule is evaluated the same way regardless of source: pick the first
//! non-blank candidate column, apply the transform, and on transform failure
//! fall back to the rule's default and record a warning. A failing transform
//! never aborts the record; the raw row is already preserved verbatim, so a
//! partially normalized record is still auditable.

use std::fmt;

use chrono::NaiveDate;
use tracing::debug;

use harmon_model::{
    CanonicalRecord, IntermediateRecord, MappingRule, Quality, TargetField, Transform,
};
use harmon_registry::{StatusVocabulary, UNMAPPED_PREFIX};

use crate::datetime::parse_date;
use crate::numeric::parse_amount;

/// Non-fatal findings recorded while normalizing one record.
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizeWarning {
    /// The winning candidate value did not survive its transform; the
    /// rule's default (or null) was used instead.
    TransformFailed { target: TargetField, value: String },
    /// A negative amount on an obligation category. Obligations are
    /// non-negative by invariant, so the amount is nulled and the raw value
    /// left in `raw_fields`.
    NegativeObligation { value: f64 },
    /// A status value outside the source vocabulary, passed through with
    /// the sentinel tag.
    UnmappedStatus { raw: String },
}

impl fmt::Display for NormalizeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TransformFailed { target, value } => {
                write!(f, "transform failed for {}: {value:?}", target.as_str())
            }
            Self::NegativeObligation { value } => {
                write!(f, "negative obligation amount {value} nulled")
            }
            Self::UnmappedStatus { raw } => write!(f, "status {raw:?} not in vocabulary"),
        }
    }
}

/// The typed result of applying one rule's transform, assigned to the
/// target field only when the types line up.
#[derive(Debug)]
enum ResolvedValue {
    Date(Option<NaiveDate>),
    Amount(Option<f64>),
    Text(String),
}

/// A normalized record plus the warnings accumulated while building it.
#[derive(Debug)]
pub struct Normalized {
    pub record: CanonicalRecord,
    pub warnings: Vec<NormalizeWarning>,
}

/// Project an intermediate record onto the canonical schema.
pub fn normalize(
    intermediate: IntermediateRecord,
    rules: &[MappingRule],
    vocab: &StatusVocabulary,
) -> Normalized {
    let mut warnings = Vec::new();
    let mut timestamp: Option<NaiveDate> = None;
    let mut amount: Option<f64> = None;
    let mut text_payload: Option<String> = None;
    let mut status_code: Option<String> = None;

    for rule in rules {
        let value = match &rule.transform {
            Transform::Concat { separator } => concat_candidates(&intermediate, rule, separator),
            _ => first_candidate(&intermediate, rule),
        };
        let Some(value) = value else {
            continue;
        };
        let resolved = match &rule.transform {
            Transform::ParseDate => ResolvedValue::Date(transform_date(&value, rule, &mut warnings)),
            Transform::ParseAmount => {
                ResolvedValue::Amount(transform_amount(&value, rule, &intermediate, &mut warnings))
            }
            Transform::MapStatus => ResolvedValue::Text(map_status(&value, vocab, &mut warnings)),
            Transform::Identity | Transform::Concat { .. } => ResolvedValue::Text(value),
        };
        match (rule.target, resolved) {
            (TargetField::Timestamp, ResolvedValue::Date(date)) => timestamp = date,
            (TargetField::Amount, ResolvedValue::Amount(parsed)) => amount = parsed,
            (TargetField::TextPayload, ResolvedValue::Text(text)) => text_payload = Some(text),
            (TargetField::StatusCode, ResolvedValue::Text(text)) => status_code = Some(text),
            (target, resolved) => {
                debug!(
                    target = target.as_str(),
                    ?resolved,
                    "rule transform does not fit its target field; skipped"
                );
            }
        }
    }

    for warning in &warnings {
        debug!(record_id = %intermediate.record_id, %warning, "normalization warning");
    }

    let record = CanonicalRecord {
        record_id: intermediate.record_id,
        category: intermediate.category,
        source_name: intermediate.source_name,
        timestamp,
        amount,
        duration_days: intermediate.duration_days,
        text_payload,
        status_code,
        quality: Quality::Complete,
        raw_fields: intermediate.raw_fields,
    };
    Normalized { record, warnings }
}

fn first_candidate(intermediate: &IntermediateRecord, rule: &MappingRule) -> Option<String> {
    rule.source_columns
        .iter()
        .find_map(|column| intermediate.field(column))
        .map(ToOwned::to_owned)
}

fn concat_candidates(
    intermediate: &IntermediateRecord,
    rule: &MappingRule,
    separator: &str,
) -> Option<String> {
    let parts: Vec<&str> = rule
        .source_columns
        .iter()
        .filter_map(|column| intermediate.field(column))
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(separator))
    }
}

fn transform_date(
    value: &str,
    rule: &MappingRule,
    warnings: &mut Vec<NormalizeWarning>,
) -> Option<NaiveDate> {
    match parse_date(value) {
        Some(date) => Some(date),
        None => {
            warnings.push(NormalizeWarning::TransformFailed {
                target: rule.target,
                value: value.to_string(),
            });
            rule.default.as_deref().and_then(parse_date)
        }
    }
}

fn transform_amount(
    value: &str,
    rule: &MappingRule,
    intermediate: &IntermediateRecord,
    warnings: &mut Vec<NormalizeWarning>,
) -> Option<f64> {
    let parsed = match parse_amount(value) {
        Some(parsed) => Some(parsed),
        None => {
            warnings.push(NormalizeWarning::TransformFailed {
                target: rule.target,
                value: value.to_string(),
            });
            rule.default.as_deref().and_then(parse_amount)
        }
    }?;
    if parsed < 0.0 && intermediate.category.is_obligation() {
        warnings.push(NormalizeWarning::NegativeObligation { value: parsed });
        return None;
    }
    Some(parsed)
}

fn map_status(
    value: &str,
    vocab: &StatusVocabulary,
    warnings: &mut Vec<NormalizeWarning>,
) -> String {
    let normalized = vocab.normalize(value);
    if normalized.starts_with(UNMAPPED_PREFIX) {
        warnings.push(NormalizeWarning::UnmappedStatus {
            raw: value.to_string(),
        });
    }
    normalized
}

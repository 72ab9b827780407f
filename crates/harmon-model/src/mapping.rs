//! Declarative mapping rules translating source columns to canonical fields.
//!
//! The heterogeneous per-source column sets are represented as data, not as
//! branching code: the normalizer walks an ordered rule list per source and
//! evaluates every rule the same way. Rules are owned by the schema registry
//! and read-only everywhere else.

use serde::{Deserialize, Serialize};

/// Canonical fields a mapping rule may populate.
///
/// Identity fields (`record_id`, `category`, `source_name`) and `raw_fields`
/// are produced by the adapters, not by rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetField {
    Timestamp,
    Amount,
    TextPayload,
    StatusCode,
}

impl TargetField {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetField::Timestamp => "timestamp",
            TargetField::Amount => "amount",
            TargetField::TextPayload => "text_payload",
            TargetField::StatusCode => "status_code",
        }
    }
}

/// Transform applied to the winning candidate value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transform {
    /// Parse a calendar date (ISO `YYYY-MM-DD` or US `MM/DD/YYYY`).
    ParseDate,
    /// Parse a currency amount; blank is null, never zero.
    ParseAmount,
    /// Normalize through the source's status vocabulary table, with an
    /// `UNMAPPED:<raw>` sentinel for values outside the vocabulary.
    MapStatus,
    /// Concatenate all candidate columns (not just the first non-blank)
    /// with the given separator.
    Concat { separator: String },
    /// Use the raw value as-is.
    Identity,
}

/// One declarative instruction: target field, candidate source columns in
/// priority order (first non-blank wins), transform, and a fallback applied
/// when the transform fails.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappingRule {
    pub target: TargetField,
    pub source_columns: Vec<String>,
    pub transform: Transform,
    /// Value to fall back to when the transform fails. `None` means the
    /// target field stays null on failure.
    pub default: Option<String>,
}

impl MappingRule {
    pub fn new(target: TargetField, source_columns: &[&str], transform: Transform) -> Self {
        Self {
            target,
            source_columns: source_columns.iter().map(|c| (*c).to_string()).collect(),
            transform,
            default: None,
        }
    }

    #[must_use]
    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self
    }
}

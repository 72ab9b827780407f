//! Per-source status vocabularies.
//!
//! Each source carries its own status spelling; the vocabulary table maps
//! those spellings onto a shared normalized code set. Values outside the
//! table are never dropped: they pass through tagged `UNMAPPED:<raw>` so the
//! information survives for downstream audit.

use std::collections::BTreeMap;

/// Prefix applied to status values with no vocabulary entry.
pub const UNMAPPED_PREFIX: &str = "UNMAPPED:";

/// An immutable raw-to-normalized status mapping for one source.
#[derive(Debug, Clone, Default)]
pub struct StatusVocabulary {
    entries: BTreeMap<String, String>,
}

impl StatusVocabulary {
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        let entries = pairs
            .iter()
            .map(|(raw, normalized)| (normalize_key(raw), (*normalized).to_string()))
            .collect();
        Self { entries }
    }

    /// Normalize a raw status value. Lookup is case- and whitespace-
    /// insensitive; misses return the sentinel-tagged raw value.
    pub fn normalize(&self, raw: &str) -> String {
        match self.entries.get(&normalize_key(raw)) {
            Some(code) => code.clone(),
            None => format!("{UNMAPPED_PREFIX}{}", raw.trim()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn normalize_key(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// NYCHA work-order statuses. "Pending material" spellings share one code
/// because the material-delivery heuristic keys on it.
pub fn nycha_vocabulary() -> StatusVocabulary {
    StatusVocabulary::from_pairs(&[
        ("Open", "OPEN"),
        ("In Progress", "IN_PROGRESS"),
        ("Assigned", "IN_PROGRESS"),
        ("Closed", "CLOSED"),
        ("Completed", "CLOSED"),
        ("Pending Material", "PENDING_MATERIAL"),
        ("Awaiting Parts", "PENDING_MATERIAL"),
        ("On Hold - Materials", "PENDING_MATERIAL"),
        ("Cancelled", "CANCELLED"),
        ("Canceled", "CANCELLED"),
    ])
}

/// USAspending contract action types (single-letter codes).
pub fn usaspending_vocabulary() -> StatusVocabulary {
    StatusVocabulary::from_pairs(&[
        ("A", "NEW_AWARD"),
        ("B", "CONTINUATION"),
        ("C", "REVISION"),
        ("D", "FUNDING_ADJUSTMENT"),
        ("New", "NEW_AWARD"),
        ("Continuation", "CONTINUATION"),
        ("Revision", "REVISION"),
    ])
}

/// GSA CALC has no status concept; the empty table tags everything.
pub fn gsa_vocabulary() -> StatusVocabulary {
    StatusVocabulary::default()
}

//! Type-safe enumerations for the canonical schema.
//!
//! Categories and source names travel through the pipeline as enums and are
//! only rendered to strings at the output boundary, so an unmapped category
//! is a compile error rather than a typo in a CSV cell.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::HarmonError;

/// Canonical construction-operations category.
///
/// Derived deterministically from the source plus source-specific
/// discriminator fields; every intermediate record gets exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Crew time against a work order (NYCHA Emergency/Routine work orders).
    LaborLog,
    /// Free-text site observation with no financial dimension.
    FieldNote,
    /// Work held on material availability.
    MaterialDelivery,
    /// Request for information; proxied by delay-reason annotations.
    #[serde(rename = "RFI")]
    Rfi,
    /// Base contract award value.
    ContractValue,
    /// Contract modification (USAspending modification number > 0).
    ChangeOrder,
    /// One obligation event in a time-series view of an award.
    ProgressBilling,
    /// Schedule-of-values line item (GSA CALC labor rates).
    ScheduleLineItem,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::LaborLog => "LaborLog",
            Category::FieldNote => "FieldNote",
            Category::MaterialDelivery => "MaterialDelivery",
            Category::Rfi => "RFI",
            Category::ContractValue => "ContractValue",
            Category::ChangeOrder => "ChangeOrder",
            Category::ProgressBilling => "ProgressBilling",
            Category::ScheduleLineItem => "ScheduleLineItem",
        }
    }

    /// True for categories whose amount is a contract obligation and must be
    /// non-negative when present.
    pub fn is_obligation(&self) -> bool {
        matches!(
            self,
            Category::ContractValue
                | Category::ChangeOrder
                | Category::ProgressBilling
                | Category::ScheduleLineItem
        )
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three registered source datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceName {
    #[serde(rename = "NYCHA")]
    Nycha,
    #[serde(rename = "USASPENDING")]
    Usaspending,
    #[serde(rename = "GSA_CALC")]
    GsaCalc,
}

impl SourceName {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceName::Nycha => "NYCHA",
            SourceName::Usaspending => "USASPENDING",
            SourceName::GsaCalc => "GSA_CALC",
        }
    }

    pub fn all() -> [SourceName; 3] {
        [
            SourceName::Nycha,
            SourceName::Usaspending,
            SourceName::GsaCalc,
        ]
    }
}

impl fmt::Display for SourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceName {
    type Err = HarmonError;

    /// Parse the CLI spelling of a source name (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "nycha" => Ok(SourceName::Nycha),
            "usaspending" => Ok(SourceName::Usaspending),
            "gsa" | "gsa_calc" | "gsa-calc" => Ok(SourceName::GsaCalc),
            _ => Err(HarmonError::UnknownSource(s.to_string())),
        }
    }
}

/// Per-record quality marker set by the resolver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Quality {
    #[default]
    #[serde(rename = "complete")]
    Complete,
    /// The record lacks both a temporal and a financial anchor. Kept and
    /// flagged; downstream consumers decide filtering policy.
    #[serde(rename = "incomplete")]
    Incomplete,
}

impl Quality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Quality::Complete => "complete",
            Quality::Incomplete => "incomplete",
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_parses_cli_spellings() {
        assert_eq!("nycha".parse::<SourceName>().unwrap(), SourceName::Nycha);
        assert_eq!("GSA".parse::<SourceName>().unwrap(), SourceName::GsaCalc);
        assert_eq!(
            "usaspending".parse::<SourceName>().unwrap(),
            SourceName::Usaspending
        );
        assert!("hud".parse::<SourceName>().is_err());
    }

    #[test]
    fn rfi_renders_uppercase() {
        assert_eq!(Category::Rfi.as_str(), "RFI");
        let json = serde_json::to_string(&Category::Rfi).unwrap();
        assert_eq!(json, "\"RFI\"");
    }

    #[test]
    fn obligation_categories() {
        assert!(Category::ContractValue.is_obligation());
        assert!(Category::ProgressBilling.is_obligation());
        assert!(!Category::LaborLog.is_obligation());
        assert!(!Category::Rfi.is_obligation());
    }
}

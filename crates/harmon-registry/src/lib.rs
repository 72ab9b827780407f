//! Schema registry: the single owner of mapping rules and status
//! vocabularies.
//!
//! The registry is process-wide immutable configuration, built once on first
//! access and handed out by shared reference. Nothing outside this crate
//! constructs or mutates a rule.

pub mod rules;
pub mod vocab;

use std::str::FromStr;
use std::sync::OnceLock;

use harmon_model::{MappingRule, Result, SourceName};

pub use vocab::{StatusVocabulary, UNMAPPED_PREFIX};

struct Registry {
    nycha_rules: Vec<MappingRule>,
    usaspending_rules: Vec<MappingRule>,
    gsa_rules: Vec<MappingRule>,
    nycha_vocab: StatusVocabulary,
    usaspending_vocab: StatusVocabulary,
    gsa_vocab: StatusVocabulary,
}

static REGISTRY: OnceLock<Registry> = OnceLock::new();

fn registry() -> &'static Registry {
    REGISTRY.get_or_init(|| Registry {
        nycha_rules: rules::nycha_rules(),
        usaspending_rules: rules::usaspending_rules(),
        gsa_rules: rules::gsa_rules(),
        nycha_vocab: vocab::nycha_vocabulary(),
        usaspending_vocab: vocab::usaspending_vocabulary(),
        gsa_vocab: vocab::gsa_vocabulary(),
    })
}

/// The ordered mapping rules for a registered source.
pub fn get_rules(source: SourceName) -> &'static [MappingRule] {
    let registry = registry();
    match source {
        SourceName::Nycha => &registry.nycha_rules,
        SourceName::Usaspending => &registry.usaspending_rules,
        SourceName::GsaCalc => &registry.gsa_rules,
    }
}

/// Rule lookup from an unvalidated source name, as given on the CLI.
///
/// Fails with [`harmon_model::HarmonError::UnknownSource`] before any row
/// is processed.
pub fn get_rules_by_name(name: &str) -> Result<&'static [MappingRule]> {
    let source = SourceName::from_str(name)?;
    Ok(get_rules(source))
}

/// The status vocabulary for a registered source.
pub fn status_vocabulary(source: SourceName) -> &'static StatusVocabulary {
    let registry = registry();
    match source {
        SourceName::Nycha => &registry.nycha_vocab,
        SourceName::Usaspending => &registry.usaspending_vocab,
        SourceName::GsaCalc => &registry.gsa_vocab,
    }
}

/// Human-readable natural-key description per source, for the `sources`
/// listing.
pub fn natural_key_columns(source: SourceName) -> &'static [&'static str] {
    match source {
        SourceName::Nycha => &["WO_Number"],
        SourceName::Usaspending => &["Award_ID", "Modification_Number"],
        SourceName::GsaCalc => &["Labor_Category", "Contract_Number"],
    }
}

#[cfg(test)]
mod tests {
    use harmon_model::{HarmonError, TargetField};

    use super::*;

    #[test]
    fn every_source_has_rules() {
        for source in SourceName::all() {
            assert!(!get_rules(source).is_empty());
        }
    }

    #[test]
    fn unknown_source_is_rejected_by_name() {
        let error = get_rules_by_name("hud").unwrap_err();
        assert!(matches!(error, HarmonError::UnknownSource(_)));
        assert!(get_rules_by_name("nycha").is_ok());
    }

    #[test]
    fn nycha_has_no_amount_rule() {
        assert!(
            !get_rules(SourceName::Nycha)
                .iter()
                .any(|rule| rule.target == TargetField::Amount)
        );
    }

    #[test]
    fn rules_are_stable_across_lookups() {
        let first = get_rules(SourceName::GsaCalc).as_ptr();
        let second = get_rules(SourceName::GsaCalc).as_ptr();
        assert_eq!(first, second);
    }
}

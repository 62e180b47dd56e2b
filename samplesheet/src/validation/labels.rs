//! Label legality rules shared by `sample`, `group` and `run_accession`.
//!
//! A label is legal when it starts with an ASCII letter, continues with
//! letters, digits or underscores, and does not collide with a string that
//! the pipeline or MultiQC reserves for its own file naming.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Check, ValidationError, ValidationResult};

static LEGAL_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_]*$").expect("valid label regex"));

/// How a reserved pattern is matched against a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchRule {
    /// Label starts with the needle.
    Prefix,
    /// Label ends with the needle.
    Suffix,
}

/// A string reserved by the pipeline or MultiQC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReservedPattern {
    /// Canonical text shown in reports.
    pub text: &'static str,
    pub needle: &'static str,
    pub rule: MatchRule,
}

impl ReservedPattern {
    const fn prefix(text: &'static str, needle: &'static str) -> Self {
        Self { text, needle, rule: MatchRule::Prefix }
    }

    const fn suffix(text: &'static str, needle: &'static str) -> Self {
        Self { text, needle, rule: MatchRule::Suffix }
    }

    pub fn matches(&self, label: &str) -> bool {
        match self.rule {
            MatchRule::Prefix => label.starts_with(self.needle),
            MatchRule::Suffix => label.ends_with(self.needle),
        }
    }
}

/// Mostly MultiQC reserved strings, with some reserved by the pipeline.
/// Checked in this order.
pub const RESERVED_PATTERNS: &[ReservedPattern] = &[
    ReservedPattern::prefix("_tophat", "_tophat"),
    ReservedPattern::prefix("ReadsPerGene", "ReadsPerGene"),
    ReservedPattern::prefix("_star_aligned", "_star_aligned"),
    ReservedPattern::prefix("_fastqc", "_fastqc"),
    ReservedPattern::prefix("_counts", "_counts"),
    ReservedPattern::prefix("Aligned", "Aligned"),
    ReservedPattern::prefix("_slamdunk", "_slamdunk"),
    ReservedPattern::prefix("_bismark", "_bismark"),
    ReservedPattern::prefix("_SummaryStatistics", "_SummaryStatistics"),
    ReservedPattern::prefix("_duprate", "_duprate"),
    ReservedPattern::prefix("_vep", "_vep"),
    ReservedPattern::prefix("ccs", "ccs"),
    ReservedPattern::prefix("_NanoStats", "_NanoStats"),
    ReservedPattern::suffix("_trimmed$", "_trimmed"),
    ReservedPattern::suffix("_val$", "_val"),
    ReservedPattern::suffix("_mqc$", "_mqc"),
    ReservedPattern::prefix(SHORT_SUMMARY_VARIANT, "short_summary_"),
    ReservedPattern::prefix("^short_summary_", "short_summary_"),
    ReservedPattern::suffix("_summary$", "_summary"),
    ReservedPattern::suffix("_matrix$", "_matrix"),
    ReservedPattern::suffix("_$", "_"),
    ReservedPattern::suffix("_R1$", "_R1"),
    ReservedPattern::suffix("_R2$", "_R2"),
];

/// Shadowed by `^short_summary_`; dropped when deduplicating.
const SHORT_SUMMARY_VARIANT: &str = "short_summary_$";

/// Checks labels against the legal pattern and a reserved list.
#[derive(Debug, Clone)]
pub struct LabelRules {
    reserved: Vec<ReservedPattern>,
}

impl Default for LabelRules {
    fn default() -> Self {
        Self {
            reserved: RESERVED_PATTERNS.to_vec(),
        }
    }
}

impl LabelRules {
    /// Rules with the redundant `short_summary_$` entry removed.
    pub fn deduplicated() -> Self {
        Self {
            reserved: RESERVED_PATTERNS
                .iter()
                .filter(|p| p.text != SHORT_SUMMARY_VARIANT)
                .copied()
                .collect(),
        }
    }

    pub fn reserved(&self) -> &[ReservedPattern] {
        &self.reserved
    }

    /// First reserved pattern the label collides with.
    pub fn reserved_match(&self, label: &str) -> Option<&ReservedPattern> {
        self.reserved.iter().find(|p| p.matches(label))
    }

    /// Check one label. Missing labels are checked as the empty string.
    pub fn check(&self, label: &str) -> ValidationResult {
        if !LEGAL_LABEL.is_match(label) {
            return Err(ValidationError::new(
                Check::IllegalLabel,
                "Sample/Group label contain illegal characters or does not start with letters",
            )
            .with_context("Label", label));
        }

        if let Some(pattern) = self.reserved_match(label) {
            return Err(ValidationError::new(
                Check::ReservedLabel,
                format!(
                    "Sample/Group label {} contain string reserved by pipeline or MultiQC. \
                     This may cause a problem.",
                    label
                ),
            )
            .with_context("Reserved string", pattern.text));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> LabelRules {
        LabelRules::default()
    }

    #[test]
    fn test_legal_labels() {
        for label in ["s1", "Sample_01", "a", "groupA", "R1_sample"] {
            assert!(rules().check(label).is_ok(), "{label} should be legal");
        }
    }

    #[test]
    fn test_must_start_with_letter() {
        let err = rules().check("1abc").unwrap_err();
        assert_eq!(err.check, Check::IllegalLabel);
        assert_eq!(err.context_value(), Some("1abc"));
    }

    #[test]
    fn test_illegal_characters() {
        for label in ["s-1", "s 1", "s.1", "_s1", ""] {
            let err = rules().check(label).unwrap_err();
            assert_eq!(err.check, Check::IllegalLabel, "{label:?}");
        }
    }

    #[test]
    fn test_reserved_suffix() {
        let err = rules().check("foo_R1").unwrap_err();
        assert_eq!(err.check, Check::ReservedLabel);
        assert_eq!(err.context_value(), Some("_R1$"));
        assert_eq!(
            err.message,
            "Sample/Group label foo_R1 contain string reserved by pipeline or MultiQC. This may cause a problem."
        );
    }

    #[test]
    fn test_reserved_prefix() {
        assert_eq!(rules().check("ccs1").unwrap_err().context_value(), Some("ccs"));
        assert_eq!(rules().check("Aligned_x").unwrap_err().context_value(), Some("Aligned"));
        assert_eq!(
            rules().check("ReadsPerGene2").unwrap_err().context_value(),
            Some("ReadsPerGene")
        );
    }

    #[test]
    fn test_prefix_patterns_do_not_match_inside_label() {
        assert!(rules().check("my_fastqc_run").is_ok());
        assert!(rules().check("sampleAligned").is_ok());
    }

    #[test]
    fn test_first_matching_pattern_reported() {
        let err = rules().check("ccs_trimmed").unwrap_err();
        assert_eq!(err.context_value(), Some("ccs"));

        let err = rules().check("short_summary_x").unwrap_err();
        assert_eq!(err.context_value(), Some("short_summary_$"));
    }

    #[test]
    fn test_trailing_underscore() {
        assert_eq!(rules().check("sample_").unwrap_err().context_value(), Some("_$"));
    }

    #[test]
    fn test_deduplicated_rules() {
        let rules = LabelRules::deduplicated();
        assert_eq!(rules.reserved().len(), RESERVED_PATTERNS.len() - 1);
        let err = rules.check("short_summary_x").unwrap_err();
        assert_eq!(err.context_value(), Some("^short_summary_"));
    }
}

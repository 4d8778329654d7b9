//! Configurable extraction-rule set
//!
//! Attribute extraction (times, prices, ages, contact info) is expressed as
//! an ordered list of (pattern, field) rules applied to a candidate's text.
//! New patterns are additive data here rather than new code paths in the
//! parsers.

use regex::Regex;
use std::sync::OnceLock;

use crate::records::EventRecord;

/// The record field a rule's matches are appended to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Times,
    Prices,
    Ages,
    Contacts,
}

/// One extraction rule: a compiled pattern and the field it feeds
#[derive(Debug)]
pub struct Rule {
    pattern: Regex,
    field: Field,
}

/// An ordered set of extraction rules applied to candidate text
#[derive(Debug)]
pub struct ExtractionRules {
    rules: Vec<Rule>,
}

impl ExtractionRules {
    /// The standard rule set, shared process-wide and compiled once
    pub fn standard() -> &'static ExtractionRules {
        static RULES: OnceLock<ExtractionRules> = OnceLock::new();
        RULES.get_or_init(|| {
            ExtractionRules::from_patterns(&[
                // Times of day
                (r"(?i)\b\d{1,2}:\d{2}\s*(?:am|pm)?", Field::Times),
                (r"(?i)\b\d{1,2}\s*(?:am|pm)\b", Field::Times),
                (r"(?i)\b(?:morning|afternoon|evening|noon)\b", Field::Times),
                // Prices
                (r"\$\d+(?:\.\d{2})?(?:\s*per\s*\w+)?", Field::Prices),
                (r"(?i)\b(?:cost|fee|price)s?:?\s*\$?\d+", Field::Prices),
                (r"(?i)\b\d+\s*dollars?\b", Field::Prices),
                (r"(?i)\bfree\b", Field::Prices),
                (r"(?i)\bno\s+(?:cost|charge|fee)\b", Field::Prices),
                // Ages and skill levels
                (r"(?i)\bages?\s+\d+(?:\s*(?:[-–]|to)\s*\d+)?", Field::Ages),
                (
                    r"(?i)\b\d+(?:\s*(?:[-–]|to)\s*\d+)?\s+years?\s+old\b",
                    Field::Ages,
                ),
                (
                    r"(?i)\b(?:junior|adult|senior|youth|kids?|children)\b",
                    Field::Ages,
                ),
                (
                    r"(?i)\b(?:beginner|intermediate|advanced|all\s+levels)\b",
                    Field::Ages,
                ),
                // Contact info
                (r"\(\d{3}\)\s*\d{3}[-.\s]?\d{4}", Field::Contacts),
                (r"\b\d{3}[-.]\d{3}[-.]\d{4}\b", Field::Contacts),
                (r"[\w.+-]+@[\w.-]+\.\w+", Field::Contacts),
                (r"(?i)\bpro\s*shop\b", Field::Contacts),
            ])
        })
    }

    /// Compiles a rule set from (pattern, field) pairs.
    ///
    /// Panics on an invalid pattern; all call sites use hard-coded patterns.
    fn from_patterns(patterns: &[(&str, Field)]) -> Self {
        let rules = patterns
            .iter()
            .map(|(pattern, field)| Rule {
                pattern: Regex::new(pattern).expect("hard-coded extraction pattern is valid"),
                field: *field,
            })
            .collect();
        Self { rules }
    }

    /// Applies every rule in order to `text`, appending matches to the
    /// corresponding fields of `record`. Duplicate matches within one field
    /// are dropped, preserving first-seen order.
    pub fn apply(&self, text: &str, record: &mut EventRecord) {
        for rule in &self.rules {
            for m in rule.pattern.find_iter(text) {
                let value = m.as_str().to_string();
                let target = match rule.field {
                    Field::Times => &mut record.times,
                    Field::Prices => &mut record.prices,
                    Field::Ages => &mut record.ages,
                    Field::Contacts => &mut record.contacts,
                };
                if !target.contains(&value) {
                    target.push(value);
                }
            }
        }
    }
}

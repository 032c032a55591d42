//! Regex patterns for credit-card statement fields.

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::record::Field;

/// Card product names recognized by the variant pattern, canonical spelling.
pub const CARD_VARIANTS: [&str; 8] = [
    "Platinum",
    "Signature",
    "Prime",
    "Millennia",
    "Regalia",
    "Infinia",
    "Titanium",
    "Coral",
];

lazy_static! {
    // Masked card number: XXXX1234, xxxx1234, *1234
    pub static ref CARD_LAST4: Regex = Regex::new(
        r"(?i)(?:XXXX|xxxx|x{4}|\*)(\d{4})"
    ).unwrap();

    // Labeled dates, up to and including the first four-digit year
    pub static ref BILLING_CYCLE: Regex = Regex::new(
        r"(?i)Billing Period[:\s]*(.*?\d{4})"
    ).unwrap();

    pub static ref DUE_DATE: Regex = Regex::new(
        r"(?i)Due Date[:\s]*(.*?\d{4})"
    ).unwrap();

    // Amount with optional comma grouping and fraction, rupee sign optional
    pub static ref TOTAL_DUE: Regex = Regex::new(
        r"(?i)Total Amount Due[:\s]*₹?([0-9,]+\.\d+|[0-9,]+)"
    ).unwrap();

    pub static ref VARIANT: Regex = Regex::new(
        r"(?i)(Platinum|Signature|Prime|Millennia|Regalia|Infinia|Titanium|Coral)"
    ).unwrap();
}

/// A named pattern: the first capture group of the first match is the value.
#[derive(Debug, Clone)]
pub struct FieldPattern {
    pub field: Field,
    pub regex: Regex,
}

impl FieldPattern {
    pub fn new(field: Field, regex: Regex) -> Self {
        Self { field, regex }
    }

    /// First capture group of the first match, trimmed. Blank captures count as no match.
    pub fn capture(&self, text: &str) -> Option<String> {
        let caps = self.regex.captures(text)?;
        let value = caps.get(1)?.as_str().trim();
        if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        }
    }
}

/// The fixed table of field patterns applied to every statement.
#[derive(Debug, Clone)]
pub struct PatternSet {
    patterns: Vec<FieldPattern>,
}

impl PatternSet {
    /// Patterns for credit-card statements, one per [`Field`].
    pub fn credit_card() -> Self {
        Self {
            patterns: vec![
                FieldPattern::new(Field::CardLast4, CARD_LAST4.clone()),
                FieldPattern::new(Field::BillingCycle, BILLING_CYCLE.clone()),
                FieldPattern::new(Field::DueDate, DUE_DATE.clone()),
                FieldPattern::new(Field::TotalDue, TOTAL_DUE.clone()),
                FieldPattern::new(Field::Variant, VARIANT.clone()),
            ],
        }
    }

    /// Replace the pattern used for `field`.
    pub fn with_pattern(mut self, field: Field, regex: Regex) -> Self {
        match self.patterns.iter_mut().find(|p| p.field == field) {
            Some(existing) => existing.regex = regex,
            None => self.patterns.push(FieldPattern::new(field, regex)),
        }
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldPattern> {
        self.patterns.iter()
    }

    pub fn get(&self, field: Field) -> Option<&FieldPattern> {
        self.patterns.iter().find(|p| p.field == field)
    }
}

impl Default for PatternSet {
    fn default() -> Self {
        Self::credit_card()
    }
}

/// Canonical spelling of a matched card variant.
pub fn canonical_variant(matched: &str) -> Option<&'static str> {
    CARD_VARIANTS
        .iter()
        .copied()
        .find(|v| v.eq_ignore_ascii_case(matched))
}

//! Statement parser applying the field pattern table to document text.

use tracing::{debug, trace};

use crate::models::record::{Field, FieldRecord};

use super::rules::dates::normalize_date;
use super::rules::patterns::{canonical_variant, PatternSet};

/// Extracts [`FieldRecord`]s from statement text.
#[derive(Debug, Clone, Default)]
pub struct StatementParser {
    patterns: PatternSet,
}

impl StatementParser {
    /// Create a parser with the credit-card pattern table.
    pub fn new() -> Self {
        Self::with_patterns(PatternSet::credit_card())
    }

    /// Create a parser with an explicit pattern table.
    pub fn with_patterns(patterns: PatternSet) -> Self {
        Self { patterns }
    }

    /// Extract all pattern fields from `text`.
    ///
    /// Fields without a match are `None`. Date fields are normalized to
    /// `YYYY-MM-DD` when the captured text parses as a date and kept verbatim
    /// otherwise. The returned record has an empty `file`.
    pub fn parse(&self, text: &str) -> FieldRecord {
        let mut record = FieldRecord::default();

        for pattern in self.patterns.iter() {
            let value = pattern.capture(text);
            trace!("{} -> {:?}", pattern.field, value);
            record.set(pattern.field, value);
        }

        if let Some(variant) = record.variant.as_deref().and_then(canonical_variant) {
            record.variant = Some(variant.to_string());
        }

        for field in Field::ALL.into_iter().filter(|f| f.is_date()) {
            let Some(raw) = record.get(field).map(str::to_owned) else {
                continue;
            };
            match normalize_date(&raw) {
                Some(iso) => record.set(field, Some(iso)),
                None => debug!("Could not normalize {} value {:?}", field, raw),
            }
        }

        debug!("Extracted {}/{} fields", record.found_count(), Field::ALL.len());
        record
    }
}

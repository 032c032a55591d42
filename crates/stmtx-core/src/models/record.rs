//! Statement records: one row of extracted fields per processed PDF.

/// Placeholder written for fields that could not be extracted.
pub const NOT_FOUND: &str = "NOT FOUND";

/// A statement field recognized by the extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Last four digits of the masked card number.
    CardLast4,
    /// Billing period (normalized to YYYY-MM-DD when it parses as a date).
    BillingCycle,
    /// Payment due date (normalized to YYYY-MM-DD when it parses as a date).
    DueDate,
    /// Total amount due, as printed.
    TotalDue,
    /// Card product name.
    Variant,
}

impl Field {
    /// All pattern fields in column order.
    pub const ALL: [Field; 5] = [
        Field::CardLast4,
        Field::BillingCycle,
        Field::DueDate,
        Field::TotalDue,
        Field::Variant,
    ];

    /// Column name used in the output table.
    pub fn name(self) -> &'static str {
        match self {
            Field::CardLast4 => "card_last4",
            Field::BillingCycle => "billing_cycle",
            Field::DueDate => "due_date",
            Field::TotalDue => "total_due",
            Field::Variant => "variant",
        }
    }

    /// Whether the field goes through date normalization.
    pub fn is_date(self) -> bool {
        matches!(self, Field::BillingCycle | Field::DueDate)
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Fields extracted from one statement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldRecord {
    pub card_last4: Option<String>,
    pub billing_cycle: Option<String>,
    pub due_date: Option<String>,
    pub total_due: Option<String>,
    pub variant: Option<String>,

    /// Source file name.
    pub file: String,
}

impl FieldRecord {
    /// Get the value of a pattern field.
    pub fn get(&self, field: Field) -> Option<&str> {
        self.slot(field).as_deref()
    }

    /// Set the value of a pattern field.
    pub fn set(&mut self, field: Field, value: Option<String>) {
        *self.slot_mut(field) = value;
    }

    /// Value of a field as written to the output table.
    pub fn value_or_sentinel(&self, field: Field) -> &str {
        self.get(field).unwrap_or(NOT_FOUND)
    }

    /// Number of pattern fields that were found.
    pub fn found_count(&self) -> usize {
        Field::ALL.iter().filter(|f| self.get(**f).is_some()).count()
    }

    /// Attach the source file name.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = file.into();
        self
    }

    fn slot(&self, field: Field) -> &Option<String> {
        match field {
            Field::CardLast4 => &self.card_last4,
            Field::BillingCycle => &self.billing_cycle,
            Field::DueDate => &self.due_date,
            Field::TotalDue => &self.total_due,
            Field::Variant => &self.variant,
        }
    }

    fn slot_mut(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::CardLast4 => &mut self.card_last4,
            Field::BillingCycle => &mut self.billing_cycle,
            Field::DueDate => &mut self.due_date,
            Field::TotalDue => &mut self.total_due,
            Field::Variant => &mut self.variant,
        }
    }
}

/// Ordered collection of records, one per processed document.
#[derive(Debug, Clone, Default)]
pub struct StatementTable {
    records: Vec<FieldRecord>,
}

impl StatementTable {
    /// Column name of the source file column.
    pub const FILE_COLUMN: &'static str = "file";

    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record. Insertion order is preserved.
    pub fn push(&mut self, record: FieldRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Header row: the pattern fields followed by `file`.
    pub fn headers() -> Vec<&'static str> {
        Field::ALL
            .iter()
            .map(|f| f.name())
            .chain(std::iter::once(Self::FILE_COLUMN))
            .collect()
    }

    /// Data rows with absent fields rendered as [`NOT_FOUND`].
    pub fn rows(&self) -> impl Iterator<Item = Vec<&str>> + '_ {
        self.records.iter().map(|record| {
            Field::ALL
                .iter()
                .map(|f| record.value_or_sentinel(*f))
                .chain(std::iter::once(record.file.as_str()))
                .collect()
        })
    }
}

impl FromIterator<FieldRecord> for StatementTable {
    fn from_iter<I: IntoIterator<Item = FieldRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_headers_order() {
        assert_eq!(
            StatementTable::headers(),
            vec!["card_last4", "billing_cycle", "due_date", "total_due", "variant", "file"]
        );
    }

    #[test]
    fn test_get_set_roundtrip_per_field() {
        let mut record = FieldRecord::default();
        for field in Field::ALL {
            record.set(field, Some(field.name().to_uppercase()));
        }
        assert_eq!(record.get(Field::DueDate), Some("DUE_DATE"));
        assert_eq!(record.found_count(), 5);

        record.set(Field::DueDate, None);
        assert_eq!(record.found_count(), 4);
        assert_eq!(record.value_or_sentinel(Field::DueDate), NOT_FOUND);
    }

    #[test]
    fn test_rows_render_sentinel() {
        let mut found = FieldRecord::default().with_file("a.pdf");
        found.card_last4 = Some("1234".to_string());
        found.total_due = Some("5,000.00".to_string());

        let table: StatementTable = vec![found, FieldRecord::default().with_file("b.pdf")]
            .into_iter()
            .collect();

        let rows: Vec<Vec<&str>> = table.rows().collect();
        assert_eq!(
            rows,
            vec![
                vec!["1234", NOT_FOUND, NOT_FOUND, "5,000.00", NOT_FOUND, "a.pdf"],
                vec![NOT_FOUND, NOT_FOUND, NOT_FOUND, NOT_FOUND, NOT_FOUND, "b.pdf"],
            ]
        );
    }

    #[test]
    fn test_is_date() {
        let dates: Vec<Field> = Field::ALL.into_iter().filter(|f| f.is_date()).collect();
        assert_eq!(dates, vec![Field::BillingCycle, Field::DueDate]);
    }
}

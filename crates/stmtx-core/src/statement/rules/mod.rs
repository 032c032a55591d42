//! Rule-based field extraction for card statements.

pub mod dates;
pub mod patterns;

pub use dates::{normalize_date, parse_free_form_date};
pub use patterns::{FieldPattern, PatternSet, CARD_VARIANTS};

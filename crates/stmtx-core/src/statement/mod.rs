//! Statement field extraction.

mod parser;
pub mod rules;

pub use parser::StatementParser;
pub use rules::patterns::PatternSet;

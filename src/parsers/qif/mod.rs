pub mod normalizer;
pub mod parser;
pub mod tokenizer;
pub mod translate;
pub mod types;

pub mod prelude {
    pub use super::normalizer::{DatePolicy, FieldIssue, FieldValue, NormalizedRecord};
    pub use super::parser::QifParser;
    pub use super::tokenizer::{Directive, DirectiveContext, ParserState, RawRecord, RecordFields};
    pub use super::types::{QifDate, try_parse_date, try_parse_number};
}

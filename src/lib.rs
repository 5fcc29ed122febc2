//! Parse Quicken Interchange Format (QIF) exports into normalized records.
//!
//! ```rust,ignore
//! use qif_statement_rs::ParserBuilder;
//!
//! let transactions = ParserBuilder::new()
//!     .content(&file_content)
//!     .parse()?;
//! ```

mod builder;
mod types;

pub mod document;
pub mod errors;
pub mod parsers;
pub mod report;

pub use builder::{FileFormat, ParseOptions, ParsedRecord, ParserBuilder};
pub use document::QifDocument;
pub use parsers::prelude::*;
pub use report::AccountBalance;
pub use types::Transaction;

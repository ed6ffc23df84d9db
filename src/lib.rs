//! Public API for the statement parser crate.
//!
//! Text extracted from a bank-statement PDF goes in, an ordered list of
//! transaction rows plus credit/debit totals comes out.

pub mod classifier;
pub mod errors;
pub mod extract;
pub mod layout;
pub mod metrics;
pub mod models;
pub mod pipeline;

pub use classifier::parse_transactions;
pub use errors::StatementError;
pub use extract::{PdfTextExtractor, PlainTextExtractor, TextExtractor};
pub use layout::ColumnLayout;
pub use metrics::derive_metrics;
pub use models::{DerivedMetrics, ParseResult, TransactionRecord};
pub use pipeline::{parse, parse_pdf, ParserConfig, Pipeline};

//! Pipeline entry point: readability gate -> classifier -> aggregator.
//!
//! ```rust
//! use statement_parser::pipeline;
//!
//! let text = format!("{:<100}\n15/03/2023 ATM WITHDRAWAL 500.00 1,200.50", "Statement of account");
//! let result = pipeline::parse(&text)?;
//! assert_eq!(result.derived_metrics.transaction_count, 1);
//! # Ok::<(), statement_parser::StatementError>(())
//! ```

use crate::classifier::scan_lines;
use crate::errors::{Result, StatementError};
use crate::extract::TextExtractor;
use crate::layout::ColumnLayout;
use crate::metrics::derive_metrics;
use crate::models::{PARSER_TAG, ParseResult, SOURCE_TAG};
use tracing::{info, warn};

/// Texts shorter than this are treated as having no usable text layer.
pub const DEFAULT_MIN_TEXT_CHARS: usize = 100;

/// Knobs for one parser instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Minimum text length, in characters, before any parsing is attempted.
    pub min_text_chars: usize,
    pub layout: ColumnLayout,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            min_text_chars: DEFAULT_MIN_TEXT_CHARS,
            layout: ColumnLayout::default(),
        }
    }
}

/// Stateless statement parser; one value may serve any number of requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pipeline {
    config: ParserConfig,
}

impl Pipeline {
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse extracted statement text.
    ///
    /// Fails with [`StatementError::UnreadableSource`] when the text is empty
    /// or shorter than `min_text_chars`. Readable text with no transaction
    /// rows is a success with an empty list.
    pub fn parse(&self, raw_text: &str) -> Result<ParseResult> {
        let chars = raw_text.chars().count();
        if chars == 0 || chars < self.config.min_text_chars {
            warn!(chars, min = self.config.min_text_chars, "text too short to parse");
            return Err(StatementError::UnreadableSource {
                chars,
                min: self.config.min_text_chars,
            });
        }

        let scan = scan_lines(raw_text, self.config.layout);
        let derived_metrics = derive_metrics(&scan.records);
        info!(
            transactions = derived_metrics.transaction_count,
            skipped = scan.skipped,
            "statement parsed"
        );

        Ok(ParseResult {
            source: SOURCE_TAG,
            parser: PARSER_TAG,
            transactions: scan.records,
            derived_metrics,
            skipped_lines: scan.skipped,
        })
    }

    /// Extract text from `bytes` with `extractor`, then [`Pipeline::parse`] it.
    pub fn parse_bytes<E: TextExtractor + ?Sized>(
        &self,
        bytes: &[u8],
        extractor: &E,
    ) -> Result<ParseResult> {
        let text = extractor.extract(bytes)?;
        self.parse(&text)
    }
}

/// [`Pipeline::parse`] with the default configuration.
pub fn parse(raw_text: &str) -> Result<ParseResult> {
    Pipeline::default().parse(raw_text)
}

/// Extract and parse a PDF with the default configuration.
pub fn parse_pdf(bytes: &[u8]) -> Result<ParseResult> {
    Pipeline::default().parse_bytes(bytes, &crate::extract::PdfTextExtractor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::PlainTextExtractor;
    use rust_decimal_macros::dec;

    fn pad(body: &str, len: usize) -> String {
        let mut s = body.to_string();
        while s.chars().count() < len {
            s.push('.');
        }
        s
    }

    #[test]
    fn ninety_nine_chars_is_unreadable() {
        let text = pad("", 99);
        assert_eq!(
            parse(&text).unwrap_err(),
            StatementError::UnreadableSource { chars: 99, min: 100 }
        );
    }

    #[test]
    fn hundred_chars_without_rows_is_an_empty_success() {
        let text = pad("", 100);
        let res = parse(&text).unwrap();
        assert!(res.transactions.is_empty());
        assert_eq!(res.derived_metrics.transaction_count, 0);
        assert_eq!(res.derived_metrics.total_credits, dec!(0));
        assert_eq!(res.derived_metrics.total_debits, dec!(0));
    }

    #[test]
    fn empty_text_is_unreadable_even_with_zero_threshold() {
        let p = Pipeline::new(ParserConfig {
            min_text_chars: 0,
            ..ParserConfig::default()
        });
        assert!(matches!(
            p.parse(""),
            Err(StatementError::UnreadableSource { chars: 0, .. })
        ));
    }

    #[test]
    fn threshold_counts_characters_not_bytes() {
        // 50 two-byte chars = 100 bytes but only 50 chars
        let text = "é".repeat(50);
        assert!(parse(&text).is_err());
    }

    #[test]
    fn full_statement_is_tagged_and_totalled() {
        let text = "\
STATE BANK - ACCOUNT STATEMENT
Statement Period: Jan-Mar 2024
Date       Narration              Debit     Credit    Balance
01/01/2024 SALARY CREDIT 10,000.00 2,000.00 15,000.00
15/03/2023 ATM WITHDRAWAL 500.00 1,200.50
16/03/2023 wrapped continuation line
Page 1 of 1
";
        let res = parse(text).unwrap();
        assert_eq!(res.source, "PDF");
        assert_eq!(res.parser, "MICROSERVICE");
        assert_eq!(res.transactions.len(), 2);
        assert_eq!(res.skipped_lines, 1);
        assert_eq!(res.derived_metrics.total_debits, dec!(10000.00));
        assert_eq!(res.derived_metrics.total_credits, dec!(2500.00));
        assert_eq!(res.derived_metrics.transaction_count, 2);
    }

    #[test]
    fn result_serializes_to_wire_shape() {
        let text = pad("01/01/2024 SALARY CREDIT 10,000.00 2,000.00 15,000.00\n", 120);
        let json = serde_json::to_value(parse(&text).unwrap()).unwrap();
        assert_eq!(json["source"], "PDF");
        assert_eq!(json["transactions"][0]["txn_date"], "2024-01-01");
        assert_eq!(json["derived_metrics"]["transaction_count"], 1);
        assert_eq!(json["derived_metrics"]["total_debits"].as_f64(), Some(10000.0));
        assert!(json.get("skipped_lines").is_none());
    }

    #[test]
    fn amounts_at_decimal_max_total_without_panicking() {
        let text = pad(
            "01/01/2024 A 0 79228162514264337593543950335 1.00\n\
             02/01/2024 A 0 79228162514264337593543950335 1.00\n",
            200,
        );
        let res = parse(&text).unwrap();
        assert_eq!(res.transactions.len(), 2);
        assert_eq!(res.derived_metrics.total_credits, rust_decimal::Decimal::MAX);
        assert_eq!(res.derived_metrics.total_debits, dec!(0));
    }

    #[test]
    fn parse_bytes_runs_extraction_first() {
        let p = Pipeline::default();
        assert!(matches!(
            p.parse_bytes(&[], &PlainTextExtractor),
            Err(StatementError::Extraction(_))
        ));
        let text = pad("02/02/2024 REFUND 0 19.99 119.99\n", 100);
        let res = p.parse_bytes(text.as_bytes(), &PlainTextExtractor).unwrap();
        assert_eq!(res.transactions[0].credit, dec!(19.99));
        assert_eq!(res.transactions[0].debit, dec!(0));
    }

    #[test]
    fn parse_pdf_rejects_empty_upload() {
        assert_eq!(
            parse_pdf(&[]).unwrap_err(),
            StatementError::Extraction("no PDF received".into())
        );
    }
}

//! Common domain types: parsed statement rows and the per-parse result.

use rust_decimal::Decimal;
use serde::Serialize;

/// Tag identifying where the parsed text came from.
pub const SOURCE_TAG: &str = "PDF";
/// Tag identifying the extraction pipeline that produced the result.
pub const PARSER_TAG: &str = "MICROSERVICE";

/// One transaction row recovered from a statement line.
///
/// *Either* `debit` or `credit` is normally non-zero, but the parser does not
/// enforce it – see [`TransactionRecord::is_one_sided`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionRecord {
    /// `YYYY-MM-DD`, rendered from the source `DD/MM/YYYY` token.
    #[serde(rename = "txn_date")]
    pub date: String,
    /// Upper-cased label, may be empty.
    pub description: String,
    pub debit: Decimal,
    pub credit: Decimal,
    /// Running balance after the transaction; never defaulted.
    pub balance: Decimal,
}

impl TransactionRecord {
    /// `true` when exactly one of debit / credit carries an amount.
    pub fn is_one_sided(&self) -> bool {
        self.debit.is_zero() != self.credit.is_zero()
    }
}

/// Totals over every record of one parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DerivedMetrics {
    pub total_credits: Decimal,
    pub total_debits: Decimal,
    pub transaction_count: usize,
}

/// Everything one parse produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseResult {
    pub source: &'static str,
    pub parser: &'static str,
    pub transactions: Vec<TransactionRecord>,
    pub derived_metrics: DerivedMetrics,
    /// Date-prefixed lines dropped for lack of amounts. Diagnostic only.
    #[serde(skip)]
    pub skipped_lines: usize,
}

/// One CSV output line: the record with amounts fixed at 2 dp.
#[derive(Serialize)]
pub struct TransactionRow<'a> {
    pub txn_date: &'a str,
    pub description: &'a str,
    pub debit: String,
    pub credit: String,
    pub balance: String,
}

impl<'a> From<&'a TransactionRecord> for TransactionRow<'a> {
    fn from(rec: &'a TransactionRecord) -> Self {
        let fmt = |d: Decimal| format!("{:.2}", d);
        Self {
            txn_date: &rec.date,
            description: &rec.description,
            debit: fmt(rec.debit),
            credit: fmt(rec.credit),
            balance: fmt(rec.balance),
        }
    }
}

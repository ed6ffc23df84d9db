//! Line classifier & field splitter.
//!
//! Each line of extracted statement text is looked at on its own: lines that
//! open with a `DD/MM/YYYY` token are candidates, everything else (headers,
//! footers, page breaks, wrapped text) is skipped without comment. A candidate
//! is split into date, description and a numeric run, and the run is mapped
//! onto debit / credit / balance by a [`ColumnLayout`].

use crate::layout::ColumnLayout;
use crate::models::TransactionRecord;
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::debug;

/// What became of a single input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// Does not start with a date token.
    NotCandidate,
    /// Date-prefixed, but too few amounts to recover a row, or an amount
    /// too large to represent.
    Skipped,
    Record(TransactionRecord),
}

/// Records from a whole text, plus how many candidate lines were dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineScan {
    pub records: Vec<TransactionRecord>,
    pub skipped: usize,
}

/// Collapse whitespace runs to one space and trim both ends.
pub fn normalize_line(line: &str) -> String {
    line.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// `true` for exactly two digits, `/`, two digits, `/`, four digits.
pub fn is_date_token(token: &str) -> bool {
    let b = token.as_bytes();
    b.len() == 10
        && b[2] == b'/'
        && b[5] == b'/'
        && [0, 1, 3, 4, 6, 7, 8, 9]
            .iter()
            .all(|&i| b[i].is_ascii_digit())
}

/// `DD/MM/YYYY` -> `YYYY-MM-DD`. No calendar check: `31/02/2024` is accepted.
pub fn render_date(token: &str) -> Option<String> {
    if !is_date_token(token) {
        return None;
    }
    let (day, month, year) = (&token[0..2], &token[3..5], &token[6..10]);
    Some(format!("{year}-{month}-{day}"))
}

/// `true` when the token, with thousands-separator commas removed, is
/// `digits` optionally followed by `.` and more digits.
pub fn is_numeric_token(token: &str) -> bool {
    let plain: String = token.chars().filter(|&c| c != ',').collect();
    let (int, frac) = match plain.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (plain.as_str(), None),
    };
    let digits = |s: &str| !s.is_empty() && s.bytes().all(|c| c.is_ascii_digit());
    digits(int) && frac.is_none_or(digits)
}

/// Parse a numeric token into a decimal, commas stripped.
///
/// Returns `None` for non-numeric tokens and for digit strings too long to fit
/// a `Decimal` (account or reference numbers). Callers that need to tell the
/// two apart check [`is_numeric_token`] first.
pub fn parse_amount(token: &str) -> Option<Decimal> {
    if !is_numeric_token(token) {
        return None;
    }
    let plain = token.replace(',', "");
    match Decimal::from_str(&plain) {
        Ok(d) => Some(d),
        Err(e) => {
            debug!(token, %e, "numeric token out of range");
            None
        }
    }
}

/// Classify one raw line and, for candidates, split it into a record.
pub fn classify_line(raw: &str, layout: ColumnLayout) -> LineOutcome {
    let line = normalize_line(raw);
    let mut tokens = line.split(' ');
    let date = match tokens.next().and_then(render_date) {
        Some(d) => d,
        None => return LineOutcome::NotCandidate,
    };
    let rest: Vec<&str> = tokens.collect();

    // (token index, value) for every numeric token, left to right; a numeric
    // token that does not fit a Decimal would shift every position after it
    let mut run: Vec<(usize, Decimal)> = Vec::new();
    for (i, t) in rest.iter().enumerate().filter(|(_, t)| is_numeric_token(t)) {
        match parse_amount(t) {
            Some(d) => run.push((i, d)),
            None => {
                debug!(line = %line, token = *t, "candidate line dropped: amount out of range");
                return LineOutcome::Skipped;
            }
        }
    }
    let values: Vec<Decimal> = run.iter().map(|&(_, d)| d).collect();

    let amounts = match layout.assign(&values) {
        Some(a) => a,
        None => {
            debug!(line = %line, numbers = values.len(), "candidate line dropped");
            return LineOutcome::Skipped;
        }
    };

    let consumed: Vec<usize> = run[run.len() - amounts.consumed..]
        .iter()
        .map(|&(i, _)| i)
        .collect();
    let description = rest
        .iter()
        .enumerate()
        .filter(|(i, _)| !consumed.contains(i))
        .map(|(_, t)| *t)
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase();

    LineOutcome::Record(TransactionRecord {
        date,
        description,
        debit: amounts.debit,
        credit: amounts.credit,
        balance: amounts.balance,
    })
}

/// Run every line of `text` through the classifier, keeping source order.
pub fn scan_lines(text: &str, layout: ColumnLayout) -> LineScan {
    text.lines()
        .map(|line| classify_line(line, layout))
        .fold(LineScan::default(), |mut scan, outcome| {
            match outcome {
                LineOutcome::Record(rec) => scan.records.push(rec),
                LineOutcome::Skipped => scan.skipped += 1,
                LineOutcome::NotCandidate => {}
            }
            scan
        })
}

/// Extract transaction records from statement text with the default layout.
pub fn parse_transactions(text: &str) -> Vec<TransactionRecord> {
    scan_lines(text, ColumnLayout::default()).records
}

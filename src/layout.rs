//! Column layouts: how a line's numeric run maps onto debit / credit / balance.

use rust_decimal::Decimal;

/// Amounts recovered from one numeric run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Amounts {
    pub debit: Decimal,
    pub credit: Decimal,
    pub balance: Decimal,
    /// How many values from the end of the run were used.
    pub consumed: usize,
}

/// Statement column layouts the splitter knows about.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColumnLayout {
    /// `… debit credit balance`, read from the right.
    ///
    /// Balance is always last and the debit/credit pair sits right before it,
    /// but a row often prints only one of the pair, so positions are counted
    /// from the end: last = balance, second-to-last = credit,
    /// third-to-last = debit (zero when missing).
    #[default]
    RightAnchored,
}

impl ColumnLayout {
    /// Minimum number of values a run needs for this layout.
    pub fn min_values(self) -> usize {
        match self {
            ColumnLayout::RightAnchored => 2,
        }
    }

    /// Map a numeric run onto amounts, or `None` if the run is too short.
    pub fn assign(self, run: &[Decimal]) -> Option<Amounts> {
        if run.len() < self.min_values() {
            return None;
        }
        match self {
            ColumnLayout::RightAnchored => {
                let mut rev = run.iter().rev().copied();
                let balance = rev.next()?;
                let credit = rev.next()?;
                let debit = rev.next();
                Some(Amounts {
                    debit: debit.unwrap_or(Decimal::ZERO),
                    credit,
                    balance,
                    consumed: if debit.is_some() { 3 } else { 2 },
                })
            }
        }
    }
}

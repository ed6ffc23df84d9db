//! Totals over a parsed record list.

use crate::models::{DerivedMetrics, TransactionRecord};
use rust_decimal::{Decimal, RoundingStrategy};

fn round2(d: Decimal) -> Decimal {
    d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Sum credits and debits independently and count the records.
///
/// Pure and total: an empty slice gives all-zero metrics, and a sum that
/// would overflow `Decimal` saturates at `Decimal::MAX`.
pub fn derive_metrics(records: &[TransactionRecord]) -> DerivedMetrics {
    let add = |a: Decimal, b: Decimal| a.checked_add(b).unwrap_or(Decimal::MAX);
    let (credits, debits) = records
        .iter()
        .fold((Decimal::ZERO, Decimal::ZERO), |(c, d), r| {
            (add(c, r.credit), add(d, r.debit))
        });
    DerivedMetrics {
        total_credits: round2(credits),
        total_debits: round2(debits),
        transaction_count: records.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn rec(debit: Decimal, credit: Decimal) -> TransactionRecord {
        TransactionRecord {
            date: "2024-01-01".into(),
            description: String::new(),
            debit,
            credit,
            balance: dec!(0),
        }
    }

    #[test]
    fn empty_list_is_all_zero() {
        let m = derive_metrics(&[]);
        assert_eq!(m.total_credits, dec!(0));
        assert_eq!(m.total_debits, dec!(0));
        assert_eq!(m.transaction_count, 0);
        assert_eq!(m, DerivedMetrics::default());
    }

    #[test]
    fn sums_each_side_independently() {
        let recs = [
            rec(dec!(10.25), dec!(0)),
            rec(dec!(0), dec!(500.00)),
            rec(dec!(4.75), dec!(1.10)),
        ];
        let m = derive_metrics(&recs);
        assert_eq!(m.total_debits, dec!(15.00));
        assert_eq!(m.total_credits, dec!(501.10));
        assert_eq!(m.transaction_count, 3);
    }

    #[test]
    fn overflowing_sums_saturate() {
        let recs = [
            rec(dec!(1), Decimal::MAX),
            rec(dec!(2), Decimal::MAX),
            rec(dec!(3), dec!(1)),
        ];
        let m = derive_metrics(&recs);
        assert_eq!(m.total_credits, Decimal::MAX);
        assert_eq!(m.total_debits, dec!(6));
        assert_eq!(m.transaction_count, 3);
    }

    #[test]
    fn totals_round_half_away_from_zero() {
        let m = derive_metrics(&[rec(dec!(0.005), dec!(1.004)), rec(dec!(0.000), dec!(0.001))]);
        assert_eq!(m.total_debits, dec!(0.01));
        assert_eq!(m.total_credits, dec!(1.01));
    }

    #[test]
    fn deriving_twice_gives_the_same_value() {
        let recs = vec![rec(dec!(3.333), dec!(7.777)), rec(dec!(1), dec!(2))];
        assert_eq!(derive_metrics(&recs), derive_metrics(&recs));
    }
}

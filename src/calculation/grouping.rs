//! Grouping of daily rows into payment rows.
//!
//! This module folds the ordered per-day sequence into reportable payment
//! periods: a new group starts whenever the paid flag flips relative to the
//! previous day. The fold is strictly linear left-to-right, stable and
//! idempotent; it never looks ahead past a payment-state boundary.

use rust_decimal::Decimal;

use crate::models::{DailyPaymentRow, DailySingleRow};

/// Folds contiguous same-state daily rows into payment rows.
///
/// Within a group the monetary fields are summed, calendar and paid days are
/// counted, and the average daily allowance is recomputed over the paid days
/// (zero when the group has none). The sum of `full_daily` is tracked only
/// locally for diagnostics and never emitted.
///
/// # Example
///
/// ```
/// use benefit_engine::calculation::group_daily_rows;
///
/// assert!(group_daily_rows(&[]).is_empty());
/// ```
pub fn group_daily_rows(daily: &[DailySingleRow]) -> Vec<DailyPaymentRow> {
    let mut groups: Vec<DailyPaymentRow> = Vec::new();
    let mut current: Option<GroupAccumulator> = None;

    for row in daily {
        match current.as_mut() {
            Some(acc) if acc.paid == row.paid => acc.push(row),
            Some(acc) => {
                groups.push(acc.finish());
                current = Some(GroupAccumulator::start(row));
            }
            None => current = Some(GroupAccumulator::start(row)),
        }
    }
    if let Some(acc) = current {
        groups.push(acc.finish());
    }

    groups
}

/// Running state of one group while the fold advances.
struct GroupAccumulator {
    paid: bool,
    first: DailySingleRow,
    last_date: chrono::NaiveDate,
    paid_days: u32,
    total_days: u32,
    gross: Decimal,
    net: Decimal,
    tax: Decimal,
    member_fee: Decimal,
    expense_compensation: Decimal,
    adjusted_sum_paid: Decimal,
    // Diagnostics only; deliberately not part of the emitted record.
    full_sum: Decimal,
}

impl GroupAccumulator {
    fn start(row: &DailySingleRow) -> Self {
        let mut acc = Self {
            paid: row.paid,
            first: row.clone(),
            last_date: row.date,
            paid_days: 0,
            total_days: 0,
            gross: Decimal::ZERO,
            net: Decimal::ZERO,
            tax: Decimal::ZERO,
            member_fee: Decimal::ZERO,
            expense_compensation: Decimal::ZERO,
            adjusted_sum_paid: Decimal::ZERO,
            full_sum: Decimal::ZERO,
        };
        acc.push(row);
        acc
    }

    fn push(&mut self, row: &DailySingleRow) {
        self.last_date = row.date;
        self.total_days += 1;
        if row.paid {
            self.paid_days += 1;
            self.adjusted_sum_paid += row.adjusted_daily;
        }
        self.gross += row.adjusted_daily;
        self.net += row.net;
        self.tax += row.tax;
        self.member_fee += row.member_fee;
        self.expense_compensation += row.expense_compensation;
        self.full_sum += row.full_daily;
    }

    fn finish(&self) -> DailyPaymentRow {
        let average_daily = if self.paid_days > 0 {
            self.adjusted_sum_paid / Decimal::from(self.paid_days)
        } else {
            Decimal::ZERO
        };
        DailyPaymentRow {
            start_date: self.first.date,
            end_date: self.last_date,
            paid_days: self.paid_days,
            total_days: self.total_days,
            gross: self.gross,
            net: self.net,
            tax: self.tax,
            member_fee: self.member_fee,
            expense_compensation: self.expense_compensation,
            decision_label: self.first.decision_label(),
            average_daily,
        }
    }
}

//! Grouped payment row and aggregated totals.
//!
//! This module defines [`DailyPaymentRow`], the user-visible payment period
//! produced by folding contiguous same-state daily rows, and [`PaymentTotals`]
//! summarizing a whole generation result.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A grouped, user-visible payment period.
///
/// Derived purely from the per-day rows of one generation pass; never edited
/// directly. Any change requires regenerating from the source periods.
///
/// # Example
///
/// ```
/// use benefit_engine::models::DailyPaymentRow;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let row = DailyPaymentRow {
///     start_date: NaiveDate::from_ymd_opt(2024, 12, 2).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2024, 12, 6).unwrap(),
///     paid_days: 5,
///     total_days: 5,
///     gross: Decimal::new(41665, 2),
///     net: Decimal::new(31249, 2),
///     tax: Decimal::new(10416, 2),
///     member_fee: Decimal::ZERO,
///     expense_compensation: Decimal::ZERO,
///     decision_label: "grant decision".to_string(),
///     average_daily: Decimal::new(8333, 2),
/// };
/// assert_eq!(row.paid_days, 5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPaymentRow {
    /// First calendar date of the group (inclusive).
    pub start_date: NaiveDate,
    /// Last calendar date of the group (inclusive).
    pub end_date: NaiveDate,
    /// Number of paid business days in the group.
    pub paid_days: u32,
    /// Number of calendar days in the group.
    pub total_days: u32,
    /// Sum of the group's gross daily allowances.
    pub gross: Decimal,
    /// Sum of the group's net amounts.
    pub net: Decimal,
    /// Sum of tax withheld.
    pub tax: Decimal,
    /// Sum of membership fees withheld.
    pub member_fee: Decimal,
    /// Sum of expense compensation.
    pub expense_compensation: Decimal,
    /// The advisory decision label for the group.
    pub decision_label: String,
    /// Average gross daily allowance over the group's paid days.
    pub average_daily: Decimal,
}

/// Aggregated totals over a whole set of payment rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentTotals {
    /// Total gross allowance paid.
    pub gross: Decimal,
    /// Total net amount paid.
    pub net: Decimal,
    /// Total tax withheld.
    pub tax: Decimal,
    /// Total membership fees withheld.
    pub member_fee: Decimal,
    /// Total expense compensation paid.
    pub expense_compensation: Decimal,
    /// Total paid business days.
    pub paid_days: u32,
}

impl PaymentTotals {
    /// Sums a slice of payment rows into one totals record.
    ///
    /// # Example
    ///
    /// ```
    /// use benefit_engine::models::PaymentTotals;
    ///
    /// let totals = PaymentTotals::from_rows(&[]);
    /// assert_eq!(totals.paid_days, 0);
    /// ```
    pub fn from_rows(rows: &[DailyPaymentRow]) -> Self {
        let mut totals = Self {
            gross: Decimal::ZERO,
            net: Decimal::ZERO,
            tax: Decimal::ZERO,
            member_fee: Decimal::ZERO,
            expense_compensation: Decimal::ZERO,
            paid_days: 0,
        };
        for row in rows {
            totals.gross += row.gross;
            totals.net += row.net;
            totals.tax += row.tax;
            totals.member_fee += row.member_fee;
            totals.expense_compensation += row.expense_compensation;
            totals.paid_days += row.paid_days;
        }
        totals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_row(start: &str, end: &str, paid_days: u32, gross: &str, net: &str) -> DailyPaymentRow {
        DailyPaymentRow {
            start_date: NaiveDate::from_str(start).unwrap(),
            end_date: NaiveDate::from_str(end).unwrap(),
            paid_days,
            total_days: paid_days,
            gross: dec(gross),
            net: dec(net),
            tax: dec(gross) - dec(net),
            member_fee: Decimal::ZERO,
            expense_compensation: Decimal::ZERO,
            decision_label: "grant decision".to_string(),
            average_daily: Decimal::ZERO,
        }
    }

    /// PT-001: totals sum across rows
    #[test]
    fn test_totals_sum_across_rows() {
        let rows = vec![
            make_row("2024-12-02", "2024-12-06", 5, "400.00", "300.00"),
            make_row("2024-12-09", "2024-12-13", 5, "400.00", "300.00"),
        ];
        let totals = PaymentTotals::from_rows(&rows);
        assert_eq!(totals.gross, dec("800.00"));
        assert_eq!(totals.net, dec("600.00"));
        assert_eq!(totals.tax, dec("200.00"));
        assert_eq!(totals.paid_days, 10);
    }

    /// PT-002: empty input yields zero totals
    #[test]
    fn test_totals_empty() {
        let totals = PaymentTotals::from_rows(&[]);
        assert_eq!(totals.gross, Decimal::ZERO);
        assert_eq!(totals.paid_days, 0);
    }

    #[test]
    fn test_payment_row_serializes_amounts_as_strings() {
        let row = make_row("2024-12-02", "2024-12-06", 5, "416.65", "312.49");
        let json = serde_json::to_string(&row).unwrap();
        assert!(json.contains("\"gross\":\"416.65\""));
        assert!(json.contains("\"start_date\":\"2024-12-02\""));
    }
}

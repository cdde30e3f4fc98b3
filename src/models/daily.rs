//! Per-day calculation row and decision types.
//!
//! This module defines [`DailySingleRow`], the internal one-row-per-calendar-day
//! state produced by the daily row generator, and the [`DecisionType`] that
//! classifies each day for display.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Classifies the payment decision for one calendar day.
///
/// These are advisory display categories, not control state: the generator
/// derives them after the amounts are already computed.
///
/// # Example
///
/// ```
/// use benefit_engine::models::DecisionType;
///
/// let decision = DecisionType::Grant;
/// assert_eq!(format!("{:?}", decision), "Grant");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionType {
    /// Weekend or otherwise unpaid day.
    NoPayment,
    /// Ordinary granted allowance.
    Grant,
    /// Granted allowance with expense compensation on top.
    GrantWithExpenseCompensation,
    /// Allowance with an active step-down factor.
    SteppedDown,
}

/// One calendar day's computed payment state.
///
/// Internal to a generation pass; never persisted. The grouped
/// [`DailyPaymentRow`](super::DailyPaymentRow) output is derived from these
/// rows and the `full_daily` figure is kept only for internal bookkeeping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySingleRow {
    /// The calendar date.
    pub date: NaiveDate,
    /// Whether this is a paid business day.
    pub paid: bool,
    /// The uncapped daily allowance before income adjustment.
    pub full_daily: Decimal,
    /// The income-adjusted daily allowance; this is the day's gross amount.
    pub adjusted_daily: Decimal,
    /// The step-down factor applied to the earnings-linked part.
    pub step_factor: Decimal,
    /// The decision category for this day.
    pub decision: DecisionType,
    /// Tax withheld from the day's gross.
    pub tax: Decimal,
    /// Membership fee withheld from the day's gross.
    pub member_fee: Decimal,
    /// Net amount after tax and membership fee.
    pub net: Decimal,
    /// Expense compensation paid on top of the allowance.
    pub expense_compensation: Decimal,
}

impl DailySingleRow {
    /// Returns a zeroed non-paid row for the given date.
    pub fn unpaid(date: NaiveDate) -> Self {
        Self {
            date,
            paid: false,
            full_daily: Decimal::ZERO,
            adjusted_daily: Decimal::ZERO,
            step_factor: Decimal::ONE,
            decision: DecisionType::NoPayment,
            tax: Decimal::ZERO,
            member_fee: Decimal::ZERO,
            net: Decimal::ZERO,
            expense_compensation: Decimal::ZERO,
        }
    }

    /// Renders the advisory decision label for this day.
    ///
    /// # Example
    ///
    /// ```
    /// use benefit_engine::models::{DailySingleRow, DecisionType};
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let mut row = DailySingleRow::unpaid(NaiveDate::from_ymd_opt(2024, 12, 1).unwrap());
    /// assert_eq!(row.decision_label(), "no payment");
    ///
    /// row.decision = DecisionType::SteppedDown;
    /// row.step_factor = Decimal::new(80, 2);
    /// assert_eq!(row.decision_label(), "step-down 80%");
    /// ```
    pub fn decision_label(&self) -> String {
        match self.decision {
            DecisionType::NoPayment => "no payment".to_string(),
            DecisionType::Grant => "grant decision".to_string(),
            DecisionType::GrantWithExpenseCompensation => {
                "grant decision + expense compensation".to_string()
            }
            DecisionType::SteppedDown => {
                let percent = (self.step_factor * Decimal::new(100, 0)).normalize();
                format!("step-down {}%", percent)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// DR-001: unpaid constructor zeroes everything
    #[test]
    fn test_unpaid_row_is_zeroed() {
        let row = DailySingleRow::unpaid(NaiveDate::from_ymd_opt(2024, 12, 7).unwrap());
        assert!(!row.paid);
        assert_eq!(row.adjusted_daily, Decimal::ZERO);
        assert_eq!(row.net, Decimal::ZERO);
        assert_eq!(row.decision, DecisionType::NoPayment);
    }

    /// DR-002: decision labels
    #[test]
    fn test_decision_labels() {
        let mut row = DailySingleRow::unpaid(NaiveDate::from_ymd_opt(2024, 12, 2).unwrap());
        assert_eq!(row.decision_label(), "no payment");

        row.decision = DecisionType::Grant;
        assert_eq!(row.decision_label(), "grant decision");

        row.decision = DecisionType::GrantWithExpenseCompensation;
        assert_eq!(
            row.decision_label(),
            "grant decision + expense compensation"
        );

        row.decision = DecisionType::SteppedDown;
        row.step_factor = Decimal::new(75, 2);
        assert_eq!(row.decision_label(), "step-down 75%");
    }

    #[test]
    fn test_serialize_decision_type_snake_case() {
        let json = serde_json::to_string(&DecisionType::GrantWithExpenseCompensation).unwrap();
        assert_eq!(json, "\"grant_with_expense_compensation\"");
    }
}

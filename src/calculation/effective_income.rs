//! Effective income filtering.
//!
//! This module is the single shared implementation of the income filter used
//! by payment generation, base-salary determination and the correction
//! engine. Keeping one implementation guards against the filter drifting
//! between call sites, which would silently desynchronize generated payments
//! from their corrections.

use rust_decimal::Decimal;

use crate::config::EngineConfig;
use crate::models::{IncomeRow, IncomeStatus, MonthPeriod};

/// Decides whether one income row enters a period's effective total.
///
/// A row counts unless:
/// - its effective status is [`IncomeStatus::Deleted`], or
/// - its income type is in the configured excluded set and the row is not
///   explicitly marked [`IncomeStatus::CountedOverride`].
///
/// # Example
///
/// ```
/// use benefit_engine::calculation::counts_towards_total;
/// use benefit_engine::config::EngineConfig;
/// use benefit_engine::models::{IncomeRow, IncomeStatus};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let config = EngineConfig::builtin();
/// let row = IncomeRow {
///     id: "tr_001".to_string(),
///     pay_date: NaiveDate::from_ymd_opt(2024, 12, 15).unwrap(),
///     income_type: "Kokouspalkkio".to_string(),
///     amount: Decimal::new(15000, 2),
///     status: IncomeStatus::Normal,
///     annotation: None,
///     subsidized_work: false,
///     subsidy_rule: None,
///     employer: "Acme Oy".to_string(),
///     replaces: None,
/// };
/// assert!(!counts_towards_total(&row, &config));
/// ```
pub fn counts_towards_total(row: &IncomeRow, config: &EngineConfig) -> bool {
    match row.effective_status() {
        IncomeStatus::Deleted => false,
        IncomeStatus::CountedOverride => true,
        IncomeStatus::Normal => !config.is_excluded_income_type(&row.income_type),
    }
}

/// Sums a period's income rows after filtering.
///
/// Absent or empty row lists yield zero; there are no error cases.
///
/// # Example
///
/// ```
/// use benefit_engine::calculation::effective_income_total;
/// use benefit_engine::config::EngineConfig;
/// use benefit_engine::models::MonthPeriod;
/// use rust_decimal::Decimal;
///
/// let config = EngineConfig::builtin();
/// let period = MonthPeriod {
///     id: "2024-12".to_string(),
///     label: String::new(),
///     toe: Decimal::ZERO,
///     divisor: None,
///     employers: vec![],
///     rows: vec![],
/// };
/// assert_eq!(effective_income_total(&period, &config), Decimal::ZERO);
/// ```
pub fn effective_income_total(period: &MonthPeriod, config: &EngineConfig) -> Decimal {
    period
        .rows
        .iter()
        .filter(|row| counts_towards_total(row, config))
        .map(|row| row.amount)
        .sum()
}

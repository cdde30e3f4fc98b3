//! The daily allowance formula and income adjustment.
//!
//! This module contains the pure functions at the heart of the engine: the
//! progressive marginal-rate schedule deriving one day's full allowance from
//! the monthly base salary, and the income adjustment (sovittelu) that
//! reduces it in proportion to income earned during the paid month itself.

use rust_decimal::Decimal;

use crate::config::AllowanceRates;

/// Computes one day's gross allowance before income adjustment.
///
/// The schedule is progressive: daily salary up to the split point accrues at
/// the below-split rate, salary above it at the above-split rate, and the
/// whole earnings-linked part is then scaled by the step factor. The basic
/// daily amount is never stepped down.
///
/// # Arguments
///
/// * `base_salary` - Monthly base salary from the TOE window (not the paid
///   month's own income)
/// * `divisor` - Business days attributed to the month
/// * `step_factor` - The current step-down factor (1.0 when none applies)
/// * `rates` - The statutory allowance constants
///
/// # Example
///
/// ```
/// use benefit_engine::calculation::full_daily_allowance;
/// use benefit_engine::config::EngineConfig;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let config = EngineConfig::builtin();
/// let full = full_daily_allowance(
///     Decimal::from_str("2150.00").unwrap(),
///     Decimal::from_str("21.5").unwrap(),
///     Decimal::ONE,
///     config.rates(),
/// );
/// // daily salary 96.24, all below the split point:
/// // 37.21 + 0.45 * (96.24 - 37.21) = 63.7735
/// assert_eq!(full, Decimal::from_str("63.7735").unwrap());
/// ```
pub fn full_daily_allowance(
    base_salary: Decimal,
    divisor: Decimal,
    step_factor: Decimal,
    rates: &AllowanceRates,
) -> Decimal {
    let daily_salary = base_salary * (Decimal::ONE - rates.statutory_deduction) / divisor;
    let split_daily = rates.split_point_monthly / divisor;

    let below = (daily_salary.min(split_daily) - rates.daily_base).max(Decimal::ZERO);
    let above = (daily_salary - split_daily).max(Decimal::ZERO);

    let earnings_part =
        (rates.below_split_rate * below + rates.above_split_rate * above) * step_factor;

    rates.daily_base + earnings_part
}

/// Computes the per-day reduction from income earned during the paid month.
///
/// Zero when the period has no effective income.
///
/// # Example
///
/// ```
/// use benefit_engine::calculation::income_adjustment;
/// use benefit_engine::config::EngineConfig;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let config = EngineConfig::builtin();
/// let adjustment = income_adjustment(
///     Decimal::from_str("2150.00").unwrap(),
///     Decimal::from_str("21.5").unwrap(),
///     config.rates(),
/// );
/// // 2150 * 0.5 / 21.5 = 50
/// assert_eq!(adjustment, Decimal::from_str("50").unwrap());
/// ```
pub fn income_adjustment(
    effective_income: Decimal,
    divisor: Decimal,
    rates: &AllowanceRates,
) -> Decimal {
    if effective_income > Decimal::ZERO {
        effective_income * rates.adjustment_rate / divisor
    } else {
        Decimal::ZERO
    }
}

/// Applies the income adjustment to the full daily allowance.
///
/// The result is the day's gross amount and never goes below zero.
pub fn adjusted_daily_allowance(full_daily: Decimal, adjustment: Decimal) -> Decimal {
    (full_daily - adjustment).max(Decimal::ZERO)
}

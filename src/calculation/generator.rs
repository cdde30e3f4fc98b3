//! Daily row generation.
//!
//! This module walks the caller-supplied months day by day, applying weekend
//! exclusion, the allowance formula, the step-down progression and the income
//! adjustment, to produce one [`DailySingleRow`] per calendar day and fold
//! them into grouped payment rows.

use std::time::Instant;

use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::Decimal;
use tracing::warn;

use crate::config::EngineConfig;
use crate::models::{
    AuditStep, AuditTrace, AuditWarning, DailyPaymentRow, DailySingleRow, DecisionType,
    MonthPeriod, PayerRates,
};

use super::allowance::{adjusted_daily_allowance, full_daily_allowance, income_adjustment};
use super::base_salary::{BaseSalaryResult, determine_base_salary};
use super::effective_income::effective_income_total;
use super::grouping::group_daily_rows;
use super::step::StepTracker;

/// The per-day rows of one generation walk, with their audit records.
#[derive(Debug, Clone)]
pub struct GeneratedDays {
    /// One row per calendar day, in walk order.
    pub rows: Vec<DailySingleRow>,
    /// One audit step per processed period.
    pub steps: Vec<AuditStep>,
    /// Warnings for skipped periods.
    pub warnings: Vec<AuditWarning>,
}

/// The complete outcome of one generation pass.
#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    /// The base salary determination that fed the allowance formula.
    pub base_salary: BaseSalaryResult,
    /// The per-day rows, kept for day-level correction diffs.
    pub daily_rows: Vec<DailySingleRow>,
    /// The grouped payment rows.
    pub rows: Vec<DailyPaymentRow>,
    /// The audit trace of this pass.
    pub audit: AuditTrace,
}

/// Runs the full generation pipeline: base salary, daily walk, grouping.
///
/// The function is a pure, synchronous batch transform: given identical
/// inputs it produces identical output, which is what the correction
/// workflow relies on. It never fails; malformed periods are skipped with a
/// warning and empty inputs fall back to the configured default base salary.
///
/// # Example
///
/// ```
/// use benefit_engine::calculation::generate;
/// use benefit_engine::config::EngineConfig;
/// use benefit_engine::models::PayerRates;
/// use rust_decimal::Decimal;
///
/// let config = EngineConfig::builtin();
/// let payer = PayerRates {
///     tax_rate: Decimal::new(25, 2),
///     member_fee_rate: Decimal::ZERO,
///     expense_compensation: Decimal::ZERO,
/// };
/// let outcome = generate(&[], &[], &payer, &config);
/// assert!(outcome.rows.is_empty());
/// assert!(outcome.base_salary.fallback_used);
/// ```
pub fn generate(
    periods: &[MonthPeriod],
    toe_periods: &[MonthPeriod],
    payer: &PayerRates,
    config: &EngineConfig,
) -> GenerationOutcome {
    let start = Instant::now();

    let base_salary = determine_base_salary(toe_periods, config, 1);
    let days = generate_daily_rows(periods, base_salary.monthly_salary, payer, config, 2);
    let rows = group_daily_rows(&days.rows);

    let mut steps = vec![base_salary.audit_step.clone()];
    steps.extend(days.steps);

    GenerationOutcome {
        base_salary,
        daily_rows: days.rows,
        rows,
        audit: AuditTrace {
            steps,
            warnings: days.warnings,
            duration_us: start.elapsed().as_micros() as u64,
        },
    }
}

/// Walks the given periods calendar day by calendar day.
///
/// For every month, each day is either a weekend (a zeroed non-paid row that
/// does not advance the step counter) or a business day: the counter
/// advances, the step factor and the full and adjusted allowances are
/// computed, and tax, membership fee and expense compensation are derived
/// from the caller-supplied [`PayerRates`].
///
/// A period whose identifier does not parse to a valid year/month is skipped
/// with a warning; it must never abort the batch.
pub fn generate_daily_rows(
    periods: &[MonthPeriod],
    base_salary: Decimal,
    payer: &PayerRates,
    config: &EngineConfig,
    first_step: u32,
) -> GeneratedDays {
    let mut rows = Vec::new();
    let mut steps = Vec::new();
    let mut warnings = Vec::new();
    let mut tracker = StepTracker::new(config.steps());
    let mut step_number = first_step;

    for period in periods {
        let Some((year, month)) = period.parse_id() else {
            warn!(period_id = %period.id, "Skipping period with malformed identifier");
            warnings.push(AuditWarning {
                code: "MALFORMED_PERIOD_ID".to_string(),
                message: format!("Period '{}' has no valid YYYY-MM identifier", period.id),
                severity: "medium".to_string(),
            });
            continue;
        };
        let Some(days_in_month) = period.days_in_month() else {
            continue;
        };

        let divisor = period.divisor_or(config.defaults().period_divisor);
        let effective_income = effective_income_total(period, config);
        let adjustment = income_adjustment(effective_income, divisor, config.rates());
        let paid_days_before = tracker.paid_days();

        for day in 1..=days_in_month {
            let Some(date) = NaiveDate::from_ymd_opt(year, month, day) else {
                continue;
            };

            if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
                rows.push(DailySingleRow::unpaid(date));
                continue;
            }

            tracker.advance();
            let step_factor = tracker.factor();
            let full_daily =
                full_daily_allowance(base_salary, divisor, step_factor, config.rates());
            let adjusted_daily = adjusted_daily_allowance(full_daily, adjustment);

            let tax = adjusted_daily * payer.tax_rate;
            let member_fee = adjusted_daily * payer.member_fee_rate;
            let net = adjusted_daily - tax - member_fee;
            let expense_compensation = payer.expense_compensation;

            let decision = if step_factor < Decimal::ONE {
                DecisionType::SteppedDown
            } else if expense_compensation > Decimal::ZERO {
                DecisionType::GrantWithExpenseCompensation
            } else {
                DecisionType::Grant
            };

            rows.push(DailySingleRow {
                date,
                paid: true,
                full_daily,
                adjusted_daily,
                step_factor,
                decision,
                tax,
                member_fee,
                net,
                expense_compensation,
            });
        }

        steps.push(AuditStep {
            step_number,
            rule_id: "period_generation".to_string(),
            rule_name: "Daily Row Generation".to_string(),
            statute_ref: "6:1".to_string(),
            input: serde_json::json!({
                "period": period.id,
                "divisor": divisor.to_string(),
                "effective_income": effective_income.to_string(),
                "base_salary": base_salary.to_string()
            }),
            output: serde_json::json!({
                "calendar_days": days_in_month,
                "paid_days": tracker.paid_days() - paid_days_before,
                "income_adjustment_per_day": adjustment.to_string()
            }),
            reasoning: format!(
                "Period {}: {} calendar days, {} paid days, adjustment {}/day from income {}",
                period.id,
                days_in_month,
                tracker.paid_days() - paid_days_before,
                adjustment,
                effective_income
            ),
        });
        step_number += 1;
    }

    GeneratedDays {
        rows,
        steps,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{IncomeRow, IncomeStatus};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn payer() -> PayerRates {
        PayerRates {
            tax_rate: dec("0.25"),
            member_fee_rate: dec("0.015"),
            expense_compensation: Decimal::ZERO,
        }
    }

    fn make_period(id: &str, income: &str) -> MonthPeriod {
        let rows = if income == "0" {
            vec![]
        } else {
            vec![IncomeRow {
                id: format!("tr_{}", id),
                pay_date: NaiveDate::from_ymd_opt(2024, 12, 15).unwrap(),
                income_type: "Aikapalkka".to_string(),
                amount: dec(income),
                status: IncomeStatus::Normal,
                annotation: None,
                subsidized_work: false,
                subsidy_rule: None,
                employer: "Acme Oy".to_string(),
                replaces: None,
            }]
        };
        MonthPeriod {
            id: id.to_string(),
            label: String::new(),
            toe: Decimal::ONE,
            divisor: Some(dec("21.5")),
            employers: vec![],
            rows,
        }
    }

    /// GE-001: one row per calendar day
    #[test]
    fn test_one_row_per_calendar_day() {
        let config = EngineConfig::builtin();
        let periods = vec![make_period("2024-12", "0")];
        let days = generate_daily_rows(&periods, dec("3120.83"), &payer(), &config, 1);
        assert_eq!(days.rows.len(), 31);
    }

    /// GE-002: weekend rows are unpaid and do not advance the counter
    #[test]
    fn test_weekend_rows_unpaid() {
        let config = EngineConfig::builtin();
        let periods = vec![make_period("2024-12", "0")];
        let days = generate_daily_rows(&periods, dec("3120.83"), &payer(), &config, 1);

        for row in &days.rows {
            let weekend = matches!(row.date.weekday(), Weekday::Sat | Weekday::Sun);
            assert_eq!(!row.paid, weekend, "weekend/paid mismatch on {}", row.date);
            if weekend {
                assert_eq!(row.adjusted_daily, Decimal::ZERO);
                assert_eq!(row.decision, DecisionType::NoPayment);
            }
        }
        // December 2024 has 22 business days.
        assert_eq!(days.rows.iter().filter(|r| r.paid).count(), 22);
    }

    /// GE-003: malformed period identifier is skipped, batch continues
    #[test]
    fn test_malformed_period_skipped() {
        let config = EngineConfig::builtin();
        let periods = vec![
            make_period("2024-11", "0"),
            make_period("joulukuu", "0"),
            make_period("2024-12", "0"),
        ];
        let days = generate_daily_rows(&periods, dec("3120.83"), &payer(), &config, 1);
        // November (30) + December (31); the malformed month contributes nothing.
        assert_eq!(days.rows.len(), 61);
        assert_eq!(days.warnings.len(), 1);
        assert_eq!(days.warnings[0].code, "MALFORMED_PERIOD_ID");
    }

    /// GE-004: zero period income leaves the full allowance unadjusted
    #[test]
    fn test_zero_income_no_adjustment() {
        let config = EngineConfig::builtin();
        let periods = vec![make_period("2024-12", "0")];
        let days = generate_daily_rows(&periods, dec("3120.83"), &payer(), &config, 1);
        for row in days.rows.iter().filter(|r| r.paid) {
            assert_eq!(row.full_daily, row.adjusted_daily);
        }
    }

    /// GE-005: period income reduces the adjusted allowance
    #[test]
    fn test_period_income_reduces_allowance() {
        let config = EngineConfig::builtin();
        let without = generate_daily_rows(
            &[make_period("2024-12", "0")],
            dec("3120.83"),
            &payer(),
            &config,
            1,
        );
        let with = generate_daily_rows(
            &[make_period("2024-12", "2100.00")],
            dec("3120.83"),
            &payer(),
            &config,
            1,
        );
        let gross_without: Decimal = without.rows.iter().map(|r| r.adjusted_daily).sum();
        let gross_with: Decimal = with.rows.iter().map(|r| r.adjusted_daily).sum();
        assert!(gross_with < gross_without);
        for row in with.rows.iter().filter(|r| r.paid) {
            assert!(row.adjusted_daily < row.full_daily);
        }
    }

    /// GE-006: step counter carries across periods
    #[test]
    fn test_step_counter_across_periods() {
        let config = EngineConfig::builtin();
        // Jan..Mar 2024 has 23 + 21 + 21 = 65 business days, crossing the
        // 40-day threshold inside February.
        let periods = vec![
            make_period("2024-01", "0"),
            make_period("2024-02", "0"),
            make_period("2024-03", "0"),
        ];
        let days = generate_daily_rows(&periods, dec("3120.83"), &payer(), &config, 1);
        let paid: Vec<&DailySingleRow> = days.rows.iter().filter(|r| r.paid).collect();
        assert_eq!(paid.len(), 65);
        assert_eq!(paid[38].step_factor, Decimal::ONE);
        assert_eq!(paid[39].step_factor, dec("0.80")); // 40th paid day
        assert_eq!(paid[39].decision, DecisionType::SteppedDown);
        assert_eq!(paid[64].step_factor, dec("0.80"));
    }

    /// GE-007: withholding arithmetic
    #[test]
    fn test_withholding_arithmetic() {
        let config = EngineConfig::builtin();
        let days = generate_daily_rows(
            &[make_period("2024-12", "0")],
            dec("3120.83"),
            &payer(),
            &config,
            1,
        );
        let row = days.rows.iter().find(|r| r.paid).unwrap();
        assert_eq!(row.tax, row.adjusted_daily * dec("0.25"));
        assert_eq!(row.member_fee, row.adjusted_daily * dec("0.015"));
        assert_eq!(row.net, row.adjusted_daily - row.tax - row.member_fee);
    }

    /// GE-008: expense compensation drives the decision label
    #[test]
    fn test_expense_compensation_decision() {
        let config = EngineConfig::builtin();
        let mut p = payer();
        p.expense_compensation = dec("9.00");
        let days = generate_daily_rows(
            &[make_period("2024-12", "0")],
            dec("3120.83"),
            &p,
            &config,
            1,
        );
        let row = days.rows.iter().find(|r| r.paid).unwrap();
        assert_eq!(row.decision, DecisionType::GrantWithExpenseCompensation);
        assert_eq!(row.expense_compensation, dec("9.00"));
    }

    /// GE-009: generation is idempotent
    #[test]
    fn test_generation_idempotent() {
        let config = EngineConfig::builtin();
        let periods = vec![make_period("2024-11", "500.00"), make_period("2024-12", "0")];
        let toe = vec![make_period("2024-01", "3000.00")];
        let first = generate(&periods, &toe, &payer(), &config);
        let second = generate(&periods, &toe, &payer(), &config);
        assert_eq!(first.rows, second.rows);
        assert_eq!(first.daily_rows, second.daily_rows);
    }

    /// GE-010: full outcome wires base salary, rows and audit together
    #[test]
    fn test_generate_outcome_shape() {
        let config = EngineConfig::builtin();
        let periods = vec![make_period("2024-12", "0")];
        let toe = vec![make_period("2024-01", "3000.00")];
        let outcome = generate(&periods, &toe, &payer(), &config);
        assert!(!outcome.base_salary.fallback_used);
        assert_eq!(outcome.base_salary.monthly_salary, dec("3000.00"));
        assert!(!outcome.rows.is_empty());
        assert_eq!(outcome.audit.steps[0].rule_id, "base_salary");
        assert_eq!(outcome.audit.steps[1].rule_id, "period_generation");
        assert!(outcome.audit.warnings.is_empty());
    }
}

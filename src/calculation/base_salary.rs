//! Base salary determination over the TOE window.
//!
//! The base salary fed into the daily allowance formula is deliberately NOT
//! the paid month's own income: it is the average effective income over the
//! caller-supplied TOE (employment-condition) window. The paid month's income
//! only enters through the adjustment. Mixing the two would let the current
//! month influence its own base rate.

use rust_decimal::Decimal;

use crate::config::EngineConfig;
use crate::models::{AuditStep, MonthPeriod};

use super::effective_income::effective_income_total;

/// Maximum number of TOE-window months entering the average.
const MAX_TOE_MONTHS: usize = 12;

/// The result of a base salary determination, including the audit step.
#[derive(Debug, Clone)]
pub struct BaseSalaryResult {
    /// The determined monthly base salary.
    pub monthly_salary: Decimal,
    /// How many TOE-window months entered the average.
    pub months_used: u32,
    /// Whether the documented fallback constant was used.
    pub fallback_used: bool,
    /// The audit step recording this determination.
    pub audit_step: AuditStep,
}

/// Determines the monthly base salary from the TOE window.
///
/// Months with a positive TOE contribution or positive effective income are
/// eligible; up to twelve are taken in the order supplied by the caller and
/// their effective incomes averaged. When no month carries any signal, the
/// configured default base salary is used instead — empty input is a
/// documented fallback, never an error.
///
/// # Example
///
/// ```
/// use benefit_engine::calculation::determine_base_salary;
/// use benefit_engine::config::EngineConfig;
/// use rust_decimal::Decimal;
///
/// let config = EngineConfig::builtin();
/// let result = determine_base_salary(&[], &config, 1);
/// assert!(result.fallback_used);
/// assert_eq!(result.monthly_salary, config.defaults().base_salary);
/// ```
pub fn determine_base_salary(
    toe_periods: &[MonthPeriod],
    config: &EngineConfig,
    step_number: u32,
) -> BaseSalaryResult {
    let eligible: Vec<(&MonthPeriod, Decimal)> = toe_periods
        .iter()
        .map(|p| (p, effective_income_total(p, config)))
        .filter(|(p, income)| p.toe > Decimal::ZERO || *income > Decimal::ZERO)
        .take(MAX_TOE_MONTHS)
        .collect();

    if eligible.is_empty() {
        let fallback = config.defaults().base_salary;
        let audit_step = AuditStep {
            step_number,
            rule_id: "base_salary".to_string(),
            rule_name: "Base Salary Determination".to_string(),
            statute_ref: "6:4".to_string(),
            input: serde_json::json!({
                "toe_periods_supplied": toe_periods.len(),
                "eligible_months": 0
            }),
            output: serde_json::json!({
                "base_salary": fallback.to_string(),
                "source": "default"
            }),
            reasoning: format!(
                "No TOE-window month had a positive TOE contribution or income; \
                 using default base salary {}",
                fallback
            ),
        };
        return BaseSalaryResult {
            monthly_salary: fallback,
            months_used: 0,
            fallback_used: true,
            audit_step,
        };
    }

    let months = Decimal::from(eligible.len() as u32);
    let total: Decimal = eligible.iter().map(|(_, income)| *income).sum();
    let average = total / months;

    let audit_step = AuditStep {
        step_number,
        rule_id: "base_salary".to_string(),
        rule_name: "Base Salary Determination".to_string(),
        statute_ref: "6:4".to_string(),
        input: serde_json::json!({
            "toe_periods_supplied": toe_periods.len(),
            "eligible_months": eligible.len(),
            "period_ids": eligible.iter().map(|(p, _)| p.id.clone()).collect::<Vec<_>>()
        }),
        output: serde_json::json!({
            "base_salary": average.to_string(),
            "source": "toe_window"
        }),
        reasoning: format!(
            "Averaged effective income {} over {} TOE-window months: {}",
            total,
            eligible.len(),
            average
        ),
    };

    BaseSalaryResult {
        monthly_salary: average,
        months_used: eligible.len() as u32,
        fallback_used: false,
        audit_step,
    }
}

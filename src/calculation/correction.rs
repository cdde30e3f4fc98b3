//! Correction and recomputation engine.
//!
//! This module merges amended income rows into their target period, re-runs
//! the generation pipeline over the amended period set, and diffs the result
//! against the originally generated payments. Overpayments become recovery
//! amounts and underpayments become additional payments; the two are derived
//! from the same subtraction and can never both be nonzero for one period.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::warn;

use crate::config::EngineConfig;
use crate::models::{
    CorrectionAnalysis, CorrectionCase, CorrectionOutcome, DailyPaymentRow, DailySingleRow,
    DayDifference, IncomeRow, MonthPeriod, PayerRates, PeriodDifference,
};

use super::generator::generate;

/// Merges amended income rows into a period's row list.
///
/// An amended row replaces an existing row with the same
/// (pay date, income type, employer) triple; rows without a match are
/// appended. The period's total salary needs no separate bookkeeping — it is
/// always derived from the row list, so the merge alone is enough.
///
/// # Example
///
/// ```
/// use benefit_engine::calculation::merge_income_rows;
/// use benefit_engine::models::MonthPeriod;
/// use rust_decimal::Decimal;
///
/// let mut period = MonthPeriod {
///     id: "2024-12".to_string(),
///     label: String::new(),
///     toe: Decimal::ZERO,
///     divisor: None,
///     employers: vec![],
///     rows: vec![],
/// };
/// merge_income_rows(&mut period, &[]);
/// assert!(period.rows.is_empty());
/// ```
pub fn merge_income_rows(period: &mut MonthPeriod, amended: &[IncomeRow]) {
    for row in amended {
        match period.rows.iter_mut().find(|r| r.same_payment_key(row)) {
            Some(existing) => *existing = row.clone(),
            None => period.rows.push(row.clone()),
        }
        if !period.employers.contains(&row.employer) {
            period.employers.push(row.employer.clone());
        }
    }
}

/// Re-runs the generation pipeline with amended income data and diffs the
/// result against the original payments.
///
/// The original period set is never mutated: the amendment is merged into a
/// cloned set, keeping the supplied collections as the audit baseline. When
/// the target period cannot be found the recomputation is a no-op and the
/// original rows are returned unchanged — a correction attempt against an
/// unknown period must never corrupt state.
///
/// Group-level differences compare the caller-supplied original rows against
/// the regenerated set, aligned by start date. Day-level breakdowns compare a
/// regenerated baseline against the amended run over the target month's date
/// range; regeneration is safe because the pipeline is a pure function of its
/// inputs.
pub fn recompute_with_amendments(
    original_rows: &[DailyPaymentRow],
    periods: &[MonthPeriod],
    toe_periods: &[MonthPeriod],
    amended: &[IncomeRow],
    target_period_id: &str,
    payer: &PayerRates,
    config: &EngineConfig,
) -> CorrectionOutcome {
    let Some(target_index) = periods.iter().position(|p| p.id == target_period_id) else {
        warn!(
            target_period_id,
            "Correction target period not found; returning original rows unchanged"
        );
        return CorrectionOutcome {
            rows: original_rows.to_vec(),
            analysis: CorrectionAnalysis::empty(),
            case: None,
            target_found: false,
        };
    };

    let mut amended_periods = periods.to_vec();
    merge_income_rows(&mut amended_periods[target_index], amended);

    let baseline = generate(periods, toe_periods, payer, config);
    let corrected = generate(&amended_periods, toe_periods, payer, config);

    let target_range = amended_periods[target_index]
        .parse_id()
        .and_then(|_| month_date_range(&amended_periods[target_index]));

    let mut differences = diff_payment_rows(original_rows, &corrected.rows);
    if let Some((range_start, range_end)) = target_range {
        for diff in &mut differences {
            if diff.end_date < range_start || diff.start_date > range_end {
                continue;
            }
            diff.days = diff_daily_rows(
                &baseline.daily_rows,
                &corrected.daily_rows,
                diff.start_date.max(range_start),
                diff.end_date.min(range_end),
            );
        }
    }

    let analysis = CorrectionAnalysis::from_differences(differences);
    let case = CorrectionCase::from_analysis(&analysis);

    CorrectionOutcome {
        rows: corrected.rows,
        analysis,
        case,
        target_found: true,
    }
}

/// First and last calendar date of a period's month.
fn month_date_range(period: &MonthPeriod) -> Option<(NaiveDate, NaiveDate)> {
    let (year, month) = period.parse_id()?;
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let last = NaiveDate::from_ymd_opt(year, month, period.days_in_month()?)?;
    Some((first, last))
}

/// Compares two payment-row sets, aligned by start date.
///
/// Only changed periods are reported. Rows present on one side only are
/// ignored; group boundaries are weekday-driven, so the same period set
/// always produces the same boundaries on both sides.
fn diff_payment_rows(
    original: &[DailyPaymentRow],
    corrected: &[DailyPaymentRow],
) -> Vec<PeriodDifference> {
    let mut differences = Vec::new();
    for corrected_row in corrected {
        let Some(original_row) = original
            .iter()
            .find(|o| o.start_date == corrected_row.start_date)
        else {
            continue;
        };
        let delta_gross = corrected_row.gross - original_row.gross;
        let delta_net = corrected_row.net - original_row.net;
        if delta_gross == Decimal::ZERO && delta_net == Decimal::ZERO {
            continue;
        }
        differences.push(PeriodDifference {
            start_date: original_row.start_date,
            end_date: original_row.end_date,
            original_gross: original_row.gross,
            corrected_gross: corrected_row.gross,
            delta_gross,
            original_net: original_row.net,
            corrected_net: corrected_row.net,
            delta_net,
            days: vec![],
        });
    }
    differences
}

/// Day-level comparison over a date range; only changed days are reported.
fn diff_daily_rows(
    baseline: &[DailySingleRow],
    corrected: &[DailySingleRow],
    from: NaiveDate,
    to: NaiveDate,
) -> Vec<DayDifference> {
    let mut days = Vec::new();
    for corrected_day in corrected
        .iter()
        .filter(|d| d.date >= from && d.date <= to)
    {
        let Some(baseline_day) = baseline.iter().find(|d| d.date == corrected_day.date) else {
            continue;
        };
        let delta_gross = corrected_day.adjusted_daily - baseline_day.adjusted_daily;
        let delta_net = corrected_day.net - baseline_day.net;
        if delta_gross == Decimal::ZERO && delta_net == Decimal::ZERO {
            continue;
        }
        days.push(DayDifference {
            date: corrected_day.date,
            original_gross: baseline_day.adjusted_daily,
            corrected_gross: corrected_day.adjusted_daily,
            delta_gross,
            original_net: baseline_day.net,
            corrected_net: corrected_day.net,
            delta_net,
        });
    }
    days
}

//! Correction comparison artifacts.
//!
//! This module defines the read-only records produced when a recomputation
//! with amended income data is compared against the originally generated
//! payments: per-period and per-day differences, the aggregate
//! [`CorrectionAnalysis`], and the reviewable [`CorrectionCase`] listing
//! payable recoveries.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::DailyPaymentRow;

/// One calendar day's before/after comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayDifference {
    /// The calendar date.
    pub date: NaiveDate,
    /// Gross amount in the original generation.
    pub original_gross: Decimal,
    /// Gross amount after the correction.
    pub corrected_gross: Decimal,
    /// `corrected_gross - original_gross`.
    pub delta_gross: Decimal,
    /// Net amount in the original generation.
    pub original_net: Decimal,
    /// Net amount after the correction.
    pub corrected_net: Decimal,
    /// `corrected_net - original_net`.
    pub delta_net: Decimal,
}

/// One payment period's before/after comparison.
///
/// Deltas follow the `corrected - original` convention; the recovery and
/// additional-payment accessors derive non-negative, mutually exclusive
/// amounts from the same subtraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodDifference {
    /// First date of the compared payment period.
    pub start_date: NaiveDate,
    /// Last date of the compared payment period.
    pub end_date: NaiveDate,
    /// Gross total in the original generation.
    pub original_gross: Decimal,
    /// Gross total after the correction.
    pub corrected_gross: Decimal,
    /// `corrected_gross - original_gross`.
    pub delta_gross: Decimal,
    /// Net total in the original generation.
    pub original_net: Decimal,
    /// Net total after the correction.
    pub corrected_net: Decimal,
    /// `corrected_net - original_net`.
    pub delta_net: Decimal,
    /// Day-level breakdown, where day rows were available for both runs.
    #[serde(default)]
    pub days: Vec<DayDifference>,
}

impl PeriodDifference {
    /// The overpaid gross amount to recover; zero when nothing was overpaid.
    pub fn recovery_gross(&self) -> Decimal {
        (-self.delta_gross).max(Decimal::ZERO)
    }

    /// The overpaid net amount to recover; zero when nothing was overpaid.
    pub fn recovery_net(&self) -> Decimal {
        (-self.delta_net).max(Decimal::ZERO)
    }

    /// The additional gross payment owed; zero when nothing is owed.
    pub fn additional_gross(&self) -> Decimal {
        self.delta_gross.max(Decimal::ZERO)
    }

    /// The additional net payment owed; zero when nothing is owed.
    pub fn additional_net(&self) -> Decimal {
        self.delta_net.max(Decimal::ZERO)
    }
}

/// Aggregate result of comparing an original and a corrected generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrectionAnalysis {
    /// The per-period comparisons, in payment-row order.
    pub differences: Vec<PeriodDifference>,
    /// Total gross overpayment to recover across all periods.
    pub recovery_gross: Decimal,
    /// Total net overpayment to recover across all periods.
    pub recovery_net: Decimal,
    /// Total additional gross payment owed across all periods.
    pub additional_gross: Decimal,
    /// Total additional net payment owed across all periods.
    pub additional_net: Decimal,
}

impl CorrectionAnalysis {
    /// Builds the aggregate analysis from per-period differences.
    ///
    /// Recovery and additional totals are accumulated separately so both are
    /// always non-negative; for any single period at most one of the two is
    /// nonzero by construction.
    pub fn from_differences(differences: Vec<PeriodDifference>) -> Self {
        let mut analysis = Self {
            recovery_gross: Decimal::ZERO,
            recovery_net: Decimal::ZERO,
            additional_gross: Decimal::ZERO,
            additional_net: Decimal::ZERO,
            differences,
        };
        for diff in &analysis.differences {
            analysis.recovery_gross += diff.recovery_gross();
            analysis.recovery_net += diff.recovery_net();
            analysis.additional_gross += diff.additional_gross();
            analysis.additional_net += diff.additional_net();
        }
        analysis
    }

    /// An analysis with no differences, used when a correction is a no-op.
    pub fn empty() -> Self {
        Self::from_differences(vec![])
    }

    /// Whether the comparison found any changed period.
    pub fn has_changes(&self) -> bool {
        self.differences
            .iter()
            .any(|d| d.delta_gross != Decimal::ZERO || d.delta_net != Decimal::ZERO)
    }
}

/// One payable recovery line in a correction case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecoveryLine {
    /// First date of the overpaid payment period.
    pub start_date: NaiveDate,
    /// Last date of the overpaid payment period.
    pub end_date: NaiveDate,
    /// Gross amount to recover for this period.
    pub recovery_gross: Decimal,
    /// Net amount to recover for this period.
    pub recovery_net: Decimal,
    /// Day-level breakdown of the overpayment, where available.
    #[serde(default)]
    pub days: Vec<DayDifference>,
}

/// The reviewable artifact turning negative deltas into payable recoveries.
///
/// Built only from periods whose gross delta is negative; an analysis with no
/// recoveries yields no case at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrectionCase {
    /// The recovery lines, one per overpaid period.
    pub lines: Vec<RecoveryLine>,
    /// Total gross amount to recover.
    pub total_gross: Decimal,
    /// Total net amount to recover.
    pub total_net: Decimal,
}

impl CorrectionCase {
    /// Builds a case from an analysis, or `None` when there is nothing to
    /// recover.
    pub fn from_analysis(analysis: &CorrectionAnalysis) -> Option<Self> {
        let lines: Vec<RecoveryLine> = analysis
            .differences
            .iter()
            .filter(|d| d.delta_gross < Decimal::ZERO)
            .map(|d| RecoveryLine {
                start_date: d.start_date,
                end_date: d.end_date,
                recovery_gross: d.recovery_gross(),
                recovery_net: d.recovery_net(),
                days: d.days.clone(),
            })
            .collect();

        if lines.is_empty() {
            return None;
        }

        let total_gross = lines.iter().map(|l| l.recovery_gross).sum();
        let total_net = lines.iter().map(|l| l.recovery_net).sum();
        Some(Self {
            lines,
            total_gross,
            total_net,
        })
    }
}

/// The full outcome of a recomputation with amended income data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrectionOutcome {
    /// The corrected payment rows. Identical to the originals when the target
    /// period was not found.
    pub rows: Vec<DailyPaymentRow>,
    /// The before/after comparison.
    pub analysis: CorrectionAnalysis,
    /// The recovery case, when any period was overpaid.
    pub case: Option<CorrectionCase>,
    /// Whether the target period of the amendment was found at all.
    pub target_found: bool,
}

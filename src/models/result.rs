//! Generation result models and audit trail types.
//!
//! This module contains the outward-facing result records assembled after a
//! generation or recomputation pass, plus the audit trace that records how
//! each figure was reached for the human-reviewed workflow downstream.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::correction::{CorrectionAnalysis, CorrectionCase};
use super::payment::{DailyPaymentRow, PaymentTotals};

/// Caller-supplied withholding and compensation rates.
///
/// These are deliberately not part of the engine configuration: tax and
/// membership-fee percentages vary per claimant and the host application owns
/// them. No defaults are baked into the engine.
///
/// # Example
///
/// ```
/// use benefit_engine::models::PayerRates;
/// use rust_decimal::Decimal;
///
/// let payer = PayerRates {
///     tax_rate: Decimal::new(25, 2),
///     member_fee_rate: Decimal::new(15, 3),
///     expense_compensation: Decimal::ZERO,
/// };
/// assert_eq!(payer.tax_rate, Decimal::new(25, 2));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayerRates {
    /// Tax withholding rate as a fraction of gross (e.g., 0.25).
    pub tax_rate: Decimal,
    /// Membership fee rate as a fraction of gross.
    #[serde(default)]
    pub member_fee_rate: Decimal,
    /// Expense compensation paid per paid business day.
    #[serde(default)]
    pub expense_compensation: Decimal,
}

/// A single step in the audit trace recording a calculation decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// Reference to the Unemployment Security Act chapter for this rule.
    pub statute_ref: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings indicate fail-soft conditions (e.g., a skipped malformed period)
/// that don't abort the batch but may require attention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a generation pass.
///
/// # Example
///
/// ```
/// use benefit_engine::models::AuditTrace;
///
/// let trace = AuditTrace {
///     steps: vec![],
///     warnings: vec![],
///     duration_us: 1234,
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

/// The complete result of a payment generation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResult {
    /// Unique identifier for this calculation run.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The engine version that produced this result.
    pub engine_version: String,
    /// The base salary used for the allowance formula.
    pub base_salary: Decimal,
    /// The grouped payment rows.
    pub rows: Vec<DailyPaymentRow>,
    /// Aggregated totals over all rows.
    pub totals: PaymentTotals,
    /// The audit trace for this run.
    pub audit: AuditTrace,
}

/// The complete result of a recomputation with amended income data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecomputeResult {
    /// Unique identifier for this calculation run.
    pub calculation_id: Uuid,
    /// When the recomputation was performed.
    pub timestamp: DateTime<Utc>,
    /// The engine version that produced this result.
    pub engine_version: String,
    /// The corrected payment rows.
    pub rows: Vec<DailyPaymentRow>,
    /// The before/after comparison.
    pub analysis: CorrectionAnalysis,
    /// The recovery case, when any period was overpaid.
    pub case: Option<CorrectionCase>,
    /// Whether the target period of the amendment was found.
    pub target_found: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payer_rates_defaults() {
        let json = r#"{ "tax_rate": "0.25" }"#;
        let payer: PayerRates = serde_json::from_str(json).unwrap();
        assert_eq!(payer.member_fee_rate, Decimal::ZERO);
        assert_eq!(payer.expense_compensation, Decimal::ZERO);
    }

    #[test]
    fn test_audit_trace_serialization() {
        let trace = AuditTrace {
            steps: vec![AuditStep {
                step_number: 1,
                rule_id: "base_salary".to_string(),
                rule_name: "Base Salary Determination".to_string(),
                statute_ref: "6:4".to_string(),
                input: serde_json::json!({ "toe_periods": 12 }),
                output: serde_json::json!({ "base_salary": "3120.83" }),
                reasoning: "Averaged 12 TOE-window months".to_string(),
            }],
            warnings: vec![],
            duration_us: 42,
        };
        let json = serde_json::to_string(&trace).unwrap();
        assert!(json.contains("\"rule_id\":\"base_salary\""));
        assert!(json.contains("\"statute_ref\":\"6:4\""));
    }
}

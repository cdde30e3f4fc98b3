//! Request types for the Daily Allowance Engine API.
//!
//! This module defines the JSON request structures for the `/generate` and
//! `/recompute` endpoints.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{DailyPaymentRow, IncomeRow, IncomeStatus, MonthPeriod, PayerRates};

/// Request body for the `/generate` endpoint.
///
/// Contains the months to generate payment rows for, the TOE window used to
/// determine the base salary, and the claimant's withholding rates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// The months to generate daily rows for, in chronological order.
    pub periods: Vec<MonthPeriodRequest>,
    /// The TOE-window months used for the base salary determination.
    #[serde(default)]
    pub toe_periods: Vec<MonthPeriodRequest>,
    /// The claimant's withholding and compensation rates.
    pub payer: PayerRatesRequest,
}

/// Request body for the `/recompute` endpoint.
///
/// Extends the generation input with the amended income rows, the period they
/// target, and optionally the originally issued payment rows to diff against.
/// When `original_rows` is omitted the baseline is regenerated from the
/// supplied periods.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecomputeRequest {
    /// The months the original generation covered.
    pub periods: Vec<MonthPeriodRequest>,
    /// The TOE-window months used for the base salary determination.
    #[serde(default)]
    pub toe_periods: Vec<MonthPeriodRequest>,
    /// The claimant's withholding and compensation rates.
    pub payer: PayerRatesRequest,
    /// The amended income rows to merge into the target period.
    pub amended_rows: Vec<IncomeRowRequest>,
    /// The identifier of the period the amendment targets (YYYY-MM).
    pub target_period_id: String,
    /// The originally issued payment rows, when the caller has them.
    #[serde(default)]
    pub original_rows: Option<Vec<DailyPaymentRow>>,
}

/// One month of income data in a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthPeriodRequest {
    /// The period identifier in YYYY-MM form.
    pub id: String,
    /// Human-readable label (e.g., "Joulukuu 2024").
    #[serde(default)]
    pub label: String,
    /// The TOE contribution of this month.
    #[serde(default)]
    pub toe: Decimal,
    /// Period-specific divisor override; the configured default applies
    /// when absent.
    #[serde(default)]
    pub divisor: Option<Decimal>,
    /// The employers that paid income during this month.
    #[serde(default)]
    pub employers: Vec<String>,
    /// The income rows reported for this month.
    #[serde(default)]
    pub rows: Vec<IncomeRowRequest>,
}

/// One income registry row in a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeRowRequest {
    /// Unique identifier of the row in the registry.
    pub id: String,
    /// The date the income was paid.
    pub pay_date: NaiveDate,
    /// The income-type code (e.g., "Aikapalkka").
    pub income_type: String,
    /// The gross amount of the payment.
    pub amount: Decimal,
    /// The typed calculation status of the row.
    #[serde(default)]
    pub status: IncomeStatus,
    /// Free-text annotation carried from the registry.
    #[serde(default)]
    pub annotation: Option<String>,
    /// Whether the income stems from subsidized work.
    #[serde(default)]
    pub subsidized_work: bool,
    /// The subsidy rule applied, when the work was subsidized.
    #[serde(default)]
    pub subsidy_rule: Option<String>,
    /// The employer that paid this income.
    pub employer: String,
    /// Identifier of the row this one replaces, for amendments.
    #[serde(default)]
    pub replaces: Option<String>,
}

/// The claimant's withholding and compensation rates in a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayerRatesRequest {
    /// Tax withholding rate as a fraction of gross.
    pub tax_rate: Decimal,
    /// Membership fee rate as a fraction of gross.
    #[serde(default)]
    pub member_fee_rate: Decimal,
    /// Expense compensation paid per paid business day.
    #[serde(default)]
    pub expense_compensation: Decimal,
}

impl From<MonthPeriodRequest> for MonthPeriod {
    fn from(req: MonthPeriodRequest) -> Self {
        MonthPeriod {
            id: req.id,
            label: req.label,
            toe: req.toe,
            divisor: req.divisor,
            employers: req.employers,
            rows: req.rows.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<IncomeRowRequest> for IncomeRow {
    fn from(req: IncomeRowRequest) -> Self {
        IncomeRow {
            id: req.id,
            pay_date: req.pay_date,
            income_type: req.income_type,
            amount: req.amount,
            status: req.status,
            annotation: req.annotation,
            subsidized_work: req.subsidized_work,
            subsidy_rule: req.subsidy_rule,
            employer: req.employer,
            replaces: req.replaces,
        }
    }
}

impl From<PayerRatesRequest> for PayerRates {
    fn from(req: PayerRatesRequest) -> Self {
        PayerRates {
            tax_rate: req.tax_rate,
            member_fee_rate: req.member_fee_rate,
            expense_compensation: req.expense_compensation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_deserialize_generate_request() {
        let json = r#"{
            "periods": [
                {
                    "id": "2024-12",
                    "label": "Joulukuu 2024",
                    "toe": "1",
                    "divisor": "21.5",
                    "employers": ["Acme Oy"],
                    "rows": [
                        {
                            "id": "tr_001",
                            "pay_date": "2024-12-15",
                            "income_type": "Aikapalkka",
                            "amount": "2100.00",
                            "employer": "Acme Oy"
                        }
                    ]
                }
            ],
            "toe_periods": [],
            "payer": { "tax_rate": "0.25" }
        }"#;

        let request: GenerateRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.periods.len(), 1);
        assert_eq!(request.periods[0].id, "2024-12");
        assert_eq!(request.periods[0].rows[0].status, IncomeStatus::Normal);
        assert_eq!(request.payer.member_fee_rate, Decimal::ZERO);
    }

    #[test]
    fn test_deserialize_recompute_request_without_original_rows() {
        let json = r#"{
            "periods": [{ "id": "2024-12" }],
            "payer": { "tax_rate": "0.25" },
            "amended_rows": [
                {
                    "id": "tr_new",
                    "pay_date": "2024-12-15",
                    "income_type": "Aikapalkka",
                    "amount": "2900.00",
                    "status": "normal",
                    "employer": "Acme Oy",
                    "replaces": "tr_001"
                }
            ],
            "target_period_id": "2024-12"
        }"#;

        let request: RecomputeRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.target_period_id, "2024-12");
        assert!(request.original_rows.is_none());
        assert_eq!(request.amended_rows[0].replaces.as_deref(), Some("tr_001"));
    }

    #[test]
    fn test_period_conversion() {
        let req = MonthPeriodRequest {
            id: "2024-12".to_string(),
            label: "Joulukuu 2024".to_string(),
            toe: Decimal::ONE,
            divisor: Some(Decimal::from_str("21.5").unwrap()),
            employers: vec!["Acme Oy".to_string()],
            rows: vec![],
        };

        let period: MonthPeriod = req.into();
        assert_eq!(period.id, "2024-12");
        assert_eq!(period.parse_id(), Some((2024, 12)));
    }
}

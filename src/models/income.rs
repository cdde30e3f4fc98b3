//! Income row model and related types.
//!
//! This module defines the [`IncomeRow`] struct representing one payment event
//! reported by the income registry, together with the typed [`IncomeStatus`]
//! that replaces the registry's free-text annotation markers.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Annotation marker the registry uses for rows removed from calculation.
const DELETED_MARKER: &str = "poistettu";

/// Annotation marker overriding the exclusion of a non-affecting income type.
const COUNTED_MARKER: &str = "huomioitu laskennassa";

/// The calculation status of an income row.
///
/// Historically the registry carried these as free-text annotation markers
/// ("poistettu", "Huomioitu laskennassa"). The typed status is authoritative;
/// annotation markers are only consulted when the status is [`Normal`].
///
/// [`Normal`]: IncomeStatus::Normal
///
/// # Example
///
/// ```
/// use benefit_engine::models::IncomeStatus;
///
/// let status = IncomeStatus::Deleted;
/// assert_eq!(format!("{:?}", status), "Deleted");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum IncomeStatus {
    /// The row participates in calculation under the normal filtering rules.
    #[default]
    Normal,
    /// The row is removed from every total.
    Deleted,
    /// The row is counted even if its income type is otherwise excluded.
    CountedOverride,
}

/// Represents one payment event reported by the income registry.
///
/// # Example
///
/// ```
/// use benefit_engine::models::{IncomeRow, IncomeStatus};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let row = IncomeRow {
///     id: "tr_001".to_string(),
///     pay_date: NaiveDate::from_ymd_opt(2024, 12, 15).unwrap(),
///     income_type: "Aikapalkka".to_string(),
///     amount: Decimal::from_str("2100.00").unwrap(),
///     status: IncomeStatus::Normal,
///     annotation: None,
///     subsidized_work: false,
///     subsidy_rule: None,
///     employer: "Acme Oy".to_string(),
///     replaces: None,
/// };
/// assert_eq!(row.effective_status(), IncomeStatus::Normal);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeRow {
    /// Unique identifier of the row in the registry.
    pub id: String,
    /// The date the income was paid.
    pub pay_date: NaiveDate,
    /// The income-type code (e.g., "Aikapalkka", "Kokouspalkkio").
    pub income_type: String,
    /// The gross amount of the payment.
    pub amount: Decimal,
    /// The typed calculation status of the row.
    #[serde(default)]
    pub status: IncomeStatus,
    /// Free-text annotation from the registry, kept for display.
    #[serde(default)]
    pub annotation: Option<String>,
    /// Whether the income stems from subsidized work.
    #[serde(default)]
    pub subsidized_work: bool,
    /// The subsidy rule applied, when `subsidized_work` is set.
    #[serde(default)]
    pub subsidy_rule: Option<String>,
    /// The employer that reported the payment.
    pub employer: String,
    /// Identifier of the originating row this one replaces, for corrections.
    #[serde(default)]
    pub replaces: Option<String>,
}

impl IncomeRow {
    /// Returns the effective calculation status of this row.
    ///
    /// The typed [`status`] field wins when it is anything other than
    /// [`IncomeStatus::Normal`]. For `Normal` rows the legacy annotation
    /// markers are recognized case-insensitively, so rows ingested from older
    /// registry extracts filter identically everywhere.
    ///
    /// [`status`]: IncomeRow::status
    ///
    /// # Example
    ///
    /// ```
    /// use benefit_engine::models::{IncomeRow, IncomeStatus};
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let mut row = IncomeRow {
    ///     id: "tr_001".to_string(),
    ///     pay_date: NaiveDate::from_ymd_opt(2024, 12, 15).unwrap(),
    ///     income_type: "Aikapalkka".to_string(),
    ///     amount: Decimal::new(210000, 2),
    ///     status: IncomeStatus::Normal,
    ///     annotation: Some("Poistettu 2024-12-20".to_string()),
    ///     subsidized_work: false,
    ///     subsidy_rule: None,
    ///     employer: "Acme Oy".to_string(),
    ///     replaces: None,
    /// };
    /// assert_eq!(row.effective_status(), IncomeStatus::Deleted);
    ///
    /// row.status = IncomeStatus::CountedOverride;
    /// assert_eq!(row.effective_status(), IncomeStatus::CountedOverride);
    /// ```
    pub fn effective_status(&self) -> IncomeStatus {
        if self.status != IncomeStatus::Normal {
            return self.status;
        }
        match &self.annotation {
            Some(text) => {
                let lowered = text.to_lowercase();
                if lowered.contains(DELETED_MARKER) {
                    IncomeStatus::Deleted
                } else if lowered.contains(COUNTED_MARKER) {
                    IncomeStatus::CountedOverride
                } else {
                    IncomeStatus::Normal
                }
            }
            None => IncomeStatus::Normal,
        }
    }

    /// Checks whether another row corrects this one.
    ///
    /// Correction rows from the registry carry no stable identifier link, so
    /// matching is by the (pay date, income type, employer) triple.
    pub fn same_payment_key(&self, other: &IncomeRow) -> bool {
        self.pay_date == other.pay_date
            && self.income_type == other.income_type
            && self.employer == other.employer
    }
}

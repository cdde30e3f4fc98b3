//! Month period model.
//!
//! This module contains the [`MonthPeriod`] type, one calendar month's income
//! aggregate as supplied by the host application.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::IncomeRow;

/// Represents one calendar month's income aggregate.
///
/// The period's total salary is deliberately NOT a stored field: it is always
/// derived on demand from the row list through
/// [`effective_income_total`](crate::calculation::effective_income_total), so
/// it can never go stale when rows change.
///
/// # Example
///
/// ```
/// use benefit_engine::models::MonthPeriod;
/// use rust_decimal::Decimal;
///
/// let period = MonthPeriod {
///     id: "2024-12".to_string(),
///     label: "Joulukuu 2024".to_string(),
///     toe: Decimal::ONE,
///     divisor: None,
///     employers: vec!["Acme Oy".to_string()],
///     rows: vec![],
/// };
/// assert_eq!(period.parse_id(), Some((2024, 12)));
/// assert_eq!(period.days_in_month(), Some(31));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthPeriod {
    /// Period identifier in `YYYY-MM` form.
    pub id: String,
    /// Human-readable label for the period.
    pub label: String,
    /// The employment-condition (TOE) contribution of this month.
    #[serde(default)]
    pub toe: Decimal,
    /// Number of benefit-calculation days attributed to the month.
    ///
    /// `None` or zero falls back to the configured default (typically 21.5).
    #[serde(default)]
    pub divisor: Option<Decimal>,
    /// Employers that paid income during the month.
    #[serde(default)]
    pub employers: Vec<String>,
    /// The income rows backing this month.
    #[serde(default)]
    pub rows: Vec<IncomeRow>,
}

impl MonthPeriod {
    /// Parses the period identifier into a (year, month) pair.
    ///
    /// Returns `None` when the identifier does not match `YYYY-MM` or the
    /// month is out of range. Callers treat an unparseable identifier as a
    /// fail-soft condition: the period is skipped, never fatal.
    ///
    /// # Example
    ///
    /// ```
    /// use benefit_engine::models::MonthPeriod;
    /// use rust_decimal::Decimal;
    ///
    /// let mut period = MonthPeriod {
    ///     id: "2024-02".to_string(),
    ///     label: String::new(),
    ///     toe: Decimal::ZERO,
    ///     divisor: None,
    ///     employers: vec![],
    ///     rows: vec![],
    /// };
    /// assert_eq!(period.parse_id(), Some((2024, 2)));
    ///
    /// period.id = "joulukuu".to_string();
    /// assert_eq!(period.parse_id(), None);
    /// ```
    pub fn parse_id(&self) -> Option<(i32, u32)> {
        let (year_part, month_part) = self.id.split_once('-')?;
        let year: i32 = year_part.parse().ok()?;
        let month: u32 = month_part.parse().ok()?;
        if !(1..=12).contains(&month) {
            return None;
        }
        Some((year, month))
    }

    /// Returns the number of calendar days in this period's month.
    ///
    /// `None` when the identifier is unparseable.
    pub fn days_in_month(&self) -> Option<u32> {
        let (year, month) = self.parse_id()?;
        let first = NaiveDate::from_ymd_opt(year, month, 1)?;
        let next = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)?
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)?
        };
        Some(next.signed_duration_since(first).num_days() as u32)
    }

    /// Returns this period's divisor, or the given default when absent/zero.
    pub fn divisor_or(&self, default: Decimal) -> Decimal {
        match self.divisor {
            Some(d) if d > Decimal::ZERO => d,
            _ => default,
        }
    }
}

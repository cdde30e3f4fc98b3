//! Step-down progression tracking.
//!
//! This module provides the [`StepTracker`], a running counter of cumulative
//! paid business days across one generation pass, mapped to the step-down
//! factor applied to the earnings-linked part of the allowance.

use rust_decimal::Decimal;

use crate::config::StepThreshold;

/// Tracks the cumulative paid-day count of one generation pass.
///
/// The tracker is not persisted between runs; the caller supplies the full
/// period set on every pass, so the counter always starts from zero. The
/// counter advances once per business day processed, regardless of whether
/// the day ends up with a nonzero allowance.
///
/// # Example
///
/// ```
/// use benefit_engine::calculation::StepTracker;
/// use benefit_engine::config::EngineConfig;
/// use rust_decimal::Decimal;
///
/// let config = EngineConfig::builtin();
/// let mut tracker = StepTracker::new(config.steps());
/// let index = tracker.advance();
/// assert_eq!(index, 1);
/// assert_eq!(tracker.factor(), Decimal::ONE);
/// ```
#[derive(Debug, Clone)]
pub struct StepTracker<'a> {
    paid_days: u32,
    steps: &'a [StepThreshold],
}

impl<'a> StepTracker<'a> {
    /// Creates a tracker over the given thresholds (sorted by `from_day`).
    pub fn new(steps: &'a [StepThreshold]) -> Self {
        Self {
            paid_days: 0,
            steps,
        }
    }

    /// Advances the counter by one business day, returning the new 1-based
    /// cumulative paid-day index.
    pub fn advance(&mut self) -> u32 {
        self.paid_days += 1;
        self.paid_days
    }

    /// Returns the current cumulative paid-day index.
    pub fn paid_days(&self) -> u32 {
        self.paid_days
    }

    /// Returns the step factor for the current paid-day index.
    ///
    /// The last threshold whose `from_day` is at or below the current index
    /// applies; before the first threshold the factor is 1.0.
    pub fn factor(&self) -> Decimal {
        self.steps
            .iter()
            .rev()
            .find(|s| self.paid_days >= s.from_day)
            .map(|s| s.factor)
            .unwrap_or(Decimal::ONE)
    }
}

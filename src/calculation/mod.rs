//! Calculation logic for the Daily Allowance Engine.
//!
//! This module contains all the calculation functions: the shared effective
//! income filter, base-salary determination over the TOE window, the
//! step-down progression tracker, the daily allowance formula with income
//! adjustment, the calendar-walking daily row generator, the grouping fold
//! into payment rows, and the correction/recomputation engine that diffs an
//! original generation against one with amended income data.

mod allowance;
mod base_salary;
mod correction;
mod effective_income;
mod generator;
mod grouping;
mod step;

pub use allowance::{adjusted_daily_allowance, full_daily_allowance, income_adjustment};
pub use base_salary::{BaseSalaryResult, determine_base_salary};
pub use correction::{merge_income_rows, recompute_with_amendments};
pub use effective_income::{counts_towards_total, effective_income_total};
pub use generator::{GeneratedDays, GenerationOutcome, generate, generate_daily_rows};
pub use grouping::group_daily_rows;
pub use step::StepTracker;

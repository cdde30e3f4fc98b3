//! Domain models for the Daily Allowance Engine.
//!
//! All of these are value-like records: they are recomputed from the source
//! `MonthPeriod`/`IncomeRow` collections on every generation pass, and
//! corrections always produce new collections rather than mutating history in
//! place, keeping the original rows as an audit baseline.

mod correction;
mod daily;
mod income;
mod payment;
mod period;
mod result;

pub use correction::{
    CorrectionAnalysis, CorrectionCase, CorrectionOutcome, DayDifference, PeriodDifference,
    RecoveryLine,
};
pub use daily::{DailySingleRow, DecisionType};
pub use income::{IncomeRow, IncomeStatus};
pub use payment::{DailyPaymentRow, PaymentTotals};
pub use period::MonthPeriod;
pub use result::{
    AuditStep, AuditTrace, AuditWarning, GenerationResult, PayerRates, RecomputeResult,
};

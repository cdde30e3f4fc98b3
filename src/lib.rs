//! Daily Allowance Engine for earnings-related unemployment benefits.
//!
//! This crate computes per-day unemployment-benefit payments from monthly
//! income records, groups them into reportable payment periods, and recomputes
//! payments when corrected income data arrives from the income registry,
//! producing a reconciliation (recovery or additional-payment) result.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;

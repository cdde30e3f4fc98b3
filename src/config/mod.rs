//! Configuration loading and management for the Daily Allowance Engine.
//!
//! This module provides functionality to load the engine's statutory
//! calculation constants from YAML files: allowance rates, step-down
//! thresholds, excluded income types, and documented defaults.
//!
//! # Example
//!
//! ```no_run
//! use benefit_engine::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/ansioturva").unwrap();
//! println!("Loaded fund config: {}", loader.metadata().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AllowanceRates, EngineConfig, EngineDefaults, ExcludedIncomeTypes, FundMetadata, StepThreshold,
};

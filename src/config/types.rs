//! Configuration types for daily allowance calculation.
//!
//! This module contains the strongly-typed configuration structures that are
//! deserialized from YAML configuration files. All domain coefficients (the
//! earnings-split rates, the adjustment rate, step-down thresholds, the
//! excluded income-type list) live here rather than being hard-coded, so a
//! rate change never requires touching the calculation functions.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Metadata about the fund configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct FundMetadata {
    /// Short code for the configuration set (e.g., "ansioturva").
    pub code: String,
    /// The human-readable name of the configuration.
    pub name: String,
    /// The version or effective date of the constants.
    pub version: String,
    /// URL to the source documentation of the constants.
    pub source_url: String,
}

/// Statutory constants of the daily allowance formula.
#[derive(Debug, Clone, Deserialize)]
pub struct AllowanceRates {
    /// The basic daily amount, paid regardless of prior earnings.
    pub daily_base: Decimal,
    /// Statutory deduction fraction applied to the monthly base salary.
    pub statutory_deduction: Decimal,
    /// The monthly split point of the progressive earnings schedule.
    pub split_point_monthly: Decimal,
    /// Accrual rate for daily salary below the split point.
    pub below_split_rate: Decimal,
    /// Accrual rate for daily salary above the split point.
    pub above_split_rate: Decimal,
    /// Fraction of period income that reduces the daily allowance.
    pub adjustment_rate: Decimal,
}

/// One step-down threshold of the paid-day progression.
#[derive(Debug, Clone, Deserialize)]
pub struct StepThreshold {
    /// The 1-based cumulative paid-day index from which this step applies.
    pub from_day: u32,
    /// The factor applied to the earnings-linked part from that day on.
    pub factor: Decimal,
}

/// Documented default values used when inputs carry no signal.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineDefaults {
    /// Divisor used when a period supplies none (benefit days per month).
    pub period_divisor: Decimal,
    /// Base salary used when no TOE-window period has any signal.
    pub base_salary: Decimal,
}

/// Income types that do not affect the benefit unless explicitly overridden.
#[derive(Debug, Clone, Deserialize)]
pub struct ExcludedIncomeTypes {
    /// The excluded income-type codes (matched case-insensitively).
    pub excluded: Vec<String>,
}

/// Rates configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct RatesConfig {
    /// Statutory allowance constants.
    pub rates: AllowanceRates,
    /// Documented defaults.
    pub defaults: EngineDefaults,
}

/// Steps configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct StepsConfig {
    /// The step-down thresholds.
    pub steps: Vec<StepThreshold>,
}

/// The complete engine configuration loaded from YAML files.
///
/// This struct aggregates all configuration loaded from the various YAML
/// files in a configuration directory, or the built-in defaults for tests.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Configuration metadata.
    metadata: FundMetadata,
    /// Statutory allowance constants.
    rates: AllowanceRates,
    /// Step-down thresholds (sorted by from_day ascending).
    steps: Vec<StepThreshold>,
    /// Documented defaults.
    defaults: EngineDefaults,
    /// Excluded income types.
    excluded_income_types: ExcludedIncomeTypes,
}

impl EngineConfig {
    /// Creates a new EngineConfig from its component parts.
    pub fn new(
        metadata: FundMetadata,
        rates: AllowanceRates,
        steps: Vec<StepThreshold>,
        defaults: EngineDefaults,
        excluded_income_types: ExcludedIncomeTypes,
    ) -> Self {
        let mut sorted_steps = steps;
        sorted_steps.sort_by_key(|s| s.from_day);
        Self {
            metadata,
            rates,
            steps: sorted_steps,
            defaults,
            excluded_income_types,
        }
    }

    /// Returns a configuration carrying the documented built-in constants.
    ///
    /// Intended for tests and previews; production deployments load the
    /// shipped YAML so a rate change is a data change, not a release.
    ///
    /// # Example
    ///
    /// ```
    /// use benefit_engine::config::EngineConfig;
    /// use rust_decimal::Decimal;
    ///
    /// let config = EngineConfig::builtin();
    /// assert_eq!(config.defaults().period_divisor, Decimal::new(215, 1));
    /// ```
    pub fn builtin() -> Self {
        Self::new(
            FundMetadata {
                code: "ansioturva".to_string(),
                name: "Earnings-related daily allowance".to_string(),
                version: "2024-01-01".to_string(),
                source_url: "https://www.finlex.fi/fi/laki/ajantasa/2002/20021290".to_string(),
            },
            AllowanceRates {
                daily_base: Decimal::new(3721, 2),
                statutory_deduction: Decimal::new(376, 4),
                split_point_monthly: Decimal::new(353495, 2),
                below_split_rate: Decimal::new(45, 2),
                above_split_rate: Decimal::new(20, 2),
                adjustment_rate: Decimal::new(50, 2),
            },
            vec![
                StepThreshold {
                    from_day: 40,
                    factor: Decimal::new(80, 2),
                },
                StepThreshold {
                    from_day: 170,
                    factor: Decimal::new(75, 2),
                },
            ],
            EngineDefaults {
                period_divisor: Decimal::new(215, 1),
                base_salary: Decimal::new(312083, 2),
            },
            ExcludedIncomeTypes {
                excluded: vec!["Kokouspalkkio".to_string(), "Luentopalkkio".to_string()],
            },
        )
    }

    /// Returns the configuration metadata.
    pub fn metadata(&self) -> &FundMetadata {
        &self.metadata
    }

    /// Returns the statutory allowance constants.
    pub fn rates(&self) -> &AllowanceRates {
        &self.rates
    }

    /// Returns the step-down thresholds, sorted by `from_day` ascending.
    pub fn steps(&self) -> &[StepThreshold] {
        &self.steps
    }

    /// Returns the documented defaults.
    pub fn defaults(&self) -> &EngineDefaults {
        &self.defaults
    }

    /// Checks whether an income type is in the excluded set.
    ///
    /// Matching is case-insensitive; registry extracts are inconsistent about
    /// capitalization.
    pub fn is_excluded_income_type(&self, income_type: &str) -> bool {
        self.excluded_income_types
            .excluded
            .iter()
            .any(|t| t.eq_ignore_ascii_case(income_type))
    }
}

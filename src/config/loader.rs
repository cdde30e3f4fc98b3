//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the engine's
//! calculation constants from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{
    EngineConfig, ExcludedIncomeTypes, FundMetadata, RatesConfig, StepsConfig,
};

/// Loads and provides access to the engine configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory and
/// provides access to the aggregated [`EngineConfig`].
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/ansioturva/
/// ├── fund.yaml          # Configuration metadata
/// ├── rates.yaml         # Allowance constants and documented defaults
/// ├── steps.yaml         # Step-down thresholds
/// └── income_types.yaml  # Excluded (non-benefit-affecting) income types
/// ```
///
/// # Example
///
/// ```no_run
/// use benefit_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/ansioturva").unwrap();
/// println!("Daily base: {}", loader.config().rates().daily_base);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/ansioturva")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if any
    /// required file is missing or contains invalid YAML.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use benefit_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/ansioturva")?;
    /// # Ok::<(), benefit_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<FundMetadata>(&path.join("fund.yaml"))?;
        let rates_config = Self::load_yaml::<RatesConfig>(&path.join("rates.yaml"))?;
        let steps_config = Self::load_yaml::<StepsConfig>(&path.join("steps.yaml"))?;
        let excluded =
            Self::load_yaml::<ExcludedIncomeTypes>(&path.join("income_types.yaml"))?;

        let config = EngineConfig::new(
            metadata,
            rates_config.rates,
            steps_config.steps,
            rates_config.defaults,
            excluded,
        );

        Ok(Self { config })
    }

    /// Wraps an already-constructed configuration, bypassing file I/O.
    pub fn from_config(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the configuration metadata.
    pub fn metadata(&self) -> &FundMetadata {
        self.config.metadata()
    }
}

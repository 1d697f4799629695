//! Economy configuration with documented constants
//!
//! Tuning knobs that are not part of the goods/facility data live here.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{EconError, Result};
use crate::core::types::LaborCategory;

/// Configuration for the economy systems
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyConfig {
    /// Days between summary events on the event log
    ///
    /// Both tick systems count their own invocations and emit a summary
    /// whenever the count is a multiple of this value.
    pub summary_interval_days: u64,

    /// Share of a county's population that is part of the labor force
    pub labor_participation: f64,

    /// Share of the labor force in the unskilled category
    ///
    /// The remainder is skilled. Kept as a single number so the split can
    /// never sum past the labor force.
    pub unskilled_share: f64,

    /// Capacity applied to every stockpile entry, `None` for unbounded
    pub stockpile_capacity: Option<f64>,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            summary_interval_days: 30,
            labor_participation: 0.6,
            unskilled_share: 0.75,
            stockpile_capacity: None,
        }
    }
}

impl EconomyConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a config from a TOML file; missing keys take their defaults
    pub fn load_from_toml(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: EconomyConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.summary_interval_days == 0 {
            return Err(EconError::InvalidConfig(
                "summary_interval_days must be at least 1".into(),
            ));
        }

        if !(0.0..=1.0).contains(&self.labor_participation) {
            return Err(EconError::InvalidConfig(format!(
                "labor_participation ({}) must be within 0.0..=1.0",
                self.labor_participation
            )));
        }

        if !(0.0..=1.0).contains(&self.unskilled_share) {
            return Err(EconError::InvalidConfig(format!(
                "unskilled_share ({}) must be within 0.0..=1.0",
                self.unskilled_share
            )));
        }

        if let Some(capacity) = self.stockpile_capacity {
            if capacity.is_nan() || capacity <= 0.0 {
                return Err(EconError::InvalidConfig(format!(
                    "stockpile_capacity ({}) must be positive",
                    capacity
                )));
            }
        }

        Ok(())
    }

    /// Split a population into per-category worker totals
    ///
    /// Rounds down; a county never has more workers than people.
    pub fn labor_force(&self, population: u32) -> [(LaborCategory, u32); 2] {
        let force = (population as f64 * self.labor_participation).floor();
        let unskilled = (force * self.unskilled_share).floor();
        let skilled = force - unskilled;
        [
            (LaborCategory::Unskilled, unskilled as u32),
            (LaborCategory::Skilled, skilled as u32),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(EconomyConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_summary_interval_rejected() {
        let config = EconomyConfig {
            summary_interval_days: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(EconError::InvalidConfig(_))));
    }

    #[test]
    fn test_parse_partial_toml_uses_defaults() {
        let config = EconomyConfig::parse_toml("labor_participation = 0.5\n").unwrap();
        assert!((config.labor_participation - 0.5).abs() < 1e-9);
        assert_eq!(config.summary_interval_days, 30);
        assert!(config.stockpile_capacity.is_none());
    }

    #[test]
    fn test_parse_toml_rejects_bad_share() {
        let result = EconomyConfig::parse_toml("unskilled_share = 1.5\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_labor_force_split() {
        let config = EconomyConfig::default();
        // 1000 * 0.6 = 600 workers; 450 unskilled, 150 skilled
        let force = config.labor_force(1000);
        assert_eq!(force[0], (LaborCategory::Unskilled, 450));
        assert_eq!(force[1], (LaborCategory::Skilled, 150));
    }

    #[test]
    fn test_labor_force_empty_county() {
        let config = EconomyConfig::default();
        let force = config.labor_force(0);
        assert!(force.iter().all(|(_, n)| *n == 0));
    }
}

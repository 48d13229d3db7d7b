//! Projection parameters.
//!
//! Every field has a default, so a config file only needs the keys it
//! overrides:
//! ```yaml
//! compare_capex: 7500.0
//! cost_escalation_rate: 0.03
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{EngineError, EngineResult};

pub const DEFAULT_ENERGY_ESCALATION_RATE: f64 = 0.02;
pub const DEFAULT_COST_ESCALATION_RATE: f64 = 0.02;
pub const DEFAULT_COMPARE_CAPEX: f64 = 5000.0;
pub const DEFAULT_COMPARE_MAINTENANCE_FACTOR: f64 = 0.85;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Annual growth of energy use, compounded from year 2.
    pub energy_escalation_rate: f64,
    /// Annual growth of energy cost, compounded from year 2.
    pub cost_escalation_rate: f64,
    /// Up-front cost of the compare system, booked in year 1.
    pub compare_capex: f64,
    /// Compare-system maintenance as a fraction of the baseline figure.
    pub compare_maintenance_factor: f64,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            energy_escalation_rate: DEFAULT_ENERGY_ESCALATION_RATE,
            cost_escalation_rate: DEFAULT_COST_ESCALATION_RATE,
            compare_capex: DEFAULT_COMPARE_CAPEX,
            compare_maintenance_factor: DEFAULT_COMPARE_MAINTENANCE_FACTOR,
        }
    }
}

impl ProjectionConfig {
    pub fn validate(&self) -> EngineResult<()> {
        let rates = [
            ("energy_escalation_rate", self.energy_escalation_rate),
            ("cost_escalation_rate", self.cost_escalation_rate),
        ];
        for (field, value) in rates {
            if !value.is_finite() || value <= -1.0 {
                return Err(EngineError::InvalidConfig {
                    field,
                    value,
                    reason: "escalation rate must be finite and greater than -1",
                });
            }
        }

        if !self.compare_capex.is_finite() || self.compare_capex < 0.0 {
            return Err(EngineError::InvalidConfig {
                field: "compare_capex",
                value: self.compare_capex,
                reason: "capital cost must be finite and non-negative",
            });
        }

        if !self.compare_maintenance_factor.is_finite() || self.compare_maintenance_factor < 0.0 {
            return Err(EngineError::InvalidConfig {
                field: "compare_maintenance_factor",
                value: self.compare_maintenance_factor,
                reason: "maintenance factor must be finite and non-negative",
            });
        }

        Ok(())
    }

    pub fn from_yaml_str(content: &str) -> EngineResult<Self> {
        let config: ProjectionConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_yaml(path: &Path) -> EngineResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        ProjectionConfig::default().validate().unwrap();
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let config = ProjectionConfig::from_yaml_str("compare_capex: 7500.0\n").unwrap();
        assert_eq!(config.compare_capex, 7500.0);
        assert_eq!(config.energy_escalation_rate, 0.02);
        assert_eq!(config.compare_maintenance_factor, 0.85);
    }

    #[test]
    fn negative_capex_is_rejected() {
        let err = ProjectionConfig::from_yaml_str("compare_capex: -1.0\n").unwrap_err();
        assert!(err.to_string().contains("compare_capex"));
    }

    #[test]
    fn rate_at_minus_one_is_rejected() {
        let config = ProjectionConfig {
            cost_escalation_rate: -1.0,
            ..ProjectionConfig::default()
        };
        assert!(config.validate().is_err());
    }
}

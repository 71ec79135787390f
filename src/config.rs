//! Calculator configuration

use serde::{Deserialize, Serialize};

use crate::tax::gst::SupplyType;
use crate::utils::DEFAULT_SCALE;

/// Largest number of decimal places accepted for currency output
pub const MAX_SCALE: i64 = 6;

/// Settings shared by every document computed with one calculator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    /// Decides how total tax is split for display (CGST/SGST or IGST)
    pub supply_type: SupplyType,
    /// Decimal places of every currency output
    pub scale: i64,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            supply_type: SupplyType::IntraState,
            scale: DEFAULT_SCALE,
        }
    }
}

impl CalculatorConfig {
    /// Config for inter-state documents with the default scale
    pub fn inter_state() -> Self {
        Self {
            supply_type: SupplyType::InterState,
            ..Self::default()
        }
    }

    /// Load a config from JSON; missing keys take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0..=MAX_SCALE).contains(&self.scale) {
            return Err(ConfigError::InvalidScale(self.scale));
        }
        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Scale must be between 0 and {MAX_SCALE}, got {0}")]
    InvalidScale(i64),
}

//! Conversation controller configuration

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Agent configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Accepted answers for the period length question (days, inclusive)
    #[serde(default)]
    pub period_days: DayRange,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            period_days: DayRange::default(),
        }
    }
}

impl AgentConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.period_days.validate("agent.period_days")
    }
}

/// Inclusive range of day counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRange {
    #[serde(default = "default_min_days")]
    pub min: u32,
    #[serde(default = "default_max_days")]
    pub max: u32,
}

fn default_min_days() -> u32 {
    1
}
fn default_max_days() -> u32 {
    30
}

impl Default for DayRange {
    fn default() -> Self {
        Self {
            min: default_min_days(),
            max: default_max_days(),
        }
    }
}

impl DayRange {
    pub fn contains(&self, days: u32) -> bool {
        (self.min..=self.max).contains(&days)
    }

    fn validate(&self, field: &str) -> Result<(), ConfigError> {
        if self.min > self.max {
            return Err(ConfigError::invalid(
                field,
                format!("min ({}) must not exceed max ({})", self.min, self.max),
            ));
        }
        Ok(())
    }
}

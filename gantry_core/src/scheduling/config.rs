//! Scheduler configuration, loadable from TOML.

use serde::{Deserialize, Serialize};

use crate::error::{GantryError, GantryResult};

/// Timing parameters for the tick loop
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Global tick rate in Hz. Nodes without a per-node rate tick at this rate.
    pub global_rate_hz: f64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            global_rate_hz: 10.0,
        }
    }
}

/// Scheduler configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchedulerConfig {
    #[serde(default)]
    pub timing: TimingConfig,
}

impl SchedulerConfig {
    /// Standard control-loop configuration: 10 Hz global rate.
    pub fn standard() -> Self {
        Self::default()
    }

    /// Higher-rate preset for fast sensor loops.
    pub fn high_rate() -> Self {
        Self {
            timing: TimingConfig {
                global_rate_hz: 100.0,
            },
        }
    }

    /// Build a configuration with an explicit global rate.
    pub fn with_rate_hz(rate_hz: f64) -> GantryResult<Self> {
        let config = Self {
            timing: TimingConfig {
                global_rate_hz: rate_hz,
            },
        };
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a TOML file.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> GantryResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)
            .map_err(|e| GantryError::config(format!("failed to parse scheduler config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> GantryResult<()> {
        if !self.timing.global_rate_hz.is_finite() || self.timing.global_rate_hz <= 0.0 {
            return Err(GantryError::config(format!(
                "global_rate_hz must be positive, got {}",
                self.timing.global_rate_hz
            )));
        }
        Ok(())
    }

    /// The tick period implied by the global rate.
    pub fn tick_period(&self) -> std::time::Duration {
        std::time::Duration::from_secs_f64(1.0 / self.timing.global_rate_hz)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_preset_is_10_hz() {
        let config = SchedulerConfig::standard();
        assert_eq!(config.timing.global_rate_hz, 10.0);
        assert_eq!(config.tick_period(), std::time::Duration::from_millis(100));
    }

    #[test]
    fn parses_from_toml() {
        let config: SchedulerConfig = toml::from_str(
            r#"
            [timing]
            global_rate_hz = 50.0
            "#,
        )
        .unwrap();
        assert_eq!(config.timing.global_rate_hz, 50.0);
    }

    #[test]
    fn missing_timing_section_uses_default() {
        let config: SchedulerConfig = toml::from_str("").unwrap();
        assert_eq!(config.timing.global_rate_hz, 10.0);
    }

    #[test]
    fn rejects_nonpositive_rate() {
        assert!(SchedulerConfig::with_rate_hz(0.0).is_err());
        assert!(SchedulerConfig::with_rate_hz(-5.0).is_err());
        assert!(SchedulerConfig::with_rate_hz(25.0).is_ok());
    }
}

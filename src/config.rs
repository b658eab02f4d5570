use serde::Deserialize;
use thiserror::Error;

/// Smallest temperature step a cell records (°C).
pub const TEMPERATURE_RESOLUTION_C: f64 = 0.1;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse dashboard config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("max_cells must be at least 1")]
    NoCells,
    #[error("{name} range is empty: [{low}, {high})")]
    EmptyRange {
        name: &'static str,
        low: f64,
        high: f64,
    },
    #[error("{name} range [{low}, {high}) must be finite and at least {min_width} wide")]
    BadRange {
        name: &'static str,
        low: f64,
        high: f64,
        min_width: f64,
    },
    #[error("{name} must be positive, got {value}")]
    NotPositive { name: &'static str, value: f64 },
}

/// Dashboard limits and display scales.
///
/// Every overridable field has a default, so a config file only needs to name
/// the values it overrides. Unknown keys are rejected.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    /// Maximum number of cells one session may hold. Fixed at 8; not read from
    /// config files.
    #[serde(skip)]
    pub max_cells: usize,
    /// Half-open range `[low, high)` the creation temperature is drawn from (°C).
    pub temperature_range_c: (f64, f64),
    /// Closed range accepted for a cell's current (A).
    pub current_range_a: (f64, f64),
    /// Increment used by current inputs (A).
    pub current_step_a: f64,
    /// Capacity shown as a full battery-level bar (Ah). Fixed at 10; not read
    /// from config files.
    #[serde(skip)]
    pub full_level_capacity_ah: f64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            max_cells: 8,
            temperature_range_c: (25.0, 40.0),
            current_range_a: (0.0, 100.0),
            current_step_a: 0.1,
            full_level_capacity_ah: 10.0,
        }
    }
}

impl DashboardConfig {
    /// Parse and validate a JSON config document.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: DashboardConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_cells == 0 {
            return Err(ConfigError::NoCells);
        }
        let (low, high) = self.temperature_range_c;
        if !(low < high) {
            return Err(ConfigError::EmptyRange {
                name: "temperature_range_c",
                low,
                high,
            });
        }
        // every sample is rounded to the resolution, so the range must hold one such value
        if !low.is_finite() || !high.is_finite() || !((high - low) >= TEMPERATURE_RESOLUTION_C) {
            return Err(ConfigError::BadRange {
                name: "temperature_range_c",
                low,
                high,
                min_width: TEMPERATURE_RESOLUTION_C,
            });
        }
        let (low, high) = self.current_range_a;
        if !(low <= high) {
            return Err(ConfigError::EmptyRange {
                name: "current_range_a",
                low,
                high,
            });
        }
        if !low.is_finite() || !high.is_finite() {
            return Err(ConfigError::BadRange {
                name: "current_range_a",
                low,
                high,
                min_width: 0.0,
            });
        }
        if !(self.current_step_a > 0.0) {
            return Err(ConfigError::NotPositive {
                name: "current_step_a",
                value: self.current_step_a,
            });
        }
        if !(self.full_level_capacity_ah > 0.0) {
            return Err(ConfigError::NotPositive {
                name: "full_level_capacity_ah",
                value: self.full_level_capacity_ah,
            });
        }
        Ok(())
    }

    /// The current a cell would actually hold for `raw`: clamped into
    /// `current_range_a`, or `None` for NaN.
    pub fn clamp_current(&self, raw: f64) -> Option<f64> {
        if raw.is_nan() {
            return None;
        }
        let (low, high) = self.current_range_a;
        Some(raw.clamp(low, high))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_dashboard_constants() {
        let config = DashboardConfig::default();
        assert_eq!(config.max_cells, 8);
        assert_eq!(config.full_level_capacity_ah, 10.0);
        assert_eq!(config.temperature_range_c, (25.0, 40.0));
        assert_eq!(config.current_range_a, (0.0, 100.0));
        assert!(config.validate().is_ok(), "Defaults should validate");
    }

    #[test]
    fn test_partial_json_keeps_other_defaults() {
        let config = DashboardConfig::from_json(r#"{ "current_step_a": 0.5 }"#).unwrap();
        assert_eq!(config.current_step_a, 0.5);
        assert_eq!(config.max_cells, 8);
        assert_eq!(config.full_level_capacity_ah, 10.0);
    }

    #[test]
    fn test_fixed_fields_cannot_be_overridden() {
        assert!(matches!(
            DashboardConfig::from_json(r#"{ "max_cells": 4 }"#),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            DashboardConfig::from_json(r#"{ "full_level_capacity_ah": 20.0 }"#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_invalid_configs_are_rejected() {
        let zero_cells = DashboardConfig {
            max_cells: 0,
            ..DashboardConfig::default()
        };
        assert!(matches!(zero_cells.validate(), Err(ConfigError::NoCells)));
        assert!(matches!(
            DashboardConfig::from_json(r#"{ "temperature_range_c": [40.0, 25.0] }"#),
            Err(ConfigError::EmptyRange { .. })
        ));
        assert!(matches!(
            DashboardConfig::from_json(r#"{ "temperature_range_c": [-1e308, 1e308] }"#),
            Err(ConfigError::BadRange { .. })
        ));
        assert!(matches!(
            DashboardConfig::from_json(r#"{ "temperature_range_c": [25.02, 25.08] }"#),
            Err(ConfigError::BadRange { .. })
        ));
        assert!(matches!(
            DashboardConfig::from_json(r#"{ "current_range_a": [0.0, 1e309] }"#),
            Err(ConfigError::Parse(_)) | Err(ConfigError::BadRange { .. })
        ));
        assert!(matches!(
            DashboardConfig::from_json(r#"{ "current_step_a": 0.0 }"#),
            Err(ConfigError::NotPositive { .. })
        ));
        assert!(matches!(
            DashboardConfig::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_clamp_current() {
        let config = DashboardConfig::default();
        assert_eq!(config.clamp_current(-5.0), Some(0.0));
        assert_eq!(config.clamp_current(250.0), Some(100.0));
        assert_eq!(config.clamp_current(12.5), Some(12.5));
        assert_eq!(config.clamp_current(f64::NAN), None);
    }
}

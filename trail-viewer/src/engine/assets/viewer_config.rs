use std::fmt;

use bevy::prelude::*;
use constants::controls::{LOOK_SENSITIVITY, MOVE_ACCELERATION, MOVE_DAMPING};
use constants::recording::{
    DEFAULT_SAMPLE_RATE_MS, RATE_TOAST_DURATION_MS, SAMPLE_RATE_MAX_MS, SAMPLE_RATE_MIN_MS,
    SAMPLE_RATE_STEP_MS, TOAST_DURATION_MS,
};
use serde::{Deserialize, Serialize};

/// Requested control scheme. `Auto` follows the WebXR support probe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlPreference {
    #[default]
    Auto,
    Desktop,
    Xr,
}

/// Runtime tuning loaded from `viewer_config.json`. Missing fields take their defaults.
#[derive(Asset, TypePath, Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub default_sample_rate_ms: u32,
    pub sample_rate_step_ms: u32,
    pub move_acceleration: f32,
    pub move_damping: f32,
    pub look_sensitivity: f32,
    pub control_mode: ControlPreference,
    pub toast_duration_ms: u64,
    pub rate_toast_duration_ms: u64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            default_sample_rate_ms: DEFAULT_SAMPLE_RATE_MS,
            sample_rate_step_ms: SAMPLE_RATE_STEP_MS,
            move_acceleration: MOVE_ACCELERATION,
            move_damping: MOVE_DAMPING,
            look_sensitivity: LOOK_SENSITIVITY,
            control_mode: ControlPreference::Auto,
            toast_duration_ms: TOAST_DURATION_MS,
            rate_toast_duration_ms: RATE_TOAST_DURATION_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    SampleRateOutOfRange(u32),
    ZeroSampleRateStep,
    NotPositive { field: &'static str, value: f32 },
    ZeroDuration { field: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::SampleRateOutOfRange(ms) => write!(
                f,
                "default_sample_rate_ms {}ms is outside [{}, {}]",
                ms, SAMPLE_RATE_MIN_MS, SAMPLE_RATE_MAX_MS
            ),
            ConfigError::ZeroSampleRateStep => write!(f, "sample_rate_step_ms must be above 0"),
            ConfigError::NotPositive { field, value } => {
                write!(f, "{} must be a finite positive number, got {}", field, value)
            }
            ConfigError::ZeroDuration { field } => write!(f, "{} must be above 0", field),
        }
    }
}

impl std::error::Error for ConfigError {}

fn positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

impl ViewerConfig {
    /// Repair invalid fields. Out-of-range sample rates are clamped,
    /// everything else falls back to its default. Each repair is reported.
    pub fn validated(mut self) -> (Self, Vec<ConfigError>) {
        let defaults = Self::default();
        let mut errors = Vec::new();

        if !(SAMPLE_RATE_MIN_MS..=SAMPLE_RATE_MAX_MS).contains(&self.default_sample_rate_ms) {
            errors.push(ConfigError::SampleRateOutOfRange(self.default_sample_rate_ms));
            self.default_sample_rate_ms = self
                .default_sample_rate_ms
                .clamp(SAMPLE_RATE_MIN_MS, SAMPLE_RATE_MAX_MS);
        }

        if self.sample_rate_step_ms == 0 {
            errors.push(ConfigError::ZeroSampleRateStep);
            self.sample_rate_step_ms = defaults.sample_rate_step_ms;
        }

        for (field, value, fallback) in [
            (
                "move_acceleration",
                &mut self.move_acceleration,
                defaults.move_acceleration,
            ),
            ("move_damping", &mut self.move_damping, defaults.move_damping),
            (
                "look_sensitivity",
                &mut self.look_sensitivity,
                defaults.look_sensitivity,
            ),
        ] {
            if !positive(*value) {
                errors.push(ConfigError::NotPositive {
                    field,
                    value: *value,
                });
                *value = fallback;
            }
        }

        for (field, value, fallback) in [
            (
                "toast_duration_ms",
                &mut self.toast_duration_ms,
                defaults.toast_duration_ms,
            ),
            (
                "rate_toast_duration_ms",
                &mut self.rate_toast_duration_ms,
                defaults.rate_toast_duration_ms,
            ),
        ] {
            if *value == 0 {
                errors.push(ConfigError::ZeroDuration { field });
                *value = fallback;
            }
        }

        (self, errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shipped_config_parses_to_defaults() {
        let json = include_str!("../../../assets/viewer_config.json");
        let config: ViewerConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config, ViewerConfig::default());
    }

    #[test]
    fn missing_fields_take_defaults() {
        let config: ViewerConfig =
            serde_json::from_str(r#"{ "control_mode": "desktop" }"#).unwrap();
        assert_eq!(config.control_mode, ControlPreference::Desktop);
        assert_eq!(config.default_sample_rate_ms, DEFAULT_SAMPLE_RATE_MS);
    }

    #[test]
    fn valid_config_has_no_errors() {
        let (config, errors) = ViewerConfig::default().validated();
        assert!(errors.is_empty());
        assert_eq!(config, ViewerConfig::default());
    }

    #[test]
    fn out_of_range_sample_rate_is_clamped() {
        let config = ViewerConfig {
            default_sample_rate_ms: 5000,
            ..default()
        };
        let (config, errors) = config.validated();

        assert_eq!(config.default_sample_rate_ms, SAMPLE_RATE_MAX_MS);
        assert_eq!(errors, vec![ConfigError::SampleRateOutOfRange(5000)]);
        assert_eq!(
            errors[0].to_string(),
            "default_sample_rate_ms 5000ms is outside [50, 1000]"
        );
    }

    #[test]
    fn invalid_tuning_falls_back_to_defaults() {
        let config = ViewerConfig {
            sample_rate_step_ms: 0,
            move_damping: -1.0,
            look_sensitivity: f32::NAN,
            toast_duration_ms: 0,
            ..default()
        };
        let (config, errors) = config.validated();

        assert_eq!(errors.len(), 4);
        assert_eq!(config.sample_rate_step_ms, SAMPLE_RATE_STEP_MS);
        assert_eq!(config.move_damping, MOVE_DAMPING);
        assert_eq!(config.look_sensitivity, LOOK_SENSITIVITY);
        assert_eq!(config.toast_duration_ms, TOAST_DURATION_MS);
    }
}

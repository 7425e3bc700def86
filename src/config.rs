//! TOML-based simulator settings.

use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;

use chrono::{NaiveDateTime, NaiveTime};
use serde::Deserialize;

use crate::sim::clock::WorkingHours;
use crate::sim::engine::EngineSettings;

/// Format of the `start_time` setting.
const START_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
/// Format of the working-hours bounds.
const HOURS_FORMAT: &str = "%H:%M";

/// Top-level simulator settings parsed from TOML.
///
/// All fields have defaults matching the standard scenario. Load from TOML
/// with [`Settings::from_toml_file`] or use [`Settings::default`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Tick cadence and clock parameters.
    pub simulation: SimulationSettings,
    /// Daily activity window.
    pub working_hours: WorkingHoursSettings,
    /// HVAC policy parameters.
    pub hvac: HvacSettings,
}

/// Tick cadence and clock parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationSettings {
    /// Real-time milliseconds between ticks (must be > 0).
    pub tick_period_ms: u64,
    /// Simulated minutes the clock advances per tick (must be > 0).
    pub minutes_per_tick: u32,
    /// Random seed; omit for a fresh seed per run.
    pub seed: Option<u64>,
    /// Virtual clock start, `YYYY-MM-DDTHH:MM:SS`.
    pub start_time: String,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            tick_period_ms: 10_000,
            minutes_per_tick: 1,
            seed: None,
            start_time: "2024-01-01T00:00:00".to_string(),
        }
    }
}

/// Daily activity window bounds, `HH:MM`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorkingHoursSettings {
    /// Window start (exclusive).
    pub start: String,
    /// Window end (exclusive).
    pub end: String,
}

impl Default for WorkingHoursSettings {
    fn default() -> Self {
        Self {
            start: "08:00".to_string(),
            end: "18:00".to_string(),
        }
    }
}

/// HVAC policy parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HvacSettings {
    /// Comfort setpoint in degrees Celsius.
    pub target_temp_c: f64,
}

impl Default for HvacSettings {
    fn default() -> Self {
        Self { target_temp_c: 22.0 }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"simulation.tick_period_ms"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {}: {}", self.field, self.message)
    }
}

fn parse_start_time(value: &str) -> Result<NaiveDateTime, ConfigError> {
    NaiveDateTime::parse_from_str(value, START_TIME_FORMAT).map_err(|e| ConfigError {
        field: "simulation.start_time".into(),
        message: format!("invalid timestamp \"{value}\" (expected {START_TIME_FORMAT}): {e}"),
    })
}

fn parse_hours_bound(field: &str, value: &str) -> Result<NaiveTime, ConfigError> {
    NaiveTime::parse_from_str(value, HOURS_FORMAT).map_err(|e| ConfigError {
        field: field.into(),
        message: format!("invalid time \"{value}\" (expected {HOURS_FORMAT}): {e}"),
    })
}

impl Settings {
    /// Parses settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "config".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses settings from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let s = &self.simulation;
        if s.tick_period_ms == 0 {
            errors.push(ConfigError {
                field: "simulation.tick_period_ms".into(),
                message: "must be > 0".into(),
            });
        }
        if s.minutes_per_tick == 0 {
            errors.push(ConfigError {
                field: "simulation.minutes_per_tick".into(),
                message: "must be > 0".into(),
            });
        }
        if let Err(e) = parse_start_time(&s.start_time) {
            errors.push(e);
        }

        let wh = &self.working_hours;
        let start = parse_hours_bound("working_hours.start", &wh.start);
        let end = parse_hours_bound("working_hours.end", &wh.end);
        match (start, end) {
            (Ok(start), Ok(end)) => {
                if start >= end {
                    errors.push(ConfigError {
                        field: "working_hours.start".into(),
                        message: "must be before working_hours.end".into(),
                    });
                }
            }
            (a, b) => {
                errors.extend(a.err());
                errors.extend(b.err());
            }
        }

        if !self.hvac.target_temp_c.is_finite() {
            errors.push(ConfigError {
                field: "hvac.target_temp_c".into(),
                message: "must be a finite number".into(),
            });
        }

        errors
    }

    /// Converts the parsed settings into the typed engine form.
    ///
    /// # Errors
    ///
    /// Returns the first `ConfigError` a field fails with; call
    /// [`Settings::validate`] for the full list.
    pub fn engine_settings(&self) -> Result<EngineSettings, ConfigError> {
        let start_time = parse_start_time(&self.simulation.start_time)?;
        let start = parse_hours_bound("working_hours.start", &self.working_hours.start)?;
        let end = parse_hours_bound("working_hours.end", &self.working_hours.end)?;
        if start >= end {
            return Err(ConfigError {
                field: "working_hours.start".into(),
                message: "must be before working_hours.end".into(),
            });
        }
        if self.simulation.minutes_per_tick == 0 {
            return Err(ConfigError {
                field: "simulation.minutes_per_tick".into(),
                message: "must be > 0".into(),
            });
        }

        Ok(EngineSettings {
            start_time,
            minutes_per_tick: self.simulation.minutes_per_tick,
            working_hours: WorkingHours::new(start, end),
            hvac_setpoint_c: self.hvac.target_temp_c,
            seed: self.simulation.seed,
        })
    }

    /// Returns the real-time tick period.
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.simulation.tick_period_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let settings = Settings::default();
        let errors = settings.validate();
        assert!(errors.is_empty(), "defaults should be valid: {errors:?}");
        assert_eq!(settings.tick_period(), Duration::from_secs(10));
    }

    #[test]
    fn default_engine_settings_carry_the_documented_defaults() {
        let engine = Settings::default().engine_settings().expect("valid defaults");
        assert_eq!(engine.minutes_per_tick, 1);
        assert_eq!(engine.hvac_setpoint_c, 22.0);
        assert_eq!(engine.seed, None);
        assert_eq!(
            engine.start_time.format("%Y-%m-%dT%H:%M:%S").to_string(),
            "2024-01-01T00:00:00"
        );
        let hours = engine.working_hours;
        assert!(!hours.contains(NaiveTime::from_hms_opt(8, 0, 0).expect("valid time")));
        assert!(hours.contains(NaiveTime::from_hms_opt(12, 0, 0).expect("valid time")));
    }

    #[test]
    fn valid_toml_parses() {
        let toml = r#"
[simulation]
tick_period_ms = 500
minutes_per_tick = 5
seed = 99
start_time = "2024-06-03T07:30:00"

[working_hours]
start = "06:00"
end = "14:00"

[hvac]
target_temp_c = 21.5
"#;
        let settings = Settings::from_toml_str(toml).expect("valid TOML should parse");
        assert!(settings.validate().is_empty());
        assert_eq!(settings.simulation.tick_period_ms, 500);
        assert_eq!(settings.simulation.seed, Some(99));

        let engine = settings.engine_settings().expect("convertible");
        assert_eq!(engine.minutes_per_tick, 5);
        assert_eq!(engine.hvac_setpoint_c, 21.5);
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let toml = r#"
[simulation]
seed = 7
"#;
        let settings = Settings::from_toml_str(toml).expect("valid TOML should parse");
        assert_eq!(settings.simulation.seed, Some(7));
        assert_eq!(settings.simulation.tick_period_ms, 10_000);
        assert_eq!(settings.working_hours.start, "08:00");
        assert_eq!(settings.hvac.target_temp_c, 22.0);
    }

    #[test]
    fn unknown_field_is_rejected() {
        let toml = r#"
[simulation]
bogus_field = true
"#;
        assert!(Settings::from_toml_str(toml).is_err());
    }

    #[test]
    fn validation_catches_zero_tick_period() {
        let mut settings = Settings::default();
        settings.simulation.tick_period_ms = 0;
        let errors = settings.validate();
        assert!(
            errors
                .iter()
                .any(|e| e.field == "simulation.tick_period_ms")
        );
    }

    #[test]
    fn validation_catches_zero_minutes_per_tick() {
        let mut settings = Settings::default();
        settings.simulation.minutes_per_tick = 0;
        let errors = settings.validate();
        assert!(
            errors
                .iter()
                .any(|e| e.field == "simulation.minutes_per_tick")
        );
        assert!(settings.engine_settings().is_err());
    }

    #[test]
    fn validation_catches_inverted_working_hours() {
        let mut settings = Settings::default();
        settings.working_hours.start = "19:00".to_string();
        let errors = settings.validate();
        assert!(errors.iter().any(|e| e.field == "working_hours.start"));
    }

    #[test]
    fn validation_catches_unparseable_times() {
        let mut settings = Settings::default();
        settings.simulation.start_time = "yesterday".to_string();
        settings.working_hours.end = "6 pm".to_string();
        let errors = settings.validate();
        assert!(errors.iter().any(|e| e.field == "simulation.start_time"));
        assert!(errors.iter().any(|e| e.field == "working_hours.end"));
    }

    #[test]
    fn validation_catches_non_finite_setpoint() {
        let mut settings = Settings::default();
        settings.hvac.target_temp_c = f64::NAN;
        let errors = settings.validate();
        assert!(errors.iter().any(|e| e.field == "hvac.target_temp_c"));
    }

    #[test]
    fn error_display_carries_field_path() {
        let err = ConfigError {
            field: "simulation.tick_period_ms".into(),
            message: "must be > 0".into(),
        };
        let text = format!("{err}");
        assert!(text.contains("simulation.tick_period_ms"));
        assert!(text.contains("must be > 0"));
    }
}

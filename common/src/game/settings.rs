use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::Validate;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// Side length of one cell in board units.
    pub snake_width: f64,
    /// Tick period in seconds.
    pub refresh_rate: f64,
    /// Play time in seconds; `0` means unlimited.
    pub time_limit: f64,
    pub prepare_food: bool,
    pub pause_interval: f64,
    pub start_delay: f64,
    pub max_food_attempts: u32,
    pub seed: Option<u64>,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            snake_width: 25.0,
            refresh_rate: 0.25,
            time_limit: 60.0,
            prepare_food: true,
            pause_interval: 1.0,
            start_delay: 1.0,
            max_food_attempts: 10_000,
            seed: None,
        }
    }
}

impl GameSettings {
    pub fn refresh_interval(&self) -> Duration {
        seconds(self.refresh_rate)
    }

    pub fn pause_wait(&self) -> Duration {
        seconds(self.pause_interval)
    }

    pub fn start_wait(&self) -> Duration {
        seconds(self.start_delay)
    }

    /// Number of ticks that fit in the time limit, or `None` when unlimited.
    /// The tick count ignores time spent inside a tick.
    pub fn total_ticks(&self) -> Option<u64> {
        if self.time_limit <= 0.0 {
            return None;
        }
        let ticks = (self.time_limit / self.refresh_rate + 1e-9).floor() as u64;
        Some(ticks.max(1))
    }
}

/// Saturates instead of panicking on settings that skipped validation.
fn seconds(value: f64) -> Duration {
    if value.is_nan() || value <= 0.0 {
        return Duration::ZERO;
    }
    Duration::try_from_secs_f64(value).unwrap_or(Duration::MAX)
}

fn representable(name: &str, value: f64) -> Result<(), String> {
    Duration::try_from_secs_f64(value)
        .map(|_| ())
        .map_err(|_| format!("{} is out of range, got {}", name, value))
}

fn positive(name: &str, value: f64) -> Result<(), String> {
    if !value.is_finite() || value <= 0.0 {
        return Err(format!("{} must be a positive number, got {}", name, value));
    }
    Ok(())
}

fn non_negative(name: &str, value: f64) -> Result<(), String> {
    if !value.is_finite() || value < 0.0 {
        return Err(format!("{} must not be negative, got {}", name, value));
    }
    Ok(())
}

impl Validate for GameSettings {
    fn validate(&self) -> Result<(), String> {
        positive("snake_width", self.snake_width)?;
        positive("refresh_rate", self.refresh_rate)?;
        representable("refresh_rate", self.refresh_rate)?;
        non_negative("time_limit", self.time_limit)?;
        positive("pause_interval", self.pause_interval)?;
        representable("pause_interval", self.pause_interval)?;
        non_negative("start_delay", self.start_delay)?;
        representable("start_delay", self.start_delay)?;
        if self.max_food_attempts == 0 {
            return Err("max_food_attempts must be at least 1".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        let settings = GameSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.total_ticks(), Some(240));
        assert_eq!(settings.refresh_interval(), Duration::from_millis(250));
    }

    #[test]
    fn test_non_positive_width_and_rate_rejected() {
        let settings = GameSettings {
            snake_width: 0.0,
            ..GameSettings::default()
        };
        assert!(settings.validate().is_err());

        let settings = GameSettings {
            refresh_rate: -0.5,
            ..GameSettings::default()
        };
        assert!(settings.validate().is_err());

        let settings = GameSettings {
            refresh_rate: f64::NAN,
            ..GameSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_zero_pause_interval_rejected() {
        let settings = GameSettings {
            pause_interval: 0.0,
            ..GameSettings::default()
        };
        assert!(settings.validate().is_err());

        let settings = GameSettings {
            pause_interval: 0.001,
            ..GameSettings::default()
        };
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_durations_too_large_for_timers_rejected() {
        let settings = GameSettings {
            refresh_rate: 1e30,
            ..GameSettings::default()
        };
        assert!(settings.validate().is_err());
        assert_eq!(settings.refresh_interval(), Duration::MAX);

        let settings = GameSettings {
            start_delay: 1e30,
            ..GameSettings::default()
        };
        assert!(settings.validate().is_err());

        let settings = GameSettings {
            pause_interval: -1.0,
            ..GameSettings::default()
        };
        assert_eq!(settings.pause_wait(), Duration::ZERO);
    }

    #[test]
    fn test_total_ticks() {
        let settings = GameSettings {
            time_limit: 2.0,
            refresh_rate: 0.5,
            ..GameSettings::default()
        };
        assert_eq!(settings.total_ticks(), Some(4));

        let settings = GameSettings {
            time_limit: 0.3,
            refresh_rate: 0.1,
            ..GameSettings::default()
        };
        assert_eq!(settings.total_ticks(), Some(3));

        let settings = GameSettings {
            time_limit: 0.1,
            refresh_rate: 1.0,
            ..GameSettings::default()
        };
        assert_eq!(settings.total_ticks(), Some(1));

        let settings = GameSettings {
            time_limit: 0.0,
            ..GameSettings::default()
        };
        assert_eq!(settings.total_ticks(), None);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let settings: GameSettings =
            serde_yaml_ng::from_str("snake_width: 10\nprepare_food: false\n").unwrap();
        assert_eq!(settings.snake_width, 10.0);
        assert!(!settings.prepare_food);
        assert_eq!(settings.refresh_rate, 0.25);
        assert_eq!(settings.seed, None);
    }
}

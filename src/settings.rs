//! Game settings
//!
//! Every tunable the simulation consumes. Loaded from a JSON file on the
//! native side; any field left out falls back to its default.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::ShipVariant;

/// Errors raised while loading or validating settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Playfield ===
    pub playfield_width: f32,
    pub playfield_height: f32,

    // === Ship ===
    pub ship_width: f32,
    pub ship_height: f32,
    /// Pixels per tick along each held direction
    pub ship_speed: f32,
    pub ship_variant: ShipVariant,

    // === Bullets ===
    pub bullet_width: f32,
    pub bullet_height: f32,
    /// Upward pixels per tick
    pub bullet_speed: f32,
    /// Maximum bullets in flight; further fire commands are dropped
    pub bullets_allowed: usize,

    // === Fleet ===
    pub alien_width: f32,
    pub alien_height: f32,
    /// Horizontal pixels per tick
    pub alien_speed: f32,
    /// Grid pitch as a multiple of alien size
    pub fleet_spacing: f32,
    pub fleet_drop: f32,

    // === Session ===
    pub starting_lives: u32,
    pub points_per_alien: u64,
    /// Ticks of ship-alien immunity after a round reset
    pub grace_ticks: u32,
    pub tick_rate_hz: u32,
    /// Seed for cosmetic randomness (alien variants)
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            playfield_width: PLAYFIELD_WIDTH,
            playfield_height: PLAYFIELD_HEIGHT,

            ship_width: SHIP_WIDTH,
            ship_height: SHIP_HEIGHT,
            ship_speed: SHIP_SPEED,
            ship_variant: ShipVariant::Blue,

            bullet_width: BULLET_WIDTH,
            bullet_height: BULLET_HEIGHT,
            bullet_speed: BULLET_SPEED,
            bullets_allowed: BULLETS_ALLOWED,

            alien_width: ALIEN_WIDTH,
            alien_height: ALIEN_HEIGHT,
            alien_speed: ALIEN_SPEED,
            fleet_spacing: FLEET_SPACING,
            fleet_drop: FLEET_DROP,

            starting_lives: STARTING_LIVES,
            points_per_alien: POINTS_PER_ALIEN,
            grace_ticks: GRACE_TICKS,
            tick_rate_hz: TICK_RATE_HZ,
            seed: 0,
        }
    }
}

impl Settings {
    /// Parse settings from a JSON document and validate them
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Serialize to pretty JSON (for writing a starter config)
    pub fn to_json(&self) -> String {
        // Plain data with no maps keyed by non-strings; serialization cannot fail
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        let positive = [
            ("playfield_width", self.playfield_width),
            ("playfield_height", self.playfield_height),
            ("ship_width", self.ship_width),
            ("ship_height", self.ship_height),
            ("bullet_width", self.bullet_width),
            ("bullet_height", self.bullet_height),
            ("bullet_speed", self.bullet_speed),
            ("alien_width", self.alien_width),
            ("alien_height", self.alien_height),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid(field, format!("must be positive, got {value}")));
            }
        }

        let non_negative = [
            ("ship_speed", self.ship_speed),
            ("alien_speed", self.alien_speed),
            ("fleet_drop", self.fleet_drop),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(invalid(field, format!("must not be negative, got {value}")));
            }
        }

        if !(self.fleet_spacing.is_finite() && self.fleet_spacing >= 1.0) {
            return Err(invalid(
                "fleet_spacing",
                format!("aliens would overlap at spacing {}", self.fleet_spacing),
            ));
        }
        if self.ship_width > self.playfield_width || self.ship_height > self.playfield_height {
            return Err(invalid("ship_width", "ship does not fit the playfield".into()));
        }
        if self.alien_width > self.playfield_width || self.alien_height > self.playfield_height {
            return Err(invalid("alien_width", "alien does not fit the playfield".into()));
        }
        if self.starting_lives == 0 {
            return Err(invalid("starting_lives", "must be at least 1".into()));
        }
        if self.tick_rate_hz == 0 {
            return Err(invalid("tick_rate_hz", "must be at least 1".into()));
        }
        Ok(())
    }

    /// Duration of one tick
    pub fn tick_duration(&self) -> std::time::Duration {
        std::time::Duration::from_secs_f64(1.0 / self.tick_rate_hz.max(1) as f64)
    }
}

fn invalid(field: &'static str, reason: String) -> SettingsError {
    SettingsError::Invalid { field, reason }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let settings = Settings::from_json(r#"{ "playfield_width": 800, "starting_lives": 5 }"#)
            .expect("valid settings");
        assert_eq!(settings.playfield_width, 800.0);
        assert_eq!(settings.starting_lives, 5);
        assert_eq!(settings.playfield_height, PLAYFIELD_HEIGHT);
        assert_eq!(settings.bullets_allowed, BULLETS_ALLOWED);
    }

    #[test]
    fn test_ship_variant_by_name() {
        let settings = Settings::from_json(r#"{ "ship_variant": "Red" }"#).expect("valid settings");
        assert_eq!(settings.ship_variant, ShipVariant::Red);
        assert!(Settings::from_json(r#"{ "ship_variant": "Purple" }"#).is_err());
    }

    #[test]
    fn test_json_roundtrip() {
        let mut settings = Settings::default();
        settings.seed = 42;
        settings.fleet_spacing = 1.5;
        let parsed = Settings::from_json(&settings.to_json()).expect("valid settings");
        assert_eq!(parsed, settings);
    }

    #[test]
    fn test_rejects_zero_lives() {
        let err = Settings::from_json(r#"{ "starting_lives": 0 }"#).unwrap_err();
        assert!(matches!(
            err,
            SettingsError::Invalid {
                field: "starting_lives",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_tight_spacing() {
        let settings = Settings {
            fleet_spacing: 0.5,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_rejects_oversized_alien() {
        let settings = Settings {
            alien_width: 2000.0,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            Settings::from_json("{ not json"),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = Settings::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, SettingsError::Io { .. }));
    }

    #[test]
    fn test_tick_duration() {
        let settings = Settings::default();
        let dt = settings.tick_duration();
        assert!((dt.as_secs_f64() - 1.0 / 60.0).abs() < 1e-9);
    }
}

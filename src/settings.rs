//! Game settings and preferences
//!
//! Loaded from an optional JSON file; every field falls back to its default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::sim::GameConfig;

/// Settings loading errors
#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value is out of range
    #[error("Invalid setting: {0}")]
    Invalid(String),
}

/// Audio preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Background loop volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            master_volume: 0.3,
            sfx_volume: 1.0,
            music_volume: 0.3,
            muted: false,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Starting difficulty; restored on every new game
    pub difficulty: GameConfig,
    pub audio: AudioSettings,
    /// RNG seed. `None` picks one from the clock.
    pub seed: Option<u64>,
    /// Frame limit for headless autopilot runs
    pub demo_frames: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: GameConfig::default(),
            audio: AudioSettings::default(),
            seed: None,
            // Five minutes at 60 Hz
            demo_frames: 5 * 60 * 60,
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&contents)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        let d = &self.difficulty;
        if d.max_lives == 0 {
            return Err(SettingsError::Invalid("max_lives must be at least 1".into()));
        }
        if d.level_up_score == 0 {
            return Err(SettingsError::Invalid(
                "level_up_score must be at least 1".into(),
            ));
        }
        if !d.mouse_spawn_rate_ms.is_finite() || d.mouse_spawn_rate_ms < 0.0 {
            return Err(SettingsError::Invalid(format!(
                "mouse_spawn_rate_ms must be a non-negative number, got {}",
                d.mouse_spawn_rate_ms
            )));
        }
        if !d.mouse_speed.is_finite() || d.mouse_speed < 0.0 {
            return Err(SettingsError::Invalid(format!(
                "mouse_speed must be a non-negative number, got {}",
                d.mouse_speed
            )));
        }
        if !d.mouse_lifespan_ms.is_finite() || d.mouse_lifespan_ms <= 0.0 {
            return Err(SettingsError::Invalid(format!(
                "mouse_lifespan_ms must be positive, got {}",
                d.mouse_lifespan_ms
            )));
        }
        for (name, vol) in [
            ("master_volume", self.audio.master_volume),
            ("sfx_volume", self.audio.sfx_volume),
            ("music_volume", self.audio.music_volume),
        ] {
            if !(0.0..=1.0).contains(&vol) {
                return Err(SettingsError::Invalid(format!(
                    "{name} must be within 0.0 - 1.0, got {vol}"
                )));
            }
        }
        Ok(())
    }

    /// Configured seed, or one derived from the system clock
    pub fn seed_or_clock(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_is_default() {
        let settings = Settings::from_json("{}").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.difficulty.max_mice_on_screen, 8);
    }

    #[test]
    fn test_partial_override() {
        let settings = Settings::from_json(
            r#"{ "difficulty": { "level_up_score": 5 }, "audio": { "muted": true }, "seed": 42 }"#,
        )
        .unwrap();
        assert_eq!(settings.difficulty.level_up_score, 5);
        assert_eq!(settings.difficulty.max_lives, 3);
        assert!(settings.audio.muted);
        assert_eq!(settings.seed, Some(42));
        assert_eq!(settings.seed_or_clock(), 42);
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = Settings::from_json(r#"{ "difficulty": { "level_up_score": 0 } }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));

        let err = Settings::from_json(r#"{ "audio": { "master_volume": 1.5 } }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));

        let err = Settings::from_json("not json").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_round_trip_through_file() {
        let path = std::env::temp_dir().join(format!("mouse_catcher_{}.json", std::process::id()));
        let mut settings = Settings::default();
        settings.seed = Some(7);
        std::fs::write(&path, settings.to_json().unwrap()).unwrap();
        let loaded = Settings::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Settings::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, SettingsError::Io(_)));
    }
}

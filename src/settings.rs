//! Game settings
//!
//! Loaded once at startup from a JSON file (path in `SKI_CHASE_SETTINGS`).
//! Missing fields fall back to the defaults in `crate::consts`. A file with
//! unusable values is rejected as a whole.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SettingsError;

/// Tunable game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Display ===
    /// Viewport width in world units (fixed for the run)
    pub viewport_width: f32,
    /// Viewport height in world units (fixed for the run)
    pub viewport_height: f32,

    // === Difficulty ===
    /// Frames between speed increases
    pub difficulty_interval_frames: u64,
    /// Speed added to skier and rhino at each increase
    pub difficulty_speed_increment: f32,

    // === Rhino ===
    pub rhino_speed: f32,
    /// Where the rhino enters the world
    pub rhino_start: Vec2,
    /// Rhino animation frame interval (ms)
    pub rhino_frame_ms: u64,

    // === Skier ===
    /// Jump animation frame delay (ms)
    pub jump_frame_ms: u64,

    // === Session ===
    /// Open the play gate immediately instead of waiting for start
    pub autostart: bool,
    /// Obstacle field seed (random when absent)
    pub obstacle_seed: Option<u64>,

    // === Assets ===
    /// JSON sprite manifest path (built-in sizes when absent)
    pub sprite_manifest: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            viewport_width: GAME_WIDTH,
            viewport_height: GAME_HEIGHT,

            difficulty_interval_frames: DIFFICULTY_INTERVAL_FRAMES,
            difficulty_speed_increment: DIFFICULTY_SPEED_INCREMENT,

            rhino_speed: RHINO_SPEED,
            rhino_start: Vec2::new(RHINO_START_X, RHINO_START_Y),
            rhino_frame_ms: RHINO_FRAME_MS,

            jump_frame_ms: JUMP_FRAME_MS,

            autostart: false,
            obstacle_seed: None,

            sprite_manifest: None,
        }
    }
}

impl Settings {
    /// Environment variable naming the settings file
    pub const PATH_ENV: &'static str = "SKI_CHASE_SETTINGS";

    /// Parse settings from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize settings to pretty JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from the file named by `SKI_CHASE_SETTINGS`
    pub fn load() -> Self {
        match std::env::var(Self::PATH_ENV) {
            Ok(path) => Self::load_from(&path),
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Load and validate a settings file, falling back to defaults on any error
    pub fn load_from(path: &str) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Cannot read settings file {}: {}", path, e);
                return Self::default();
            }
        };

        let settings = match Self::from_json(&json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Invalid settings file {}: {}", path, e);
                return Self::default();
            }
        };

        match settings.validate() {
            Ok(()) => {
                log::info!("Loaded settings from {}", path);
                settings
            }
            Err(e) => {
                log::warn!("Rejected settings file {}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Check the values the simulation relies on
    pub fn validate(&self) -> Result<(), SettingsError> {
        let positive = [
            ("viewport_width", self.viewport_width),
            ("viewport_height", self.viewport_height),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(SettingsError::NotPositive { field, value });
            }
        }

        let finite = [
            ("difficulty_speed_increment", self.difficulty_speed_increment),
            ("rhino_speed", self.rhino_speed),
            ("rhino_start.x", self.rhino_start.x),
            ("rhino_start.y", self.rhino_start.y),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(SettingsError::NotFinite { field, value });
            }
        }
        Ok(())
    }

    /// Viewport dimensions as a vector
    pub fn viewport_size(&self) -> Vec2 {
        Vec2::new(self.viewport_width, self.viewport_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "viewport_width": 1024, "autostart": true }"#)
            .unwrap();
        assert_eq!(settings.viewport_width, 1024.0);
        assert!(settings.autostart);
        assert_eq!(settings.viewport_height, GAME_HEIGHT);
        assert_eq!(settings.difficulty_interval_frames, DIFFICULTY_INTERVAL_FRAMES);
        assert_eq!(settings.rhino_start, Vec2::new(RHINO_START_X, RHINO_START_Y));
        assert_eq!(settings.obstacle_seed, None);
    }

    #[test]
    fn test_json_round_trip() {
        let settings = Settings {
            obstacle_seed: Some(42),
            rhino_speed: 3.5,
            ..Default::default()
        };
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(Settings::from_json("{ viewport_width: }").is_err());
    }

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(Settings::default().validate(), Ok(()));
    }

    #[test]
    fn test_non_positive_viewport_is_rejected() {
        for (width, height) in [(-10.0, 600.0), (800.0, 0.0), (f32::NAN, 600.0)] {
            let settings = Settings {
                viewport_width: width,
                viewport_height: height,
                ..Default::default()
            };
            assert!(matches!(
                settings.validate(),
                Err(SettingsError::NotPositive { .. })
            ));
        }
    }

    #[test]
    fn test_infinite_rhino_speed_is_rejected() {
        let settings = Settings {
            rhino_speed: f32::INFINITY,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::NotFinite {
                field: "rhino_speed",
                ..
            })
        ));
    }

    #[test]
    fn test_load_from_rejected_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join(format!(
            "ski-chase-settings-{}-negative.json",
            std::process::id()
        ));
        std::fs::write(&path, r#"{ "viewport_width": -10, "autostart": true }"#).unwrap();

        let settings = Settings::load_from(path.to_str().unwrap());
        std::fs::remove_file(&path).ok();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_load_from_valid_file() {
        let path = std::env::temp_dir().join(format!(
            "ski-chase-settings-{}-valid.json",
            std::process::id()
        ));
        std::fs::write(
            &path,
            r#"{ "viewport_width": 1024, "sprite_manifest": "sprites.json" }"#,
        )
        .unwrap();

        let settings = Settings::load_from(path.to_str().unwrap());
        std::fs::remove_file(&path).ok();
        assert_eq!(settings.viewport_width, 1024.0);
        assert_eq!(settings.sprite_manifest.as_deref(), Some("sprites.json"));
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        assert_eq!(
            Settings::load_from("/nonexistent/ski-chase/settings.json"),
            Settings::default()
        );
    }
}

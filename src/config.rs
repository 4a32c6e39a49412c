//! Game tunables
//!
//! Loaded once at startup from a JSON file; every field has a default so a
//! partial file (or no file at all) is fine.

use std::fs;
use std::path::{Path, PathBuf};

use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use glam::Vec2;
use serde::Deserialize;

/// Environment variable naming an alternate config file
pub const CONFIG_ENV: &str = "SHOOTER_CONFIG";

/// Config file looked up in the working directory when no override is set
pub const DEFAULT_CONFIG_FILE: &str = "shooter.json";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Drawing surface size in pixels
    pub canvas_width: f32,
    pub canvas_height: f32,

    // === Movement (pixels per second) ===
    pub player_speed: f32,
    pub bullet_speed: f32,
    pub enemy_speed: f32,

    // === Difficulty ===
    /// Base of the spawn curve `1 - base^game_time`
    pub spawn_decay_base: f32,
    /// Minimum simulation time between two shot sets, in seconds
    pub fire_interval: f32,

    // === Scoring ===
    pub kill_score: u32,
    /// Score that must be exceeded to unlock the double shot
    pub double_threshold: u32,
    /// Score that must be exceeded to unlock the side shots
    pub sides_threshold: u32,

    // === Loop ===
    /// Upper bound on a single frame's `dt`. `None` leaves `dt` unclamped.
    pub max_frame_dt: Option<f32>,
    pub target_fps: u32,

    // === Assets ===
    pub asset_dir: PathBuf,

    /// Fixed RNG seed for reproducible spawn patterns
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            canvas_width: 512.0,
            canvas_height: 480.0,
            player_speed: 200.0,
            bullet_speed: 500.0,
            enemy_speed: 100.0,
            spawn_decay_base: 0.993,
            fire_interval: 0.1,
            kill_score: 100,
            double_threshold: 1000,
            sides_threshold: 5000,
            max_frame_dt: None,
            target_fps: 60,
            asset_dir: PathBuf::from("img"),
            seed: None,
        }
    }
}

impl Config {
    pub fn canvas_size(&self) -> Vec2 {
        Vec2::new(self.canvas_width, self.canvas_height)
    }

    /// Parses a config from JSON text
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).wrap_err("invalid config JSON")
    }

    /// Loads the config at `path`, falling back to defaults when the file
    /// does not exist
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let text = fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read config {}", path.display()))?;
        let config = Self::from_json(&text)
            .wrap_err_with(|| format!("failed to parse config {}", path.display()))?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Loads the config named by `SHOOTER_CONFIG`, or `shooter.json`
    pub fn load() -> Result<Self> {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        Self::load_or_default(&path)
    }

    /// Applies `max_frame_dt` to a raw frame delta
    pub fn clamp_dt(&self, dt: f32) -> f32 {
        match self.max_frame_dt {
            Some(max) => dt.min(max),
            None => dt,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.canvas_size(), Vec2::new(512.0, 480.0));
        assert_eq!(config.kill_score, 100);
        assert_eq!(config.fire_interval, 0.1);
        assert_eq!(config.max_frame_dt, None);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = Config::from_json(r#"{ "enemy_speed": 150.0, "seed": 7 }"#).unwrap();
        assert_eq!(config.enemy_speed, 150.0);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.player_speed, 200.0);
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(Config::from_json("{ enemy_speed: ").is_err());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let config =
            Config::load_or_default(Path::new("definitely/not/here/shooter.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_clamp_dt() {
        let mut config = Config::default();
        assert_eq!(config.clamp_dt(3.0), 3.0);

        config.max_frame_dt = Some(0.25);
        assert_eq!(config.clamp_dt(3.0), 0.25);
        assert_eq!(config.clamp_dt(0.016), 0.016);
    }
}

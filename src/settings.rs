//! Session settings
//!
//! Loaded from an optional JSON file, then overridden from the command line.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;
use crate::sim::RoundConfig;

/// Session settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Round size ===
    /// Human controllers
    pub humans: usize,
    /// Bot-driven controllables
    pub bots: usize,

    // === Pacing ===
    /// Fixed delay between frames in milliseconds (0 = run flat out)
    pub frame_delay_ms: u64,

    // === Round end ===
    /// End the round after this many frames
    pub round_frames: Option<u64>,
    /// End the round once someone reaches this score
    pub target_score: Option<u32>,
    /// Stop the session after this many rounds (None = play forever)
    pub max_rounds: Option<u32>,

    // === Headless ===
    /// Seed for scripted controller input
    pub seed: u64,
    /// Emit a render frame every N frames (1 = every frame)
    pub draw_every: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            humans: 2,
            bots: 0,

            frame_delay_ms: 5,

            round_frames: None,
            target_score: None,
            max_rounds: None,

            seed: 1,
            draw_every: 1,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Parse settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Round size implied by these settings
    pub fn round_config(&self) -> RoundConfig {
        RoundConfig {
            humans: self.humans,
            bots: self.bots,
        }
    }

    /// Whether a round that has run `frames` frames with `top_score` leading is over
    pub fn round_over(&self, frames: u64, top_score: u32) -> bool {
        self.round_frames.is_some_and(|limit| frames >= limit)
            || self.target_score.is_some_and(|target| top_score >= target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "humans": 1, "bots": 3 }"#).unwrap();
        assert_eq!(settings.humans, 1);
        assert_eq!(settings.bots, 3);
        assert_eq!(settings.frame_delay_ms, 5);
        assert_eq!(settings.round_frames, None);
    }

    #[test]
    fn test_round_over() {
        let mut settings = Settings::default();
        assert!(!settings.round_over(1_000_000, 10_000));

        settings.round_frames = Some(100);
        assert!(!settings.round_over(99, 0));
        assert!(settings.round_over(100, 0));

        settings.round_frames = None;
        settings.target_score = Some(500);
        assert!(!settings.round_over(10, 400));
        assert!(settings.round_over(10, 500));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Settings::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, SettingsError::Io { .. }));
    }
}

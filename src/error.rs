//! Error types for round setup and configuration loading.

use std::path::PathBuf;

use thiserror::Error;

use crate::consts::{MAX_CONTROLLABLES, MIN_CONTROLLABLES};

/// Fatal round configuration problems.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// No layout table exists for this many controllables.
    #[error(
        "unsupported controller count {count} ({humans} humans + {bots} bots); \
         layouts exist for {min}..={max}",
        min = MIN_CONTROLLABLES,
        max = MAX_CONTROLLABLES
    )]
    UnsupportedControllerCount {
        count: usize,
        humans: usize,
        bots: usize,
    },
}

/// Errors reading a settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

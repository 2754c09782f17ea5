//! Player configuration
//!
//! Precedence (highest wins):
//! 1) Environment variables (prefix `CASSETTE__`, `__` as nested separator)
//! 2) Config file (TOML, if present)
//! 3) Struct defaults

use crate::error::{PlaylistError, Result};
use crate::random::{RandomIndex, SeededRandom, ThreadRandom};
use crate::types::PlaybackMode;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// What happens when the current track is removed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemovalPolicy {
    /// Run next-track selection on the shrunk list with the cursor still at
    /// the removed slot (the long-standing player behavior; sequential mode
    /// skips the track that slid into the slot)
    #[default]
    Literal,

    /// Continue with the track that slid into the removed slot
    Neighbor,
}

/// Configuration for the playlist controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Initial shuffle toggle (default: false)
    pub shuffle: bool,

    /// Initial repeat toggle (default: false)
    pub repeat: bool,

    /// "Now playing" text when the playlist is empty (default: "None")
    pub idle_label: String,

    /// Draws before shuffle gives up avoiding the current track (default: 32)
    pub max_shuffle_draws: u32,

    /// Seed for a reproducible shuffle (default: none, thread RNG)
    pub seed: Option<u64>,

    /// Replacement strategy when removing the current track
    pub removal_policy: RemovalPolicy,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            shuffle: false,
            repeat: false,
            idle_label: "None".to_string(),
            max_shuffle_draws: 32,
            seed: None,
            removal_policy: RemovalPolicy::Literal,
        }
    }
}

impl PlayerConfig {
    /// Load configuration from an optional TOML file and the environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = ::config::Config::builder();

        if let Some(path) = path {
            settings = settings.add_source(::config::File::from(path).required(false));
        }

        settings = settings.add_source(
            ::config::Environment::with_prefix("CASSETTE")
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = settings.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML text (no environment overrides)
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        let config: Self = ::config::Config::builder()
            .add_source(::config::File::from_str(toml, ::config::FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.max_shuffle_draws == 0 {
            return Err(PlaylistError::Config(
                "max_shuffle_draws must be >= 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Initial shuffle/repeat toggles
    pub fn mode(&self) -> PlaybackMode {
        PlaybackMode {
            shuffle: self.shuffle,
            repeat: self.repeat,
        }
    }

    /// Random provider implied by `seed`
    pub fn random(&self) -> Box<dyn RandomIndex> {
        match self.seed {
            Some(seed) => Box::new(SeededRandom::new(seed)),
            None => Box::new(ThreadRandom),
        }
    }
}

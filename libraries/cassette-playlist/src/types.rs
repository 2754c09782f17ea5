//! Core types for playlist management

use crate::handle::SourceHandle;
use serde::{Deserialize, Serialize};

/// One playable entry in the playlist
///
/// Owns the resource handle its audio is reachable through. A track is never
/// cloned; it leaves the playlist only through removal, clear or teardown, each
/// of which hands the handle back to the registry.
#[derive(Debug)]
pub struct Track {
    name: String,
    handle: SourceHandle,
}

impl Track {
    pub(crate) fn new(name: String, handle: SourceHandle) -> Self {
        Self { name, handle }
    }

    /// Display name (the imported file's name)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// URL the playback engine loads
    pub fn source_url(&self) -> &str {
        self.handle.url()
    }

    pub(crate) fn into_handle(self) -> SourceHandle {
        self.handle
    }
}

/// Shuffle and repeat toggles
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackMode {
    /// Next/previous pick a random track
    pub shuffle: bool,

    /// Sequential navigation wraps at the playlist ends
    pub repeat: bool,
}

/// Track-selection lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    /// No track loaded (empty playlist)
    Idle,

    /// Source set, playback not requested
    Loaded,

    /// Playback requested
    Playing,

    /// Paused mid-track
    Paused,
}

impl PlaybackState {
    /// Whether the play icon should show "pause"
    pub fn is_playing(self) -> bool {
        self == Self::Playing
    }
}

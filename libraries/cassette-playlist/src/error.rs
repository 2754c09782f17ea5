//! Error types for playlist control
//!
//! Controller operations never surface these to the view: they are logged and
//! the operation degrades to a no-op. The `try_*` methods return them for
//! callers that want to know why nothing happened.

use thiserror::Error;

/// Playlist errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlaylistError {
    /// Index outside the playlist
    #[error("Index out of bounds: {index} (playlist length {len})")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Playlist has no tracks
    #[error("Playlist is empty")]
    EmptyPlaylist,

    /// No track is currently loaded
    #[error("No track loaded")]
    NoTrackLoaded,

    /// Sequential next ran past the last track with repeat off
    #[error("End of playlist reached")]
    EndOfPlaylist,

    /// Sequential previous ran before the first track with repeat off
    #[error("Start of playlist reached")]
    StartOfPlaylist,

    /// Engine has not reported a usable duration yet
    #[error("Track duration is not known yet")]
    UndefinedDuration,

    /// Seek fraction is not a number
    #[error("Invalid seek fraction: {0}")]
    InvalidFraction(f64),

    /// Registry could not create a playable handle for a file
    #[error("Failed to allocate source handle: {0}")]
    HandleAllocation(String),

    /// Command string could not be parsed
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<::config::ConfigError> for PlaylistError {
    fn from(err: ::config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type for playlist operations
pub type Result<T> = std::result::Result<T, PlaylistError>;

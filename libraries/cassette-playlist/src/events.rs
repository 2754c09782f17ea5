//! Playlist events
//!
//! The controller queues an event at every observable state change. Hosts that
//! need more than the view contract (analytics, media-session integration)
//! drain them with [`PlaylistController::drain_events`].
//!
//! [`PlaylistController::drain_events`]: crate::PlaylistController::drain_events

use crate::types::{PlaybackMode, PlaybackState};
use serde::{Deserialize, Serialize};

/// Events emitted by the playlist controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaylistEvent {
    /// Files were appended to the playlist
    TracksAdded {
        /// Number of tracks appended
        count: usize,
        /// New playlist length
        length: usize,
    },

    /// A track became the engine's source
    TrackLoaded {
        index: usize,
        name: String,
    },

    /// Lifecycle state changed
    StateChanged {
        state: PlaybackState,
    },

    /// A track was removed and its handle released
    TrackRemoved {
        index: usize,
        name: String,
    },

    /// Every track was removed
    PlaylistCleared {
        /// Number of tracks released
        count: usize,
    },

    /// Shuffle or repeat toggled
    ModeChanged {
        mode: PlaybackMode,
    },

    /// Seek request sent to the engine
    SeekRequested {
        /// Target position in seconds
        position: f64,
    },
}

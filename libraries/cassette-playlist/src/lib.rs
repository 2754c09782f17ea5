//! Cassette - Playlist Control
//!
//! Platform-agnostic playlist management for the Cassette audio player.
//!
//! This crate provides:
//! - An ordered playlist built from user-picked files
//! - A single cursor on the active track (none when the playlist is empty)
//! - Sequential, wrapping (repeat) and random (shuffle) navigation
//! - Removal with automatic replacement of the active track
//! - Progress projection and fraction-based seeking
//! - Source handle lifecycle (every acquired handle is released exactly once)
//!
//! # Architecture
//!
//! `cassette-playlist` never touches a real audio device or DOM. The
//! controller talks to three collaborators through traits:
//! - [`PlaybackEngine`]: the media element (source, play/pause, seek, time)
//! - [`PlaylistView`]: whatever draws the list, buttons and progress bar
//! - [`HandleRegistry`]: allocation and release of playable source URLs
//!
//! Headless implementations ([`MemoryEngine`], [`SnapshotView`],
//! [`MemoryRegistry`]) ship with the crate. The `wasm` feature adds browser
//! implementations on top of `<audio>` and object URLs.
//!
//! # Example: Basic Playback
//!
//! ```rust
//! use cassette_playlist::{
//!     MediaFile, MemoryEngine, MemoryRegistry, PlayerConfig, PlaylistController, SnapshotView,
//! };
//!
//! let engine = MemoryEngine::with_duration(200.0);
//! let view = SnapshotView::new();
//!
//! let mut controller: PlaylistController = PlaylistController::new(
//!     PlayerConfig::default(),
//!     Box::new(engine.clone()),
//!     Box::new(view.clone()),
//!     Box::new(MemoryRegistry::new()),
//! );
//!
//! // The first file is loaded but not played
//! controller.add_tracks(vec![
//!     MediaFile::new("a.mp3", vec![1, 2, 3]),
//!     MediaFile::new("b.mp3", vec![4, 5, 6]),
//! ]);
//! assert_eq!(controller.current_index(), Some(0));
//! assert_eq!(view.snapshot().now_playing, "a.mp3");
//!
//! controller.play();
//! assert_eq!(controller.play_next(), Some(1));
//!
//! // Halfway through a 200 s track
//! controller.seek(0.5);
//! assert!(engine.requests().contains(&cassette_playlist::EngineRequest::SeekTo(100.0)));
//! ```
//!
//! # Example: Shuffle and Repeat
//!
//! ```rust
//! use cassette_playlist::{
//!     MediaFile, MemoryEngine, MemoryRegistry, PlayerConfig, PlaylistController,
//!     SequenceIndices, SnapshotView,
//! };
//!
//! let mut controller: PlaylistController = PlaylistController::new(
//!     PlayerConfig::default(),
//!     Box::new(MemoryEngine::new()),
//!     Box::new(SnapshotView::new()),
//!     Box::new(MemoryRegistry::new()),
//! )
//! .with_random(Box::new(SequenceIndices::new([0, 2])));
//!
//! controller.add_tracks(["a", "b", "c"].map(|n| MediaFile::new(n, n.as_bytes())));
//!
//! // Repeat wraps at the end
//! controller.toggle_repeat();
//! controller.load_track(2);
//! assert_eq!(controller.play_next(), Some(0));
//!
//! // Shuffle never lands on the active track when there is a choice
//! controller.toggle_shuffle();
//! assert_eq!(controller.play_next(), Some(2));
//! ```

mod command;
mod config;
mod controller;
mod engine;
mod error;
mod events;
mod handle;
mod progress;
mod random;
pub mod types;
mod view;

#[cfg(feature = "wasm")]
pub mod wasm;

// Public exports
pub use command::Command;
pub use config::{PlayerConfig, RemovalPolicy};
pub use controller::PlaylistController;
pub use engine::{EngineEvent, EngineRequest, MemoryEngine, PlaybackEngine};
pub use error::{PlaylistError, Result};
pub use events::PlaylistEvent;
pub use handle::{HandleRegistry, MediaFile, MemoryRegistry, NamedFile, SourceHandle};
pub use progress::{format_time, Progress};
pub use random::{RandomIndex, SeededRandom, SequenceIndices, ThreadRandom};
pub use types::{PlaybackMode, PlaybackState, Track};
pub use view::{PlaylistView, SnapshotView, ViewSnapshot};

//! Playlist controller - core state machine
//!
//! Owns the playlist, the cursor and the shuffle/repeat toggles, and is the
//! only component allowed to drive the playback engine.

use crate::{
    command::Command,
    config::{PlayerConfig, RemovalPolicy},
    engine::{EngineEvent, PlaybackEngine},
    error::{PlaylistError, Result},
    events::PlaylistEvent,
    handle::{HandleRegistry, MediaFile, NamedFile},
    progress::Progress,
    random::RandomIndex,
    types::{PlaybackMode, PlaybackState, Track},
    view::PlaylistView,
};
use tracing::{debug, info, warn};

/// Central playlist management
///
/// Invariant: the cursor is `None` exactly when the playlist is empty, and
/// otherwise indexes a track. Every operation restores it before returning.
///
/// Intents that make no sense in the current state (out-of-range indices,
/// navigation on an empty playlist, seeking before the duration is known) are
/// ignored. The `try_*` variants report why.
pub struct PlaylistController<F = MediaFile> {
    // State
    tracks: Vec<Track>,
    current: Option<usize>,
    mode: PlaybackMode,
    state: PlaybackState,
    config: PlayerConfig,

    // Collaborators
    engine: Box<dyn PlaybackEngine>,
    view: Box<dyn PlaylistView>,
    registry: Box<dyn HandleRegistry<F>>,
    random: Box<dyn RandomIndex>,

    // Event queue for host synchronization
    pending_events: Vec<PlaylistEvent>,
}

impl<F: NamedFile> PlaylistController<F> {
    /// Create a controller and draw the initial (empty) view
    pub fn new(
        config: PlayerConfig,
        engine: Box<dyn PlaybackEngine>,
        view: Box<dyn PlaylistView>,
        registry: Box<dyn HandleRegistry<F>>,
    ) -> Self {
        let mut controller = Self {
            tracks: Vec::new(),
            current: None,
            mode: config.mode(),
            state: PlaybackState::Idle,
            random: config.random(),
            config,
            engine,
            view,
            registry,
            pending_events: Vec::new(),
        };

        controller.view.set_mode_indicator(controller.mode);
        controller.view.set_now_playing(&controller.config.idle_label);
        controller.render();
        controller
    }

    /// Replace the random provider used by shuffle
    pub fn set_random(&mut self, random: Box<dyn RandomIndex>) {
        self.random = random;
    }

    /// Builder-style [`set_random`](Self::set_random)
    #[must_use]
    pub fn with_random(mut self, random: Box<dyn RandomIndex>) -> Self {
        self.random = random;
        self
    }

    // ===== File Intake =====

    /// Append files to the playlist
    ///
    /// Allocates one handle per file. If nothing was loaded before, the first
    /// track is loaded but not played. Returns the number of tracks added.
    pub fn add_tracks<I>(&mut self, files: I) -> usize
    where
        I: IntoIterator<Item = F>,
    {
        let mut added = 0;

        for file in files {
            let name = file.file_name();
            match self.registry.acquire(&file) {
                Ok(handle) => {
                    self.tracks.push(Track::new(name, handle));
                    added += 1;
                }
                Err(err) => warn!(%err, file = %name, "skipping file"),
            }
        }

        if added > 0 {
            info!(added, length = self.tracks.len(), "tracks added");
            self.emit(PlaylistEvent::TracksAdded {
                count: added,
                length: self.tracks.len(),
            });
        }

        if self.current.is_none() && !self.tracks.is_empty() {
            self.load_track(0);
        }

        self.render();
        added
    }

    // ===== Track Selection =====

    /// Make the track at `index` the engine's source without playing it
    pub fn load_track(&mut self, index: usize) {
        if let Err(err) = self.try_load_track(index) {
            debug!(%err, index, "load ignored");
        }
    }

    /// [`load_track`](Self::load_track), reporting out-of-range indices
    pub fn try_load_track(&mut self, index: usize) -> Result<()> {
        let len = self.tracks.len();
        let track = self
            .tracks
            .get(index)
            .ok_or(PlaylistError::IndexOutOfBounds { index, len })?;

        self.engine.set_source(track.source_url());
        self.view.set_now_playing(track.name());
        let name = track.name().to_string();

        self.current = Some(index);
        info!(index, track = %name, "track loaded");
        self.emit(PlaylistEvent::TrackLoaded { index, name });
        self.set_state(PlaybackState::Loaded);
        self.render();
        Ok(())
    }

    /// Load and play the track at `index` (list entry clicked)
    pub fn select_track(&mut self, index: usize) {
        match self.try_load_track(index) {
            Ok(()) => self.play(),
            Err(err) => debug!(%err, index, "select ignored"),
        }
    }

    // ===== Playback Control =====

    /// Start or resume playback of the loaded track
    pub fn play(&mut self) {
        if let Err(err) = self.try_play() {
            debug!(%err, "play ignored");
        }
    }

    /// [`play`](Self::play), reporting when nothing is loaded
    pub fn try_play(&mut self) -> Result<()> {
        if self.current.is_none() {
            return Err(PlaylistError::NoTrackLoaded);
        }

        self.engine.play();
        self.view.set_play_icon(true);
        self.set_state(PlaybackState::Playing);
        Ok(())
    }

    /// Pause playback
    pub fn pause(&mut self) {
        self.pause_engine();
        if self.state == PlaybackState::Playing {
            self.set_state(PlaybackState::Paused);
        }
    }

    /// Play/pause button: play if the engine is paused on a source, else pause
    pub fn toggle_play_pause(&mut self) {
        if self.engine.is_paused() && self.engine.has_source() {
            self.play();
        } else {
            self.pause();
        }
    }

    /// Advance to the next track and play it
    ///
    /// Sequential mode stops at the end unless repeat is on. Shuffle picks a
    /// random track other than the current one (unless it is the only one).
    /// Returns the index now playing, or `None` if nothing changed.
    pub fn play_next(&mut self) -> Option<usize> {
        self.try_play_next()
            .map_err(|err| debug!(%err, "next ignored"))
            .ok()
    }

    /// [`play_next`](Self::play_next), reporting why nothing changed
    pub fn try_play_next(&mut self) -> Result<usize> {
        let index = self.next_index()?;
        self.try_load_track(index)?;
        self.try_play()?;
        Ok(index)
    }

    /// Step back to the previous track and play it
    ///
    /// Sequential mode stops at the start unless repeat is on. Shuffle picks
    /// any random track, the current one included.
    pub fn play_prev(&mut self) -> Option<usize> {
        self.try_play_prev()
            .map_err(|err| debug!(%err, "previous ignored"))
            .ok()
    }

    /// [`play_prev`](Self::play_prev), reporting why nothing changed
    pub fn try_play_prev(&mut self) -> Result<usize> {
        let index = self.prev_index()?;
        self.try_load_track(index)?;
        self.try_play()?;
        Ok(index)
    }

    // ===== Removal =====

    /// Remove the track at `index`, releasing its handle
    pub fn remove_track(&mut self, index: usize) {
        if let Err(err) = self.try_remove_track(index) {
            debug!(%err, index, "remove ignored");
        }
    }

    /// [`remove_track`](Self::remove_track), reporting out-of-range indices
    pub fn try_remove_track(&mut self, index: usize) -> Result<()> {
        let len = self.tracks.len();
        if index >= len {
            return Err(PlaylistError::IndexOutOfBounds { index, len });
        }

        let track = self.tracks.remove(index);
        let name = track.name().to_string();
        self.registry.release(track.into_handle());
        info!(index, track = %name, "track removed");
        self.emit(PlaylistEvent::TrackRemoved { index, name });

        let current = self.current;
        match current {
            _ if self.tracks.is_empty() => self.go_idle(),
            Some(current) if current == index => self.replace_removed(index),
            Some(current) if index < current => self.current = Some(current - 1),
            _ => {}
        }

        self.render();
        Ok(())
    }

    /// Remove every track, releasing all handles
    pub fn clear(&mut self) {
        if self.tracks.is_empty() {
            debug!("clear ignored: playlist already empty");
            return;
        }

        let count = self.tracks.len();
        for track in self.tracks.drain(..) {
            self.registry.release(track.into_handle());
        }

        info!(count, "playlist cleared");
        self.emit(PlaylistEvent::PlaylistCleared { count });
        self.go_idle();
        self.render();
    }

    // ===== Shuffle & Repeat =====

    /// Flip shuffle
    pub fn toggle_shuffle(&mut self) {
        self.mode.shuffle = !self.mode.shuffle;
        self.mode_changed();
    }

    /// Flip repeat
    pub fn toggle_repeat(&mut self) {
        self.mode.repeat = !self.mode.repeat;
        self.mode_changed();
    }

    // ===== Engine Notifications =====

    /// Feed an engine notification to the controller
    pub fn handle_event(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::Ended => {
                self.on_track_ended();
            }
            EngineEvent::TimeUpdate {
                current_time,
                duration,
            } => {
                self.on_time_update(current_time, duration);
            }
        }
    }

    /// Natural end of the active track: same as "next"
    ///
    /// When nothing follows (last track, repeat off) the engine has already
    /// stopped, so the finished track stays loaded and the icon shows "play".
    pub fn on_track_ended(&mut self) -> Option<usize> {
        match self.try_play_next() {
            Ok(index) => Some(index),
            Err(err) => {
                debug!(%err, "playback finished");
                self.view.set_play_icon(false);
                if self.current.is_some() {
                    self.set_state(PlaybackState::Loaded);
                }
                None
            }
        }
    }

    /// Project engine time onto the progress bar
    ///
    /// Nothing is displayed until the duration is known.
    pub fn on_time_update(&mut self, current_time: f64, duration: Option<f64>) -> Option<Progress> {
        let progress = Progress::from_times(current_time, duration)?;
        self.view.set_progress(&progress);
        Some(progress)
    }

    // ===== Seek =====

    /// Seek to `fraction` (0.0 - 1.0) of the active track
    pub fn seek(&mut self, fraction: f64) {
        if let Err(err) = self.try_seek(fraction) {
            debug!(%err, fraction, "seek ignored");
        }
    }

    /// [`seek`](Self::seek), returning the target position in seconds
    pub fn try_seek(&mut self, fraction: f64) -> Result<f64> {
        if fraction.is_nan() {
            return Err(PlaylistError::InvalidFraction(fraction));
        }

        let duration = self
            .engine
            .duration()
            .filter(|d| d.is_finite() && *d > 0.0)
            .ok_or(PlaylistError::UndefinedDuration)?;

        let position = fraction.clamp(0.0, 1.0) * duration;
        self.engine.seek_to(position);
        self.emit(PlaylistEvent::SeekRequested { position });
        Ok(position)
    }

    /// Progress bar click at `offset` within a bar `width` wide
    pub fn seek_at(&mut self, offset: f64, width: f64) {
        if width > 0.0 {
            self.seek(offset / width);
        } else {
            debug!(offset, width, "seek ignored: progress bar has no width");
        }
    }

    // ===== Commands =====

    /// Apply a user intent
    pub fn dispatch(&mut self, command: Command<F>) {
        debug!(command = command_name(&command), "dispatch");

        match command {
            Command::AddTracks(files) => {
                self.add_tracks(files);
            }
            Command::Select(index) => self.select_track(index),
            Command::Remove(index) => self.remove_track(index),
            Command::Clear => self.clear(),
            Command::Play => self.play(),
            Command::Pause => self.pause(),
            Command::TogglePlayPause => self.toggle_play_pause(),
            Command::Next => {
                self.play_next();
            }
            Command::Previous => {
                self.play_prev();
            }
            Command::ToggleShuffle => self.toggle_shuffle(),
            Command::ToggleRepeat => self.toggle_repeat(),
            Command::Seek(fraction) => self.seek(fraction),
        }
    }
}

impl<F> PlaylistController<F> {
    /// Push the complete current state to the view
    ///
    /// Used when a view attaches after the controller was created.
    pub fn refresh_view(&mut self) {
        self.view.set_mode_indicator(self.mode);
        self.view.set_play_icon(self.state.is_playing());
        match self.current.and_then(|i| self.tracks.get(i)) {
            Some(track) => self.view.set_now_playing(track.name()),
            None => self.view.set_now_playing(&self.config.idle_label),
        }
        self.render();
    }

    // ===== State Queries =====

    /// Tracks in playlist order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Playlist length
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Whether the playlist is empty
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Cursor position (`None` when nothing is loaded)
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// Track under the cursor
    pub fn current_track(&self) -> Option<&Track> {
        self.current.and_then(|i| self.tracks.get(i))
    }

    /// Shuffle/repeat toggles
    pub fn mode(&self) -> PlaybackMode {
        self.mode
    }

    /// Lifecycle state
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Active configuration
    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// Take all queued events
    pub fn drain_events(&mut self) -> Vec<PlaylistEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check whether events are waiting
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    // ===== Selection =====

    /// Index "next" would move to
    fn next_index(&mut self) -> Result<usize> {
        let len = self.tracks.len();
        if len == 0 {
            return Err(PlaylistError::EmptyPlaylist);
        }

        if self.mode.shuffle {
            return Ok(self.shuffle_index(len));
        }

        let candidate = self.current.map_or(0, |current| current + 1);
        if candidate < len {
            Ok(candidate)
        } else if self.mode.repeat {
            Ok(0)
        } else {
            Err(PlaylistError::EndOfPlaylist)
        }
    }

    /// Index "previous" would move to
    fn prev_index(&mut self) -> Result<usize> {
        let len = self.tracks.len();
        if len == 0 {
            return Err(PlaylistError::EmptyPlaylist);
        }

        if self.mode.shuffle {
            return Ok(self.draw(len));
        }

        match self.current {
            Some(current) if current > 0 => Ok(current - 1),
            _ if self.mode.repeat => Ok(len - 1),
            _ => Err(PlaylistError::StartOfPlaylist),
        }
    }

    /// Random index that differs from the cursor when there is a choice
    ///
    /// Draws are bounded; a provider that keeps returning the cursor falls
    /// back to the following track.
    fn shuffle_index(&mut self, len: usize) -> usize {
        for _ in 0..self.config.max_shuffle_draws {
            let index = self.draw(len);
            if len == 1 || Some(index) != self.current {
                return index;
            }
        }

        let fallback = self.current.map_or(0, |current| (current + 1) % len);
        warn!(fallback, "shuffle draws exhausted, using next track");
        fallback
    }

    fn draw(&mut self, len: usize) -> usize {
        let index = self.random.next_index(len);
        if index < len {
            index
        } else {
            warn!(index, len, "random provider returned out-of-range index");
            index % len
        }
    }

    // ===== Internal =====

    fn render(&mut self) {
        self.view.render(&self.tracks, self.current);
    }

    fn pause_engine(&mut self) {
        self.engine.pause();
        self.view.set_play_icon(false);
    }

    fn go_idle(&mut self) {
        self.engine.clear_source();
        self.current = None;
        self.view.set_now_playing(&self.config.idle_label);
        self.pause_engine();
        self.set_state(PlaybackState::Idle);
    }

    fn mode_changed(&mut self) {
        debug!(shuffle = self.mode.shuffle, repeat = self.mode.repeat, "mode changed");
        self.view.set_mode_indicator(self.mode);
        self.emit(PlaylistEvent::ModeChanged { mode: self.mode });
    }

    fn set_state(&mut self, state: PlaybackState) {
        if self.state != state {
            self.state = state;
            self.emit(PlaylistEvent::StateChanged { state });
        }
    }

    fn emit(&mut self, event: PlaylistEvent) {
        self.pending_events.push(event);
    }
}

impl<F: NamedFile> PlaylistController<F> {
    /// Pick and start a replacement after the current track was removed
    ///
    /// The playlist has already shrunk and is non-empty; the cursor still holds
    /// the removed slot. If no replacement qualifies (end reached with repeat
    /// off) the new last track is loaded and playback pauses.
    fn replace_removed(&mut self, removed: usize) {
        let selection = match self.config.removal_policy {
            RemovalPolicy::Literal => self.next_index(),
            RemovalPolicy::Neighbor => self.neighbor_index(removed),
        };

        match selection {
            Ok(index) => {
                self.load_track(index);
                self.play();
            }
            Err(err) => {
                debug!(%err, removed, "no replacement, parking on last track");
                self.load_track(self.tracks.len() - 1);
                self.pause();
            }
        }
    }

    fn neighbor_index(&mut self, removed: usize) -> Result<usize> {
        if self.mode.shuffle {
            return self.next_index();
        }

        if removed < self.tracks.len() {
            Ok(removed)
        } else if self.mode.repeat {
            Ok(0)
        } else {
            Err(PlaylistError::EndOfPlaylist)
        }
    }
}

impl<F> Drop for PlaylistController<F> {
    fn drop(&mut self) {
        for track in self.tracks.drain(..) {
            self.registry.release(track.into_handle());
        }
    }
}

fn command_name<F>(command: &Command<F>) -> &'static str {
    match command {
        Command::AddTracks(_) => "add_tracks",
        Command::Select(_) => "select",
        Command::Remove(_) => "remove",
        Command::Clear => "clear",
        Command::Play => "play",
        Command::Pause => "pause",
        Command::TogglePlayPause => "toggle_play_pause",
        Command::Next => "next",
        Command::Previous => "previous",
        Command::ToggleShuffle => "toggle_shuffle",
        Command::ToggleRepeat => "toggle_repeat",
        Command::Seek(_) => "seek",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{EngineRequest, MemoryEngine};
    use crate::handle::MemoryRegistry;
    use crate::random::SequenceIndices;
    use crate::view::SnapshotView;

    struct Harness {
        controller: PlaylistController,
        engine: MemoryEngine,
        view: SnapshotView,
        registry: MemoryRegistry,
    }

    fn harness_with(config: PlayerConfig, names: &[&str]) -> Harness {
        let engine = MemoryEngine::with_duration(200.0);
        let view = SnapshotView::new();
        let registry = MemoryRegistry::new();

        let mut controller: PlaylistController = PlaylistController::new(
            config,
            Box::new(engine.clone()),
            Box::new(view.clone()),
            Box::new(registry.clone()),
        );
        controller.add_tracks(names.iter().map(|n| MediaFile::new(*n, n.as_bytes())));

        Harness {
            controller,
            engine,
            view,
            registry,
        }
    }

    fn harness(names: &[&str]) -> Harness {
        harness_with(PlayerConfig::default(), names)
    }

    #[test]
    fn create_controller() {
        let h = harness(&[]);
        assert!(h.controller.is_empty());
        assert_eq!(h.controller.current_index(), None);
        assert_eq!(h.controller.state(), PlaybackState::Idle);
        assert_eq!(h.view.snapshot().now_playing, "None");
        assert!(h.view.snapshot().render_count >= 1);
    }

    #[test]
    fn initial_mode_comes_from_config() {
        let config = PlayerConfig {
            shuffle: true,
            repeat: true,
            ..PlayerConfig::default()
        };
        let h = harness_with(config, &[]);
        assert!(h.controller.mode().shuffle);
        assert!(h.controller.mode().repeat);
        assert_eq!(h.view.snapshot().mode, h.controller.mode());
    }

    #[test]
    fn next_index_sequential() {
        let mut h = harness(&["a", "b", "c"]);
        assert_eq!(h.controller.next_index(), Ok(1));

        h.controller.load_track(2);
        assert_eq!(h.controller.next_index(), Err(PlaylistError::EndOfPlaylist));

        h.controller.toggle_repeat();
        assert_eq!(h.controller.next_index(), Ok(0));
    }

    #[test]
    fn prev_index_sequential() {
        let mut h = harness(&["a", "b", "c"]);
        assert_eq!(h.controller.prev_index(), Err(PlaylistError::StartOfPlaylist));

        h.controller.toggle_repeat();
        assert_eq!(h.controller.prev_index(), Ok(2));

        h.controller.load_track(2);
        assert_eq!(h.controller.prev_index(), Ok(1));
    }

    #[test]
    fn empty_playlist_has_no_selection() {
        let mut h = harness(&[]);
        assert_eq!(h.controller.next_index(), Err(PlaylistError::EmptyPlaylist));
        assert_eq!(h.controller.prev_index(), Err(PlaylistError::EmptyPlaylist));
    }

    #[test]
    fn shuffle_resamples_away_from_current() {
        let mut h = harness(&["a", "b", "c"]);
        h.controller.set_random(Box::new(SequenceIndices::new([0, 0, 2])));
        h.controller.toggle_shuffle();

        assert_eq!(h.controller.next_index(), Ok(2));
    }

    #[test]
    fn shuffle_single_track_may_repeat() {
        let mut h = harness(&["only"]);
        h.controller.set_random(Box::new(SequenceIndices::new([0])));
        h.controller.toggle_shuffle();

        assert_eq!(h.controller.next_index(), Ok(0));
    }

    #[test]
    fn shuffle_falls_back_when_draws_exhausted() {
        let config = PlayerConfig {
            max_shuffle_draws: 4,
            ..PlayerConfig::default()
        };
        let mut h = harness_with(config, &["a", "b", "c"]);
        h.controller.set_random(Box::new(SequenceIndices::new([1])));
        h.controller.toggle_shuffle();
        h.controller.load_track(1);

        assert_eq!(h.controller.next_index(), Ok(2));
    }

    #[test]
    fn shuffle_prev_does_not_avoid_current() {
        let mut h = harness(&["a", "b", "c"]);
        h.controller.set_random(Box::new(SequenceIndices::new([0])));
        h.controller.toggle_shuffle();

        assert_eq!(h.controller.prev_index(), Ok(0));
    }

    #[test]
    fn out_of_range_provider_is_reduced() {
        struct Wild;
        impl RandomIndex for Wild {
            fn next_index(&mut self, upper: usize) -> usize {
                upper + 1
            }
        }

        let mut h = harness(&["a", "b", "c"]);
        h.controller.set_random(Box::new(Wild));
        h.controller.toggle_shuffle();

        assert_eq!(h.controller.prev_index(), Ok(1));
    }

    #[test]
    fn load_sets_engine_source_and_label() {
        let mut h = harness(&["a.mp3", "b.mp3"]);
        h.controller.load_track(1);

        let url = h.controller.tracks()[1].source_url().to_string();
        assert_eq!(h.engine.source(), Some(url));
        assert_eq!(h.view.snapshot().now_playing, "b.mp3");
        assert_eq!(h.view.snapshot().current, Some(1));
        assert_eq!(h.controller.state(), PlaybackState::Loaded);
    }

    #[test]
    fn try_load_reports_out_of_range() {
        let mut h = harness(&["a.mp3"]);
        assert_eq!(
            h.controller.try_load_track(3),
            Err(PlaylistError::IndexOutOfBounds { index: 3, len: 1 })
        );
        assert_eq!(h.controller.current_index(), Some(0));
    }

    #[test]
    fn play_on_empty_playlist_is_ignored() {
        let mut h = harness(&[]);
        assert_eq!(h.controller.try_play(), Err(PlaylistError::NoTrackLoaded));
        assert!(h.engine.requests().is_empty());
        assert!(!h.view.snapshot().playing);
    }

    #[test]
    fn toggle_play_pause_follows_engine() {
        let mut h = harness(&["a.mp3"]);

        h.controller.toggle_play_pause();
        assert_eq!(h.controller.state(), PlaybackState::Playing);
        assert!(!h.engine.is_paused());

        h.controller.toggle_play_pause();
        assert_eq!(h.controller.state(), PlaybackState::Paused);
        assert!(h.engine.is_paused());
        assert!(!h.view.snapshot().playing);
    }

    #[test]
    fn pause_from_loaded_keeps_loaded() {
        let mut h = harness(&["a.mp3"]);
        h.controller.pause();
        assert_eq!(h.controller.state(), PlaybackState::Loaded);
        assert_eq!(h.engine.last_request(), Some(EngineRequest::Pause));
    }

    #[test]
    fn clear_releases_everything() {
        let mut h = harness(&["a", "b", "c"]);
        h.controller.play();
        h.controller.clear();

        assert!(h.controller.is_empty());
        assert_eq!(h.controller.current_index(), None);
        assert_eq!(h.controller.state(), PlaybackState::Idle);
        assert_eq!(h.registry.live_count(), 0);
        assert_eq!(h.registry.released_count(), 3);
        assert_eq!(h.engine.source(), None);
        assert_eq!(h.view.snapshot().now_playing, "None");
    }

    #[test]
    fn drop_releases_remaining_handles() {
        let h = harness(&["a", "b"]);
        let registry = h.registry.clone();
        assert_eq!(registry.live_count(), 2);

        drop(h);

        assert_eq!(registry.live_count(), 0);
        assert_eq!(registry.released_count(), 2);
        assert_eq!(registry.unknown_release_count(), 0);
    }

    #[test]
    fn events_are_queued_and_drained() {
        let mut h = harness(&["a.mp3"]);
        let events = h.controller.drain_events();

        assert_eq!(
            events,
            vec![
                PlaylistEvent::TracksAdded {
                    count: 1,
                    length: 1
                },
                PlaylistEvent::TrackLoaded {
                    index: 0,
                    name: "a.mp3".to_string()
                },
                PlaylistEvent::StateChanged {
                    state: PlaybackState::Loaded
                },
            ]
        );
        assert!(!h.controller.has_pending_events());
    }

    #[test]
    fn seek_at_uses_click_offset() {
        let mut h = harness(&["a.mp3"]);
        h.controller.seek_at(50.0, 200.0);
        assert_eq!(h.engine.last_request(), Some(EngineRequest::SeekTo(50.0)));

        h.engine.clear_requests();
        h.controller.seek_at(10.0, 0.0);
        assert!(h.engine.requests().is_empty());
    }

    #[test]
    fn seek_rejects_nan_and_clamps() {
        let mut h = harness(&["a.mp3"]);
        assert_eq!(
            h.controller.try_seek(f64::NAN).map_err(|e| e.to_string()),
            Err("Invalid seek fraction: NaN".to_string())
        );
        assert_eq!(h.controller.try_seek(1.5), Ok(200.0));
        assert_eq!(h.controller.try_seek(-0.5), Ok(0.0));
    }

    #[test]
    fn refresh_view_pushes_full_state() {
        let mut h = harness(&["a.mp3", "b.mp3"]);
        h.controller.select_track(1);
        h.controller.toggle_repeat();

        let late = SnapshotView::new();
        h.controller.view = Box::new(late.clone());
        h.controller.refresh_view();

        let snapshot = late.snapshot();
        assert_eq!(snapshot.names, vec!["a.mp3", "b.mp3"]);
        assert_eq!(snapshot.current, Some(1));
        assert!(snapshot.playing);
        assert!(snapshot.mode.repeat);
        assert_eq!(snapshot.now_playing, "b.mp3");
    }
}

//! View contract
//!
//! The controller pushes state to a [`PlaylistView`]; the view turns user
//! gestures back into [`Command`](crate::Command)s. Rendering details (DOM,
//! terminal, icons) live entirely on the view side.

use crate::progress::Progress;
use crate::types::{PlaybackMode, Track};
use std::cell::RefCell;
use std::rc::Rc;

/// Receiver of controller state
pub trait PlaylistView {
    /// Redraw the list, highlighting `current`
    fn render(&mut self, tracks: &[Track], current: Option<usize>);

    /// Show the pause icon while playing, the play icon otherwise
    fn set_play_icon(&mut self, playing: bool);

    /// Update the progress bar and time labels
    fn set_progress(&mut self, progress: &Progress);

    /// Highlight the shuffle and repeat buttons
    fn set_mode_indicator(&mut self, mode: PlaybackMode);

    /// Update the "now playing" label
    fn set_now_playing(&mut self, name: &str);
}

/// Last state pushed to a [`SnapshotView`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewSnapshot {
    pub names: Vec<String>,
    pub current: Option<usize>,
    pub playing: bool,
    pub progress: Option<Progress>,
    pub mode: PlaybackMode,
    pub now_playing: String,
    pub render_count: usize,
}

/// Headless view that keeps the latest state
///
/// Useful for hosts that poll instead of draw, and for tests. Cloning yields
/// another handle to the same snapshot.
#[derive(Debug, Clone, Default)]
pub struct SnapshotView {
    snapshot: Rc<RefCell<ViewSnapshot>>,
}

impl SnapshotView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the current snapshot
    pub fn snapshot(&self) -> ViewSnapshot {
        self.snapshot.borrow().clone()
    }
}

impl PlaylistView for SnapshotView {
    fn render(&mut self, tracks: &[Track], current: Option<usize>) {
        let mut snapshot = self.snapshot.borrow_mut();
        snapshot.names = tracks.iter().map(|t| t.name().to_string()).collect();
        snapshot.current = current;
        snapshot.render_count += 1;
    }

    fn set_play_icon(&mut self, playing: bool) {
        self.snapshot.borrow_mut().playing = playing;
    }

    fn set_progress(&mut self, progress: &Progress) {
        self.snapshot.borrow_mut().progress = Some(progress.clone());
    }

    fn set_mode_indicator(&mut self, mode: PlaybackMode) {
        self.snapshot.borrow_mut().mode = mode;
    }

    fn set_now_playing(&mut self, name: &str) {
        self.snapshot.borrow_mut().now_playing = name.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handle::SourceHandle;

    #[test]
    fn render_records_names_and_cursor() {
        let view = SnapshotView::new();
        let mut sink = view.clone();
        let tracks = vec![
            Track::new("a.mp3".into(), SourceHandle::new("blob:a".into())),
            Track::new("b.mp3".into(), SourceHandle::new("blob:b".into())),
        ];

        sink.render(&tracks, Some(1));

        let snapshot = view.snapshot();
        assert_eq!(snapshot.names, vec!["a.mp3", "b.mp3"]);
        assert_eq!(snapshot.current, Some(1));
        assert_eq!(snapshot.render_count, 1);

        for track in tracks {
            let _ = track.into_handle().into_url();
        }
    }

    #[test]
    fn records_controls() {
        let view = SnapshotView::new();
        let mut sink = view.clone();

        sink.set_play_icon(true);
        sink.set_now_playing("a.mp3");
        sink.set_mode_indicator(PlaybackMode {
            shuffle: true,
            repeat: false,
        });
        sink.set_progress(&Progress {
            percent: 10.0,
            current: "0:10".into(),
            total: "1:40".into(),
        });

        let snapshot = view.snapshot();
        assert!(snapshot.playing);
        assert_eq!(snapshot.now_playing, "a.mp3");
        assert!(snapshot.mode.shuffle);
        assert_eq!(snapshot.progress.unwrap().current, "0:10");
    }
}

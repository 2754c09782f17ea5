//! Playback engine abstraction
//!
//! The engine is the external audio device: it loads one source at a time,
//! plays, pauses and seeks it, and reports progress and end-of-track. Requests
//! are fire-and-forget; notifications come back as [`EngineEvent`]s which the
//! host feeds to [`PlaylistController::handle_event`].
//!
//! [`PlaylistController::handle_event`]: crate::PlaylistController::handle_event

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;

/// Audio output device driven exclusively by the controller
pub trait PlaybackEngine {
    /// Replace the active source; resets time and duration
    fn set_source(&mut self, url: &str);

    /// Drop the active source
    fn clear_source(&mut self);

    /// Request playback of the active source
    fn play(&mut self);

    /// Request pause
    fn pause(&mut self);

    /// Jump to `seconds` from the start of the active source
    fn seek_to(&mut self, seconds: f64);

    /// Track length once metadata has loaded
    fn duration(&self) -> Option<f64>;

    /// Current playback position in seconds
    fn current_time(&self) -> f64;

    /// Whether the device is paused (true when nothing has started)
    fn is_paused(&self) -> bool;

    /// Whether a source is set
    fn has_source(&self) -> bool;
}

/// Notifications emitted by the engine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EngineEvent {
    /// Position moved
    TimeUpdate {
        current_time: f64,
        duration: Option<f64>,
    },

    /// Active source played to its end
    Ended,
}

/// A request the controller issued, as recorded by [`MemoryEngine`]
#[derive(Debug, Clone, PartialEq)]
pub enum EngineRequest {
    SetSource(String),
    ClearSource,
    Play,
    Pause,
    SeekTo(f64),
}

#[derive(Debug)]
struct EngineState {
    source: Option<String>,
    paused: bool,
    current_time: f64,
    duration: Option<f64>,
    duration_on_load: Option<f64>,
    requests: Vec<EngineRequest>,
}

/// Headless engine that simulates a single media element
///
/// Loading a source resets position and duration (to `duration_on_load`, if
/// set) and leaves the element paused, as an HTML media element does.
/// Cloning yields another handle to the same device.
#[derive(Debug, Clone)]
pub struct MemoryEngine {
    state: Rc<RefCell<EngineState>>,
}

impl Default for MemoryEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryEngine {
    /// Engine whose sources never report a duration until told to
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(EngineState {
                source: None,
                paused: true,
                current_time: 0.0,
                duration: None,
                duration_on_load: None,
                requests: Vec::new(),
            })),
        }
    }

    /// Engine where every loaded source reports `seconds` as its duration
    pub fn with_duration(seconds: f64) -> Self {
        let engine = Self::new();
        engine.state.borrow_mut().duration_on_load = Some(seconds);
        engine
    }

    /// Simulate metadata arriving for the active source
    pub fn set_duration(&self, duration: Option<f64>) {
        self.state.borrow_mut().duration = duration;
    }

    /// Active source URL
    pub fn source(&self) -> Option<String> {
        self.state.borrow().source.clone()
    }

    /// Every request received so far
    pub fn requests(&self) -> Vec<EngineRequest> {
        self.state.borrow().requests.clone()
    }

    /// Most recent request
    pub fn last_request(&self) -> Option<EngineRequest> {
        self.state.borrow().requests.last().cloned()
    }

    /// Forget recorded requests
    pub fn clear_requests(&self) {
        self.state.borrow_mut().requests.clear();
    }

    /// Advance the clock by `seconds` while playing
    ///
    /// Returns the event a real element would fire: `Ended` once the position
    /// reaches a known duration, otherwise a `TimeUpdate`. Paused or empty
    /// engines emit nothing.
    pub fn advance(&self, seconds: f64) -> Option<EngineEvent> {
        let mut state = self.state.borrow_mut();
        if state.paused || state.source.is_none() {
            return None;
        }

        state.current_time += seconds;
        match state.duration {
            Some(duration) if state.current_time >= duration => {
                state.current_time = duration;
                state.paused = true;
                Some(EngineEvent::Ended)
            }
            duration => Some(EngineEvent::TimeUpdate {
                current_time: state.current_time,
                duration,
            }),
        }
    }
}

impl PlaybackEngine for MemoryEngine {
    fn set_source(&mut self, url: &str) {
        let mut state = self.state.borrow_mut();
        state.source = Some(url.to_string());
        state.paused = true;
        state.current_time = 0.0;
        state.duration = state.duration_on_load;
        state.requests.push(EngineRequest::SetSource(url.to_string()));
    }

    fn clear_source(&mut self) {
        let mut state = self.state.borrow_mut();
        state.source = None;
        state.paused = true;
        state.current_time = 0.0;
        state.duration = None;
        state.requests.push(EngineRequest::ClearSource);
    }

    fn play(&mut self) {
        let mut state = self.state.borrow_mut();
        if state.source.is_some() {
            state.paused = false;
        }
        state.requests.push(EngineRequest::Play);
    }

    fn pause(&mut self) {
        let mut state = self.state.borrow_mut();
        state.paused = true;
        state.requests.push(EngineRequest::Pause);
    }

    fn seek_to(&mut self, seconds: f64) {
        let mut state = self.state.borrow_mut();
        state.current_time = seconds;
        state.requests.push(EngineRequest::SeekTo(seconds));
    }

    fn duration(&self) -> Option<f64> {
        self.state.borrow().duration
    }

    fn current_time(&self) -> f64 {
        self.state.borrow().current_time
    }

    fn is_paused(&self) -> bool {
        self.state.borrow().paused
    }

    fn has_source(&self) -> bool {
        self.state.borrow().source.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_engine_is_paused_and_empty() {
        let engine = MemoryEngine::new();
        assert!(engine.is_paused());
        assert!(!engine.has_source());
        assert_eq!(engine.duration(), None);
    }

    #[test]
    fn set_source_resets_state() {
        let mut engine = MemoryEngine::with_duration(120.0);
        engine.set_source("blob:a");
        engine.play();
        engine.seek_to(30.0);

        engine.set_source("blob:b");

        assert_eq!(engine.source().as_deref(), Some("blob:b"));
        assert!(engine.is_paused());
        assert_eq!(engine.current_time(), 0.0);
        assert_eq!(engine.duration(), Some(120.0));
    }

    #[test]
    fn play_without_source_stays_paused() {
        let mut engine = MemoryEngine::new();
        engine.play();
        assert!(engine.is_paused());
        assert_eq!(engine.requests(), vec![EngineRequest::Play]);
    }

    #[test]
    fn advance_reports_progress_then_end() {
        let mut engine = MemoryEngine::with_duration(10.0);
        engine.set_source("blob:a");
        engine.play();

        assert_eq!(
            engine.advance(4.0),
            Some(EngineEvent::TimeUpdate {
                current_time: 4.0,
                duration: Some(10.0),
            })
        );
        assert_eq!(engine.advance(7.0), Some(EngineEvent::Ended));
        assert!(engine.is_paused());
        assert_eq!(engine.advance(1.0), None);
    }

    #[test]
    fn advance_without_duration_never_ends() {
        let mut engine = MemoryEngine::new();
        engine.set_source("blob:a");
        engine.play();

        assert_eq!(
            engine.advance(1000.0),
            Some(EngineEvent::TimeUpdate {
                current_time: 1000.0,
                duration: None,
            })
        );
    }

    #[test]
    fn clones_share_device() {
        let engine = MemoryEngine::new();
        let mut driver = engine.clone();
        driver.set_source("blob:a");
        assert!(engine.has_source());
        assert_eq!(engine.last_request(), Some(EngineRequest::SetSource("blob:a".into())));
    }
}

//! `<audio>` element as playback engine

use crate::engine::PlaybackEngine;
use tracing::warn;
use web_sys::HtmlAudioElement;

/// Playback engine backed by an `HtmlAudioElement`
///
/// `play()` returns a promise the browser may reject (autoplay policy); the
/// request is fire-and-forget, so the promise is dropped.
pub struct HtmlAudioEngine {
    element: HtmlAudioElement,
}

impl HtmlAudioEngine {
    pub fn new(element: HtmlAudioElement) -> Self {
        Self { element }
    }
}

impl PlaybackEngine for HtmlAudioEngine {
    fn set_source(&mut self, url: &str) {
        self.element.set_src(url);
    }

    fn clear_source(&mut self) {
        if let Err(err) = self.element.remove_attribute("src") {
            warn!(?err, "failed to clear audio source");
        }
        self.element.load();
    }

    fn play(&mut self) {
        if let Err(err) = self.element.play() {
            warn!(?err, "audio play request failed");
        }
    }

    fn pause(&mut self) {
        if let Err(err) = self.element.pause() {
            warn!(?err, "audio pause request failed");
        }
    }

    fn seek_to(&mut self, seconds: f64) {
        self.element.set_current_time(seconds);
    }

    fn duration(&self) -> Option<f64> {
        let duration = self.element.duration();
        (duration.is_finite() && duration > 0.0).then_some(duration)
    }

    fn current_time(&self) -> f64 {
        self.element.current_time()
    }

    fn is_paused(&self) -> bool {
        self.element.paused()
    }

    fn has_source(&self) -> bool {
        !self.element.src().is_empty()
    }
}

//! WASM-compatible PlaylistController wrapper

use super::engine::HtmlAudioEngine;
use super::registry::ObjectUrlRegistry;
use super::view::{CallbackView, ViewCallbacks};
use crate::{Command, PlayerConfig, PlaybackState, PlaylistController, PlaylistError};
use js_sys::Function;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::{File, FileList, HtmlAudioElement};

/// WASM-compatible playlist controller
///
/// Wraps the core controller with an `<audio>` element as engine, object URLs
/// as source handles and JavaScript callbacks as view. The page forwards the
/// element's `ended` and `timeupdate` events via [`notifyEnded`] and
/// [`notifyTimeUpdate`].
///
/// [`notifyEnded`]: WasmPlaylistController::notify_ended
/// [`notifyTimeUpdate`]: WasmPlaylistController::notify_time_update
#[wasm_bindgen]
pub struct WasmPlaylistController {
    inner: PlaylistController<File>,
    audio: HtmlAudioElement,
    callbacks: Rc<RefCell<ViewCallbacks>>,
    on_event: Option<Function>,
}

#[wasm_bindgen]
impl WasmPlaylistController {
    /// Create a controller driving `audio` with the default configuration
    #[wasm_bindgen(constructor)]
    pub fn new(audio: HtmlAudioElement) -> Self {
        Self::build(audio, PlayerConfig::default())
    }

    /// Create a controller from a partial config object
    ///
    /// Accepts `{ shuffle, repeat, idle_label, max_shuffle_draws, seed,
    /// removal_policy }`, every key optional.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(
        audio: HtmlAudioElement,
        config: JsValue,
    ) -> Result<WasmPlaylistController, JsValue> {
        let config: PlayerConfig = serde_wasm_bindgen::from_value(config)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse config: {}", e)))?;
        config.validate().map_err(to_js)?;
        Ok(Self::build(audio, config))
    }

    fn build(audio: HtmlAudioElement, config: PlayerConfig) -> Self {
        // Enable panic hooks for better error messages in console
        console_error_panic_hook::set_once();

        let view = CallbackView::new();
        let callbacks = view.callbacks();
        let inner = PlaylistController::new(
            config,
            Box::new(HtmlAudioEngine::new(audio.clone())),
            Box::new(view),
            Box::new(ObjectUrlRegistry),
        );

        Self {
            inner,
            audio,
            callbacks,
            on_event: None,
        }
    }

    // ===== File Intake =====

    /// Append the files of an `<input type="file" multiple>` selection
    #[wasm_bindgen(js_name = addFiles)]
    pub fn add_files(&mut self, files: FileList) -> usize {
        let files: Vec<File> = (0..files.length()).filter_map(|i| files.get(i)).collect();
        let added = self.inner.add_tracks(files);
        self.flush_events();
        added
    }

    // ===== Playlist =====

    /// Load and play the track at `index`
    #[wasm_bindgen(js_name = selectTrack)]
    pub fn select_track(&mut self, index: usize) {
        self.inner.select_track(index);
        self.flush_events();
    }

    /// Remove the track at `index`, releasing its object URL
    #[wasm_bindgen(js_name = removeTrack)]
    pub fn remove_track(&mut self, index: usize) -> Result<(), JsValue> {
        let result = self.inner.try_remove_track(index).map_err(to_js);
        self.flush_events();
        result
    }

    /// Remove every track
    pub fn clear(&mut self) {
        self.inner.clear();
        self.flush_events();
    }

    // ===== Playback Control =====

    pub fn play(&mut self) {
        self.inner.play();
        self.flush_events();
    }

    pub fn pause(&mut self) {
        self.inner.pause();
        self.flush_events();
    }

    #[wasm_bindgen(js_name = togglePlayPause)]
    pub fn toggle_play_pause(&mut self) {
        self.inner.toggle_play_pause();
        self.flush_events();
    }

    /// Skip forward; returns the new index or -1 when nothing changed
    #[wasm_bindgen(js_name = next)]
    pub fn play_next(&mut self) -> i32 {
        let index = self.inner.play_next();
        self.flush_events();
        to_cursor(index)
    }

    /// Skip back; returns the new index or -1 when nothing changed
    #[wasm_bindgen(js_name = prev)]
    pub fn play_prev(&mut self) -> i32 {
        let index = self.inner.play_prev();
        self.flush_events();
        to_cursor(index)
    }

    // ===== Shuffle & Repeat =====

    #[wasm_bindgen(js_name = toggleShuffle)]
    pub fn toggle_shuffle(&mut self) {
        self.inner.toggle_shuffle();
        self.flush_events();
    }

    #[wasm_bindgen(js_name = toggleRepeat)]
    pub fn toggle_repeat(&mut self) {
        self.inner.toggle_repeat();
        self.flush_events();
    }

    #[wasm_bindgen(js_name = isShuffle)]
    pub fn is_shuffle(&self) -> bool {
        self.inner.mode().shuffle
    }

    #[wasm_bindgen(js_name = isRepeat)]
    pub fn is_repeat(&self) -> bool {
        self.inner.mode().repeat
    }

    // ===== Seeking =====

    /// Seek to a fraction (0.0 - 1.0) of the track
    pub fn seek(&mut self, fraction: f64) {
        self.inner.seek(fraction);
        self.flush_events();
    }

    /// Progress bar click: `offset` pixels into a bar `width` pixels wide
    #[wasm_bindgen(js_name = seekAt)]
    pub fn seek_at(&mut self, offset: f64, width: f64) {
        self.inner.seek_at(offset, width);
        self.flush_events();
    }

    // ===== Commands =====

    /// Apply a textual command ("next", "select:2", "seek:0.5", ...)
    pub fn dispatch(&mut self, command: &str) -> Result<(), JsValue> {
        let command: Command<File> = command.parse().map_err(to_js)?;
        self.inner.dispatch(command);
        self.flush_events();
        Ok(())
    }

    // ===== Engine Notifications =====

    /// Forward the audio element's `ended` event
    #[wasm_bindgen(js_name = notifyEnded)]
    pub fn notify_ended(&mut self) {
        self.inner.on_track_ended();
        self.flush_events();
    }

    /// Forward the audio element's `timeupdate` event
    #[wasm_bindgen(js_name = notifyTimeUpdate)]
    pub fn notify_time_update(&mut self) {
        let duration = self.audio.duration();
        let duration = (duration.is_finite() && duration > 0.0).then_some(duration);
        self.inner.on_time_update(self.audio.current_time(), duration);
    }

    // ===== State Queries =====

    /// Cursor position, -1 when the playlist is empty
    #[wasm_bindgen(js_name = currentIndex)]
    pub fn current_index(&self) -> i32 {
        to_cursor(self.inner.current_index())
    }

    pub fn length(&self) -> usize {
        self.inner.len()
    }

    /// Name of the active track
    #[wasm_bindgen(js_name = currentName)]
    pub fn current_name(&self) -> Option<String> {
        self.inner.current_track().map(|t| t.name().to_string())
    }

    /// "idle" | "loaded" | "playing" | "paused"
    #[wasm_bindgen(js_name = getState)]
    pub fn get_state(&self) -> String {
        match self.inner.state() {
            PlaybackState::Idle => "idle".to_string(),
            PlaybackState::Loaded => "loaded".to_string(),
            PlaybackState::Playing => "playing".to_string(),
            PlaybackState::Paused => "paused".to_string(),
        }
    }

    // ===== Event Listeners =====

    /// `(rows: {name, isCurrent}[], current: number)`
    #[wasm_bindgen(js_name = onRender)]
    pub fn on_render(&mut self, callback: Function) {
        self.callbacks.borrow_mut().render = Some(callback);
        self.inner.refresh_view();
    }

    /// `(playing: boolean)`
    #[wasm_bindgen(js_name = onPlayIcon)]
    pub fn on_play_icon(&mut self, callback: Function) {
        self.callbacks.borrow_mut().play_icon = Some(callback);
        self.inner.refresh_view();
    }

    /// `(percent: number, current: string, total: string)`
    #[wasm_bindgen(js_name = onProgress)]
    pub fn on_progress(&mut self, callback: Function) {
        self.callbacks.borrow_mut().progress = Some(callback);
    }

    /// `(shuffle: boolean, repeat: boolean)`
    #[wasm_bindgen(js_name = onModeChange)]
    pub fn on_mode_change(&mut self, callback: Function) {
        self.callbacks.borrow_mut().mode = Some(callback);
        self.inner.refresh_view();
    }

    /// `(name: string)`
    #[wasm_bindgen(js_name = onNowPlaying)]
    pub fn on_now_playing(&mut self, callback: Function) {
        self.callbacks.borrow_mut().now_playing = Some(callback);
        self.inner.refresh_view();
    }

    /// `(event: object)`, one call per controller event
    #[wasm_bindgen(js_name = onEvent)]
    pub fn on_event(&mut self, callback: Function) {
        self.on_event = Some(callback);
    }

    // ===== Internal Event Emitters =====

    fn flush_events(&mut self) {
        let events = self.inner.drain_events();
        let Some(ref cb) = self.on_event else {
            return;
        };

        for event in events {
            if let Ok(js_event) = serde_wasm_bindgen::to_value(&event) {
                cb.call1(&JsValue::NULL, &js_event).ok();
            }
        }
    }
}

fn to_cursor(index: Option<usize>) -> i32 {
    index.and_then(|i| i32::try_from(i).ok()).unwrap_or(-1)
}

fn to_js(error: PlaylistError) -> JsValue {
    JsValue::from_str(&error.to_string())
}

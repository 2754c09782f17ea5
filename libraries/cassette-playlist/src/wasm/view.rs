//! View that forwards controller state to JavaScript callbacks

use crate::progress::Progress;
use crate::types::{PlaybackMode, Track};
use crate::view::PlaylistView;
use js_sys::Function;
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsValue;

/// Row passed to the `render` callback
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TrackRow<'a> {
    name: &'a str,
    is_current: bool,
}

/// Registered callbacks, all optional
#[derive(Default)]
pub(crate) struct ViewCallbacks {
    pub render: Option<Function>,
    pub play_icon: Option<Function>,
    pub progress: Option<Function>,
    pub mode: Option<Function>,
    pub now_playing: Option<Function>,
}

/// [`PlaylistView`] calling back into JavaScript
///
/// Callbacks live behind a shared cell so they can be registered after the
/// controller took ownership of the view.
#[derive(Clone, Default)]
pub struct CallbackView {
    callbacks: Rc<RefCell<ViewCallbacks>>,
}

impl CallbackView {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn callbacks(&self) -> Rc<RefCell<ViewCallbacks>> {
        Rc::clone(&self.callbacks)
    }
}

fn call(callback: &Option<Function>, args: &[JsValue]) {
    let Some(cb) = callback else {
        return;
    };

    let result = match args {
        [] => cb.call0(&JsValue::NULL),
        [a] => cb.call1(&JsValue::NULL, a),
        [a, b] => cb.call2(&JsValue::NULL, a, b),
        [a, b, c, ..] => cb.call3(&JsValue::NULL, a, b, c),
    };

    if let Err(err) = result {
        tracing::warn!(?err, "view callback threw");
    }
}

impl PlaylistView for CallbackView {
    fn render(&mut self, tracks: &[Track], current: Option<usize>) {
        let rows: Vec<TrackRow<'_>> = tracks
            .iter()
            .enumerate()
            .map(|(i, track)| TrackRow {
                name: track.name(),
                is_current: current == Some(i),
            })
            .collect();

        let rows = match serde_wasm_bindgen::to_value(&rows) {
            Ok(rows) => rows,
            Err(err) => {
                tracing::warn!(%err, "failed to serialize playlist rows");
                JsValue::NULL
            }
        };
        let current = current.map_or(-1.0, |i| i as f64);
        call(&self.callbacks.borrow().render, &[rows, JsValue::from_f64(current)]);
    }

    fn set_play_icon(&mut self, playing: bool) {
        call(&self.callbacks.borrow().play_icon, &[JsValue::from_bool(playing)]);
    }

    fn set_progress(&mut self, progress: &Progress) {
        call(
            &self.callbacks.borrow().progress,
            &[
                JsValue::from_f64(progress.percent),
                JsValue::from_str(&progress.current),
                JsValue::from_str(&progress.total),
            ],
        );
    }

    fn set_mode_indicator(&mut self, mode: PlaybackMode) {
        call(
            &self.callbacks.borrow().mode,
            &[JsValue::from_bool(mode.shuffle), JsValue::from_bool(mode.repeat)],
        );
    }

    fn set_now_playing(&mut self, name: &str) {
        call(&self.callbacks.borrow().now_playing, &[JsValue::from_str(name)]);
    }
}

//! WASM bindings for cassette-playlist
//!
//! This module provides WebAssembly bindings for the PlaylistController,
//! driving an `<audio>` element and object URLs in the browser.

#[cfg(feature = "wasm")]
pub mod engine;

#[cfg(feature = "wasm")]
pub mod registry;

#[cfg(feature = "wasm")]
pub mod view;

#[cfg(feature = "wasm")]
pub mod controller;

#[cfg(feature = "wasm")]
pub use controller::WasmPlaylistController;

#[cfg(feature = "wasm")]
pub use engine::HtmlAudioEngine;

#[cfg(feature = "wasm")]
pub use registry::ObjectUrlRegistry;

#[cfg(feature = "wasm")]
pub use view::CallbackView;

//! User intents forwarded by the view
//!
//! Views never call into playlist internals; each gesture becomes a
//! [`Command`] carrying an explicit index, dispatched through
//! [`PlaylistController::dispatch`](crate::PlaylistController::dispatch).

use crate::error::PlaylistError;
use crate::handle::MediaFile;
use std::str::FromStr;

/// A user intent
#[derive(Debug, Clone, PartialEq)]
pub enum Command<F = MediaFile> {
    /// Files chosen in the file picker
    AddTracks(Vec<F>),
    /// List entry clicked: load and play it
    Select(usize),
    /// Delete button on a list entry
    Remove(usize),
    /// Remove every track
    Clear,
    Play,
    Pause,
    /// Play/pause button
    TogglePlayPause,
    Next,
    Previous,
    ToggleShuffle,
    ToggleRepeat,
    /// Progress bar click, as a fraction of its width
    Seek(f64),
}

/// Parses the compact form used at the JS boundary
///
/// `play`, `pause`, `toggle`, `next`, `prev`, `shuffle`, `repeat`, `clear`,
/// `select:<index>`, `remove:<index>`, `seek:<fraction>`. File intake has no
/// string form.
impl<F> FromStr for Command<F> {
    type Err = PlaylistError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || PlaylistError::UnknownCommand(s.to_string());
        let trimmed = s.trim();

        let (name, arg) = match trimmed.split_once(':') {
            Some((name, arg)) => (name.trim(), Some(arg.trim())),
            None => (trimmed, None),
        };

        let index = |arg: Option<&str>| -> Result<usize, PlaylistError> {
            arg.and_then(|a| a.parse().ok()).ok_or_else(unknown)
        };

        let command = match (name.to_ascii_lowercase().as_str(), arg) {
            ("play", None) => Self::Play,
            ("pause", None) => Self::Pause,
            ("toggle", None) => Self::TogglePlayPause,
            ("next", None) => Self::Next,
            ("prev" | "previous", None) => Self::Previous,
            ("shuffle", None) => Self::ToggleShuffle,
            ("repeat", None) => Self::ToggleRepeat,
            ("clear", None) => Self::Clear,
            ("select", arg @ Some(_)) => Self::Select(index(arg)?),
            ("remove", arg @ Some(_)) => Self::Remove(index(arg)?),
            ("seek", Some(arg)) => Self::Seek(arg.parse().map_err(|_| unknown())?),
            _ => return Err(unknown()),
        };

        Ok(command)
    }
}

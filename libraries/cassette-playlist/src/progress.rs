//! Progress bar projection
//!
//! Turns the engine's position and duration into what the progress bar shows.

use serde::{Deserialize, Serialize};

/// Displayable progress of the active track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    /// Elapsed share of the track, 0-100
    pub percent: f64,

    /// Elapsed time as `m:ss`
    pub current: String,

    /// Track length as `m:ss`
    pub total: String,
}

impl Progress {
    /// Project engine time into a progress bar state
    ///
    /// Returns `None` until a usable duration is known (missing, zero,
    /// negative or not finite), in which case the bar is left untouched.
    pub fn from_times(current_time: f64, duration: Option<f64>) -> Option<Self> {
        let duration = duration.filter(|d| d.is_finite() && *d > 0.0)?;
        let current_time = if current_time.is_finite() {
            current_time.clamp(0.0, duration)
        } else {
            0.0
        };

        Some(Self {
            percent: current_time / duration * 100.0,
            current: format_time(current_time),
            total: format_time(duration),
        })
    }
}

/// Format seconds as `m:ss`
///
/// Minutes are not padded, seconds always two digits. Fractions are
/// truncated; negative or non-finite input renders as `0:00`.
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}

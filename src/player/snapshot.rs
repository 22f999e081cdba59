use super::PlayerError;

/// Published state of a [`PlaybackCore`](super::PlaybackCore).
///
/// The view renders exclusively from this; it never talks to the backend.
#[derive(Clone, Debug, PartialEq)]
pub struct PlaybackSnapshot {
    pub display_name: String,
    pub is_playing: bool,
    /// `current_time / duration`, always within `0.0..=1.0`
    pub progress: f64,
    /// Seconds. Fixed once the sound has loaded, `0.0` if it never did.
    pub duration: f64,
    pub formatted_duration: String,
    pub formatted_progress: String,
    pub volume: f32,
    pub looping: bool,
    pub last_error: Option<PlayerError>,
}

impl Default for PlaybackSnapshot {
    fn default() -> Self {
        PlaybackSnapshot {
            display_name: String::new(),
            is_playing: false,
            progress: 0.0,
            duration: 0.0,
            formatted_duration: String::new(),
            formatted_progress: String::from("00:00"),
            volume: 1.0,
            looping: false,
            last_error: None,
        }
    }
}

impl PlaybackSnapshot {
    /// Transport controls do nothing once loading has failed.
    pub fn is_inert(&self) -> bool {
        self.last_error.is_some()
    }
}

mod backend;
mod backend_rodio;
mod bundle;
mod engine;
mod error;
mod handle;
mod observer;
mod snapshot;

#[cfg(test)]
pub(crate) mod fake;

pub use backend::{AudioBackend, FinishListener, FinishNotifier};
pub use backend_rodio::RodioBackend;
pub use bundle::Bundle;
pub use engine::PlaybackCore;
pub use error::PlayerError;
pub use handle::PlaybackController;
pub use observer::{Listeners, Subscription};
pub use snapshot::PlaybackSnapshot;

use crate::{SEEK_STEP, TimeStyle};
use std::time::Duration;

pub(crate) enum PlayerCommand {
    Play,
    Stop,
    Forward,
    Rewind,
    SetVolume(f32),
    AdjustVolume(f32),
    Shutdown,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerOptions {
    /// Initial volume, clamped into `0.0..=1.0`.
    pub volume: f32,
    /// Restart from the beginning whenever the sound finishes.
    pub looping: bool,
    pub seek_step: Duration,
    pub time_style: TimeStyle,
}

impl Default for PlayerOptions {
    fn default() -> Self {
        PlayerOptions {
            volume: 1.0,
            looping: false,
            seek_step: SEEK_STEP,
            time_style: TimeStyle::Padded,
        }
    }
}

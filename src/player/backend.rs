use crossbeam_channel::{Receiver, Sender, TrySendError};

/// The playback primitive wrapped by [`PlaybackCore`](super::PlaybackCore).
///
/// Implementations do the actual decoding and output. Times are in seconds.
pub trait AudioBackend {
    /// Start or resume playback. After a natural finish this restarts from 0.
    fn play(&mut self);

    /// Halt playback, keeping the current position.
    fn stop(&mut self);

    fn current_time(&self) -> f64;
    fn set_current_time(&mut self, secs: f64);

    /// Length of the loaded sound; never changes after loading.
    fn duration(&self) -> f64;

    fn volume(&self) -> f32;
    fn set_volume(&mut self, volume: f32);

    fn is_playing(&self) -> bool;

    /// Register where end-of-track notifications are delivered. Fired once
    /// per natural finish, never as a result of `stop`.
    fn set_finish_notifier(&mut self, notifier: FinishNotifier);
}

/// Receives end-of-track notifications.
pub trait FinishListener {
    fn playback_finished(&mut self);
}

#[derive(Clone)]
pub struct FinishNotifier {
    sender: Sender<()>,
}

impl FinishNotifier {
    pub fn new() -> (Self, Receiver<()>) {
        // One pending notification is enough, the listener only needs to know it happened
        let (sender, receiver) = crossbeam_channel::bounded(1);
        (FinishNotifier { sender }, receiver)
    }

    pub fn notify(&self) {
        match self.sender.try_send(()) {
            Ok(()) | Err(TrySendError::Full(_)) => (),
            Err(TrySendError::Disconnected(_)) => log::debug!("finish listener is gone"),
        }
    }
}

use super::{AudioBackend, FinishNotifier};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Default)]
pub(crate) struct FakeState {
    pub playing: bool,
    pub time: f64,
    pub duration: f64,
    pub volume: f32,
    pub play_calls: usize,
    pub stop_calls: usize,
    notifier: Option<FinishNotifier>,
}

/// Deterministic stand-in for a real output device. The clock only moves
/// when a test calls [`FakeBackend::advance`].
#[derive(Clone)]
pub(crate) struct FakeBackend {
    state: Arc<Mutex<FakeState>>,
}

impl FakeBackend {
    pub fn new(duration: f64) -> Self {
        FakeBackend {
            state: Arc::new(Mutex::new(FakeState {
                duration,
                volume: 1.0,
                ..Default::default()
            })),
        }
    }

    pub fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap()
    }

    /// Move the clock forward while playing, finishing at the end.
    pub fn advance(&self, secs: f64) {
        let reached_end = {
            let mut state = self.state();
            if !state.playing {
                return;
            }
            state.time += secs;
            state.time >= state.duration
        };
        if reached_end {
            self.finish();
        }
    }

    /// Natural end of track: the position resets and the notifier fires.
    pub fn finish(&self) {
        let notifier = {
            let mut state = self.state();
            state.playing = false;
            state.time = 0.0;
            state.notifier.clone()
        };
        if let Some(notifier) = notifier {
            notifier.notify();
        }
    }

    /// Something other than the controller halted output.
    pub fn interrupt(&self) {
        self.state().playing = false;
    }
}

impl AudioBackend for FakeBackend {
    fn play(&mut self) {
        let mut state = self.state();
        state.playing = true;
        state.play_calls += 1;
    }

    fn stop(&mut self) {
        let mut state = self.state();
        state.playing = false;
        state.stop_calls += 1;
    }

    fn current_time(&self) -> f64 {
        self.state().time
    }

    fn set_current_time(&mut self, secs: f64) {
        self.state().time = secs;
    }

    fn duration(&self) -> f64 {
        self.state().duration
    }

    fn volume(&self) -> f32 {
        self.state().volume
    }

    fn set_volume(&mut self, volume: f32) {
        self.state().volume = volume;
    }

    fn is_playing(&self) -> bool {
        self.state().playing
    }

    fn set_finish_notifier(&mut self, notifier: FinishNotifier) {
        self.state().notifier = Some(notifier);
    }
}

use super::{
    AudioBackend, FinishListener, FinishNotifier, Listeners, PlaybackSnapshot, PlayerError,
    PlayerOptions, Subscription,
};
use crate::{display_name, format_time};
use crossbeam_channel::Receiver;
use std::path::{Path, PathBuf};

/// Observable wrapper around a single loaded sound.
///
/// Every mutation happens through `&mut self`, so whoever owns the core
/// decides which thread the transport calls, the sampler and the finish
/// notifications run on. [`PlaybackController`](super::PlaybackController)
/// runs all three on one dedicated thread.
pub struct PlaybackCore<B: AudioBackend> {
    source: PathBuf,
    backend: Option<B>,
    options: PlayerOptions,
    finished: Receiver<()>,

    snapshot: PlaybackSnapshot,
    published: PlaybackSnapshot,
    listeners: Listeners,
}

impl<B: AudioBackend> PlaybackCore<B> {
    /// Open `source` with `open` and wrap the result.
    ///
    /// A failed open still produces a core. It carries the error in its
    /// snapshot and ignores every transport call.
    pub fn load<F>(source: impl Into<PathBuf>, options: PlayerOptions, open: F) -> Self
    where
        F: FnOnce(&Path) -> anyhow::Result<B>,
    {
        let source = source.into();
        let volume = options.volume.clamp(0.0, 1.0);

        let mut snapshot = PlaybackSnapshot {
            display_name: display_name(&source),
            volume,
            looping: options.looping,
            formatted_progress: format_time(0.0, options.time_style),
            formatted_duration: format_time(0.0, options.time_style),
            ..Default::default()
        };

        let (backend, finished) = match open(source.as_path()) {
            Ok(mut backend) => {
                let (notifier, finished) = FinishNotifier::new();
                backend.set_volume(volume);
                backend.set_finish_notifier(notifier);

                snapshot.duration = backend.duration();
                snapshot.formatted_duration = format_time(snapshot.duration, options.time_style);

                log::info!(
                    "loaded {} ({})",
                    source.display(),
                    snapshot.formatted_duration
                );
                (Some(backend), finished)
            }
            Err(e) => {
                let err = PlayerError::load_failed(&source, &e);
                log::warn!("{err}");
                snapshot.last_error = Some(err);
                (None, crossbeam_channel::never())
            }
        };

        PlaybackCore {
            source,
            backend,
            options: PlayerOptions { volume, ..options },
            finished,
            published: snapshot.clone(),
            snapshot,
            listeners: Listeners::new(),
        }
    }

    /// Share an existing listener registry instead of the core's own.
    pub fn with_listeners(mut self, listeners: Listeners) -> Self {
        self.listeners = listeners;
        self
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn snapshot(&self) -> &PlaybackSnapshot {
        &self.snapshot
    }

    pub fn is_loaded(&self) -> bool {
        self.backend.is_some()
    }

    pub fn current_time(&self) -> Option<f64> {
        self.backend.as_ref().map(|b| b.current_time())
    }

    /// Fires once per natural end of track. Never fires if loading failed.
    pub fn finish_events(&self) -> &Receiver<()> {
        &self.finished
    }

    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: FnMut(&PlaybackSnapshot) + Send + 'static,
    {
        self.listeners.subscribe(listener)
    }
}

// =====================
//    TRANSPORT
// =====================
impl<B: AudioBackend> PlaybackCore<B> {
    /// Resume from where the sound last left off.
    pub fn play(&mut self) {
        let Some(backend) = self.backend.as_mut() else {
            return;
        };
        self.snapshot.is_playing = true;
        backend.play();
        self.publish();
    }

    /// Pause. The position is kept for the next `play`.
    pub fn stop(&mut self) {
        let Some(backend) = self.backend.as_mut() else {
            return;
        };
        self.snapshot.is_playing = false;
        backend.stop();
        self.publish();
    }

    /// Skip ahead one seek step, clamping to the end of the sound.
    pub fn forward(&mut self) {
        let step = self.options.seek_step.as_secs_f64();
        let duration = self.snapshot.duration;
        let Some(backend) = self.backend.as_mut() else {
            return;
        };

        let target = backend.current_time() + step;
        match target < duration {
            true => backend.set_current_time(target),
            false => backend.set_current_time(duration),
        }

        self.refresh_progress();
        self.publish();
    }

    /// Skip back one seek step, clamping to the start of the sound.
    pub fn rewind(&mut self) {
        let step = self.options.seek_step.as_secs_f64();
        let Some(backend) = self.backend.as_mut() else {
            return;
        };

        let target = backend.current_time() - step;
        match target < 0.0 {
            true => backend.set_current_time(0.0),
            false => backend.set_current_time(target),
        }

        self.refresh_progress();
        self.publish();
    }

    pub fn set_volume(&mut self, volume: f32) {
        let volume = volume.clamp(0.0, 1.0);
        self.options.volume = volume;
        self.snapshot.volume = volume;

        if let Some(backend) = self.backend.as_mut() {
            backend.set_volume(volume);
        }
        self.publish();
    }

    pub fn adjust_volume(&mut self, delta: f32) {
        self.set_volume(self.options.volume + delta);
    }

    /// Reconcile published state with the backend.
    ///
    /// Meant to run on a fixed cadence whether or not anything is playing.
    /// This is what notices a sound that ended or was halted externally.
    pub fn sample(&mut self) {
        let Some(backend) = self.backend.as_ref() else {
            return;
        };

        if !backend.is_playing() {
            self.snapshot.is_playing = false;
        }
        self.refresh_progress();
        self.publish();
    }

    fn refresh_progress(&mut self) {
        let Some(backend) = self.backend.as_ref() else {
            return;
        };

        let current = backend.current_time();
        let duration = self.snapshot.duration;

        self.snapshot.progress = match duration > 0.0 {
            true => (current / duration).clamp(0.0, 1.0),
            false => 0.0,
        };
        self.snapshot.formatted_progress = format_time(current, self.options.time_style);
    }

    fn publish(&mut self) {
        if self.snapshot != self.published {
            self.published.clone_from(&self.snapshot);
            self.listeners.notify(&self.snapshot);
        }
    }
}

impl<B: AudioBackend> FinishListener for PlaybackCore<B> {
    fn playback_finished(&mut self) {
        log::debug!("finished playing {}", self.source.display());

        match self.options.looping {
            true => self.play(),
            false => {
                self.snapshot.is_playing = false;
                self.publish();
            }
        }
    }
}

impl<B: AudioBackend> Drop for PlaybackCore<B> {
    fn drop(&mut self) {
        if let Some(backend) = self.backend.as_mut() {
            backend.stop();
        }
    }
}

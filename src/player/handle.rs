use super::{
    AudioBackend, Bundle, FinishListener, Listeners, PlaybackCore, PlaybackSnapshot,
    PlayerCommand, PlayerOptions, RodioBackend, Subscription,
};
use crate::SAMPLE_INTERVAL;
use anyhow::Result;
use crossbeam_channel::{Receiver, Sender, select};
use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
    thread::{self, JoinHandle},
};

/// Owns a [`PlaybackCore`] running on its own thread.
///
/// Transport calls, sampler ticks and finish notifications are all applied
/// on that thread, one at a time. The latest published state can be read
/// from any thread through [`PlaybackController::snapshot`].
pub struct PlaybackController {
    commands: Sender<PlayerCommand>,
    snapshot: Arc<Mutex<PlaybackSnapshot>>,
    listeners: Listeners,
    thread: Option<JoinHandle<()>>,
}

impl PlaybackController {
    /// Load `path` on the default output device.
    ///
    /// Blocks until loading has finished. A sound that fails to load still
    /// yields a controller, see [`PlaybackSnapshot::last_error`].
    pub fn open(path: impl Into<PathBuf>, options: PlayerOptions) -> Self {
        Self::spawn(path, options, RodioBackend::open)
    }

    /// Load the resource called `name` from `bundle`. `None` if the bundle has
    /// no such resource.
    pub fn from_bundle(name: &str, bundle: &Bundle, options: PlayerOptions) -> Option<Self> {
        let path = bundle.resolve(name)?;
        Some(Self::open(path, options))
    }

    /// Load `path` with a custom backend. `open` runs on the player thread, so
    /// the backend itself never has to cross threads.
    pub fn spawn<B, F>(path: impl Into<PathBuf>, options: PlayerOptions, open: F) -> Self
    where
        B: AudioBackend + 'static,
        F: FnOnce(&Path) -> anyhow::Result<B> + Send + 'static,
    {
        let path = path.into();
        let (cmd_tx, cmd_rx) = crossbeam_channel::unbounded();
        let (ready_tx, ready_rx) = crossbeam_channel::bounded(1);

        let listeners = Listeners::new();
        let snapshot = Arc::new(Mutex::new(PlaybackSnapshot::default()));

        let core_listeners = listeners.clone();
        let core_snapshot = Arc::clone(&snapshot);

        let thread = thread::spawn(move || {
            let core = PlaybackCore::load(path, options, open).with_listeners(core_listeners);

            if let Ok(mut shared) = core_snapshot.lock() {
                shared.clone_from(core.snapshot());
            }
            // Registered first, so other listeners already see the new state
            // when they read it back through the controller
            let _mirror = core.subscribe(move |s: &PlaybackSnapshot| {
                if let Ok(mut shared) = core_snapshot.lock() {
                    shared.clone_from(s);
                }
            });

            let _ = ready_tx.send(());
            run(core, cmd_rx);
        });

        let _ = ready_rx.recv();

        PlaybackController {
            commands: cmd_tx,
            snapshot,
            listeners,
            thread: Some(thread),
        }
    }
}

fn run<B: AudioBackend>(mut core: PlaybackCore<B>, commands: Receiver<PlayerCommand>) {
    let ticker = crossbeam_channel::tick(SAMPLE_INTERVAL);
    let finished = core.finish_events().clone();

    log::debug!("player thread started for {}", core.source().display());

    loop {
        select! {
            recv(commands) -> cmd => match cmd {
                Ok(PlayerCommand::Play)            => core.play(),
                Ok(PlayerCommand::Stop)            => core.stop(),
                Ok(PlayerCommand::Forward)         => core.forward(),
                Ok(PlayerCommand::Rewind)          => core.rewind(),
                Ok(PlayerCommand::SetVolume(v))    => core.set_volume(v),
                Ok(PlayerCommand::AdjustVolume(d)) => core.adjust_volume(d),
                Ok(PlayerCommand::Shutdown) | Err(_) => break,
            },
            recv(finished) -> _ => core.playback_finished(),
            recv(ticker) -> _ => core.sample(),
        }
    }

    log::debug!("player thread stopping for {}", core.source().display());
}

// =====================
//    COMMAND HANDLER
// =====================
impl PlaybackController {
    /// Play from where the sound last left off.
    pub fn play(&self) -> Result<()> {
        self.commands.send(PlayerCommand::Play)?;
        Ok(())
    }

    /// Pause, keeping the position.
    pub fn stop(&self) -> Result<()> {
        self.commands.send(PlayerCommand::Stop)?;
        Ok(())
    }

    pub fn forward(&self) -> Result<()> {
        self.commands.send(PlayerCommand::Forward)?;
        Ok(())
    }

    pub fn rewind(&self) -> Result<()> {
        self.commands.send(PlayerCommand::Rewind)?;
        Ok(())
    }

    pub fn set_volume(&self, volume: f32) -> Result<()> {
        self.commands.send(PlayerCommand::SetVolume(volume))?;
        Ok(())
    }

    /// Change the volume by `delta`, relative to wherever the player has it.
    pub fn adjust_volume(&self, delta: f32) -> Result<()> {
        self.commands.send(PlayerCommand::AdjustVolume(delta))?;
        Ok(())
    }
}

// ===============
//    ACCESSORS
// ===============
impl PlaybackController {
    pub fn snapshot(&self) -> PlaybackSnapshot {
        self.snapshot
            .lock()
            .map(|s| s.clone())
            .unwrap_or_else(|e| e.into_inner().clone())
    }

    pub fn is_playing(&self) -> bool {
        self.snapshot().is_playing
    }

    pub fn volume(&self) -> f32 {
        self.snapshot().volume
    }

    /// Listeners run on the player thread right after each change.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: FnMut(&PlaybackSnapshot) + Send + 'static,
    {
        self.listeners.subscribe(listener)
    }
}

impl Drop for PlaybackController {
    fn drop(&mut self) {
        let _ = self.commands.send(PlayerCommand::Shutdown);
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                log::error!("player thread panicked");
            }
        }
    }
}

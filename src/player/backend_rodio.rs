use super::{AudioBackend, FinishNotifier};
use anyhow::{Context, Result};
use lofty::{file::AudioFile, read_from_path};
use rodio::{
    ChannelCount, Decoder, OutputStream, OutputStreamBuilder, Sample, SampleRate, Sink, Source,
};
use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

type Notifier = Arc<Mutex<Option<FinishNotifier>>>;

/// [`AudioBackend`] playing through the default output device.
pub struct RodioBackend {
    path: PathBuf,
    sink: Sink,
    duration: f64,
    notifier: Notifier,
    /// Set by [`EndSignal`] when the decoder runs dry. The sink only drops
    /// its count of queued sounds after that, so `sink.empty()` lags behind.
    ended: Arc<AtomicBool>,
    _stream: Option<OutputStream>,
}

impl RodioBackend {
    /// Decode `path` and queue it, paused, on the default output device.
    pub fn open(path: &Path) -> Result<Self> {
        let source = decode(path)?;
        let duration = source
            .total_duration()
            .or_else(|| probe_duration(path))
            .map(|d| d.as_secs_f64())
            .unwrap_or_default();

        let stream = OutputStreamBuilder::open_default_stream()
            .context("Could not open the default audio output device")?;
        let sink = Sink::connect_new(stream.mixer());

        let mut backend = Self::attach(path, sink, source, duration);
        backend._stream = Some(stream);
        Ok(backend)
    }

    /// Wrap a sink that is already connected to some output.
    fn attach(path: &Path, sink: Sink, source: Decoder<BufReader<File>>, duration: f64) -> Self {
        let backend = RodioBackend {
            path: path.to_path_buf(),
            sink,
            duration,
            notifier: Notifier::default(),
            ended: Arc::new(AtomicBool::new(false)),
            _stream: None,
        };
        backend.queue(source);
        backend
    }

    /// Append `source` to a paused sink. Only `play` unpauses.
    fn queue(&self, source: Decoder<BufReader<File>>) {
        self.sink.pause();
        self.ended.store(false, Ordering::SeqCst);
        self.sink.append(EndSignal::new(
            source,
            Arc::clone(&self.notifier),
            Arc::clone(&self.ended),
        ));
    }

    fn has_ended(&self) -> bool {
        self.ended.load(Ordering::SeqCst) || self.sink.empty()
    }

    /// A finished sound has to be decoded again before it can be played or
    /// seeked.
    fn ensure_queued(&mut self) -> Result<()> {
        if self.has_ended() {
            let source = decode(&self.path)?;
            self.queue(source);
        }
        Ok(())
    }
}

impl AudioBackend for RodioBackend {
    fn play(&mut self) {
        if let Err(e) = self.ensure_queued() {
            log::warn!("could not requeue {}: {e:#}", self.path.display());
            return;
        }
        self.sink.play();
    }

    fn stop(&mut self) {
        self.sink.pause();
    }

    fn current_time(&self) -> f64 {
        match self.has_ended() {
            true => 0.0,
            false => self.sink.get_pos().as_secs_f64(),
        }
    }

    fn set_current_time(&mut self, secs: f64) {
        if let Err(e) = self.ensure_queued() {
            log::warn!("could not requeue {}: {e:#}", self.path.display());
            return;
        }

        let target = Duration::from_secs_f64(secs.max(0.0));
        if let Err(e) = self.sink.try_seek(target) {
            log::warn!("seek to {secs:.1}s failed: {e}");
        }
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn volume(&self) -> f32 {
        self.sink.volume()
    }

    fn set_volume(&mut self, volume: f32) {
        self.sink.set_volume(volume);
    }

    fn is_playing(&self) -> bool {
        !self.sink.is_paused() && !self.has_ended()
    }

    fn set_finish_notifier(&mut self, notifier: FinishNotifier) {
        if let Ok(mut slot) = self.notifier.lock() {
            *slot = Some(notifier);
        }
    }
}

fn decode(path: &Path) -> Result<Decoder<BufReader<File>>> {
    let file = File::open(path).with_context(|| format!("Could not open {}", path.display()))?;
    let len = file.metadata()?.len();

    let mut builder = Decoder::builder()
        .with_data(BufReader::new(file))
        .with_byte_len(len)
        .with_seekable(true);

    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        let hint = match ext {
            "adif" | "adts" => "aac",
            "caf" => "audio/x-caf",
            "m4a" | "m4b" | "m4p" | "m4r" | "mp4" => "audio/mp4",
            "bit" | "mpga" => "mp3",
            "mka" | "mkv" => "audio/matroska",
            "oga" | "ogm" | "ogv" | "ogx" | "spx" => "audio/ogg",
            "wave" => "wav",
            _ => ext,
        };
        builder = builder.with_hint(hint);
    }

    builder.build().context("Unsupported or corrupt audio data")
}

/// Some decoders cannot tell their length up front, the container usually can.
fn probe_duration(path: &Path) -> Option<Duration> {
    match read_from_path(path) {
        Ok(file) => Some(file.properties().duration()).filter(|d| !d.is_zero()),
        Err(e) => {
            log::debug!("no duration for {}: {e}", path.display());
            None
        }
    }
}

/// Passes samples through and reports when the inner source runs dry.
struct EndSignal<I> {
    input: I,
    notifier: Notifier,
    ended: Arc<AtomicBool>,
    fired: bool,
}

impl<I> EndSignal<I> {
    fn new(input: I, notifier: Notifier, ended: Arc<AtomicBool>) -> Self {
        EndSignal {
            input,
            notifier,
            ended,
            fired: false,
        }
    }
}

impl<I: Source> Iterator for EndSignal<I> {
    type Item = Sample;

    fn next(&mut self) -> Option<Self::Item> {
        let sample = self.input.next();
        if sample.is_none() && !self.fired {
            self.fired = true;
            // Flag first, so a listener reacting to the notification sees the end
            self.ended.store(true, Ordering::SeqCst);
            if let Ok(slot) = self.notifier.lock() {
                if let Some(notifier) = slot.as_ref() {
                    notifier.notify();
                }
            }
        }
        sample
    }
}

impl<I: Source> Source for EndSignal<I> {
    fn current_span_len(&self) -> Option<usize> {
        self.input.current_span_len()
    }

    fn channels(&self) -> ChannelCount {
        self.input.channels()
    }

    fn sample_rate(&self) -> SampleRate {
        self.input.sample_rate()
    }

    fn total_duration(&self) -> Option<Duration> {
        self.input.total_duration()
    }

    fn try_seek(&mut self, pos: Duration) -> Result<(), rodio::source::SeekError> {
        self.input.try_seek(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::Receiver;
    use rodio::{queue::SourcesQueueOutput, source::SineWave};
    use std::{
        io::Write,
        thread::{self, JoinHandle},
        time::Instant,
    };

    /// 16 bit mono PCM square wave.
    fn write_wav(path: &Path, secs: f32) {
        let rate = 8000u32;
        let samples = (rate as f32 * secs) as u32;
        let data_len = samples * 2;

        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"RIFF");
        bytes.extend_from_slice(&(36 + data_len).to_le_bytes());
        bytes.extend_from_slice(b"WAVEfmt ");
        bytes.extend_from_slice(&16u32.to_le_bytes());
        bytes.extend_from_slice(&1u16.to_le_bytes());
        bytes.extend_from_slice(&1u16.to_le_bytes());
        bytes.extend_from_slice(&rate.to_le_bytes());
        bytes.extend_from_slice(&(rate * 2).to_le_bytes());
        bytes.extend_from_slice(&2u16.to_le_bytes());
        bytes.extend_from_slice(&16u16.to_le_bytes());
        bytes.extend_from_slice(b"data");
        bytes.extend_from_slice(&data_len.to_le_bytes());
        for i in 0..samples {
            let v: i16 = if i % 16 < 8 { 8000 } else { -8000 };
            bytes.extend_from_slice(&v.to_le_bytes());
        }

        std::fs::write(path, bytes).unwrap();
    }

    /// Pulls samples out of a detached sink, standing in for the device.
    struct Output {
        running: Arc<AtomicBool>,
        thread: Option<JoinHandle<()>>,
    }

    impl Output {
        fn drive(mut queue: SourcesQueueOutput) -> Self {
            let running = Arc::new(AtomicBool::new(true));
            let flag = Arc::clone(&running);
            let thread = thread::spawn(move || {
                while flag.load(Ordering::SeqCst) {
                    for _ in 0..256 {
                        queue.next();
                    }
                    thread::sleep(Duration::from_millis(1));
                }
            });
            Output {
                running,
                thread: Some(thread),
            }
        }
    }

    impl Drop for Output {
        fn drop(&mut self) {
            self.running.store(false, Ordering::SeqCst);
            if let Some(thread) = self.thread.take() {
                let _ = thread.join();
            }
        }
    }

    fn detached(path: &Path) -> (RodioBackend, SourcesQueueOutput, Receiver<()>) {
        let (sink, queue) = Sink::new();
        let mut backend = RodioBackend::attach(path, sink, decode(path).unwrap(), 0.1);
        let (notifier, finished) = FinishNotifier::new();
        backend.set_finish_notifier(notifier);
        (backend, queue, finished)
    }

    fn wait_until(mut cond: impl FnMut() -> bool) -> bool {
        let deadline = Instant::now() + Duration::from_secs(3);
        while Instant::now() < deadline {
            if cond() {
                return true;
            }
            thread::sleep(Duration::from_millis(2));
        }
        cond()
    }

    #[test]
    fn garbage_is_rejected_before_touching_the_device() {
        let mut file = tempfile::Builder::new().suffix(".wav").tempfile().unwrap();
        file.write_all(b"definitely not a riff header").unwrap();

        let err = RodioBackend::open(file.path()).err().unwrap();
        assert!(format!("{err:#}").contains("Unsupported or corrupt audio data"));
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = RodioBackend::open(Path::new("/nonexistent/clip.mp3"))
            .err()
            .unwrap();
        assert!(err.to_string().contains("/nonexistent/clip.mp3"));
    }

    #[test]
    fn end_signal_fires_once_when_exhausted() {
        let notifier = Notifier::default();
        let (tx, finished) = FinishNotifier::new();
        *notifier.lock().unwrap() = Some(tx);
        let ended = Arc::new(AtomicBool::new(false));

        let tone = SineWave::new(440.0).take_duration(Duration::from_millis(10));
        let mut signal = EndSignal::new(tone, Arc::clone(&notifier), Arc::clone(&ended));

        for _ in 0..100 {
            assert!(signal.next().is_some());
        }
        assert!(finished.try_recv().is_err());
        assert!(!ended.load(Ordering::SeqCst));

        while signal.next().is_some() {}
        assert!(ended.load(Ordering::SeqCst));
        assert!(finished.try_recv().is_ok());

        assert!(signal.next().is_none());
        assert!(finished.try_recv().is_err());
    }

    #[test]
    fn paused_sound_never_finishes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tick.wav");
        write_wav(&path, 0.05);

        let (backend, queue, finished) = detached(&path);
        let _output = Output::drive(queue);

        thread::sleep(Duration::from_millis(50));
        assert!(finished.try_recv().is_err());
        assert!(!backend.is_playing());
        assert_eq!(backend.sink.len(), 1);
    }

    #[test]
    fn seeking_after_the_end_requeues_paused() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tick.wav");
        write_wav(&path, 0.05);

        let (mut backend, queue, finished) = detached(&path);
        let _output = Output::drive(queue);

        backend.play();
        assert!(backend.is_playing());
        assert!(finished.recv_timeout(Duration::from_secs(3)).is_ok());
        assert!(wait_until(|| backend.sink.empty()));
        assert!(!backend.is_playing());
        assert_eq!(backend.current_time(), 0.0);

        backend.set_current_time(0.0);
        assert_eq!(backend.sink.len(), 1);
        assert!(backend.sink.is_paused());
        assert!(!backend.is_playing());

        thread::sleep(Duration::from_millis(30));
        assert!(finished.try_recv().is_err());

        backend.play();
        assert!(backend.is_playing());
        assert!(finished.recv_timeout(Duration::from_secs(3)).is_ok());
    }

    #[test]
    fn replay_requeues_before_the_sink_has_drained() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tick.wav");
        write_wav(&path, 0.05);

        // Nothing pulls from the sink, so the old sound stays counted. This is
        // the window between the end signal and rodio dropping the sound.
        let (mut backend, _queue, _finished) = detached(&path);
        backend.ended.store(true, Ordering::SeqCst);
        assert!(!backend.sink.empty());
        assert!(!backend.is_playing());
        assert_eq!(backend.current_time(), 0.0);

        backend.play();
        assert_eq!(backend.sink.len(), 2);
        assert!(backend.is_playing());
    }
}

//! Audio cue sinks.  Playback is fire-and-forget: a cue that cannot be played
//! is logged and dropped, never reported to the caller.

use std::io::Write;

use crate::entities::AudioCue;
#[cfg(feature = "audio")]
use crate::error::GameError;
use crate::error::GameResult;

pub trait AudioSink {
    fn play(&mut self, cue: AudioCue);
}

/// Which sink `acquire` builds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AudioMode {
    #[default]
    Silent,
    Bell,
    Tones,
}

/// Build the sink for `mode`.  Only the tone synthesizer touches an audio
/// device, and failing to open it is fatal.
pub fn acquire(mode: AudioMode) -> GameResult<Box<dyn AudioSink>> {
    match mode {
        AudioMode::Silent => Ok(Box::new(SilentAudio)),
        AudioMode::Bell => Ok(Box::new(TerminalBell::new(std::io::stdout()))),
        AudioMode::Tones => tones(),
    }
}

#[cfg(feature = "audio")]
fn tones() -> GameResult<Box<dyn AudioSink>> {
    Ok(Box::new(ToneAudio::new()?))
}

#[cfg(not(feature = "audio"))]
fn tones() -> GameResult<Box<dyn AudioSink>> {
    tracing::warn!("built without the `audio` feature; tones fall back to the terminal bell");
    Ok(Box::new(TerminalBell::new(std::io::stdout())))
}

// ── Silent ────────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct SilentAudio;

impl AudioSink for SilentAudio {
    fn play(&mut self, cue: AudioCue) {
        tracing::trace!(?cue, "audio cue (silent)");
    }
}

// ── Terminal bell ─────────────────────────────────────────────────────────────

/// Rings the terminal bell on hits and points; flaps and menu swooshes would
/// be too noisy as bells and are skipped.
pub struct TerminalBell<W: Write> {
    out: W,
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> AudioSink for TerminalBell<W> {
    fn play(&mut self, cue: AudioCue) {
        if !matches!(cue, AudioCue::Hit | AudioCue::Score) {
            return;
        }
        let rung = self.out.write_all(b"\x07").and_then(|_| self.out.flush());
        if let Err(err) = rung {
            tracing::warn!(%err, ?cue, "terminal bell failed");
        }
    }
}

// ── Synthesized tones ─────────────────────────────────────────────────────────

#[cfg(feature = "audio")]
pub struct ToneAudio {
    _stream: rodio::OutputStream,
    handle: rodio::OutputStreamHandle,
}

#[cfg(feature = "audio")]
impl ToneAudio {
    pub fn new() -> GameResult<Self> {
        let (stream, handle) =
            rodio::OutputStream::try_default().map_err(|err| GameError::ResourceUnavailable {
                resource: "audio output",
                reason: err.to_string(),
            })?;
        Ok(Self {
            _stream: stream,
            handle,
        })
    }
}

#[cfg(feature = "audio")]
impl AudioSink for ToneAudio {
    fn play(&mut self, cue: AudioCue) {
        use std::time::Duration;

        use rodio::source::SineWave;
        use rodio::Source;

        let (freq, millis) = match cue {
            AudioCue::Flap => (660.0, 60),
            AudioCue::Hit => (140.0, 250),
            AudioCue::Score => (880.0, 120),
            AudioCue::MenuTransition => (440.0, 80),
        };
        match rodio::Sink::try_new(&self.handle) {
            Ok(sink) => {
                let source = SineWave::new(freq)
                    .take_duration(Duration::from_millis(millis))
                    .amplify(0.15);
                sink.append(source);
                sink.detach();
            }
            Err(err) => tracing::warn!(%err, ?cue, "audio cue dropped"),
        }
    }
}

//! Scoped ownership of the terminal and the audio sink.
//!
//! `RuntimeContext::acquire` puts the terminal into raw/alternate-screen mode,
//! starts the event reader and opens the audio sink.  Dropping the context
//! restores the terminal, on every exit path including errors and quit keys.

use std::io::{stdout, BufWriter, Stdout};

use crossterm::{
    cursor,
    event::{
        DisableMouseCapture, EnableMouseCapture, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};

use crate::audio::{self, AudioMode, AudioSink};
use crate::config::GameConfig;
use crate::display::TerminalRenderer;
use crate::error::{GameError, GameResult};
use crate::input::{spawn_event_reader, InputMapper, TerminalInput};
use crate::simulation::{FramePacer, Host};

pub struct RuntimeContext {
    renderer: TerminalRenderer<BufWriter<Stdout>>,
    input: TerminalInput,
    audio: Box<dyn AudioSink>,
    pacer: FramePacer,
    keyboard_enhanced: bool,
}

fn unavailable(err: std::io::Error) -> GameError {
    GameError::ResourceUnavailable {
        resource: "terminal",
        reason: err.to_string(),
    }
}

impl RuntimeContext {
    pub fn acquire(config: &GameConfig, audio_mode: AudioMode) -> GameResult<Self> {
        // Open audio first so a failure leaves the terminal untouched.
        let audio = audio::acquire(audio_mode)?;

        terminal::enable_raw_mode().map_err(unavailable)?;
        let mut out = stdout();
        let entered = out
            .execute(terminal::EnterAlternateScreen)
            .and_then(|out| out.execute(cursor::Hide))
            .and_then(|out| out.execute(EnableMouseCapture));
        if let Err(err) = entered {
            restore(false);
            return Err(unavailable(err));
        }

        // Request key-release events from the terminal.
        // Kitty-protocol terminals support this; others fall back gracefully.
        // Pushing the flags succeeds even where they are ignored, so ask first.
        let keyboard_enhanced = matches!(terminal::supports_keyboard_enhancement(), Ok(true))
            && out
                .execute(PushKeyboardEnhancementFlags(
                    KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
                ))
                .is_ok();
        tracing::info!(keyboard_enhanced, ?audio_mode, "runtime acquired");

        let input = TerminalInput::new(spawn_event_reader(), InputMapper::new(keyboard_enhanced));
        let renderer = TerminalRenderer::new(BufWriter::new(stdout()), config.numerals.clone());

        Ok(Self {
            renderer,
            input,
            audio,
            pacer: FramePacer::new(config.tick_duration()),
            keyboard_enhanced,
        })
    }

    pub fn host(&mut self) -> Host<'_> {
        Host {
            input: &mut self.input,
            renderer: &mut self.renderer,
            audio: self.audio.as_mut(),
            pacer: &mut self.pacer,
        }
    }
}

impl Drop for RuntimeContext {
    fn drop(&mut self) {
        restore(self.keyboard_enhanced);
        tracing::info!("runtime released");
    }
}

fn restore(keyboard_enhanced: bool) {
    let mut out = stdout();
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
}

//! The game's state machine: AwaitingStart → Playing → GameOver → AwaitingStart.
//!
//! The loop owns the session and drives it in lockstep with rendering.  Input,
//! rendering, audio and tick pacing are reached only through the traits below,
//! so the whole machine runs headless under test.

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use rand::Rng;

use crate::animation::{AnimationTable, FrameImage};
use crate::audio::AudioSink;
use crate::compute::{init_session, step, Session, TickOutcome};
use crate::config::GameConfig;
use crate::entities::{AudioCue, Intent, PlayField, Rect, TextureTag};
use crate::error::GameResult;
use crate::input::IntentBatch;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    AwaitingStart,
    Playing,
    GameOver,
}

// ── Boundary contracts ────────────────────────────────────────────────────────

/// Snapshot handed to the renderer.  Owned, so drawing cannot touch the
/// simulation.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderFrame {
    pub field: PlayField,
    pub obstacles: Vec<(Rect, TextureTag)>,
    pub actor: FrameImage,
    pub actor_box: Rect,
    pub actor_center: (i32, i32),
    pub score: u32,
}

pub trait InputSource {
    /// Block until an intent relevant to `phase` arrives.
    fn wait(&mut self, phase: Phase) -> Intent;
    /// Everything that arrived since the last call, coalesced.  Never blocks.
    fn drain(&mut self, phase: Phase) -> IntentBatch;
    fn discard_pending(&mut self);
}

pub trait Renderer {
    fn title(&mut self, frame: &RenderFrame) -> GameResult<()>;
    fn frame(&mut self, frame: &RenderFrame) -> GameResult<()>;
    fn game_over(&mut self, frame: &RenderFrame) -> GameResult<()>;
}

/// Caps the Playing loop at the configured tick rate.
pub trait Pacer {
    fn start_tick(&mut self);
    fn finish_tick(&mut self);
}

pub struct FramePacer {
    period: Duration,
    started: Instant,
}

impl FramePacer {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            started: Instant::now(),
        }
    }
}

impl Pacer for FramePacer {
    fn start_tick(&mut self) {
        self.started = Instant::now();
    }

    fn finish_tick(&mut self) {
        let elapsed = self.started.elapsed();
        if elapsed < self.period {
            thread::sleep(self.period - elapsed);
        }
    }
}

/// The external collaborators one run talks to.
pub struct Host<'a> {
    pub input: &'a mut dyn InputSource,
    pub renderer: &'a mut dyn Renderer,
    pub audio: &'a mut dyn AudioSink,
    pub pacer: &'a mut dyn Pacer,
}

// ── Loop ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub sessions: u32,
    pub best_score: u32,
}

enum PlayEnd {
    GameOver,
    Quit,
}

pub struct SimulationLoop<R: Rng> {
    config: GameConfig,
    table: Arc<AnimationTable>,
    rng: R,
}

impl<R: Rng> SimulationLoop<R> {
    /// Validates the configuration and the animation table up front, so a
    /// missing action aborts before the first screen.
    pub fn new(config: GameConfig, table: Arc<AnimationTable>, rng: R) -> GameResult<Self> {
        config.validate()?;
        table.validate()?;
        Ok(Self { config, table, rng })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn new_session(&self) -> GameResult<Session> {
        init_session(&self.config, Arc::clone(&self.table))
    }

    /// Run until the player quits.
    pub fn run(&mut self, host: &mut Host<'_>) -> GameResult<RunSummary> {
        let mut summary = RunSummary::default();
        let mut session = self.new_session()?;
        let mut phase = Phase::AwaitingStart;

        loop {
            phase = match phase {
                Phase::AwaitingStart => {
                    host.renderer.title(&session.render_frame())?;
                    if !wait_for(host, Phase::AwaitingStart, Intent::StartGesture) {
                        break;
                    }
                    host.audio.play(AudioCue::MenuTransition);
                    host.input.discard_pending();
                    summary.sessions += 1;
                    tracing::info!(session = summary.sessions, "session started");
                    Phase::Playing
                }
                Phase::Playing => {
                    let end = self.play(&mut session, host)?;
                    summary.best_score = summary.best_score.max(session.score.current_score());
                    match end {
                        PlayEnd::GameOver => Phase::GameOver,
                        PlayEnd::Quit => break,
                    }
                }
                Phase::GameOver => {
                    host.renderer.game_over(&session.render_frame())?;
                    host.input.discard_pending();
                    if !wait_for(host, Phase::GameOver, Intent::AcknowledgeGesture) {
                        break;
                    }
                    host.audio.play(AudioCue::MenuTransition);
                    session = self.new_session()?;
                    Phase::AwaitingStart
                }
            };
        }

        tracing::info!(
            sessions = summary.sessions,
            best_score = summary.best_score,
            "simulation finished"
        );
        Ok(summary)
    }

    fn play(&mut self, session: &mut Session, host: &mut Host<'_>) -> GameResult<PlayEnd> {
        loop {
            host.pacer.start_tick();
            let intents = host.input.drain(Phase::Playing);
            match step(session, intents, &mut self.rng, &mut *host.audio) {
                TickOutcome::Continue => host.renderer.frame(&session.render_frame())?,
                TickOutcome::GameOver(_) => return Ok(PlayEnd::GameOver),
                TickOutcome::Quit => {
                    tracing::info!(tick = session.tick, "quit during play");
                    return Ok(PlayEnd::Quit);
                }
            }
            host.pacer.finish_tick();
        }
    }
}

/// Block until `wanted` arrives.  Returns `false` when the player quits.
fn wait_for(host: &mut Host<'_>, phase: Phase, wanted: Intent) -> bool {
    loop {
        match host.input.wait(phase) {
            Intent::Quit | Intent::Cancel => return false,
            intent if intent == wanted => return true,
            _ => {}
        }
    }
}

//! Per-tick game logic for the Playing state.
//!
//! `step` advances a `Session` by exactly one tick.  All randomness comes
//! through the injected RNG and all sound through the injected sink, so a
//! seeded RNG makes a session fully reproducible.

use std::sync::Arc;

use rand::Rng;

use crate::animation::{AnimatedActor, AnimationTable};
use crate::audio::AudioSink;
use crate::body::AxisAlignedBody;
use crate::config::{GameConfig, PhysicsConfig};
use crate::entities::{Action, ActorKind, AudioCue, Crash, GameStatus, PlayField};
use crate::error::GameResult;
use crate::input::IntentBatch;
use crate::obstacles::{ObstacleStream, StreamLayout};
use crate::score::ScoreTracker;
use crate::simulation::RenderFrame;

/// Outcome of a single tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    GameOver(Crash),
    Quit,
}

/// All per-session state.  Rebuilt from scratch for every new game.
#[derive(Clone, Debug)]
pub struct Session {
    pub actor: AnimatedActor,
    pub stream: ObstacleStream,
    pub score: ScoreTracker,
    /// Vertical velocity in units per tick; negative is upward.
    pub momentum: f64,
    /// Cause of the game over; `None` while still playing.
    pub crash: Option<Crash>,
    pub tick: u64,
    field: PlayField,
    physics: PhysicsConfig,
    table: Arc<AnimationTable>,
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial session: actor at its start position, every obstacle
/// pair at the spawn sentinel, no momentum, no score.
pub fn init_session(config: &GameConfig, table: Arc<AnimationTable>) -> GameResult<Session> {
    let (x, y) = config.actor_start();
    let body = AxisAlignedBody::new(x, y, config.actor.width, config.actor.height);
    let actor = AnimatedActor::new(ActorKind::Bird, body, &table)?;
    let stream = ObstacleStream::new(StreamLayout::from_config(config), config.obstacles.pair_count);

    Ok(Session {
        actor,
        stream,
        score: ScoreTracker::new(),
        momentum: 0.0,
        crash: None,
        tick: 0,
        field: config.field,
        physics: config.physics.clone(),
        table,
    })
}

impl Session {
    pub fn status(&self) -> GameStatus {
        if self.crash.is_some() {
            GameStatus::GameOver
        } else {
            GameStatus::Playing
        }
    }

    pub fn field(&self) -> PlayField {
        self.field
    }

    pub fn render_frame(&self) -> RenderFrame {
        RenderFrame {
            field: self.field,
            obstacles: self.stream.textured_boxes(),
            actor: self.actor.current_frame_image(),
            actor_box: self.actor.body().rect(),
            actor_center: self.actor.center(),
            score: self.score.current_score(),
        }
    }
}

// ── Tick ─────────────────────────────────────────────────────────────────────

/// Nose up while rising fast, otherwise tip forward a little each tick.
pub fn update_rotation(actor: &mut AnimatedActor, momentum: f64, physics: &PhysicsConfig) {
    if momentum <= physics.rising_threshold {
        actor.set_rotation(physics.rising_rotation);
    } else {
        let decayed = actor.rotation() - physics.rotation_decay;
        actor.set_rotation(decayed.max(physics.min_rotation));
    }
}

pub fn apply_gravity(momentum: f64, physics: &PhysicsConfig) -> f64 {
    (momentum + physics.gravity).min(physics.terminal_velocity)
}

/// Which boundary, if any, the actor's box has left through.
pub fn bounds_crash(actor: &AnimatedActor, field: PlayField) -> Option<Crash> {
    let rect = actor.body().rect();
    if rect.top < 0 {
        Some(Crash::Ceiling)
    } else if rect.bottom() > field.height as i32 {
        Some(Crash::Floor)
    } else {
        None
    }
}

/// Advance the session by one tick.
pub fn step(
    session: &mut Session,
    intents: IntentBatch,
    rng: &mut impl Rng,
    audio: &mut dyn AudioSink,
) -> TickOutcome {
    if let Some(crash) = session.crash {
        return TickOutcome::GameOver(crash);
    }
    session.tick += 1;

    // ── 1. Intents ───────────────────────────────────────────────────────────
    if intents.quit {
        return TickOutcome::Quit;
    }
    if intents.jump {
        session.momentum = session.physics.jump_impulse;
        audio.play(AudioCue::Flap);
    }

    // ── 2. Rotation ──────────────────────────────────────────────────────────
    update_rotation(&mut session.actor, session.momentum, &session.physics);

    // ── 3. Integrate against the current obstacles ───────────────────────────
    let boxes = session.stream.boxes();
    let collisions = session.actor.move_by((0.0, session.momentum), &boxes);

    // ── 4. Animation ─────────────────────────────────────────────────────────
    session.actor.advance_frame(1);

    // ── 5. Terminal conditions ───────────────────────────────────────────────
    let crash = if collisions.is_empty() {
        bounds_crash(&session.actor, session.field)
    } else {
        Some(Crash::Obstacle)
    };
    if let Some(crash) = crash {
        end_session(session, crash, audio);
        return TickOutcome::GameOver(crash);
    }

    // ── 6. Gravity ───────────────────────────────────────────────────────────
    session.momentum = apply_gravity(session.momentum, &session.physics);

    // ── 7. Obstacles and score ───────────────────────────────────────────────
    session.stream.regenerate_if_at_spawn_sentinel(rng);
    let advance = session.stream.advance(session.actor.body().rect().left);
    if advance.score_delta > 0 {
        session.score.record(advance.score_delta);
        audio.play(AudioCue::Score);
        tracing::debug!(score = session.score.current_score(), tick = session.tick, "point scored");
    }

    tracing::trace!(
        tick = session.tick,
        y = session.actor.body().position().1,
        momentum = session.momentum,
        "tick"
    );
    TickOutcome::Continue
}

fn end_session(session: &mut Session, crash: Crash, audio: &mut dyn AudioSink) {
    session.momentum = 0.0;
    session.crash = Some(crash);
    audio.play(AudioCue::Hit);

    if session.table.contains(session.actor.kind(), Action::Crash) {
        if let Err(err) = session.actor.select_action(&session.table, Action::Crash, false) {
            tracing::warn!(%err, "crash animation unavailable");
        }
    }

    tracing::info!(
        %crash,
        score = session.score.current_score(),
        tick = session.tick,
        "game over"
    );
}

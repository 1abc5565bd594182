//! Animation table and the animated actor that plays it.
//!
//! The table is loaded once (from RON, or the built-in copy) and handed to
//! actors explicitly.  Every actor type's required actions are checked at load
//! time so a missing entry never surfaces mid-game.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;

use crate::body::AxisAlignedBody;
use crate::entities::{Action, ActorKind, AnimationTag, Rect};
use crate::error::{GameError, GameResult};

const BUILTIN_TABLE: &str = include_str!("../assets/animations.ron");

// ── Table file format ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct TableFile {
    actors: HashMap<ActorKind, HashMap<Action, EntryFile>>,
}

#[derive(Deserialize)]
struct EntryFile {
    frames: Vec<FrameFile>,
    #[serde(default)]
    tags: Vec<AnimationTag>,
}

#[derive(Deserialize)]
struct FrameFile {
    id: String,
    #[serde(default = "default_hold")]
    hold: u32,
}

fn default_hold() -> u32 {
    1
}

// ── Table ─────────────────────────────────────────────────────────────────────

/// Identifier of a single animation frame image.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FrameId(Arc<str>);

impl FrameId {
    pub fn new(id: &str) -> Self {
        Self(Arc::from(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One expanded frame sequence plus its behaviour tags.
#[derive(Clone, Debug, PartialEq)]
pub struct Animation {
    frames: Vec<FrameId>,
    tags: Vec<AnimationTag>,
}

impl Animation {
    pub fn new(frames: Vec<FrameId>, tags: Vec<AnimationTag>) -> Self {
        Self { frames, tags }
    }

    pub fn frames(&self) -> &[FrameId] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn is_looping(&self) -> bool {
        self.tags.contains(&AnimationTag::Loop)
    }
}

#[derive(Clone, Debug, Default)]
pub struct AnimationTable {
    entries: HashMap<(ActorKind, Action), Arc<Animation>>,
}

impl AnimationTable {
    /// Table shipped with the game (`assets/animations.ron`).
    pub fn builtin() -> GameResult<Self> {
        Self::from_ron_str(BUILTIN_TABLE, "built-in animation table")
    }

    pub fn load(path: &Path) -> GameResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_ron_str(&text, &path.display().to_string())
    }

    pub fn from_ron_str(text: &str, origin: &str) -> GameResult<Self> {
        let file: TableFile = ron::from_str(text).map_err(|err| GameError::Parse {
            origin: origin.to_string(),
            message: err.to_string(),
        })?;

        let mut table = Self::default();
        for (actor, actions) in file.actors {
            for (action, entry) in actions {
                let frames = entry
                    .frames
                    .iter()
                    .flat_map(|frame| {
                        let id = FrameId::new(&frame.id);
                        std::iter::repeat(id).take(frame.hold as usize)
                    })
                    .collect();
                table.insert(actor, action, Animation::new(frames, entry.tags))?;
            }
        }
        table.validate()?;
        tracing::debug!(origin, entries = table.entries.len(), "animation table loaded");
        Ok(table)
    }

    pub fn insert(&mut self, actor: ActorKind, action: Action, animation: Animation) -> GameResult<()> {
        if animation.is_empty() {
            return Err(GameError::EmptyAnimation { actor, action });
        }
        self.entries.insert((actor, action), Arc::new(animation));
        Ok(())
    }

    /// Fails with `ConfigurationMissing` unless every actor type has its
    /// required actions.
    pub fn validate(&self) -> GameResult<()> {
        for actor in ActorKind::ALL {
            for &action in actor.required_actions() {
                self.get(actor, action)?;
            }
        }
        Ok(())
    }

    pub fn contains(&self, actor: ActorKind, action: Action) -> bool {
        self.entries.contains_key(&(actor, action))
    }

    pub fn get(&self, actor: ActorKind, action: Action) -> GameResult<Arc<Animation>> {
        self.entries
            .get(&(actor, action))
            .cloned()
            .ok_or(GameError::ConfigurationMissing { actor, action })
    }
}

// ── Actor ─────────────────────────────────────────────────────────────────────

/// Everything a renderer needs to draw the actor's current frame.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameImage {
    pub frame: FrameId,
    pub flip: bool,
    /// Degrees, counter-clockwise positive.
    pub rotation: f64,
    pub opacity: Option<u8>,
    pub offset: (i32, i32),
}

#[derive(Clone, Debug)]
pub struct AnimatedActor {
    kind: ActorKind,
    body: AxisAlignedBody,
    action: Action,
    animation: Arc<Animation>,
    frame: usize,
    flip: bool,
    rotation: f64,
    offset: (i32, i32),
    opacity: Option<u8>,
}

impl AnimatedActor {
    /// Creates the actor playing its `WingFlap` action.
    pub fn new(kind: ActorKind, body: AxisAlignedBody, table: &AnimationTable) -> GameResult<Self> {
        let animation = table.get(kind, Action::WingFlap)?;
        Ok(Self {
            kind,
            body,
            action: Action::WingFlap,
            animation,
            frame: 0,
            flip: false,
            rotation: 0.0,
            offset: (0, 0),
            opacity: None,
        })
    }

    /// Switch to `action` and restart it.  Re-selecting the current action is
    /// a no-op unless `force` is set.
    pub fn select_action(&mut self, table: &AnimationTable, action: Action, force: bool) -> GameResult<()> {
        if self.action == action && !force {
            return Ok(());
        }
        self.animation = table.get(self.kind, action)?;
        self.action = action;
        self.frame = 0;
        Ok(())
    }

    /// Move the frame index by `delta`, wrapping for looping animations and
    /// clamping to `[0, len - 1]` otherwise.
    pub fn advance_frame(&mut self, delta: i64) {
        let len = self.animation.len() as i64;
        let current = self.frame as i64;
        let index = if self.animation.is_looping() {
            (current + delta.rem_euclid(len)).rem_euclid(len)
        } else {
            current.saturating_add(delta).clamp(0, len - 1)
        };
        self.frame = index as usize;
    }

    pub fn current_frame_image(&self) -> FrameImage {
        FrameImage {
            frame: self.animation.frames()[self.frame].clone(),
            flip: self.flip,
            rotation: self.rotation,
            opacity: self.opacity,
            offset: self.offset,
        }
    }

    pub fn move_by(&mut self, delta: (f64, f64), candidates: &[Rect]) -> Vec<Rect> {
        self.body.move_by(delta, candidates)
    }

    /// Reposition the actor, keeping its size.
    pub fn place(&mut self, x: f64, y: f64) {
        let rect = self.body.rect();
        self.body = AxisAlignedBody::new(x, y, rect.width as u32, rect.height as u32);
    }

    pub fn body(&self) -> &AxisAlignedBody {
        &self.body
    }

    pub fn center(&self) -> (i32, i32) {
        let (cx, cy) = self.body.center();
        (cx + self.offset.0, cy + self.offset.1)
    }

    pub fn kind(&self) -> ActorKind {
        self.kind
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn frame_index(&self) -> usize {
        self.frame
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn set_rotation(&mut self, degrees: f64) {
        self.rotation = degrees;
    }

    pub fn set_flip(&mut self, flip: bool) {
        self.flip = flip;
    }

    pub fn set_offset(&mut self, offset: (i32, i32)) {
        self.offset = offset;
    }

    pub fn set_opacity(&mut self, opacity: Option<u8>) {
        self.opacity = opacity;
    }
}

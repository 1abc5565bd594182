//! Shared game data types: pure data, no logic beyond trivial accessors.

use std::fmt;

use serde::Deserialize;

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Integer bounding box.  `left`/`top` are the top-left corner; the box spans
/// `[left, left + width)` horizontally and `[top, top + height)` vertically.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self { left, top, width, height }
    }

    pub fn right(&self) -> i32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.top + self.height
    }

    /// Strict intersection: rectangles that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left < other.right()
            && other.left < self.right()
            && self.top < other.bottom()
            && other.top < self.bottom()
    }
}

/// Dimensions of the play field in world units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct PlayField {
    pub width: u32,
    pub height: u32,
}

// ── Session status ────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

/// Why a session ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Crash {
    Obstacle,
    Ceiling,
    Floor,
}

impl fmt::Display for Crash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Obstacle => write!(f, "obstacle"),
            Self::Ceiling => write!(f, "ceiling"),
            Self::Floor => write!(f, "floor"),
        }
    }
}

// ── Boundary vocabulary ───────────────────────────────────────────────────────

/// Discrete player intents produced by the input source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Intent {
    Jump,
    Quit,
    /// Escape.  Terminates the program from every state.
    Cancel,
    StartGesture,
    AcknowledgeGesture,
}

/// Named audio cues.  Playback is fire-and-forget.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AudioCue {
    Flap,
    Hit,
    Score,
    MenuTransition,
}

/// Which obstacle texture a box is drawn with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextureTag {
    /// Lower obstacle, drawn upright.
    Upright,
    /// Upper obstacle, drawn vertically flipped.
    Flipped,
}

// ── Animation keys ────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
pub enum ActorKind {
    Bird,
}

impl ActorKind {
    pub const ALL: [ActorKind; 1] = [ActorKind::Bird];

    /// Actions every table must define for this actor type.
    pub fn required_actions(&self) -> &'static [Action] {
        match self {
            Self::Bird => &[Action::WingFlap],
        }
    }
}

impl fmt::Display for ActorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bird => write!(f, "bird"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
pub enum Action {
    WingFlap,
    Crash,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WingFlap => write!(f, "wing_flap"),
            Self::Crash => write!(f, "crash"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
pub enum AnimationTag {
    /// Wrap the frame index instead of clamping it.
    Loop,
}

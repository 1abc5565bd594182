use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::entities::PlayField;
use crate::error::{GameError, GameResult};

/// Tunables for one game.  Every field has a default, so a config file only
/// needs to name what it changes.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub field: PlayField,
    pub tick_rate: u32,
    pub obstacles: ObstacleConfig,
    pub actor: ActorConfig,
    pub physics: PhysicsConfig,
    pub numerals: NumeralConfig,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ObstacleConfig {
    pub width: u32,
    pub height: u32,
    pub gap: u32,
    /// Leftward scroll per tick.
    pub speed: i32,
    pub pair_count: usize,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ActorConfig {
    pub start_x: f64,
    /// Defaults to the vertical middle of the play field.
    pub start_y: Option<f64>,
    pub width: u32,
    pub height: u32,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub jump_impulse: f64,
    pub gravity: f64,
    pub terminal_velocity: f64,
    /// Momentum at or below which the actor noses up.
    pub rising_threshold: f64,
    pub rising_rotation: f64,
    pub rotation_decay: f64,
    pub min_rotation: f64,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct NumeralConfig {
    pub glyph_width: u32,
    pub glyph_height: u32,
    pub top: i32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field: PlayField { width: 432, height: 512 },
            tick_rate: 30,
            obstacles: ObstacleConfig::default(),
            actor: ActorConfig::default(),
            physics: PhysicsConfig::default(),
            numerals: NumeralConfig::default(),
        }
    }
}

impl Default for ObstacleConfig {
    fn default() -> Self {
        Self {
            width: 52,
            height: 320,
            gap: 110,
            speed: 3,
            pair_count: 3,
        }
    }
}

impl Default for ActorConfig {
    fn default() -> Self {
        Self {
            start_x: 50.0,
            start_y: None,
            width: 34,
            height: 24,
        }
    }
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            jump_impulse: -9.0,
            gravity: 0.9,
            terminal_velocity: 10.0,
            rising_threshold: -5.0,
            rising_rotation: 30.0,
            rotation_decay: 4.0,
            min_rotation: -45.0,
        }
    }
}

impl Default for NumeralConfig {
    fn default() -> Self {
        Self {
            glyph_width: 24,
            glyph_height: 36,
            top: 50,
        }
    }
}

impl GameConfig {
    pub fn load(path: &Path) -> GameResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_ron_str(&text, &path.display().to_string())?;
        tracing::info!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    pub fn from_ron_str(text: &str, origin: &str) -> GameResult<Self> {
        let config: Self = ron::from_str(text).map_err(|err| GameError::Parse {
            origin: origin.to_string(),
            message: err.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> GameResult<()> {
        fn invalid(field: &'static str, reason: &str) -> GameResult<()> {
            Err(GameError::InvalidConfig {
                field,
                reason: reason.to_string(),
            })
        }

        if self.field.width == 0 || self.field.height == 0 {
            return invalid("field", "play field must have a non-zero size");
        }
        if self.tick_rate == 0 {
            return invalid("tick_rate", "must be at least 1");
        }
        if self.obstacles.pair_count == 0 {
            return invalid("obstacles.pair_count", "must be at least 1");
        }
        if self.obstacles.width == 0 || self.obstacles.height == 0 {
            return invalid("obstacles", "obstacle size must be non-zero");
        }
        if self.obstacles.speed <= 0 {
            return invalid("obstacles.speed", "must be positive");
        }
        if self.obstacles.height < self.obstacles.gap {
            return invalid("obstacles.gap", "must not exceed the obstacle height");
        }
        if self.obstacles.gap > self.field.height {
            return invalid("obstacles.gap", "must fit inside the play field");
        }
        if self.actor.width == 0 || self.actor.height == 0 {
            return invalid("actor", "actor size must be non-zero");
        }
        let (x, y) = self.actor_start();
        let (left, top) = (x.floor(), y.floor());
        let fits = left >= 0.0
            && top >= 0.0
            && left + self.actor.width as f64 <= self.field.width as f64
            && top + self.actor.height as f64 <= self.field.height as f64;
        if !fits {
            return invalid("actor.start", "actor must start inside the play field");
        }
        if self.physics.terminal_velocity <= 0.0 {
            return invalid("physics.terminal_velocity", "must be positive");
        }
        Ok(())
    }

    pub fn tick_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.tick_rate.max(1) as f64)
    }

    pub fn actor_start(&self) -> (f64, f64) {
        let y = self
            .actor
            .start_y
            .unwrap_or(self.field.height as f64 / 2.0);
        (self.actor.start_x, y)
    }
}

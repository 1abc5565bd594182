use std::fmt;

use crate::entities::{Action, ActorKind};

#[derive(Debug)]
pub enum GameError {
    /// The animation table has no entry for a requested action.
    ConfigurationMissing { actor: ActorKind, action: Action },
    /// An animation entry expands to zero frames.
    EmptyAnimation { actor: ActorKind, action: Action },
    InvalidConfig { field: &'static str, reason: String },
    Parse { origin: String, message: String },
    /// The terminal or the audio device could not be acquired.
    ResourceUnavailable { resource: &'static str, reason: String },
    Io(std::io::Error),
}

pub type GameResult<T> = Result<T, GameError>;

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigurationMissing { actor, action } => {
                write!(f, "animation table has no `{action}` action for `{actor}`")
            }
            Self::EmptyAnimation { actor, action } => {
                write!(f, "animation `{actor}/{action}` has no frames")
            }
            Self::InvalidConfig { field, reason } => {
                write!(f, "invalid configuration value `{field}`: {reason}")
            }
            Self::Parse { origin, message } => write!(f, "failed to parse {origin}: {message}"),
            Self::ResourceUnavailable { resource, reason } => {
                write!(f, "{resource} unavailable: {reason}")
            }
            Self::Io(err) => write!(f, "i/o error: {err}"),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for GameError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}
